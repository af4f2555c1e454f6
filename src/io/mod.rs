//! Reading drug-pair datasets and SMILES, writing fused graphs.
//!
//! - [`smiles`] – SMILES strings into [`Molecule`](crate::Molecule) values.
//! - [`dataset`] – CSV tables of drug pairs and outcome metrics.
//! - [`json`] – JSON and JSON Lines serialization of combined graphs.
//! - [`dot`] – Graphviz rendering of a combined graph for inspection.

use std::fmt;

pub mod error;

pub mod dataset;
pub mod dot;
pub mod json;
pub mod smiles;

pub use dataset::{ColumnSpec, DatasetReader};
pub use error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Smiles,
    Csv,
    Json,
    JsonLines,
    Dot,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Smiles => write!(f, "SMILES"),
            Format::Csv => write!(f, "CSV"),
            Format::Json => write!(f, "JSON"),
            Format::JsonLines => write!(f, "JSON Lines"),
            Format::Dot => write!(f, "DOT"),
        }
    }
}
