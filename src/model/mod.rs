//! Core data structures flowing through `catalyst-graph`.
//!
//! - [`types`] – Periodic table elements, bond orders and hybridization classes.
//! - [`atom`] – Atoms as written in a SMILES string, with hydrogen counts.
//! - [`molecule`] – Parsed molecules: atoms in source order plus bonds.
//! - [`graph`] – Feature matrices, single-molecule graphs and fused pair graphs.
//! - [`record`] – Dataset rows pairing two drugs with their outcome metrics.
//!
//! Parsed structure ([`Molecule`]) and learned-model input ([`CombinedGraph`])
//! are kept apart so the featurization stage is the only place that
//! turns one into the other.
//!
//! [`Molecule`]: molecule::Molecule
//! [`CombinedGraph`]: graph::CombinedGraph

pub mod atom;
pub mod graph;
pub mod molecule;
pub mod record;
pub mod types;
