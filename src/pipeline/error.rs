use thiserror::Error;

use crate::featurize;
use crate::io;
use crate::model::record::DrugSlot;

/// Why a single dataset row could not be turned into a combined graph.
///
/// Every variant is scoped to one row; the batch carries on with the next.
#[derive(Debug, Error)]
pub enum Error {
    /// One of the two structure strings failed to parse.
    #[error("invalid structure in {slot} '{smiles}': {source}")]
    InvalidStructure {
        /// Which molecule of the pair failed.
        slot: DrugSlot,
        /// The offending structure string.
        smiles: String,
        /// Parser error with the failing column.
        source: io::Error,
    },

    /// Perception, graph building or fusion rejected the pair.
    #[error(transparent)]
    Featurize(#[from] featurize::Error),

    /// The row itself is unusable: missing fields, non-numeric metrics or a
    /// wrong number of outcome values.
    #[error("malformed row: {detail}")]
    MalformedRow {
        /// Description of the problem.
        detail: String,
    },
}

impl Error {
    pub fn invalid_structure(slot: DrugSlot, smiles: impl Into<String>, source: io::Error) -> Self {
        Self::InvalidStructure {
            slot,
            smiles: smiles.into(),
            source,
        }
    }

    pub fn malformed_row(detail: impl Into<String>) -> Self {
        Self::MalformedRow {
            detail: detail.into(),
        }
    }
}

/// A row that failed, with its zero-based data row index.
#[derive(Debug, Error)]
#[error("row {row}: {error}")]
pub struct RowFailure {
    pub row: usize,
    pub error: Error,
}

impl RowFailure {
    pub fn new(row: usize, error: impl Into<Error>) -> Self {
        Self {
            row,
            error: error.into(),
        }
    }
}
