//! Error types for graph construction and fusion.

use thiserror::Error;

use crate::model::graph::RowWidthError;

/// Errors raised while turning molecules into graphs or fusing them.
///
/// Both variants describe deterministic data problems: retrying with the
/// same input always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The molecular structure cannot be turned into a graph.
    ///
    /// Raised for molecules without atoms, bonds that reference atoms
    /// outside the molecule, and graphs whose edges point past their nodes.
    #[error("invalid molecular structure: {detail}")]
    InvalidStructure {
        /// Description of the problem.
        detail: String,
    },

    /// Two feature vectors that must line up have different widths.
    ///
    /// Raised when node rows would need negative padding, when the outcome
    /// vector does not match the score width, or when the two molecules'
    /// bond encoders disagree.
    #[error("feature width mismatch in {context}: expected {expected}, found {found}")]
    FeatureWidthMismatch {
        /// Which feature block disagreed.
        context: &'static str,
        /// Width required at this point.
        expected: usize,
        /// Width actually supplied.
        found: usize,
    },
}

impl Error {
    /// Creates an [`InvalidStructure`](Error::InvalidStructure) error.
    pub fn invalid_structure(detail: impl Into<String>) -> Self {
        Self::InvalidStructure {
            detail: detail.into(),
        }
    }

    /// Creates a [`FeatureWidthMismatch`](Error::FeatureWidthMismatch) error.
    ///
    /// # Arguments
    ///
    /// * `context` - Which feature block disagreed
    /// * `expected` - Width required at this point
    /// * `found` - Width actually supplied
    pub fn feature_width_mismatch(context: &'static str, expected: usize, found: usize) -> Self {
        Self::FeatureWidthMismatch {
            context,
            expected,
            found,
        }
    }

    pub(crate) fn from_row_width(context: &'static str) -> impl Fn(RowWidthError) -> Self {
        move |e| Self::feature_width_mismatch(context, e.expected, e.found)
    }
}
