use std::ops::Range;

use serde::ser::{Serialize, SerializeSeq, Serializer};
use thiserror::Error;

/// Directed `(source, target)` node index pairs.
///
/// An empty list is still a list of pairs, so concatenation never has to
/// special-case molecules without bonds.
pub type EdgeIndex = Vec<[usize; 2]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("row of width {found} does not fit a matrix of width {expected}")]
pub struct RowWidthError {
    pub expected: usize,
    pub found: usize,
}

/// Row-major `f32` matrix with a fixed column width.
///
/// The width is part of the value even when no rows have been pushed, and
/// every row is exactly `width` wide.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    width: usize,
    rows: usize,
    data: Vec<f32>,
}

impl FeatureMatrix {
    pub fn new(width: usize) -> Self {
        Self::with_capacity(width, 0)
    }

    pub fn with_capacity(width: usize, rows: usize) -> Self {
        Self {
            width,
            rows: 0,
            data: Vec::with_capacity(width * rows),
        }
    }

    pub fn from_rows<R: AsRef<[f32]>>(width: usize, rows: &[R]) -> Result<Self, RowWidthError> {
        let mut matrix = Self::with_capacity(width, rows.len());
        for row in rows {
            matrix.push_row(row.as_ref())?;
        }
        Ok(matrix)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.width)
    }

    pub fn push_row(&mut self, row: &[f32]) -> Result<(), RowWidthError> {
        if row.len() != self.width {
            return Err(RowWidthError {
                expected: self.width,
                found: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        self.rows += 1;
        Ok(())
    }

    /// Appends `row` followed by trailing zeros up to the matrix width.
    pub fn push_padded(&mut self, row: &[f32]) -> Result<(), RowWidthError> {
        if row.len() > self.width {
            return Err(RowWidthError {
                expected: self.width,
                found: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        self.data
            .extend(std::iter::repeat_n(0.0, self.width - row.len()));
        self.rows += 1;
        Ok(())
    }

    pub fn push_filled(&mut self, value: f32) {
        self.data.extend(std::iter::repeat_n(value, self.width));
        self.rows += 1;
    }

    pub fn row(&self, index: usize) -> Option<&[f32]> {
        (index < self.rows).then(|| &self.data[index * self.width..(index + 1) * self.width])
    }

    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[f32]> + '_ {
        (0..self.rows).map(move |r| &self.data[r * self.width..(r + 1) * self.width])
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

impl Serialize for FeatureMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows))?;
        for row in self.iter_rows() {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

/// Attributed graph of a single molecule.
///
/// Node `i` is atom `i` of the source molecule. Every bond appears as two
/// directed edges sharing the same feature row.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeGraph {
    pub nodes: FeatureMatrix,
    pub edges: EdgeIndex,
    pub edge_features: FeatureMatrix,
}

impl MoleculeGraph {
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.rows()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn node_width(&self) -> usize {
        self.nodes.width()
    }

    #[inline]
    pub fn edge_width(&self) -> usize {
        self.edge_features.width()
    }
}

/// Two molecule graphs fused around a single score node.
///
/// Nodes `[0, n1)` belong to the first molecule, `[n1, n1 + n2)` to the
/// second, and `score_index == n1 + n2` is the score node whose feature row
/// holds the outcome metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedGraph {
    pub nodes: FeatureMatrix,
    pub edges: EdgeIndex,
    pub edge_features: FeatureMatrix,
    pub n1: usize,
    pub n2: usize,
    pub score_index: usize,
}

impl CombinedGraph {
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.rows()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn first_atoms(&self) -> Range<usize> {
        0..self.n1
    }

    pub fn second_atoms(&self) -> Range<usize> {
        self.n1..self.n1 + self.n2
    }

    pub fn score_row(&self) -> &[f32] {
        self.nodes.row(self.score_index).unwrap_or(&[])
    }

    #[inline]
    pub fn is_score_edge(&self, edge: [usize; 2]) -> bool {
        edge[0] == self.score_index || edge[1] == self.score_index
    }

    /// Edge list in coordinate layout: sources in the first row, targets in
    /// the second.
    pub fn edge_index_coo(&self) -> [Vec<usize>; 2] {
        let sources = self.edges.iter().map(|e| e[0]).collect();
        let targets = self.edges.iter().map(|e| e[1]).collect();
        [sources, targets]
    }
}
