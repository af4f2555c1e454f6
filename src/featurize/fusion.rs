//! Fusion of two molecule graphs around a score node.
//!
//! The combined node index space is `[0, n1)` for the first molecule,
//! `[n1, n1 + n2)` for the second (shifted by `n1`) and `n1 + n2` for the
//! score node. Atom rows are right-padded with zeros to the score width;
//! the score row is the outcome vector itself. Edges are laid out as the
//! first molecule's bonds, the second molecule's shifted bonds, then the
//! score edges of each molecule: all `(atom, score)` pairs followed by all
//! `(score, atom)` pairs. Score edges carry all-ones feature rows.

use std::ops::Range;

use tracing::debug;

use super::error::Error;
use crate::model::graph::{CombinedGraph, EdgeIndex, FeatureMatrix, MoleculeGraph};
use crate::model::record::OUTCOME_WIDTH;

/// Builds [`CombinedGraph`]s for a fixed score-vector width.
///
/// Stateless apart from the width; the same engine can fuse any number of
/// pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphFusionEngine {
    score_width: usize,
}

impl Default for GraphFusionEngine {
    fn default() -> Self {
        Self::new(OUTCOME_WIDTH)
    }
}

impl GraphFusionEngine {
    pub fn new(score_width: usize) -> Self {
        Self { score_width }
    }

    #[inline]
    pub fn score_width(&self) -> usize {
        self.score_width
    }

    /// Fuses `first` and `second` with the outcome vector as score node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FeatureWidthMismatch`] when the outcome length is not
    /// the score width, when either graph's atom rows are wider than the
    /// score width, or when the two graphs' edge feature widths differ.
    /// Returns [`Error::InvalidStructure`] when both graphs are empty or a
    /// graph's edges do not match its nodes and edge features.
    pub fn fuse(
        &self,
        first: &MoleculeGraph,
        second: &MoleculeGraph,
        outcome: &[f32],
    ) -> Result<CombinedGraph, Error> {
        if outcome.len() != self.score_width {
            return Err(Error::feature_width_mismatch(
                "outcome vector",
                self.score_width,
                outcome.len(),
            ));
        }
        for graph in [first, second] {
            if graph.node_width() > self.score_width {
                return Err(Error::feature_width_mismatch(
                    "atom features",
                    self.score_width,
                    graph.node_width(),
                ));
            }
            validate_graph(graph)?;
        }
        if first.edge_width() != second.edge_width() {
            return Err(Error::feature_width_mismatch(
                "bond features",
                first.edge_width(),
                second.edge_width(),
            ));
        }

        let n1 = first.node_count();
        let n2 = second.node_count();
        if n1 + n2 == 0 {
            return Err(Error::invalid_structure("both molecule graphs are empty"));
        }
        let score_index = n1 + n2;

        let mut nodes = FeatureMatrix::with_capacity(self.score_width, score_index + 1);
        for row in first.nodes.iter_rows().chain(second.nodes.iter_rows()) {
            nodes
                .push_padded(row)
                .map_err(Error::from_row_width("atom features"))?;
        }
        nodes
            .push_row(outcome)
            .map_err(Error::from_row_width("outcome vector"))?;

        let edge_width = first.edge_width();
        let n_edges = first.edge_count() + second.edge_count() + 2 * score_index;
        let mut edges: EdgeIndex = Vec::with_capacity(n_edges);
        let mut edge_features = FeatureMatrix::with_capacity(edge_width, n_edges);

        edges.extend_from_slice(&first.edges);
        edges.extend(second.edges.iter().map(|&[s, t]| [s + n1, t + n1]));
        for row in first
            .edge_features
            .iter_rows()
            .chain(second.edge_features.iter_rows())
        {
            edge_features
                .push_row(row)
                .map_err(Error::from_row_width("bond features"))?;
        }

        push_score_edges(&mut edges, &mut edge_features, 0..n1, score_index);
        push_score_edges(&mut edges, &mut edge_features, n1..score_index, score_index);

        debug!(n1, n2, edges = edges.len(), "fused pair graph");

        Ok(CombinedGraph {
            nodes,
            edges,
            edge_features,
            n1,
            n2,
            score_index,
        })
    }
}

/// Fuses two molecule graphs with the default six-wide score node.
///
/// Equivalent to `GraphFusionEngine::default().fuse(first, second, outcome)`.
pub fn fuse(
    first: &MoleculeGraph,
    second: &MoleculeGraph,
    outcome: &[f32],
) -> Result<CombinedGraph, Error> {
    GraphFusionEngine::default().fuse(first, second, outcome)
}

fn validate_graph(graph: &MoleculeGraph) -> Result<(), Error> {
    if graph.edge_features.rows() != graph.edges.len() {
        return Err(Error::feature_width_mismatch(
            "edge feature rows",
            graph.edges.len(),
            graph.edge_features.rows(),
        ));
    }
    let n = graph.node_count();
    if let Some(edge) = graph.edges.iter().find(|e| e[0] >= n || e[1] >= n) {
        return Err(Error::invalid_structure(format!(
            "edge {}->{} references a node out of bounds (n_nodes = {})",
            edge[0], edge[1], n
        )));
    }
    Ok(())
}

fn push_score_edges(
    edges: &mut EdgeIndex,
    features: &mut FeatureMatrix,
    atoms: Range<usize>,
    score_index: usize,
) {
    edges.extend(atoms.clone().map(|i| [i, score_index]));
    edges.extend(atoms.clone().map(|i| [score_index, i]));
    for _ in 0..2 * atoms.len() {
        features.push_filled(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::featurize::build_molecule_graph;
    use crate::io::smiles;

    const OUTCOME: [f32; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

    fn make_graph(text: &str) -> MoleculeGraph {
        build_molecule_graph(&smiles::read(text).unwrap()).unwrap()
    }

    fn make_raw_graph(node_width: usize, n_nodes: usize, bonds: &[[usize; 2]]) -> MoleculeGraph {
        let mut nodes = FeatureMatrix::new(node_width);
        for i in 0..n_nodes {
            nodes.push_row(&vec![i as f32 + 1.0; node_width]).unwrap();
        }
        let mut edges = Vec::new();
        let mut edge_features = FeatureMatrix::new(2);
        for &[a, b] in bonds {
            edges.push([a, b]);
            edges.push([b, a]);
            edge_features.push_row(&[1.0, 0.0]).unwrap();
            edge_features.push_row(&[1.0, 0.0]).unwrap();
        }
        MoleculeGraph {
            nodes,
            edges,
            edge_features,
        }
    }

    #[test]
    fn two_diatomics_fuse_into_five_nodes_and_twelve_edges() {
        let g1 = make_graph("CO");
        let g2 = make_graph("CN");

        let combined = fuse(&g1, &g2, &OUTCOME).unwrap();

        assert_eq!(combined.node_count(), 5);
        assert_eq!(combined.nodes.shape(), (5, 6));
        assert_eq!(combined.edge_count(), 12);
        assert_eq!(combined.edge_features.shape(), (12, 2));
        assert_eq!(combined.score_index, 4);
        assert_eq!(combined.nodes.row(4).unwrap(), &OUTCOME);
        assert_eq!((combined.n1, combined.n2), (2, 2));
    }

    #[test]
    fn edge_layout_is_bonds_then_grouped_score_edges() {
        let g1 = make_graph("CO");
        let g2 = make_graph("CN");
        let combined = fuse(&g1, &g2, &OUTCOME).unwrap();

        assert_eq!(
            combined.edges,
            vec![
                [0, 1],
                [1, 0],
                [2, 3],
                [3, 2],
                [0, 4],
                [1, 4],
                [4, 0],
                [4, 1],
                [2, 4],
                [3, 4],
                [4, 2],
                [4, 3],
            ]
        );
        for r in 0..4 {
            assert_eq!(combined.edge_features.row(r).unwrap(), &[1.0, 0.0]);
        }
        for r in 4..12 {
            assert_eq!(combined.edge_features.row(r).unwrap(), &[1.0, 1.0]);
        }
    }

    #[test]
    fn single_atom_paired_with_itself() {
        let g = make_graph("C");
        let combined = fuse(&g, &g, &[0.0; 6]).unwrap();

        assert_eq!(combined.node_count(), 3);
        assert_eq!(combined.edge_count(), 4);
        assert!(combined.edges.iter().all(|&e| combined.is_score_edge(e)));
        assert_eq!(combined.edges, vec![[0, 2], [2, 0], [1, 2], [2, 1]]);
    }

    #[test]
    fn counts_follow_atom_and_bond_totals() {
        for (a, b) in [("c1ccccc1", "CCO"), ("CC(=O)O", "[Na+]"), ("C1CC1", "C1CC1")] {
            let g1 = make_graph(a);
            let g2 = make_graph(b);
            let combined = fuse(&g1, &g2, &OUTCOME).unwrap();

            let (n1, n2) = (g1.node_count(), g2.node_count());
            assert_eq!(combined.node_count(), n1 + n2 + 1);
            assert_eq!(
                combined.edge_count(),
                g1.edge_count() + g2.edge_count() + 2 * n1 + 2 * n2
            );
            assert!(combined.nodes.iter_rows().all(|row| row.len() == 6));
            assert_eq!(combined.edge_features.rows(), combined.edge_count());
        }
    }

    #[test]
    fn no_edge_crosses_between_molecules() {
        let combined = fuse(&make_graph("CCOC"), &make_graph("c1ccncc1"), &OUTCOME).unwrap();
        let first = combined.first_atoms();
        let second = combined.second_atoms();

        for &[s, t] in &combined.edges {
            let crosses = (first.contains(&s) && second.contains(&t))
                || (second.contains(&s) && first.contains(&t));
            assert!(!crosses, "edge {s}->{t} crosses molecules");
        }
    }

    #[test]
    fn atom_rows_are_padded_with_zeros() {
        let g1 = make_graph("CO");
        let g2 = make_graph("N");
        let combined = fuse(&g1, &g2, &OUTCOME).unwrap();

        for (idx, native) in g1.nodes.iter_rows().chain(g2.nodes.iter_rows()).enumerate() {
            let row = combined.nodes.row(idx).unwrap();
            assert_eq!(&row[..3], native);
            assert_eq!(&row[3..], &[0.0, 0.0, 0.0]);
        }
        assert_eq!(combined.score_row(), &OUTCOME);
    }

    #[test]
    fn fuse_is_deterministic() {
        let g1 = make_graph("CC(=O)Nc1ccc(O)cc1");
        let g2 = make_graph("CN1C=NC2=C1C(=O)N(C(=O)N2C)C");
        let a = fuse(&g1, &g2, &OUTCOME).unwrap();
        let b = fuse(&g1, &g2, &OUTCOME).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn outcome_length_must_match_score_width() {
        let g = make_graph("CC");
        let err = fuse(&g, &g, &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap_err();
        assert_eq!(err, Error::feature_width_mismatch("outcome vector", 6, 5));
    }

    #[test]
    fn score_width_below_atom_width_is_rejected() {
        let g = make_graph("CC");
        let err = GraphFusionEngine::new(2)
            .fuse(&g, &g, &[1.0, 2.0])
            .unwrap_err();
        assert_eq!(err, Error::feature_width_mismatch("atom features", 2, 3));
    }

    #[test]
    fn equal_widths_need_no_padding() {
        let g = make_graph("CC");
        let combined = GraphFusionEngine::new(3)
            .fuse(&g, &g, &[7.0, 8.0, 9.0])
            .unwrap();
        assert_eq!(combined.nodes.width(), 3);
        assert_eq!(combined.nodes.row(0).unwrap(), g.nodes.row(0).unwrap());
        assert_eq!(combined.score_row(), &[7.0, 8.0, 9.0]);
    }

    #[test]
    fn differing_bond_widths_are_rejected() {
        let g1 = make_raw_graph(3, 2, &[[0, 1]]);
        let mut g2 = make_raw_graph(3, 2, &[]);
        g2.edge_features = FeatureMatrix::new(4);

        let err = fuse(&g1, &g2, &OUTCOME).unwrap_err();
        assert_eq!(err, Error::feature_width_mismatch("bond features", 2, 4));
    }

    #[test]
    fn two_empty_graphs_are_rejected() {
        let empty = make_raw_graph(3, 0, &[]);
        assert!(matches!(
            fuse(&empty, &empty, &OUTCOME),
            Err(Error::InvalidStructure { .. })
        ));
    }

    #[test]
    fn one_empty_graph_still_fuses() {
        let empty = make_raw_graph(3, 0, &[]);
        let g = make_raw_graph(3, 2, &[[0, 1]]);
        let combined = fuse(&empty, &g, &OUTCOME).unwrap();
        assert_eq!((combined.n1, combined.n2, combined.score_index), (0, 2, 2));
        assert_eq!(combined.edges, vec![[0, 1], [1, 0], [0, 2], [1, 2], [2, 0], [2, 1]]);
    }

    #[test]
    fn inconsistent_graph_is_rejected() {
        let mut broken = make_raw_graph(3, 2, &[[0, 1]]);
        broken.edges.push([0, 9]);
        let g = make_raw_graph(3, 1, &[]);

        assert!(matches!(
            fuse(&broken, &g, &OUTCOME),
            Err(Error::FeatureWidthMismatch { .. })
        ));

        broken.edge_features.push_row(&[1.0, 0.0]).unwrap();
        assert!(matches!(
            fuse(&broken, &g, &OUTCOME),
            Err(Error::InvalidStructure { .. })
        ));
    }
}
