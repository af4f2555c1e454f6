use tracing::trace;

use super::encoder::{AtomEncoder, BondEncoder, DefaultAtomEncoder, DefaultBondEncoder};
use super::error::Error;
use super::perceive::PerceivedMolecule;
use crate::model::graph::{FeatureMatrix, MoleculeGraph};

/// Turns perceived molecules into attributed graphs.
///
/// Node `i` of the graph is atom `i` of the molecule. Each bond becomes the
/// directed pair `(i, j)`, `(j, i)` with the same feature row appended
/// twice, in bond enumeration order.
#[derive(Debug, Clone, Default)]
pub struct MoleculeGraphBuilder<A = DefaultAtomEncoder, B = DefaultBondEncoder> {
    atom_encoder: A,
    bond_encoder: B,
}

impl<A: AtomEncoder, B: BondEncoder> MoleculeGraphBuilder<A, B> {
    pub fn new(atom_encoder: A, bond_encoder: B) -> Self {
        Self {
            atom_encoder,
            bond_encoder,
        }
    }

    pub fn atom_width(&self) -> usize {
        self.atom_encoder.width()
    }

    pub fn bond_width(&self) -> usize {
        self.bond_encoder.width()
    }

    /// Builds the graph of `molecule`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStructure`] for a molecule without atoms or
    /// with a bond outside the atom range, and
    /// [`Error::FeatureWidthMismatch`] when an encoder writes a row that
    /// does not match its declared width.
    pub fn build(&self, molecule: &PerceivedMolecule) -> Result<MoleculeGraph, Error> {
        let n_atoms = molecule.atom_count();
        if n_atoms == 0 {
            return Err(Error::invalid_structure("molecule has no atoms"));
        }

        let mut nodes = FeatureMatrix::with_capacity(self.atom_encoder.width(), n_atoms);
        let mut row = Vec::with_capacity(self.atom_encoder.width());
        for atom in &molecule.atoms {
            row.clear();
            self.atom_encoder.encode(atom, &mut row);
            nodes
                .push_row(&row)
                .map_err(Error::from_row_width("atom features"))?;
        }

        let n_edges = 2 * molecule.bond_count();
        let mut edges = Vec::with_capacity(n_edges);
        let mut edge_features = FeatureMatrix::with_capacity(self.bond_encoder.width(), n_edges);
        for bond in &molecule.bonds {
            if bond.i >= n_atoms || bond.j >= n_atoms {
                return Err(Error::invalid_structure(format!(
                    "bond {}-{} references an atom out of bounds (n_atoms = {})",
                    bond.i, bond.j, n_atoms
                )));
            }

            row.clear();
            self.bond_encoder.encode(bond, &mut row);
            for _ in 0..2 {
                edge_features
                    .push_row(&row)
                    .map_err(Error::from_row_width("bond features"))?;
            }
            edges.push([bond.i, bond.j]);
            edges.push([bond.j, bond.i]);
        }

        trace!(nodes = n_atoms, edges = edges.len(), "built molecule graph");

        Ok(MoleculeGraph {
            nodes,
            edges,
            edge_features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::featurize::perceive;
    use crate::featurize::perceive::{PerceivedAtom, PerceivedBond};
    use crate::io::smiles;

    fn perceived(text: &str) -> PerceivedMolecule {
        perceive(&smiles::read(text).unwrap()).unwrap()
    }

    fn default_builder() -> MoleculeGraphBuilder {
        MoleculeGraphBuilder::default()
    }

    #[test]
    fn build_counts_match_molecule() {
        let builder = default_builder();
        for text in ["C", "CCO", "c1ccccc1", "CC(=O)Nc1ccc(O)cc1"] {
            let molecule = perceived(text);
            let graph = builder.build(&molecule).unwrap();
            assert_eq!(graph.node_count(), molecule.atom_count(), "{text}");
            assert_eq!(graph.edge_count(), 2 * molecule.bond_count(), "{text}");
            assert_eq!(graph.edge_features.rows(), graph.edge_count(), "{text}");
            assert_eq!(graph.node_width(), 3);
            assert_eq!(graph.edge_width(), 2);
        }
    }

    #[test]
    fn build_emits_both_directions_with_shared_features() {
        let graph = default_builder()
            .build(&perceived("C=O"))
            .unwrap();

        assert_eq!(graph.edges, vec![[0, 1], [1, 0]]);
        assert_eq!(graph.edge_features.row(0).unwrap(), &[2.0, 0.0]);
        assert_eq!(graph.edge_features.row(1).unwrap(), &[2.0, 0.0]);
        assert_eq!(graph.nodes.row(0).unwrap(), &[6.0, 1.0, 3.0]);
        assert_eq!(graph.nodes.row(1).unwrap(), &[8.0, 1.0, 3.0]);
    }

    #[test]
    fn build_keeps_bond_order_and_ring_flags() {
        let graph = default_builder()
            .build(&perceived("Cc1ccccc1"))
            .unwrap();

        assert_eq!(graph.edges[0], [0, 1]);
        assert_eq!(graph.edge_features.row(0).unwrap(), &[1.0, 0.0]);
        for r in 2..graph.edge_count() {
            assert_eq!(graph.edge_features.row(r).unwrap(), &[1.5, 1.0]);
        }
    }

    #[test]
    fn single_atom_graph_has_empty_but_shaped_edges() {
        let graph = default_builder()
            .build(&perceived("[Na+]"))
            .unwrap();
        assert_eq!(graph.node_count(), 1);
        assert!(graph.edges.is_empty());
        assert_eq!(graph.edge_features.shape(), (0, 2));
    }

    #[test]
    fn build_rejects_empty_and_dangling_structures() {
        let builder = default_builder();
        let empty = PerceivedMolecule {
            atoms: vec![],
            bonds: vec![],
        };
        assert!(matches!(
            builder.build(&empty),
            Err(Error::InvalidStructure { .. })
        ));

        let mut dangling = perceived("CC");
        dangling.bonds.push(PerceivedBond {
            i: 1,
            j: 7,
            order: crate::model::types::BondOrder::Single,
            in_ring: false,
        });
        assert!(matches!(
            builder.build(&dangling),
            Err(Error::InvalidStructure { .. })
        ));
    }

    struct BrokenEncoder;

    impl AtomEncoder for BrokenEncoder {
        fn width(&self) -> usize {
            4
        }

        fn encode(&self, atom: &PerceivedAtom, row: &mut Vec<f32>) {
            row.push(f32::from(atom.element.atomic_number()));
        }
    }

    #[test]
    fn encoder_writing_wrong_width_is_rejected() {
        let builder = MoleculeGraphBuilder::new(BrokenEncoder, DefaultBondEncoder);
        let err = builder.build(&perceived("CC")).unwrap_err();
        assert_eq!(err, Error::feature_width_mismatch("atom features", 4, 1));
    }
}
