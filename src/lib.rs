//! Fused molecular graphs for drug-combination learning.
//! It turns pairs of SMILES strings plus their measured combination outcomes into a single
//! attributed graph per pair, ready for a graph neural network.
//!
//! # Features
//!
//! - **SMILES parsing** - OpenSMILES organic subset, bracket atoms, branches,
//!   ring closures and aromatic notation, with implicit hydrogens
//! - **Chemical perception** - Atom degree, ring bonds, and hybridization
//!   from steric numbers
//! - **Graph construction** - Atom features `(atomic number, degree,
//!   hybridization)` and bond features `(bond order, in ring)`, with
//!   pluggable encoders
//! - **Pair fusion** - Two molecule graphs joined by a score node that holds
//!   the outcome metrics and connects to every atom
//! - **Batch processing** - CSV datasets in, JSON / JSON Lines out, with
//!   per-row failure reporting
//!
//! # Quick Start
//!
//! Build one graph per molecule with [`build_molecule_graph`], then join the
//! two with [`fuse`]:
//!
//! ```
//! use catalyst_graph::{build_molecule_graph, fuse, io::smiles};
//! use catalyst_graph::{FeaturizeError, Hybridization};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Ethanol and water
//! let ethanol = smiles::read("CCO")?;
//! let water = smiles::read("O")?;
//!
//! let g1 = build_molecule_graph(&ethanol)?;
//! let g2 = build_molecule_graph(&water)?;
//!
//! // Nodes: (atomic number, degree, hybridization ordinal)
//! assert_eq!(g1.nodes.row(1), Some(&[6.0, 2.0, Hybridization::SP3.ordinal() as f32][..]));
//!
//! // Bonds appear in both directions
//! assert_eq!(g1.edges, vec![[0, 1], [1, 0], [1, 2], [2, 1]]);
//!
//! // CSS, Synergy_ZIP, Synergy_Bliss, Synergy_Loewe, Synergy_HSA, Y
//! let outcome: [f32; 6] = [12.5, -4.1, 2.0, -9.3, 1.7, 0.0];
//! let combined = fuse(&g1, &g2, &outcome)?;
//!
//! // 3 + 1 atoms plus the score node
//! assert_eq!(combined.node_count(), 5);
//! assert_eq!(combined.score_index, 4);
//! assert_eq!(combined.score_row(), &outcome);
//!
//! // Atom rows are zero-padded to the score width
//! assert_eq!(combined.nodes.row(3), Some(&[8.0, 0.0, 4.0, 0.0, 0.0, 0.0][..]));
//!
//! // 2 ethanol bonds x 2 directions + 4 atoms x 2 score edges
//! assert_eq!(combined.edge_count(), 12);
//!
//! // Outcome vectors must match the score width
//! let err = fuse(&g1, &g2, &outcome[..5]).unwrap_err();
//! assert!(matches!(err, FeaturizeError::FeatureWidthMismatch { .. }));
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`io`] - SMILES reader, CSV dataset reader, JSON and DOT writers
//! - [`pipeline`] - Row-by-row batch processing with per-row failures
//! - [`fuse`] / [`GraphFusionEngine`] - Pair fusion around the score node
//! - [`MoleculeGraphBuilder`] - Molecule to graph with pluggable encoders
//!
//! # Data Types
//!
//! ## Structures
//!
//! - [`Molecule`] - Parsed atoms and bonds
//! - [`Atom`] - Element, aromaticity, charge, and hydrogen count
//! - [`Bond`] - Bond between two atoms with bond order
//! - [`Element`] - Chemical element (H through Og)
//! - [`BondOrder`] - Bond order (Single, Double, Triple, Aromatic)
//! - [`Hybridization`] - Hybridization class with stable ordinals
//! - [`PerceivedMolecule`] - Molecule with degree, ring, and hybridization
//!   information
//!
//! ## Graphs
//!
//! - [`FeatureMatrix`] - Row-major `f32` matrix with an explicit width
//! - [`MoleculeGraph`] - Graph of a single molecule
//! - [`CombinedGraph`] - Two molecule graphs and a score node
//!
//! ## Records
//!
//! - [`PairRecord`] - One dataset row: two SMILES and the outcome metrics
//! - [`DrugSlot`] - First or second molecule of a pair

mod featurize;
mod model;

pub mod io;
pub mod pipeline;

pub use model::atom::Atom;
pub use model::graph::{CombinedGraph, EdgeIndex, FeatureMatrix, MoleculeGraph, RowWidthError};
pub use model::molecule::{Bond, Molecule};
pub use model::record::{DrugSlot, OUTCOME_COLUMNS, OUTCOME_WIDTH, PairRecord};
pub use model::types::{
    BondOrder, Element, Hybridization, ParseBondOrderError, ParseElementError,
};

pub use featurize::{
    ATOM_FEATURE_WIDTH, AtomEncoder, BOND_FEATURE_WIDTH, BondEncoder, DefaultAtomEncoder,
    DefaultBondEncoder, GraphFusionEngine, MoleculeGraphBuilder, PerceivedAtom, PerceivedBond,
    PerceivedMolecule, build_molecule_graph, encode_atom, encode_bond, fuse, perceive,
};

pub use featurize::Error as FeaturizeError;
