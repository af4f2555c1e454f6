//! Molecule featurization and pair-graph fusion.
//!
//! The stages run in a fixed order for every molecule:
//!
//! 1. [`perceive`] builds a [`PerceivedMolecule`] with neighbor lists, ring
//!    flags, aromaticity and hybridization states.
//! 2. [`MoleculeGraphBuilder`] encodes atoms and bonds into a
//!    [`MoleculeGraph`](crate::model::graph::MoleculeGraph) through an
//!    [`AtomEncoder`] and a [`BondEncoder`].
//! 3. [`GraphFusionEngine`] joins two molecule graphs and an outcome vector
//!    into a [`CombinedGraph`](crate::model::graph::CombinedGraph).

mod aromaticity;
mod builder;
mod encoder;
mod error;
mod fusion;
mod hybridization;
mod perceive;
mod ring;

pub use builder::MoleculeGraphBuilder;
pub use encoder::{
    ATOM_FEATURE_WIDTH, AtomEncoder, BOND_FEATURE_WIDTH, BondEncoder, DefaultAtomEncoder,
    DefaultBondEncoder, encode_atom, encode_bond,
};
pub use error::Error;
pub use fusion::{GraphFusionEngine, fuse};
pub use perceive::{PerceivedAtom, PerceivedBond, PerceivedMolecule};

use crate::model::graph::MoleculeGraph;
use crate::model::molecule::Molecule;

/// Runs connectivity, ring, aromaticity and hybridization perception on
/// `molecule`.
///
/// # Errors
///
/// Returns [`Error::InvalidStructure`] for a molecule without atoms or with
/// a bond that is out of bounds or joins an atom to itself.
pub fn perceive(molecule: &Molecule) -> Result<PerceivedMolecule, Error> {
    let mut perceived = PerceivedMolecule::from_molecule(molecule)?;

    let rings = ring::mark_ring_bonds(&mut perceived);
    aromaticity::perceive_aromaticity(&mut perceived, &rings);

    hybridization::assign_hybridization(&mut perceived);

    Ok(perceived)
}

/// Perceives `molecule` and builds its graph with the default encoders.
pub fn build_molecule_graph(molecule: &Molecule) -> Result<MoleculeGraph, Error> {
    let builder: MoleculeGraphBuilder = MoleculeGraphBuilder::default();
    builder.build(&perceive(molecule)?)
}
