//! Perceived molecular structures used during featurization.
//!
//! A [`PerceivedMolecule`] is the parsed [`Molecule`] extended with the
//! quantities the feature encoders read: per-atom degree, neighbor lists and
//! hybridization, and per-bond ring membership. It is built in stages, the
//! same way for every molecule: connectivity first, then ring detection,
//! then aromaticity, then hybridization.

use super::error::Error;
use crate::model::molecule::Molecule;
use crate::model::types::{BondOrder, Element, Hybridization};

/// Atom with connectivity and hybridization filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct PerceivedAtom {
    /// Chemical element.
    pub element: Element,
    /// Whether the atom was written as aromatic or sits in a perceived
    /// aromatic ring.
    pub aromatic: bool,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Total attached hydrogens (implicit or bracket count).
    pub hydrogens: u8,
    /// Indices of bonded neighbor atoms, in bond order.
    pub neighbors: Vec<usize>,
    /// Hybridization state; [`Hybridization::Unspecified`] until assigned.
    pub hybridization: Hybridization,
}

impl PerceivedAtom {
    /// Number of explicit graph neighbors. Hydrogens are not counted.
    #[inline]
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Degree including attached hydrogens.
    #[inline]
    pub fn total_degree(&self) -> usize {
        self.neighbors.len() + self.hydrogens as usize
    }
}

/// Bond with ring membership filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct PerceivedBond {
    /// First atom index.
    pub i: usize,
    /// Second atom index.
    pub j: usize,
    /// Bond order from the input structure, or [`BondOrder::Aromatic`] once
    /// the bond is perceived on an aromatic ring.
    pub order: BondOrder,
    /// Whether the bond lies on at least one ring.
    pub in_ring: bool,
}

impl PerceivedBond {
    /// Returns the atom on the other end of the bond from `atom`.
    #[inline]
    pub fn partner(&self, atom: usize) -> usize {
        if self.i == atom { self.j } else { self.i }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerceivedMolecule {
    pub atoms: Vec<PerceivedAtom>,
    pub bonds: Vec<PerceivedBond>,
}

impl PerceivedMolecule {
    /// Creates a perceived molecule from a parsed [`Molecule`].
    ///
    /// Copies atoms and bonds and builds the neighbor lists. Ring flags are
    /// cleared and hybridization is left unspecified for the later stages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStructure`] if the molecule has no atoms, or
    /// a bond references an out-of-bounds index or joins an atom to itself.
    pub fn from_molecule(molecule: &Molecule) -> Result<Self, Error> {
        if molecule.atoms.is_empty() {
            return Err(Error::invalid_structure("molecule has no atoms"));
        }

        let n_atoms = molecule.atoms.len();

        let mut atoms: Vec<PerceivedAtom> = molecule
            .atoms
            .iter()
            .map(|a| PerceivedAtom {
                element: a.element,
                aromatic: a.aromatic,
                formal_charge: a.formal_charge,
                hydrogens: a.hydrogens,
                neighbors: Vec::new(),
                hybridization: Hybridization::Unspecified,
            })
            .collect();

        let mut bonds = Vec::with_capacity(molecule.bonds.len());
        for bond in &molecule.bonds {
            if bond.i >= n_atoms || bond.j >= n_atoms {
                return Err(Error::invalid_structure(format!(
                    "bond {}-{} references an atom out of bounds (n_atoms = {})",
                    bond.i, bond.j, n_atoms
                )));
            }
            if bond.i == bond.j {
                return Err(Error::invalid_structure(format!(
                    "bond joins atom {} to itself",
                    bond.i
                )));
            }

            atoms[bond.i].neighbors.push(bond.j);
            atoms[bond.j].neighbors.push(bond.i);

            bonds.push(PerceivedBond {
                i: bond.i,
                j: bond.j,
                order: bond.order,
                in_ring: false,
            });
        }

        Ok(Self { atoms, bonds })
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Bond indices incident to each atom, in bond order.
    pub(crate) fn incident_bonds(&self) -> Vec<Vec<usize>> {
        let mut incident = vec![Vec::new(); self.atoms.len()];
        for (idx, bond) in self.bonds.iter().enumerate() {
            incident[bond.i].push(idx);
            incident[bond.j].push(idx);
        }
        incident
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::molecule::Bond;

    fn make_formaldehyde() -> Molecule {
        let mut mol = Molecule::new();
        mol.atoms.push(Atom::new(Element::C).with_hydrogens(2));
        mol.atoms.push(Atom::new(Element::O));
        mol.bonds.push(Bond::new(0, 1, BondOrder::Double));
        mol
    }

    #[test]
    fn from_molecule_builds_neighbor_lists() {
        let perceived = PerceivedMolecule::from_molecule(&make_formaldehyde()).unwrap();

        assert_eq!(perceived.atom_count(), 2);
        assert_eq!(perceived.bond_count(), 1);
        assert_eq!(perceived.atoms[0].neighbors, vec![1]);
        assert_eq!(perceived.atoms[1].neighbors, vec![0]);
        assert_eq!(perceived.atoms[0].degree(), 1);
        assert_eq!(perceived.atoms[0].total_degree(), 3);
        assert_eq!(perceived.atoms[0].hybridization, Hybridization::Unspecified);
        assert!(!perceived.bonds[0].in_ring);
        assert_eq!(perceived.bonds[0].partner(1), 0);
    }

    #[test]
    fn from_molecule_rejects_empty() {
        let err = PerceivedMolecule::from_molecule(&Molecule::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidStructure { .. }));
    }

    #[test]
    fn from_molecule_rejects_out_of_bounds_bond() {
        let mut mol = make_formaldehyde();
        mol.bonds.push(Bond::new(1, 5, BondOrder::Single));
        let err = PerceivedMolecule::from_molecule(&mol).unwrap_err();
        match err {
            Error::InvalidStructure { detail } => assert!(detail.contains("out of bounds")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_molecule_rejects_self_bond() {
        let mut mol = make_formaldehyde();
        mol.bonds.push(Bond::new(1, 1, BondOrder::Single));
        assert!(matches!(
            PerceivedMolecule::from_molecule(&mol),
            Err(Error::InvalidStructure { .. })
        ));
    }

    #[test]
    fn single_atom_without_bonds_is_valid() {
        let mut mol = Molecule::new();
        mol.atoms.push(Atom::new(Element::Na).with_charge(1));
        let perceived = PerceivedMolecule::from_molecule(&mol).unwrap();
        assert_eq!(perceived.atoms[0].degree(), 0);
        assert!(perceived.bonds.is_empty());
    }
}
