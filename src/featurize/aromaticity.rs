//! Aromaticity perception for rings written with alternating single and
//! double bonds.
//!
//! Each atom contributes a fixed number of pi electrons independent of the
//! ring it sits in. A ring whose atoms all contribute, and whose total is
//! `4n + 2`, has its atoms flagged aromatic and its bonds set to
//! [`BondOrder::Aromatic`]. A Kekulé ring then encodes exactly like the same
//! ring written in lowercase. Rings already written with aromatic bonds are
//! left as they are.

use tracing::trace;

use super::perceive::PerceivedMolecule;
use super::ring::Ring;
use crate::model::types::{BondOrder, Element};

/// Flags Kekulé rings of `molecule` that satisfy the `4n + 2` rule.
///
/// Expects ring flags to be set and `rings` to come from
/// [`mark_ring_bonds`](super::ring::mark_ring_bonds) on the same molecule.
pub fn perceive_aromaticity(molecule: &mut PerceivedMolecule, rings: &[Ring]) {
    let incident = molecule.incident_bonds();
    let electrons: Vec<Option<u8>> = (0..molecule.atom_count())
        .map(|idx| pi_electrons(molecule, &incident[idx], idx))
        .collect();

    let mut aromatic_atoms = vec![false; molecule.atom_count()];
    let mut aromatic_bonds = vec![false; molecule.bond_count()];

    for ring in rings {
        if !is_kekule(molecule, ring) || !is_huckel(ring, &electrons) {
            continue;
        }
        trace!(atoms = ?ring.atoms, "aromatic ring");
        for &atom in &ring.atoms {
            aromatic_atoms[atom] = true;
        }
        for &bond in &ring.bonds {
            aromatic_bonds[bond] = true;
        }
    }

    for (atom, flag) in molecule.atoms.iter_mut().zip(aromatic_atoms) {
        atom.aromatic |= flag;
    }
    for (bond, flag) in molecule.bonds.iter_mut().zip(aromatic_bonds) {
        if flag {
            bond.order = BondOrder::Aromatic;
        }
    }
}

fn is_kekule(molecule: &PerceivedMolecule, ring: &Ring) -> bool {
    ring.bonds.iter().all(|&b| {
        matches!(
            molecule.bonds[b].order,
            BondOrder::Single | BondOrder::Double
        )
    })
}

fn is_huckel(ring: &Ring, electrons: &[Option<u8>]) -> bool {
    let mut total = 0u32;
    for &atom in &ring.atoms {
        match electrons[atom] {
            Some(count) => total += u32::from(count),
            None => return false,
        }
    }
    total >= 2 && (total - 2) % 4 == 0
}

/// Pi electrons `idx` donates to any ring it belongs to, or `None` when the
/// atom cannot be part of an aromatic ring.
fn pi_electrons(molecule: &PerceivedMolecule, incident: &[usize], idx: usize) -> Option<u8> {
    let atom = &molecule.atoms[idx];
    let mut multiple = incident
        .iter()
        .map(|&b| &molecule.bonds[b])
        .filter(|b| b.order != BondOrder::Single);

    let first = multiple.next();
    if multiple.next().is_some() {
        return None;
    }

    match first {
        Some(bond) if bond.order == BondOrder::Double => {
            if bond.in_ring {
                return Some(1);
            }
            let partner = molecule.atoms[bond.partner(idx)].element;
            match (electronegativity(atom.element), electronegativity(partner)) {
                (Some(own), Some(other)) if other > own => Some(0),
                _ => None,
            }
        }
        Some(_) => None,
        None => lone_pair_or_vacancy(atom.element, atom.formal_charge, atom.total_degree()),
    }
}

/// Contribution of an atom without multiple bonds: a lone pair gives two,
/// an empty p orbital gives none.
fn lone_pair_or_vacancy(element: Element, charge: i8, total_degree: usize) -> Option<u8> {
    match (element, charge, total_degree) {
        (Element::C, -1, 3) => Some(2),
        (Element::C, 1, 3) | (Element::B, 0, 3) => Some(0),
        (Element::N | Element::P | Element::As, 0, 3) => Some(2),
        (Element::N | Element::P | Element::As, -1, 2) => Some(2),
        (Element::O | Element::S | Element::Se | Element::Te, 0, 2) => Some(2),
        _ => None,
    }
}

/// Pauling electronegativity for the elements that appear in aromatic rings
/// and their exocyclic partners.
fn electronegativity(element: Element) -> Option<f32> {
    Some(match element {
        Element::H => 2.20,
        Element::B => 2.04,
        Element::C => 2.55,
        Element::N => 3.04,
        Element::O => 3.44,
        Element::F => 3.98,
        Element::P => 2.19,
        Element::S => 2.58,
        Element::Cl => 3.16,
        Element::As => 2.18,
        Element::Se => 2.55,
        Element::Br => 2.96,
        Element::Te => 2.10,
        Element::I => 2.66,
        _ => return None,
    })
}
