//! Hybridization perception from the steric number.
//!
//! The steric number of an atom is its total degree (graph neighbors plus
//! attached hydrogens) plus its lone pairs. Lone pairs follow from the
//! element's valence electrons, the atom's total valence and its formal
//! charge. Four-coordinate atoms that take part in a π system are lowered
//! from sp3 to sp2: aromatic atoms, and lone-pair donors such as amide
//! nitrogens or phenol oxygens sitting next to a multiple bond.

use super::perceive::{PerceivedAtom, PerceivedMolecule};
use crate::model::types::{BondOrder, Element, Hybridization};

/// Assigns [`PerceivedAtom::hybridization`] for every atom.
///
/// Must run after the neighbor lists are built; ring flags are not needed.
pub fn assign_hybridization(molecule: &mut PerceivedMolecule) {
    let incident = molecule.incident_bonds();

    let states: Vec<Hybridization> = (0..molecule.atom_count())
        .map(|idx| classify(molecule, &incident, idx))
        .collect();

    for (atom, state) in molecule.atoms.iter_mut().zip(states) {
        atom.hybridization = state;
    }
}

fn classify(molecule: &PerceivedMolecule, incident: &[Vec<usize>], idx: usize) -> Hybridization {
    let atom = &molecule.atoms[idx];
    let valence = total_valence(
        atom,
        incident[idx].iter().map(|&b| molecule.bonds[b].order),
    );
    let lone_pairs = lone_pairs(atom, valence);
    let steric = if atom.element.atomic_number() <= 1 {
        atom.total_degree()
    } else {
        atom.total_degree() + lone_pairs
    };

    match steric {
        0 | 1 => Hybridization::S,
        2 => Hybridization::SP,
        3 => Hybridization::SP2,
        4 => {
            let conjugated = atom.aromatic
                || (lone_pairs > 0
                    && is_lone_pair_donor(atom.element)
                    && neighbors_pi_bond(molecule, incident, idx));
            if atom.total_degree() <= 3 && conjugated {
                Hybridization::SP2
            } else {
                Hybridization::SP3
            }
        }
        5 => Hybridization::SP3D,
        6 => Hybridization::SP3D2,
        _ => Hybridization::Unspecified,
    }
}

/// Sum of bond orders plus hydrogens, rounded to an integer valence.
///
/// Aromatic bonds count 1.5, so an aromatic atom's raw sum may overshoot
/// its allowed valences. It is then rounded down to the largest allowed
/// valence, provided that is no more than 1.5 below the raw sum.
fn total_valence(atom: &PerceivedAtom, orders: impl Iterator<Item = BondOrder>) -> i32 {
    let mut accum: f64 = orders.map(|o| o.value()).sum::<f64>() + f64::from(atom.hydrogens);

    let allowed = atom.element.default_valences();
    if atom.aromatic {
        if let Some(&first) = allowed.first() {
            let shift = f64::from(charge_shift(atom));
            let default = f64::from(first) + shift;
            if accum > default {
                let mut candidate = default;
                for &v in allowed {
                    let value = f64::from(v) + shift;
                    if value > accum {
                        break;
                    }
                    candidate = value;
                }
                if accum - candidate <= 1.5 {
                    accum = candidate;
                }
            }
        }
    }

    (accum + 0.1).round() as i32
}

/// How a formal charge moves the allowed valences of an element.
///
/// Cations of nitrogen-group elements gain a bond (N+ behaves like C),
/// carbon loses one for either sign, and electron-poor elements such as
/// boron move the other way.
fn charge_shift(atom: &PerceivedAtom) -> i32 {
    let charge = i32::from(atom.formal_charge);
    match atom.element {
        Element::C => -charge.abs(),
        e if e.valence_electrons() < 4 => -charge,
        _ => charge,
    }
}

fn lone_pairs(atom: &PerceivedAtom, valence: i32) -> usize {
    let outer = i32::from(atom.element.valence_electrons());
    let free = outer - (valence + i32::from(atom.formal_charge));
    (free / 2).max(0) as usize
}

fn is_lone_pair_donor(element: Element) -> bool {
    matches!(
        element,
        Element::N | Element::O | Element::P | Element::S | Element::As | Element::Se
    )
}

/// Whether any neighbor of `idx` carries a multiple bond to a third atom.
fn neighbors_pi_bond(molecule: &PerceivedMolecule, incident: &[Vec<usize>], idx: usize) -> bool {
    incident[idx].iter().any(|&via| {
        let neighbor = molecule.bonds[via].partner(idx);
        incident[neighbor]
            .iter()
            .any(|&b| b != via && molecule.bonds[b].order.is_multiple())
    })
}
