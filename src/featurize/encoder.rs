use super::perceive::{PerceivedAtom, PerceivedBond};

/// Width of the default atom feature vector.
pub const ATOM_FEATURE_WIDTH: usize = 3;
/// Width of the default bond feature vector.
pub const BOND_FEATURE_WIDTH: usize = 2;

/// Maps one perceived atom to a fixed-width feature row.
///
/// Implementations must be deterministic and must append exactly
/// [`width`](AtomEncoder::width) values per call; the graph builder rejects
/// any other row length.
pub trait AtomEncoder {
    fn width(&self) -> usize;

    /// Appends the features of `atom` to `row`.
    fn encode(&self, atom: &PerceivedAtom, row: &mut Vec<f32>);
}

/// Maps one perceived bond to a fixed-width feature row.
pub trait BondEncoder {
    fn width(&self) -> usize;

    /// Appends the features of `bond` to `row`.
    fn encode(&self, bond: &PerceivedBond, row: &mut Vec<f32>);
}

/// `(atomic_number, degree, hybridization_ordinal)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultAtomEncoder;

impl AtomEncoder for DefaultAtomEncoder {
    #[inline]
    fn width(&self) -> usize {
        ATOM_FEATURE_WIDTH
    }

    fn encode(&self, atom: &PerceivedAtom, row: &mut Vec<f32>) {
        row.extend_from_slice(&encode_atom(atom));
    }
}

/// `(bond_order_value, in_ring_flag)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultBondEncoder;

impl BondEncoder for DefaultBondEncoder {
    #[inline]
    fn width(&self) -> usize {
        BOND_FEATURE_WIDTH
    }

    fn encode(&self, bond: &PerceivedBond, row: &mut Vec<f32>) {
        row.extend_from_slice(&encode_bond(bond));
    }
}

/// Atomic number, explicit degree and hybridization ordinal of `atom`.
pub fn encode_atom(atom: &PerceivedAtom) -> [f32; ATOM_FEATURE_WIDTH] {
    [
        f32::from(atom.element.atomic_number()),
        atom.degree() as f32,
        f32::from(atom.hybridization.ordinal()),
    ]
}

/// Continuous bond order and ring flag of `bond`.
pub fn encode_bond(bond: &PerceivedBond) -> [f32; BOND_FEATURE_WIDTH] {
    [
        bond.order.value() as f32,
        if bond.in_ring { 1.0 } else { 0.0 },
    ]
}
