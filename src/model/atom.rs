use super::types::Element;

/// A single atom as written in a linear notation string.
///
/// `hydrogens` is the total number of attached hydrogens: the written count
/// for bracket atoms, or the implicit count derived from default valences for
/// organic-subset atoms, plus any plain `[H]` atoms folded in. An isotopic
/// hydrogen such as `[2H]` is kept as its own atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: Element,
    pub aromatic: bool,
    pub formal_charge: i8,
    pub hydrogens: u8,
    /// Mass number from a bracket atom, if written.
    pub isotope: Option<u16>,
}

impl Atom {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            aromatic: false,
            formal_charge: 0,
            hydrogens: 0,
            isotope: None,
        }
    }

    pub fn aromatic(element: Element) -> Self {
        Self {
            aromatic: true,
            ..Self::new(element)
        }
    }

    pub fn with_hydrogens(mut self, hydrogens: u8) -> Self {
        self.hydrogens = hydrogens;
        self
    }

    pub fn with_charge(mut self, formal_charge: i8) -> Self {
        self.formal_charge = formal_charge;
        self
    }
}
