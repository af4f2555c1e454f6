use std::collections::HashMap;
use std::str::FromStr;

use crate::io::{Format, error::Error};
use crate::model::{
    atom::Atom,
    molecule::{Bond, Molecule},
    types::{BondOrder, Element},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BondSymbol {
    Single,
    Double,
    Triple,
    Aromatic,
    Up,
    Down,
}

impl BondSymbol {
    fn from_byte(c: u8) -> Option<Self> {
        match c {
            b'-' => Some(BondSymbol::Single),
            b'=' => Some(BondSymbol::Double),
            b'#' => Some(BondSymbol::Triple),
            b':' => Some(BondSymbol::Aromatic),
            b'/' => Some(BondSymbol::Up),
            b'\\' => Some(BondSymbol::Down),
            _ => None,
        }
    }

    fn order(self) -> BondOrder {
        match self {
            BondSymbol::Single | BondSymbol::Up | BondSymbol::Down => BondOrder::Single,
            BondSymbol::Double => BondOrder::Double,
            BondSymbol::Triple => BondOrder::Triple,
            BondSymbol::Aromatic => BondOrder::Aromatic,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RingOpening {
    atom: usize,
    bond: Option<BondSymbol>,
    position: usize,
}

#[derive(Debug, Clone, Copy)]
struct BranchOpening {
    atom: usize,
    position: usize,
    atoms_before: usize,
}

/// Parses a SMILES string into a [`Molecule`].
///
/// Only the first whitespace-separated token is read, so a trailing name
/// column is ignored. Stereo descriptors are accepted and discarded.
/// Plain `[H]` atoms are folded into the hydrogen count of their neighbor;
/// isotopic and charged hydrogens stay explicit.
pub fn read(smiles: &str) -> Result<Molecule, Error> {
    let Some(token) = smiles.split_whitespace().next() else {
        return Err(Error::parse(Format::Smiles, 1, "SMILES string is empty"));
    };

    let mut parser = Parser::new(token.as_bytes());
    parser.run()?;
    let (mut molecule, organic) = parser.finish()?;
    assign_implicit_hydrogens(&mut molecule, &organic);
    fold_explicit_hydrogens(&mut molecule);
    Ok(molecule)
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    molecule: Molecule,
    organic: Vec<bool>,
    previous: Option<usize>,
    pending_bond: Option<(BondSymbol, usize)>,
    branches: Vec<BranchOpening>,
    rings: HashMap<u32, RingOpening>,
}

impl<'a> Parser<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            molecule: Molecule::new(),
            organic: Vec::new(),
            previous: None,
            pending_bond: None,
            branches: Vec::new(),
            rings: HashMap::new(),
        }
    }

    fn error(&self, position: usize, details: impl Into<String>) -> Error {
        Error::parse(Format::Smiles, position + 1, details)
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn run(&mut self) -> Result<(), Error> {
        while let Some(c) = self.peek() {
            match c {
                b'(' => self.open_branch()?,
                b')' => self.close_branch()?,
                b'.' => {
                    if let Some((_, p)) = self.pending_bond {
                        return Err(self.error(p, "bond symbol followed by '.'"));
                    }
                    self.previous = None;
                    self.pos += 1;
                }
                b'$' => return Err(self.error(self.pos, "quadruple bonds are not supported")),
                b'*' => return Err(self.error(self.pos, "wildcard atoms are not supported")),
                b'0'..=b'9' => {
                    let position = self.pos;
                    self.pos += 1;
                    self.ring_closure(u32::from(c - b'0'), position)?;
                }
                b'%' => {
                    let position = self.pos;
                    let number = self.read_percent_ring_number()?;
                    self.ring_closure(number, position)?;
                }
                b'[' => self.parse_bracket_atom()?,
                c if c.is_ascii_alphabetic() => self.parse_organic_atom()?,
                c => match BondSymbol::from_byte(c) {
                    Some(symbol) => {
                        if self.pending_bond.is_some() {
                            return Err(self.error(self.pos, "consecutive bond symbols"));
                        }
                        self.pending_bond = Some((symbol, self.pos));
                        self.pos += 1;
                    }
                    None => {
                        return Err(self.error(
                            self.pos,
                            format!("unexpected character '{}'", char::from(c)),
                        ));
                    }
                },
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<(Molecule, Vec<bool>), Error> {
        if let Some((_, p)) = self.pending_bond {
            return Err(self.error(p, "bond symbol at end of string"));
        }
        if let Some(branch) = self.branches.last() {
            return Err(self.error(branch.position, "unclosed branch"));
        }
        if let Some((number, opening)) = self.rings.iter().min_by_key(|(_, o)| o.position) {
            return Err(self.error(opening.position, format!("unclosed ring bond {number}")));
        }
        Ok((self.molecule, self.organic))
    }

    fn open_branch(&mut self) -> Result<(), Error> {
        let Some(atom) = self.previous else {
            return Err(self.error(self.pos, "branch opened before any atom"));
        };
        if self.pending_bond.is_some() {
            return Err(self.error(self.pos, "bond symbol before '('"));
        }
        self.branches.push(BranchOpening {
            atom,
            position: self.pos,
            atoms_before: self.molecule.atom_count(),
        });
        self.pos += 1;
        Ok(())
    }

    fn close_branch(&mut self) -> Result<(), Error> {
        let Some(branch) = self.branches.pop() else {
            return Err(self.error(self.pos, "unmatched ')'"));
        };
        if let Some((_, p)) = self.pending_bond {
            return Err(self.error(p, "bond symbol before ')'"));
        }
        if self.molecule.atom_count() == branch.atoms_before {
            return Err(self.error(branch.position, "empty branch"));
        }
        self.previous = Some(branch.atom);
        self.pos += 1;
        Ok(())
    }

    fn add_atom(&mut self, atom: Atom, organic: bool) -> Result<(), Error> {
        let index = self.molecule.atom_count();
        self.molecule.atoms.push(atom);
        self.organic.push(organic);

        match (self.previous, self.pending_bond.take()) {
            (Some(prev), Some((symbol, _))) => {
                self.molecule.bonds.push(Bond::new(prev, index, symbol.order()));
            }
            (Some(prev), None) => {
                let order = self.implicit_order(prev, index);
                self.molecule.bonds.push(Bond::new(prev, index, order));
            }
            (None, Some((_, p))) => {
                return Err(self.error(p, "bond symbol without a preceding atom"));
            }
            (None, None) => {}
        }

        self.previous = Some(index);
        Ok(())
    }

    fn implicit_order(&self, a: usize, b: usize) -> BondOrder {
        if self.molecule.atoms[a].aromatic && self.molecule.atoms[b].aromatic {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }

    fn ring_closure(&mut self, number: u32, position: usize) -> Result<(), Error> {
        let Some(current) = self.previous else {
            return Err(self.error(position, "ring bond without a preceding atom"));
        };
        let symbol = self.pending_bond.take().map(|(s, _)| s);

        let Some(opening) = self.rings.remove(&number) else {
            self.rings.insert(
                number,
                RingOpening {
                    atom: current,
                    bond: symbol,
                    position,
                },
            );
            return Ok(());
        };

        if opening.atom == current {
            return Err(self.error(
                position,
                format!("ring bond {number} connects an atom to itself"),
            ));
        }

        let order = match (opening.bond, symbol) {
            (Some(a), Some(b)) if a.order() != b.order() => {
                return Err(self.error(
                    position,
                    format!("conflicting bond symbols on ring bond {number}"),
                ));
            }
            (Some(a), _) => a.order(),
            (None, Some(b)) => b.order(),
            (None, None) => self.implicit_order(opening.atom, current),
        };

        if self.molecule.has_bond(opening.atom, current) {
            return Err(self.error(
                position,
                format!("ring bond {number} duplicates an existing bond"),
            ));
        }

        self.molecule
            .bonds
            .push(Bond::new(opening.atom, current, order));
        Ok(())
    }

    fn read_percent_ring_number(&mut self) -> Result<u32, Error> {
        let start = self.pos;
        self.pos += 1;

        if self.peek() == Some(b'(') {
            self.pos += 1;
            let number = self
                .read_number()
                .ok_or_else(|| self.error(start, "expected digits after '%('"))?;
            if self.peek() != Some(b')') {
                return Err(self.error(start, "unterminated '%(' ring bond number"));
            }
            self.pos += 1;
            return Ok(number);
        }

        let digits = self.bytes.get(self.pos..self.pos + 2);
        match digits {
            Some(&[a, b]) if a.is_ascii_digit() && b.is_ascii_digit() => {
                self.pos += 2;
                Ok(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
            }
            _ => Err(self.error(start, "'%' must be followed by two digits")),
        }
    }

    fn read_number(&mut self) -> Option<u32> {
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(c) = self.peek().filter(u8::is_ascii_digit) {
            value = value.saturating_mul(10).saturating_add(u32::from(c - b'0'));
            self.pos += 1;
        }
        (self.pos > start).then_some(value)
    }

    fn parse_organic_atom(&mut self) -> Result<(), Error> {
        let start = self.pos;
        let next = self.bytes.get(start + 1).copied();

        let (atom, len) = match (self.bytes[start], next) {
            (b'C', Some(b'l')) => (Atom::new(Element::Cl), 2),
            (b'B', Some(b'r')) => (Atom::new(Element::Br), 2),
            (b'B', _) => (Atom::new(Element::B), 1),
            (b'C', _) => (Atom::new(Element::C), 1),
            (b'N', _) => (Atom::new(Element::N), 1),
            (b'O', _) => (Atom::new(Element::O), 1),
            (b'P', _) => (Atom::new(Element::P), 1),
            (b'S', _) => (Atom::new(Element::S), 1),
            (b'F', _) => (Atom::new(Element::F), 1),
            (b'I', _) => (Atom::new(Element::I), 1),
            (b'b', _) => (Atom::aromatic(Element::B), 1),
            (b'c', _) => (Atom::aromatic(Element::C), 1),
            (b'n', _) => (Atom::aromatic(Element::N), 1),
            (b'o', _) => (Atom::aromatic(Element::O), 1),
            (b'p', _) => (Atom::aromatic(Element::P), 1),
            (b's', _) => (Atom::aromatic(Element::S), 1),
            (c, _) => {
                return Err(self.error(
                    start,
                    format!(
                        "'{}' is not an organic-subset atom; use a bracket atom",
                        char::from(c)
                    ),
                ));
            }
        };

        self.pos += len;
        self.add_atom(atom, true)
    }

    fn parse_bracket_atom(&mut self) -> Result<(), Error> {
        let start = self.pos;
        self.pos += 1;

        let isotope = match self.read_number() {
            Some(mass) => Some(
                u16::try_from(mass).map_err(|_| self.error(start, "isotope mass is too large"))?,
            ),
            None => None,
        };

        let (element, aromatic) = self.read_bracket_symbol(start)?;
        self.skip_chirality();

        let hydrogens = if self.peek() == Some(b'H') {
            self.pos += 1;
            let count = self.read_number().unwrap_or(1);
            u8::try_from(count).map_err(|_| self.error(start, "hydrogen count is too large"))?
        } else {
            0
        };

        let formal_charge = self.read_charge(start)?;

        if self.peek() == Some(b':') {
            self.pos += 1;
            if self.read_number().is_none() {
                return Err(self.error(self.pos, "atom class must be a number"));
            }
        }

        match self.peek() {
            Some(b']') => self.pos += 1,
            Some(c) => {
                return Err(self.error(
                    self.pos,
                    format!("unexpected character '{}' in bracket atom", char::from(c)),
                ));
            }
            None => return Err(self.error(start, "unterminated bracket atom")),
        }

        let atom = Atom {
            element,
            aromatic,
            formal_charge,
            hydrogens,
            isotope,
        };
        self.add_atom(atom, false)
    }

    fn read_bracket_symbol(&mut self, start: usize) -> Result<(Element, bool), Error> {
        let Some(first) = self.peek() else {
            return Err(self.error(start, "unterminated bracket atom"));
        };

        if first == b'*' {
            return Err(self.error(self.pos, "wildcard atoms are not supported"));
        }

        if first.is_ascii_lowercase() {
            let two = self.bytes.get(self.pos..self.pos + 2);
            let aromatic_two = match two {
                Some(b"se") => Some(Element::Se),
                Some(b"as") => Some(Element::As),
                Some(b"te") => Some(Element::Te),
                _ => None,
            };
            if let Some(element) = aromatic_two {
                self.pos += 2;
                return Ok((element, true));
            }

            let element = match first {
                b'b' => Element::B,
                b'c' => Element::C,
                b'n' => Element::N,
                b'o' => Element::O,
                b'p' => Element::P,
                b's' => Element::S,
                _ => {
                    return Err(self.error(
                        self.pos,
                        format!("'{}' is not an aromatic element", char::from(first)),
                    ));
                }
            };
            self.pos += 1;
            return Ok((element, true));
        }

        if !first.is_ascii_uppercase() {
            return Err(self.error(self.pos, "expected an element symbol"));
        }

        if let Some(second) = self.bytes.get(self.pos + 1).filter(|b| b.is_ascii_lowercase()) {
            let symbol = [first, *second];
            let two_letter = std::str::from_utf8(&symbol)
                .ok()
                .and_then(|s| Element::from_str(s).ok());
            if let Some(element) = two_letter {
                self.pos += 2;
                return Ok((element, false));
            }
        }

        let symbol = [first];
        let element = std::str::from_utf8(&symbol)
            .ok()
            .and_then(|s| Element::from_str(s).ok())
            .ok_or_else(|| {
                self.error(
                    self.pos,
                    format!("unknown element symbol '{}'", char::from(first)),
                )
            })?;
        self.pos += 1;
        Ok((element, false))
    }

    fn skip_chirality(&mut self) {
        if self.peek() != Some(b'@') {
            return;
        }
        self.pos += 1;

        if self.peek() == Some(b'@') {
            self.pos += 1;
            return;
        }

        let tag = self.bytes.get(self.pos..self.pos + 2);
        if matches!(
            tag,
            Some(b"TH") | Some(b"AL") | Some(b"SP") | Some(b"TB") | Some(b"OH")
        ) {
            self.pos += 2;
            self.read_number();
        }
    }

    fn read_charge(&mut self, start: usize) -> Result<i8, Error> {
        let sign = match self.peek() {
            Some(b'+') => 1i32,
            Some(b'-') => -1i32,
            _ => return Ok(0),
        };
        let symbol = self.bytes[self.pos];
        self.pos += 1;

        let magnitude = match self.read_number() {
            Some(n) => i32::try_from(n).unwrap_or(i32::MAX),
            None => {
                let mut repeats = 1;
                while self.peek() == Some(symbol) {
                    repeats += 1;
                    self.pos += 1;
                }
                repeats
            }
        };

        if magnitude > 15 {
            return Err(self.error(start, "formal charge is out of range"));
        }
        // Bounded by the check above.
        Ok((sign * magnitude) as i8)
    }
}

fn assign_implicit_hydrogens(molecule: &mut Molecule, organic: &[bool]) {
    let mut bonded = vec![0u32; molecule.atom_count()];
    for bond in &molecule.bonds {
        let contribution = match bond.order {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        };
        bonded[bond.i] += contribution;
        bonded[bond.j] += contribution;
    }

    for (index, atom) in molecule.atoms.iter_mut().enumerate() {
        if !organic[index] {
            continue;
        }
        let used = bonded[index] + u32::from(atom.aromatic);
        let target = atom
            .element
            .default_valences()
            .iter()
            .map(|&v| u32::from(v))
            .find(|&v| v >= used);
        atom.hydrogens = target.map_or(0, |v| (v - used) as u8);
    }
}

/// Moves every plain hydrogen atom onto its one heavy neighbor and drops it
/// from the atom list, renumbering the remaining atoms in order.
fn fold_explicit_hydrogens(molecule: &mut Molecule) {
    let n = molecule.atom_count();
    let mut degree = vec![0usize; n];
    let mut partner: Vec<Option<usize>> = vec![None; n];
    for bond in &molecule.bonds {
        degree[bond.i] += 1;
        degree[bond.j] += 1;
        if bond.order == BondOrder::Single {
            partner[bond.i] = Some(bond.j);
            partner[bond.j] = Some(bond.i);
        }
    }

    let foldable: Vec<bool> = molecule
        .atoms
        .iter()
        .enumerate()
        .map(|(idx, atom)| {
            atom.element == Element::H
                && atom.isotope.is_none()
                && atom.formal_charge == 0
                && atom.hydrogens == 0
                && degree[idx] == 1
                && partner[idx].is_some_and(|p| molecule.atoms[p].element != Element::H)
        })
        .collect();
    if !foldable.contains(&true) {
        return;
    }

    for (fold, target) in foldable.iter().zip(&partner) {
        if let (true, Some(target)) = (*fold, *target) {
            let count = &mut molecule.atoms[target].hydrogens;
            *count = count.saturating_add(1);
        }
    }

    let mut remap = vec![0usize; n];
    let mut next = 0;
    for (idx, fold) in foldable.iter().enumerate() {
        if !fold {
            remap[idx] = next;
            next += 1;
        }
    }

    let atoms = std::mem::take(&mut molecule.atoms);
    molecule.atoms = atoms
        .into_iter()
        .zip(&foldable)
        .filter(|(_, fold)| !**fold)
        .map(|(atom, _)| atom)
        .collect();

    let bonds = std::mem::take(&mut molecule.bonds);
    molecule.bonds = bonds
        .into_iter()
        .filter(|b| !foldable[b.i] && !foldable[b.j])
        .map(|b| Bond::new(remap[b.i], remap[b.j], b.order))
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hydrogens(mol: &Molecule) -> Vec<u8> {
        mol.atoms.iter().map(|a| a.hydrogens).collect()
    }

    fn parse_error_position(smiles: &str) -> usize {
        match read(smiles) {
            Err(Error::Parse {
                format: Format::Smiles,
                position,
                ..
            }) => position,
            other => panic!("expected SMILES parse error for {smiles:?}, got {other:?}"),
        }
    }

    #[test]
    fn reads_ethanol_with_implicit_hydrogens() {
        let mol = read("CCO").unwrap();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(mol.bonds[0], Bond::new(0, 1, BondOrder::Single));
        assert_eq!(mol.bonds[1], Bond::new(1, 2, BondOrder::Single));
        assert_eq!(hydrogens(&mol), vec![3, 2, 1]);
    }

    #[test]
    fn reads_benzene_as_aromatic_ring() {
        let mol = read("c1ccccc1").unwrap();
        assert_eq!(mol.atom_count(), 6);
        assert_eq!(mol.bond_count(), 6);
        assert!(mol.atoms.iter().all(|a| a.aromatic && a.element == Element::C));
        assert!(mol.bonds.iter().all(|b| b.order == BondOrder::Aromatic));
        assert!(mol.has_bond(0, 5));
        assert_eq!(hydrogens(&mol), vec![1; 6]);
    }

    #[test]
    fn reads_branches_and_double_bonds() {
        let mol = read("CC(=O)O").unwrap();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(
            mol.bonds,
            vec![
                Bond::new(0, 1, BondOrder::Single),
                Bond::new(1, 2, BondOrder::Double),
                Bond::new(1, 3, BondOrder::Single),
            ]
        );
        assert_eq!(hydrogens(&mol), vec![3, 0, 0, 1]);
    }

    #[test]
    fn reads_two_letter_organic_atoms() {
        let mol = read("ClCBr").unwrap();
        let elements: Vec<_> = mol.atoms.iter().map(|a| a.element).collect();
        assert_eq!(elements, vec![Element::Cl, Element::C, Element::Br]);
        assert_eq!(hydrogens(&mol), vec![0, 2, 0]);
    }

    #[test]
    fn reads_bracket_atom_properties() {
        let mol = read("[NH4+]").unwrap();
        assert_eq!(mol.atom_count(), 1);
        let atom = &mol.atoms[0];
        assert_eq!(atom.element, Element::N);
        assert_eq!(atom.hydrogens, 4);
        assert_eq!(atom.formal_charge, 1);

        let mol = read("[13CH3]O").unwrap();
        assert_eq!(mol.atoms[0].isotope, Some(13));
        assert_eq!(mol.atoms[0].hydrogens, 3);
        assert_eq!(mol.atoms[1].hydrogens, 1);

        let mol = read("[O-][N+](=O)C").unwrap();
        assert_eq!(mol.atoms[0].formal_charge, -1);
        assert_eq!(mol.atoms[1].formal_charge, 1);
        assert_eq!(mol.atoms[1].hydrogens, 0);

        let mol = read("[Fe+++]").unwrap();
        assert_eq!(mol.atoms[0].formal_charge, 3);
    }

    #[test]
    fn bracket_atoms_prefer_two_letter_symbols() {
        let mol = read("[Sc]").unwrap();
        assert_eq!(mol.atoms[0].element, Element::Sc);

        let mol = read("c1cc[se]c1").unwrap();
        assert_eq!(mol.atoms[3].element, Element::Se);
        assert!(mol.atoms[3].aromatic);
    }

    #[test]
    fn ignores_stereo_marks() {
        let mol = read("F/C=C/F").unwrap();
        assert_eq!(mol.bond_count(), 3);
        assert_eq!(mol.bonds[1].order, BondOrder::Double);

        let mol = read("[C@@H](F)(Cl)Br").unwrap();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(mol.atoms[0].hydrogens, 1);

        let mol = read("[C@TH1H](F)(Cl)Br").unwrap();
        assert_eq!(mol.atoms[0].hydrogens, 1);
    }

    #[test]
    fn ring_closure_takes_bond_symbol_from_either_end() {
        let mol = read("C=1CCCC1").unwrap();
        assert!(mol.bonds.contains(&Bond::new(0, 4, BondOrder::Double)));

        let mol = read("C1CCCC=1").unwrap();
        assert!(mol.bonds.contains(&Bond::new(0, 4, BondOrder::Double)));
        assert_eq!(mol.bond_count(), 5);
    }

    #[test]
    fn percent_ring_numbers() {
        let mol = read("C%10CC%10").unwrap();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 3);

        let mol = read("C%(123)CC%(123)").unwrap();
        assert_eq!(mol.bond_count(), 3);
    }

    #[test]
    fn dot_separates_components() {
        let mol = read("[Na+].[Cl-]").unwrap();
        assert_eq!(mol.atom_count(), 2);
        assert_eq!(mol.bond_count(), 0);
    }

    #[test]
    fn ignores_trailing_name_column() {
        let mol = read("  CCO ethanol").unwrap();
        assert_eq!(mol.atom_count(), 3);
    }

    #[test]
    fn reports_parse_errors_with_positions() {
        assert_eq!(parse_error_position(""), 1);
        assert_eq!(parse_error_position("C1CC"), 2);
        assert_eq!(parse_error_position("CC(C"), 3);
        assert_eq!(parse_error_position("C)C"), 2);
        assert_eq!(parse_error_position("CX"), 2);
        assert_eq!(parse_error_position("C="), 2);
        assert_eq!(parse_error_position("=C"), 1);
        assert_eq!(parse_error_position("[Fe"), 1);
        assert_eq!(parse_error_position("C11"), 3);
        assert_eq!(parse_error_position("C12CC12"), 7);
        assert_eq!(parse_error_position("C$C"), 2);
        assert_eq!(parse_error_position("*C"), 1);
        assert_eq!(parse_error_position("C()C"), 2);
        assert_eq!(parse_error_position("C=1CCCC#1"), 9);
    }

    #[test]
    fn folds_explicit_hydrogens_into_neighbors() {
        let mol = read("[H]OC([H])([H])[H]").unwrap();
        assert_eq!(mol.atom_count(), 2);
        assert_eq!(mol.bond_count(), 1);
        assert_eq!(mol.atoms[0].element, Element::O);
        assert_eq!(hydrogens(&mol), vec![1, 3]);
        assert_eq!(mol, read("OC").unwrap());
    }

    #[test]
    fn folded_hydrogen_joins_bracket_count() {
        let mol = read("[H][C@@](F)(Cl)Br").unwrap();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(mol.atoms[0].element, Element::C);
        assert_eq!(mol.atoms[0].hydrogens, 1);
        assert!(mol.has_bond(0, 3));
    }

    #[test]
    fn keeps_isotopic_charged_and_molecular_hydrogen() {
        let mol = read("[2H]C([2H])([2H])O").unwrap();
        assert_eq!(mol.atom_count(), 5);
        assert_eq!(mol.atoms[0].isotope, Some(2));
        assert_eq!(mol.atoms[1].hydrogens, 0);

        assert_eq!(read("[H][H]").unwrap().atom_count(), 2);
        assert_eq!(read("[H+]").unwrap().atom_count(), 1);
        assert_eq!(read("[H-].[Na+]").unwrap().atom_count(), 2);
    }
}
