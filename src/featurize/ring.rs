use std::collections::{BTreeSet, VecDeque};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::perceive::PerceivedMolecule;

/// One ring of a molecule: atoms along the cycle and the bonds that join
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    /// Atom indices in cycle order.
    pub atoms: Vec<usize>,
    /// Bond indices, sorted.
    pub bonds: Vec<usize>,
}

impl Ring {
    #[inline]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

/// Sets [`in_ring`](super::perceive::PerceivedBond::in_ring) on every bond
/// and returns the smallest ring through each ring bond, deduplicated.
///
/// A bond lies on a ring exactly when its two atoms stay connected without
/// it. Rings come back smallest first.
pub fn mark_ring_bonds(molecule: &mut PerceivedMolecule) -> Vec<Ring> {
    let graph = bond_graph(molecule);

    let mut seen: BTreeSet<Vec<usize>> = BTreeSet::new();
    let mut rings = Vec::new();

    for idx in 0..molecule.bond_count() {
        let (i, j) = (molecule.bonds[idx].i, molecule.bonds[idx].j);
        let Some(ring) = smallest_ring(&graph, idx, i, j) else {
            continue;
        };
        molecule.bonds[idx].in_ring = true;
        if seen.insert(ring.bonds.clone()) {
            rings.push(ring);
        }
    }

    rings.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.bonds.cmp(&b.bonds)));
    rings
}

/// Atoms as nodes, bonds as edges weighted by bond index.
fn bond_graph(molecule: &PerceivedMolecule) -> UnGraph<(), usize> {
    let mut graph =
        UnGraph::<(), usize>::with_capacity(molecule.atom_count(), molecule.bond_count());
    for _ in &molecule.atoms {
        graph.add_node(());
    }
    for (idx, bond) in molecule.bonds.iter().enumerate() {
        graph.add_edge(NodeIndex::new(bond.i), NodeIndex::new(bond.j), idx);
    }
    graph
}

/// Breadth-first search from `i` to `j` that may not use `bond` itself.
fn smallest_ring(graph: &UnGraph<(), usize>, bond: usize, i: usize, j: usize) -> Option<Ring> {
    let n = graph.node_count();
    let mut came_from: Vec<Option<(usize, usize)>> = vec![None; n];
    let mut visited = vec![false; n];
    visited[i] = true;

    let mut queue = VecDeque::from([i]);
    while let Some(node) = queue.pop_front() {
        if node == j {
            break;
        }
        for edge in graph.edges(NodeIndex::new(node)) {
            let via = *edge.weight();
            if via == bond {
                continue;
            }
            let next = if edge.source().index() == node {
                edge.target().index()
            } else {
                edge.source().index()
            };
            if !visited[next] {
                visited[next] = true;
                came_from[next] = Some((node, via));
                queue.push_back(next);
            }
        }
    }

    if !visited[j] {
        return None;
    }

    let mut atoms = vec![j];
    let mut bonds = vec![bond];
    let mut current = j;
    while let Some((previous, via)) = came_from[current] {
        atoms.push(previous);
        bonds.push(via);
        current = previous;
    }
    bonds.sort_unstable();

    Some(Ring { atoms, bonds })
}
