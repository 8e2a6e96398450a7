use super::atom::Atom;
use super::cell::PeriodicCell;
use super::structure::StructureModel;
use super::topology::{Bond, BondId};
use nalgebra::Point3;
use std::collections::HashMap;

/// An in-memory molecular structure: atoms, bonds and the global periodic cell.
///
/// Atoms are stored contiguously and addressed by insertion index, which is also
/// their index in every [`Selection`](crate::core::selection::Selection) built over
/// the system. An incident-bond adjacency list is maintained alongside the bond
/// table so that topological queries never scan all bonds.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Primary storage for atoms, indexed by atom index.
    atoms: Vec<Atom>,
    /// List of all bonds in the system, indexed by bond id.
    bonds: Vec<Bond>,
    /// Lookup map from canonical endpoint pair to bond id, used to keep bonds unique.
    bond_id_map: HashMap<(usize, usize), BondId>,
    /// Incident bond ids for each atom.
    bond_adjacency: Vec<Vec<BondId>>,
    /// Box vectors of the periodic cell.
    global_cell: PeriodicCell,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system with a zero periodic cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an atom and returns its index.
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.bond_adjacency.push(Vec::new());
        self.atoms.len() - 1
    }

    /// Retrieves an atom by index.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the index is in range, otherwise `None`.
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Retrieves a mutable reference to an atom by index.
    pub fn atom_mut(&mut self, index: usize) -> Option<&mut Atom> {
        self.atoms.get_mut(index)
    }

    /// Returns an iterator over all atoms as `(index, &Atom)` pairs.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (usize, &Atom)> {
        self.atoms.iter().enumerate()
    }

    /// Returns a slice of all bonds in the system.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Adds a bond between two atoms.
    ///
    /// Adding a bond that already exists (in either endpoint order) is a no-op that
    /// returns the existing id.
    ///
    /// # Return
    ///
    /// Returns the bond id, or `None` if either index is out of range or both
    /// endpoints are the same atom.
    pub fn add_bond(&mut self, atom1: usize, atom2: usize) -> Option<BondId> {
        if atom1 == atom2 || atom1 >= self.atoms.len() || atom2 >= self.atoms.len() {
            return None;
        }
        let bond = Bond::new(atom1, atom2);
        if let Some(&existing) = self.bond_id_map.get(&bond.canonical()) {
            return Some(existing);
        }

        let id = self.bonds.len();
        self.bonds.push(bond);
        self.bond_id_map.insert(bond.canonical(), id);
        self.bond_adjacency[atom1].push(id);
        self.bond_adjacency[atom2].push(id);
        Some(id)
    }

    /// Returns an iterator over the atoms directly bonded to `atom`.
    ///
    /// The iterator is empty for an out-of-range index.
    pub fn bonded_neighbors(&self, atom: usize) -> impl Iterator<Item = usize> + '_ {
        self.bond_adjacency
            .get(atom)
            .map_or([].as_slice(), |ids| ids.as_slice())
            .iter()
            .map(move |&id| self.bonds[id].other(atom))
    }

    pub fn set_global_cell(&mut self, cell: PeriodicCell) {
        self.global_cell = cell;
    }
}

impl StructureModel for MolecularSystem {
    fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    fn position(&self, atom: usize) -> Point3<f64> {
        self.atoms[atom].position
    }

    fn bonds_for_atom(&self, atom: usize) -> &[BondId] {
        &self.bond_adjacency[atom]
    }

    fn bond(&self, id: BondId) -> &Bond {
        &self.bonds[id]
    }

    fn global_cell(&self) -> &PeriodicCell {
        &self.global_cell
    }
}
