use super::cell::PeriodicCell;
use super::topology::{Bond, BondId};
use nalgebra::Point3;

/// Read-only view of a molecular structure consumed by the selection engine.
///
/// Atoms are addressed by their position `0..atom_count()`, the same indexing
/// used by [`Selection`](crate::core::selection::Selection). Implementations are
/// expected to answer every call in constant time; predicates call
/// [`position`](StructureModel::position) once per candidate atom.
pub trait StructureModel {
    /// Total number of atoms, i.e. the length of every selection over this structure.
    fn atom_count(&self) -> usize;

    /// Coordinates of the atom at `atom`.
    ///
    /// This is an unchecked accessor: `atom` must be below [`atom_count`](Self::atom_count)
    /// and implementations may panic otherwise.
    fn position(&self, atom: usize) -> Point3<f64>;

    /// Identifiers of the bonds incident to `atom`.
    fn bonds_for_atom(&self, atom: usize) -> &[BondId];

    /// The bond stored under `id`. Ids returned by
    /// [`bonds_for_atom`](Self::bonds_for_atom) are always valid.
    fn bond(&self, id: BondId) -> &Bond;

    /// The global periodic cell.
    fn global_cell(&self) -> &PeriodicCell;
}
