use nalgebra::Point3;

/// An atom as seen by the selection engine.
///
/// Only the data that spatial predicates need is kept here. Connectivity lives
/// in the owning [`MolecularSystem`](super::system::MolecularSystem).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    pub fn new(position: Point3<f64>) -> Self {
        Self { position }
    }
}
