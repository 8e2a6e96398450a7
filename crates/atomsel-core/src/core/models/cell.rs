use nalgebra::{Matrix3, Vector3};

/// The global periodic cell of a structure.
///
/// Rows of the underlying matrix are the box vectors A, B and C. A cell is
/// orthorhombic when every off-diagonal entry is exactly zero, in which case the
/// box lengths are the diagonal entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicCell {
    vectors: Matrix3<f64>,
}

impl Default for PeriodicCell {
    /// A cell with all box vectors zero, i.e. no periodicity.
    fn default() -> Self {
        Self {
            vectors: Matrix3::zeros(),
        }
    }
}

impl PeriodicCell {
    /// Creates a cell from a matrix whose rows are the box vectors.
    pub fn new(vectors: Matrix3<f64>) -> Self {
        Self { vectors }
    }

    /// Creates an orthorhombic cell with the given box lengths.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Self {
        Self {
            vectors: Matrix3::from_diagonal(&Vector3::new(a, b, c)),
        }
    }

    /// Returns the box vectors as matrix rows.
    pub fn vectors(&self) -> &Matrix3<f64> {
        &self.vectors
    }

    pub fn is_orthorhombic(&self) -> bool {
        (0..3).all(|i| (0..3).all(|j| i == j || self.vectors[(i, j)] == 0.0))
    }

    /// Returns the box lengths along x, y and z if the cell is orthorhombic.
    pub fn orthorhombic_lengths(&self) -> Option<Vector3<f64>> {
        self.is_orthorhombic().then(|| self.vectors.diagonal())
    }
}
