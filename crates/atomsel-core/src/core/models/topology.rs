/// Position of a bond in the owning structure's bond table.
pub type BondId = usize;

/// An undirected bond between two atoms, identified by their indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: usize, // Index of the first atom
    pub atom2: usize, // Index of the second atom
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize) -> Self {
        Self { atom1, atom2 }
    }

    /// Returns the endpoint opposite to `atom`.
    ///
    /// `atom` is expected to be one of the two endpoints; for any other index the
    /// first endpoint is returned.
    #[inline]
    pub fn other(&self, atom: usize) -> usize {
        if self.atom1 == atom {
            self.atom2
        } else {
            self.atom1
        }
    }

    /// Returns the endpoints ordered so that equal bonds compare equal
    /// regardless of construction order.
    pub(crate) fn canonical(&self) -> (usize, usize) {
        if self.atom1 <= self.atom2 {
            (self.atom1, self.atom2)
        } else {
            (self.atom2, self.atom1)
        }
    }
}
