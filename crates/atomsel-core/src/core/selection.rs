use std::ops::Index;

/// A boolean mask over atom indices.
///
/// Selections are the unit of input and output of every predicate. Binary set
/// operations require both operands to have the same length; this is a caller
/// contract and is only checked in debug builds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    flags: Vec<bool>,
}

impl Selection {
    /// Creates an empty selection over `size` atoms.
    pub fn new(size: usize) -> Self {
        Self {
            flags: vec![false; size],
        }
    }

    /// Creates a selection over `size` atoms with every atom selected.
    pub fn full(size: usize) -> Self {
        Self {
            flags: vec![true; size],
        }
    }

    /// Creates a selection over `size` atoms with the given atoms selected.
    /// Indices at or beyond `size` are ignored.
    pub fn from_indices<I>(size: usize, indices: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut selection = Self::new(size);
        for index in indices {
            if index < size {
                selection.flags[index] = true;
            }
        }
        selection
    }

    /// Number of atoms covered by the mask, selected or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.flags[index]
    }

    #[inline]
    pub fn set(&mut self, index: usize, selected: bool) {
        self.flags[index] = selected;
    }

    /// Number of selected atoms.
    pub fn count(&self) -> usize {
        self.flags.iter().filter(|&&flag| flag).count()
    }

    /// Returns `true` if no atom is selected.
    pub fn none_selected(&self) -> bool {
        !self.flags.iter().any(|&flag| flag)
    }

    /// Deselects every atom, keeping the length.
    pub fn clear(&mut self) {
        self.flags.fill(false);
    }

    /// Keeps only atoms selected in both `self` and `other`.
    pub fn intersect(&mut self, other: &Selection) {
        debug_assert_eq!(self.len(), other.len());
        for (flag, &keep) in self.flags.iter_mut().zip(&other.flags) {
            *flag &= keep;
        }
    }

    /// Deselects every atom selected in `other`.
    pub fn subtract(&mut self, other: &Selection) {
        debug_assert_eq!(self.len(), other.len());
        for (flag, &remove) in self.flags.iter_mut().zip(&other.flags) {
            *flag &= !remove;
        }
    }

    /// Selects every atom selected in `other`.
    pub fn union(&mut self, other: &Selection) {
        debug_assert_eq!(self.len(), other.len());
        for (flag, &add) in self.flags.iter_mut().zip(&other.flags) {
            *flag |= add;
        }
    }

    /// Iterates over the indices of selected atoms in ascending order.
    pub fn iter_selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(index, &flag)| flag.then_some(index))
    }

    /// Collects the indices of selected atoms in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.iter_selected().collect()
    }

    /// Extends the mask by `additional` atoms with the given flag.
    pub(crate) fn extend(&mut self, additional: usize, selected: bool) {
        self.flags.resize(self.flags.len() + additional, selected);
    }

    /// Shortens the mask to its first `size` atoms.
    pub(crate) fn truncate(&mut self, size: usize) {
        self.flags.truncate(size);
    }
}

impl Index<usize> for Selection {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        &self.flags[index]
    }
}
