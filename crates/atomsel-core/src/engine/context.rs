use super::config::SelectionConfig;
use crate::core::models::structure::StructureModel;
use crate::core::selection::Selection;

/// Everything a predicate reads while it is evaluated: the structure being
/// queried and the engine configuration.
///
/// A context is cheap to copy and holds no mutable state, so one context can
/// drive any number of evaluations.
#[derive(Debug)]
pub struct EvalContext<'a, S>
where
    S: StructureModel + ?Sized,
{
    pub structure: &'a S,
    pub config: SelectionConfig,
}

impl<S> Clone for EvalContext<'_, S>
where
    S: StructureModel + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for EvalContext<'_, S> where S: StructureModel + ?Sized {}

impl<'a, S> EvalContext<'a, S>
where
    S: StructureModel + ?Sized,
{
    /// Creates a context with the default configuration.
    pub fn new(structure: &'a S) -> Self {
        Self::with_config(structure, SelectionConfig::default())
    }

    pub fn with_config(structure: &'a S, config: SelectionConfig) -> Self {
        Self { structure, config }
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.structure.atom_count()
    }

    /// A selection over every atom of the structure, the starting point of every
    /// sub-predicate evaluation.
    pub fn full_selection(&self) -> Selection {
        Selection::full(self.atom_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::system::MolecularSystem;
    use crate::engine::config::NearestSearchConfigBuilder;
    use nalgebra::Point3;

    #[test]
    fn full_selection_covers_every_atom() {
        let mut system = MolecularSystem::new();
        for _ in 0..4 {
            system.add_atom(Atom::new(Point3::origin()));
        }
        let context = EvalContext::new(&system);

        assert_eq!(context.atom_count(), 4);
        assert_eq!(context.full_selection().count(), 4);
        assert_eq!(context.config, SelectionConfig::default());
    }

    #[test]
    fn with_config_keeps_custom_search_settings() {
        let system = MolecularSystem::new();
        let nearest = NearestSearchConfigBuilder::new()
            .seed_radius(6.0)
            .build()
            .unwrap();
        let context = EvalContext::with_config(&system, SelectionConfig { nearest });
        let copy = context;

        assert_eq!(copy.config.nearest.seed_radius, 6.0);
        assert_eq!(context.atom_count(), 0);
    }
}
