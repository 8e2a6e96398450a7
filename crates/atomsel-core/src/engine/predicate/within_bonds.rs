use super::{Evaluate, Predicate};
use crate::core::models::structure::StructureModel;
use crate::core::selection::Selection;
use crate::engine::context::EvalContext;
use crate::engine::error::SelectionError;
use std::fmt;
use tracing::{instrument, trace};

/// Selects atoms at most `bonds` bond hops away from the atoms matched by a
/// sub-predicate, the matched atoms themselves included.
#[derive(Debug, Clone, PartialEq)]
pub struct WithinBondsPredicate {
    bonds: usize,
    sub: Box<Predicate>,
}

impl WithinBondsPredicate {
    pub fn new(bonds: usize, sub: Predicate) -> Self {
        Self {
            bonds,
            sub: Box::new(sub),
        }
    }

    pub fn bonds(&self) -> usize {
        self.bonds
    }

    pub fn sub(&self) -> &Predicate {
        &self.sub
    }
}

impl Evaluate for WithinBondsPredicate {
    #[instrument(level = "debug", name = "within_bonds", skip_all, fields(bonds = self.bonds))]
    fn eval<S>(
        &self,
        context: &EvalContext<'_, S>,
        selection: &mut Selection,
    ) -> Result<(), SelectionError>
    where
        S: StructureModel + ?Sized,
    {
        let mut reached = context.full_selection();
        self.sub.eval(context, &mut reached)?;

        let structure = context.structure;
        let mut frontier = reached.indices();
        for hop in 0..self.bonds {
            if frontier.is_empty() {
                break;
            }
            let mut next = Vec::new();
            for &atom in &frontier {
                for &id in structure.bonds_for_atom(atom) {
                    let neighbor = structure.bond(id).other(atom);
                    if !reached[neighbor] {
                        reached.set(neighbor, true);
                        next.push(neighbor);
                    }
                }
            }
            trace!(hop, added = next.len(), "Expanded bond frontier.");
            frontier = next;
        }

        selection.intersect(&reached);
        Ok(())
    }
}

impl fmt::Display for WithinBondsPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "withinbonds {} of [{}]", self.bonds, self.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{line_system, random_system, system_from_points};
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn zero_hops_intersects_with_the_reference() {
        let system = line_system(8);
        let context = EvalContext::new(&system);
        let mut selection = Selection::from_indices(8, [1, 2, 5]);

        Predicate::within_bonds(0, Predicate::index([2, 3, 5]))
            .eval(&context, &mut selection)
            .unwrap();

        assert_eq!(selection.indices(), vec![2, 5]);
    }

    #[test]
    fn zero_hops_over_everything_leaves_the_selection_unchanged() {
        let system = random_system(50, 10.0, 4);
        let context = EvalContext::new(&system);
        let original = Selection::from_indices(50, (0..50).step_by(3));
        let mut selection = original.clone();

        Predicate::within_bonds(0, Predicate::All)
            .eval(&context, &mut selection)
            .unwrap();

        assert_eq!(selection, original);
    }

    #[test]
    fn expands_along_a_chain_one_hop_per_round() {
        let system = line_system(10);
        let context = EvalContext::new(&system);

        for (bonds, expected) in [
            (1, vec![3, 4, 5]),
            (2, vec![2, 3, 4, 5, 6]),
            (4, vec![0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (50, (0..10).collect()),
        ] {
            let query = Predicate::within_bonds(bonds, Predicate::index([4]));
            assert_eq!(query.select(&context).unwrap().indices(), expected, "{query}");
        }
    }

    #[test]
    fn rings_terminate_and_reach_every_member() {
        let mut system = system_from_points(&[[0.0; 3]; 6]);
        for i in 0..6 {
            system.add_bond(i, (i + 1) % 6).unwrap();
        }
        let context = EvalContext::new(&system);

        let two_hops = Predicate::within_bonds(2, Predicate::index([0]))
            .select(&context)
            .unwrap();
        assert_eq!(two_hops.indices(), vec![0, 1, 2, 4, 5]);

        let many_hops = Predicate::within_bonds(10, Predicate::index([0]))
            .select(&context)
            .unwrap();
        assert_eq!(many_hops.count(), 6);
    }

    #[test]
    fn disconnected_fragments_are_not_reached() {
        let mut system = system_from_points(&[[0.0; 3]; 5]);
        system.add_bond(0, 1).unwrap();
        system.add_bond(3, 4).unwrap();
        let context = EvalContext::new(&system);

        let selected = Predicate::within_bonds(3, Predicate::index([0]))
            .select(&context)
            .unwrap();
        assert_eq!(selected.indices(), vec![0, 1]);
    }

    #[test]
    fn matches_naive_set_expansion_on_random_graphs() {
        let mut system = random_system(120, 10.0, 17);
        for i in (0..120).step_by(5) {
            system.add_bond(i, (i * 7 + 3) % 120);
        }
        let context = EvalContext::new(&system);
        let seeds = [0, 40, 77];

        let mut expected: HashSet<usize> = seeds.into_iter().collect();
        for _ in 0..3 {
            let mut buffer = Vec::new();
            for &atom in &expected {
                buffer.extend(system.bonded_neighbors(atom));
            }
            expected.extend(buffer);
        }
        let mut expected: Vec<usize> = expected.into_iter().collect();
        expected.sort_unstable();

        let selected = Predicate::within_bonds(3, Predicate::index(seeds))
            .select(&context)
            .unwrap();
        assert_eq!(selected.indices(), expected);
    }
}
