//! # Predicate Module
//!
//! The selection predicate tree.
//!
//! Every node implements [`Evaluate`]: given a working [`Selection`], it removes
//! the atoms that do not satisfy the node (and, for the spatial nodes, may only
//! ever keep atoms that were already selected). Children are evaluated against a
//! fresh full selection and combined with set operations, so the tree is free of
//! shared state and each node owns its children outright.
//!
//! ## Node Kinds
//!
//! - [`logical`] - `all`, `none`, `index ...`, `not`, `and`, `or`
//! - [`within`] - `within`, `exwithin`, `pbwithin` (distance to a reference set)
//! - [`within_bonds`] - `withinbonds` (bond-graph distance to a reference set)
//! - [`nearest`] - `nearest k to` (the k closest atoms outside a reference set)
//!
//! Every node prints itself in the query syntax it was parsed from through
//! [`Display`](fmt::Display), e.g. `within 5 of [index 0 1]`.

pub mod logical;
pub mod nearest;
pub mod within;
pub mod within_bonds;

#[cfg(test)]
mod fixtures;

use super::context::EvalContext;
use super::error::SelectionError;
use crate::core::models::structure::StructureModel;
use crate::core::selection::Selection;
use nearest::NearestPredicate;
use std::fmt;
use within::{WithinMode, WithinPredicate};
use within_bonds::WithinBondsPredicate;

/// A node of the predicate tree that narrows a working selection.
pub trait Evaluate {
    /// Deselects the atoms of `selection` that do not satisfy this predicate.
    ///
    /// `selection` must span every atom of `context.structure`.
    fn eval<S>(
        &self,
        context: &EvalContext<'_, S>,
        selection: &mut Selection,
    ) -> Result<(), SelectionError>
    where
        S: StructureModel + ?Sized;
}

/// A selection predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Every atom.
    All,
    /// No atom.
    None,
    /// The listed atom indices.
    Index(Vec<usize>),
    Not(Box<Predicate>),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Within(WithinPredicate),
    WithinBonds(WithinBondsPredicate),
    Nearest(NearestPredicate),
}

impl Predicate {
    pub fn index<I>(indices: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self::Index(indices.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(sub: Predicate) -> Self {
        Self::Not(Box::new(sub))
    }

    pub fn and(lhs: Predicate, rhs: Predicate) -> Self {
        Self::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Predicate, rhs: Predicate) -> Self {
        Self::Or(Box::new(lhs), Box::new(rhs))
    }

    /// Atoms within `radius` of any atom selected by `sub`, including those atoms.
    pub fn within(radius: f64, sub: Predicate) -> Self {
        Self::Within(WithinPredicate::new(radius, WithinMode::Inclusive, sub))
    }

    /// Atoms within `radius` of any atom selected by `sub`, excluding those atoms.
    pub fn exwithin(radius: f64, sub: Predicate) -> Self {
        Self::Within(WithinPredicate::new(radius, WithinMode::Exclusive, sub))
    }

    /// Atoms within `radius` of any atom selected by `sub` under the periodic
    /// boundary conditions of the global cell.
    pub fn pbwithin(radius: f64, sub: Predicate) -> Self {
        Self::Within(WithinPredicate::new(radius, WithinMode::Periodic, sub))
    }

    /// Atoms at most `bonds` bonds away from any atom selected by `sub`.
    pub fn within_bonds(bonds: usize, sub: Predicate) -> Self {
        Self::WithinBonds(WithinBondsPredicate::new(bonds, sub))
    }

    /// The `k` atoms outside `sub` closest to any atom selected by `sub`.
    pub fn nearest(k: usize, sub: Predicate) -> Self {
        Self::Nearest(NearestPredicate::new(k, sub))
    }

    /// Evaluates the tree against the full selection and returns the result.
    pub fn select<S>(&self, context: &EvalContext<'_, S>) -> Result<Selection, SelectionError>
    where
        S: StructureModel + ?Sized,
    {
        let mut selection = context.full_selection();
        self.eval(context, &mut selection)?;
        Ok(selection)
    }
}

impl Evaluate for Predicate {
    fn eval<S>(
        &self,
        context: &EvalContext<'_, S>,
        selection: &mut Selection,
    ) -> Result<(), SelectionError>
    where
        S: StructureModel + ?Sized,
    {
        match self {
            Self::All => Ok(()),
            Self::None => {
                selection.clear();
                Ok(())
            }
            Self::Index(indices) => {
                logical::eval_index(indices, selection);
                Ok(())
            }
            Self::Not(sub) => logical::eval_not(sub, context, selection),
            Self::And(lhs, rhs) => logical::eval_and(lhs, rhs, context, selection),
            Self::Or(lhs, rhs) => logical::eval_or(lhs, rhs, context, selection),
            Self::Within(predicate) => predicate.eval(context, selection),
            Self::WithinBonds(predicate) => predicate.eval(context, selection),
            Self::Nearest(predicate) => predicate.eval(context, selection),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::None => write!(f, "none"),
            Self::Index(indices) => {
                write!(f, "index")?;
                for index in indices {
                    write!(f, " {index}")?;
                }
                Ok(())
            }
            Self::Not(sub) => write!(f, "not {sub}"),
            Self::And(lhs, rhs) => write!(f, "({lhs} and {rhs})"),
            Self::Or(lhs, rhs) => write!(f, "({lhs} or {rhs})"),
            Self::Within(predicate) => write!(f, "{predicate}"),
            Self::WithinBonds(predicate) => write!(f, "{predicate}"),
            Self::Nearest(predicate) => write!(f, "{predicate}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{line_system, random_system};
    use super::*;
    use crate::core::models::cell::PeriodicCell;

    #[test]
    fn predicates_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Predicate>();
    }

    #[test]
    fn display_prints_query_syntax() {
        let cases = [
            (Predicate::within(5.0, Predicate::index([0, 1])), "within 5 of [index 0 1]"),
            (Predicate::exwithin(2.5, Predicate::None), "exwithin 2.5 of [none]"),
            (Predicate::pbwithin(3.0, Predicate::All), "pbwithin 3 of [all]"),
            (
                Predicate::within_bonds(2, Predicate::not(Predicate::index([4]))),
                "withinbonds 2 of [not index 4]",
            ),
            (
                Predicate::nearest(3, Predicate::and(Predicate::All, Predicate::index([7]))),
                "nearest 3 to [(all and index 7)]",
            ),
            (
                Predicate::or(Predicate::None, Predicate::within(1.5, Predicate::All)),
                "(none or within 1.5 of [all])",
            ),
        ];
        for (predicate, expected) in cases {
            assert_eq!(predicate.to_string(), expected);
        }
    }

    #[test]
    fn select_starts_from_the_full_selection() {
        let system = line_system(6);
        let context = EvalContext::new(&system);

        assert_eq!(Predicate::All.select(&context).unwrap().count(), 6);
        assert_eq!(Predicate::None.select(&context).unwrap().count(), 0);
    }

    #[test]
    fn evaluating_twice_gives_identical_results() {
        let mut system = random_system(400, 20.0, 11);
        system.set_global_cell(PeriodicCell::orthorhombic(20.0, 20.0, 20.0));
        let context = EvalContext::new(&system);
        let reference = Predicate::index(0..25);
        let queries = [
            Predicate::within(3.0, reference.clone()),
            Predicate::exwithin(3.0, reference.clone()),
            Predicate::pbwithin(3.0, reference.clone()),
            Predicate::within_bonds(2, reference.clone()),
            Predicate::nearest(30, reference),
        ];

        for query in queries {
            let first = query.select(&context).unwrap();
            let second = query.select(&context).unwrap();
            assert_eq!(first, second, "{query} is not deterministic");
        }
    }

    #[test]
    fn nested_spatial_predicates_compose() {
        let system = line_system(10);
        let context = EvalContext::new(&system);

        // Atoms 3..=5 lie within 1 of atom 4; everything within 1 of those is 2..=6.
        let query = Predicate::within(1.0, Predicate::within(1.0, Predicate::index([4])));
        assert_eq!(query.select(&context).unwrap().indices(), vec![2, 3, 4, 5, 6]);

        let query = Predicate::exwithin(1.0, Predicate::within(1.0, Predicate::index([4])));
        assert_eq!(query.select(&context).unwrap().indices(), vec![2, 6]);
    }

    #[test]
    fn errors_propagate_through_the_tree() {
        let mut system = line_system(4);
        let mut vectors = *PeriodicCell::orthorhombic(10.0, 10.0, 10.0).vectors();
        vectors[(0, 1)] = 1.0;
        system.set_global_cell(PeriodicCell::new(vectors));
        let context = EvalContext::new(&system);

        let query = Predicate::and(
            Predicate::All,
            Predicate::within(2.0, Predicate::pbwithin(1.0, Predicate::index([0]))),
        );
        assert!(matches!(
            query.select(&context),
            Err(SelectionError::TriclinicCell { .. })
        ));
    }
}
