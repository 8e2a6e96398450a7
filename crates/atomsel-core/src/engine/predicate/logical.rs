//! Leaf and boolean nodes of the predicate tree.
//!
//! `and` narrows the working selection through both operands in turn, `or`
//! evaluates each operand against its own copy and merges them, and `not`
//! removes whatever its operand would have kept.

use super::{Evaluate, Predicate};
use crate::core::models::structure::StructureModel;
use crate::core::selection::Selection;
use crate::engine::context::EvalContext;
use crate::engine::error::SelectionError;

pub(super) fn eval_index(indices: &[usize], selection: &mut Selection) {
    let listed = Selection::from_indices(selection.len(), indices.iter().copied());
    selection.intersect(&listed);
}

pub(super) fn eval_not<S>(
    sub: &Predicate,
    context: &EvalContext<'_, S>,
    selection: &mut Selection,
) -> Result<(), SelectionError>
where
    S: StructureModel + ?Sized,
{
    let mut matched = selection.clone();
    sub.eval(context, &mut matched)?;
    selection.subtract(&matched);
    Ok(())
}

pub(super) fn eval_and<S>(
    lhs: &Predicate,
    rhs: &Predicate,
    context: &EvalContext<'_, S>,
    selection: &mut Selection,
) -> Result<(), SelectionError>
where
    S: StructureModel + ?Sized,
{
    lhs.eval(context, selection)?;
    rhs.eval(context, selection)
}

pub(super) fn eval_or<S>(
    lhs: &Predicate,
    rhs: &Predicate,
    context: &EvalContext<'_, S>,
    selection: &mut Selection,
) -> Result<(), SelectionError>
where
    S: StructureModel + ?Sized,
{
    let mut right = selection.clone();
    lhs.eval(context, selection)?;
    rhs.eval(context, &mut right)?;
    selection.union(&right);
    Ok(())
}
