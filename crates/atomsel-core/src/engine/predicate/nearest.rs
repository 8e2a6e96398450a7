//! The `nearest k to` predicate.
//!
//! Sorting every candidate by distance is avoided with an adaptive radius
//! search: the radius grows geometrically until at least `k` candidates are in
//! range, a few bisection steps narrow the bracket, and only the atoms between
//! the two bracketing radii (the fringe) are ranked by exact distance.

use super::within::{candidate_positions, find_within};
use super::{Evaluate, Predicate};
use crate::core::models::structure::StructureModel;
use crate::core::selection::Selection;
use crate::core::spatial::position_index::PositionIndex;
use crate::core::spatial::voxel_grid::VoxelGrid;
use crate::engine::context::EvalContext;
use crate::engine::error::SelectionError;
use nalgebra::Point3;
use std::fmt;
use tracing::{debug, instrument, trace};

/// Selects the `k` atoms outside a reference set that are closest to it.
///
/// If fewer than `k` atoms lie outside the reference set, all of them are
/// selected. Among atoms at exactly the same distance, lower indices win.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestPredicate {
    k: usize,
    sub: Box<Predicate>,
}

impl NearestPredicate {
    pub fn new(k: usize, sub: Predicate) -> Self {
        Self {
            k,
            sub: Box::new(sub),
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn sub(&self) -> &Predicate {
        &self.sub
    }
}

/// Radius queries of candidate atoms against the reference atoms.
struct RadiusProbe<'a> {
    reference_index: &'a PositionIndex,
    reference: &'a Selection,
    positions: &'a [Point3<f64>],
}

impl<'a> RadiusProbe<'a> {
    fn grid(&self, radius: f64) -> Result<VoxelGrid<'a>, SelectionError> {
        if !radius.is_finite() {
            return Err(SelectionError::SearchDiverged { radius });
        }
        self.reference_index
            .voxelize(radius)
            .ok_or(SelectionError::SearchDiverged { radius })
    }

    /// The atoms of `candidates` within `radius` of a reference atom. `radius`
    /// must not exceed the radius `grid` was built with.
    fn within(&self, grid: &VoxelGrid<'_>, candidates: &Selection, radius: f64) -> Selection {
        let mut selection = candidates.clone();
        find_within(
            self.positions,
            grid,
            &mut selection,
            self.reference,
            radius * radius,
        );
        selection
    }
}

impl Evaluate for NearestPredicate {
    #[instrument(level = "debug", name = "nearest", skip_all, fields(k = self.k))]
    fn eval<S>(
        &self,
        context: &EvalContext<'_, S>,
        selection: &mut Selection,
    ) -> Result<(), SelectionError>
    where
        S: StructureModel + ?Sized,
    {
        let mut reference = context.full_selection();
        self.sub.eval(context, &mut reference)?;
        if reference.none_selected() {
            selection.clear();
            return Ok(());
        }

        selection.subtract(&reference);
        let available = selection.count();
        if available <= self.k {
            debug!(available, "Not enough candidates; keeping all of them.");
            return Ok(());
        }
        if self.k == 0 {
            selection.clear();
            return Ok(());
        }

        let search = context.config.nearest;
        let reference_index = PositionIndex::from_selection(context.structure, &reference);
        let positions = candidate_positions(context.structure, selection);
        let probe = RadiusProbe {
            reference_index: &reference_index,
            reference: &reference,
            positions: &positions,
        };

        // `lower` always holds fewer than k atoms, `upper` at least k.
        let mut lower = Selection::new(selection.len());
        let mut lower_radius = 0.0;
        let mut upper_radius = search.seed_radius;
        let mut grid = probe.grid(upper_radius)?;
        let mut upper = probe.within(&grid, selection, upper_radius);
        while upper.count() < self.k {
            lower = upper;
            lower_radius = upper_radius;
            upper_radius *= search.growth_factor;
            grid = probe.grid(upper_radius)?;
            upper = probe.within(&grid, selection, upper_radius);
        }
        debug!(lower_radius, upper_radius, "Bracketed the search radius.");

        // Every midpoint lies below the bracketing radius, so its grid answers
        // all bisection trials.
        for _ in 0..search.bisection_steps {
            let middle = 0.5 * (lower_radius + upper_radius);
            let trial = probe.within(&grid, &upper, middle);
            trace!(radius = middle, count = trial.count(), "Bisection trial.");
            if trial.count() >= self.k {
                upper = trial;
                upper_radius = middle;
            } else {
                lower = trial;
                lower_radius = middle;
            }
        }

        let needed = self.k - lower.count();
        let mut fringe: Vec<(f64, usize)> = upper
            .iter_selected()
            .filter(|&atom| !lower[atom])
            .map(|atom| (reference_index.min_squared_distance(&positions[atom]), atom))
            .collect();
        debug!(
            lower_radius,
            upper_radius,
            inside = lower.count(),
            fringe = fringe.len(),
            needed,
            "Ranking fringe atoms by exact distance."
        );

        let by_distance =
            |a: &(f64, usize), b: &(f64, usize)| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1));
        if needed < fringe.len() {
            fringe.select_nth_unstable_by(needed, by_distance);
        }
        for &(_, atom) in fringe.iter().take(needed) {
            lower.set(atom, true);
        }

        *selection = lower;
        Ok(())
    }
}

impl fmt::Display for NearestPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nearest {} to [{}]", self.k, self.sub)
    }
}
