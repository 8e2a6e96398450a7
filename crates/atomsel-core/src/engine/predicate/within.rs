//! Distance-to-reference predicates: `within`, `exwithin` and `pbwithin`.

use super::{Evaluate, Predicate};
use crate::core::models::structure::StructureModel;
use crate::core::selection::Selection;
use crate::core::spatial::position_index::PositionIndex;
use crate::core::spatial::voxel_grid::VoxelGrid;
use crate::engine::context::EvalContext;
use crate::engine::error::SelectionError;
use itertools::iproduct;
use nalgebra::{Point3, Vector3};
use std::fmt;
use tracing::{debug, instrument};

/// How a within predicate treats the reference atoms and the periodic cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WithinMode {
    /// Reference atoms are part of the result (`within`).
    Inclusive,
    /// Reference atoms are never part of the result (`exwithin`).
    Exclusive,
    /// Distances follow the periodic images of an orthorhombic global cell (`pbwithin`).
    Periodic,
}

impl WithinMode {
    fn keyword(self) -> &'static str {
        match self {
            Self::Inclusive => "within",
            Self::Exclusive => "exwithin",
            Self::Periodic => "pbwithin",
        }
    }
}

/// Selects atoms within a distance of the atoms matched by a sub-predicate.
///
/// A non-positive radius involves no geometry: the result is the intersection
/// of the working selection with the reference atoms (empty for `exwithin`).
#[derive(Debug, Clone, PartialEq)]
pub struct WithinPredicate {
    radius: f64,
    mode: WithinMode,
    sub: Box<Predicate>,
}

impl WithinPredicate {
    pub fn new(radius: f64, mode: WithinMode, sub: Predicate) -> Self {
        Self {
            radius,
            mode,
            sub: Box::new(sub),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mode(&self) -> WithinMode {
        self.mode
    }

    pub fn sub(&self) -> &Predicate {
        &self.sub
    }

    fn eval_periodic(
        &self,
        box_lengths: &Vector3<f64>,
        reference_index: &PositionIndex,
        grid: &VoxelGrid<'_>,
        mut positions: Vec<Point3<f64>>,
        selection: &mut Selection,
        reference: &Selection,
    ) {
        let pad = Vector3::repeat(self.radius);
        let lower = *reference_index.min() - pad;
        let upper = *reference_index.max() + pad;
        // A zero box length means the structure is not periodic along that axis.
        let shifts = [0, 1, 2].map(|axis| {
            if box_lengths[axis] > 0.0 {
                -1..=1
            } else {
                0..=0
            }
        });

        // Home atom of every appended image, in append order.
        let mut home_atoms = Vec::new();
        for atom in selection.iter_selected() {
            let position = positions[atom];
            let images = iproduct!(shifts[0].clone(), shifts[1].clone(), shifts[2].clone());
            for (i, j, k) in images {
                if (i, j, k) == (0, 0, 0) {
                    continue;
                }
                let image = position
                    + Vector3::new(
                        i as f64 * box_lengths.x,
                        j as f64 * box_lengths.y,
                        k as f64 * box_lengths.z,
                    );
                let outside = (0..3)
                    .any(|axis| image[axis] < lower[axis] || image[axis] >= upper[axis]);
                if outside {
                    continue;
                }
                home_atoms.push(atom);
                positions.push(image);
            }
        }
        debug!(
            images = home_atoms.len(),
            "Replicated candidates across the periodic cell."
        );

        let atom_count = selection.len();
        let mut expanded = selection.clone();
        expanded.extend(home_atoms.len(), true);
        let mut expanded_reference = reference.clone();
        expanded_reference.extend(home_atoms.len(), false);

        find_within(
            &positions,
            grid,
            &mut expanded,
            &expanded_reference,
            self.radius * self.radius,
        );

        for (offset, &atom) in home_atoms.iter().enumerate() {
            if expanded[atom_count + offset] {
                expanded.set(atom, true);
            }
        }
        expanded.truncate(atom_count);
        *selection = expanded;
    }
}

impl Evaluate for WithinPredicate {
    #[instrument(level = "debug", name = "within", skip_all, fields(mode = ?self.mode, radius = self.radius))]
    fn eval<S>(
        &self,
        context: &EvalContext<'_, S>,
        selection: &mut Selection,
    ) -> Result<(), SelectionError>
    where
        S: StructureModel + ?Sized,
    {
        let box_lengths = match self.mode {
            WithinMode::Periodic => Some(orthorhombic_box_lengths(context.structure)?),
            _ => None,
        };

        let mut reference = context.full_selection();
        self.sub.eval(context, &mut reference)?;

        if self.radius <= 0.0 {
            if self.mode == WithinMode::Exclusive {
                selection.subtract(&reference);
            }
            selection.intersect(&reference);
            return Ok(());
        }

        let reference_index = PositionIndex::from_selection(context.structure, &reference);
        let grid = match reference_index.voxelize(self.radius) {
            Some(grid) if !reference_index.is_empty() => grid,
            _ => {
                selection.clear();
                return Ok(());
            }
        };

        if self.mode == WithinMode::Exclusive {
            selection.subtract(&reference);
        }
        let positions = candidate_positions(context.structure, selection);

        match box_lengths {
            Some(box_lengths) => self.eval_periodic(
                &box_lengths,
                &reference_index,
                &grid,
                positions,
                selection,
                &reference,
            ),
            None => find_within(
                &positions,
                &grid,
                selection,
                &reference,
                self.radius * self.radius,
            ),
        }

        debug!(
            reference = reference_index.len(),
            selected = selection.count(),
            "Evaluated within predicate."
        );
        Ok(())
    }
}

impl fmt::Display for WithinPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} of [{}]", self.mode.keyword(), self.radius, self.sub)
    }
}

/// Box lengths of the global cell, or an error if the cell is triclinic.
fn orthorhombic_box_lengths<S>(structure: &S) -> Result<Vector3<f64>, SelectionError>
where
    S: StructureModel + ?Sized,
{
    let cell = structure.global_cell();
    cell.orthorhombic_lengths()
        .ok_or(SelectionError::TriclinicCell {
            cell: *cell.vectors(),
        })
}

/// Coordinates of the selected atoms, indexed by atom. Entries of unselected
/// atoms are never read and are left at the origin.
pub(super) fn candidate_positions<S>(structure: &S, selection: &Selection) -> Vec<Point3<f64>>
where
    S: StructureModel + ?Sized,
{
    let mut positions = vec![Point3::origin(); selection.len()];
    for atom in selection.iter_selected() {
        positions[atom] = structure.position(atom);
    }
    positions
}

/// Keeps each selected atom iff it is a reference atom or lies within the
/// grid's range of one.
///
/// `positions` and `reference` are indexed like `selection`; `radius_squared`
/// must not exceed the square of the grid radius.
pub(super) fn find_within(
    positions: &[Point3<f64>],
    grid: &VoxelGrid<'_>,
    selection: &mut Selection,
    reference: &Selection,
    radius_squared: f64,
) {
    for atom in 0..selection.len() {
        if !selection[atom] || reference[atom] {
            continue;
        }
        selection.set(atom, grid.any_within(&positions[atom], radius_squared));
    }
}
