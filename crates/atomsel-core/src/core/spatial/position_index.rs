use super::voxel_grid::VoxelGrid;
use crate::core::models::structure::StructureModel;
use crate::core::selection::Selection;
use nalgebra::Point3;

/// An immutable snapshot of the coordinates of one atom subset.
///
/// Points are stored in ascending atom-index order together with their
/// axis-aligned bounding box. The snapshot is taken once and never refreshed, so
/// it stays valid only for the evaluation it was built for.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionIndex {
    points: Vec<Point3<f64>>,
    min: Point3<f64>,
    max: Point3<f64>,
}

impl PositionIndex {
    /// Captures the coordinates of every atom selected in `selection`.
    pub fn from_selection<S>(structure: &S, selection: &Selection) -> Self
    where
        S: StructureModel + ?Sized,
    {
        let points = selection
            .iter_selected()
            .map(|atom| structure.position(atom))
            .collect();
        Self::from_points(points)
    }

    /// Wraps an explicit point list. The bounding box of an empty list is the origin.
    pub fn from_points(points: Vec<Point3<f64>>) -> Self {
        let (min, max) = match points.split_first() {
            Some((first, rest)) => rest.iter().fold((*first, *first), |(min, max), p| {
                (min.inf(p), max.sup(p))
            }),
            None => (Point3::origin(), Point3::origin()),
        };
        Self { points, min, max }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Lower corner of the bounding box.
    pub fn min(&self) -> &Point3<f64> {
        &self.min
    }

    /// Upper corner of the bounding box.
    pub fn max(&self) -> &Point3<f64> {
        &self.max
    }

    /// Builds a voxel grid with cell edge `radius` over the indexed points.
    ///
    /// Returns `None` when `radius` is not strictly positive, or when the padded
    /// bounding box is not finite; callers must handle such radii without geometry.
    pub fn voxelize(&self, radius: f64) -> Option<VoxelGrid<'_>> {
        VoxelGrid::build(self, radius)
    }

    /// Exact squared distance from `point` to the closest indexed point, by
    /// exhaustive scan. Returns `f64::INFINITY` for an empty index.
    pub fn min_squared_distance(&self, point: &Point3<f64>) -> f64 {
        self.points
            .iter()
            .map(|p| (p - point).norm_squared())
            .fold(f64::INFINITY, f64::min)
    }
}
