use super::position_index::PositionIndex;
use itertools::iproduct;
use nalgebra::{Point3, Vector3};
use tracing::trace;

/// Number of cells in a full 3x3x3 neighborhood.
const SHELL_SIZE: usize = 27;

/// Upper bound on the number of cells in one grid.
const MAX_VOXELS: usize = 1 << 20;

#[derive(Debug, Clone, Default)]
struct Voxel {
    /// Indices into the owning `PositionIndex` of points inside this cell.
    points: Vec<usize>,
    /// Absolute indices of nonempty neighbor cells, self first. Only set for cells
    /// on the grid boundary; interior cells use the shared offset table.
    neighbors: Option<Vec<usize>>,
}

/// A uniform partition of a [`PositionIndex`] into cubic cells.
///
/// The grid answers "is any indexed point within `r` of `p`?" for any
/// `r <= radius` by scanning at most the 27 cells around `p`. Cells are
/// `radius` wide unless that would exceed the cell budget, in which case the
/// edge is doubled until the grid fits; a wider cell only costs extra distance
/// checks. The grid extends one cell beyond the bounding box of the points on
/// every side, so any query point within `radius` of an indexed point lands in
/// a cell whose neighborhood contains that point.
///
/// Cells on the grid boundary store their nonempty neighbors explicitly because
/// part of their shell lies outside the grid. Interior cells, which make up the
/// bulk of a large grid, share a single table of 27 linear offsets, so memory
/// overhead is independent of grid size.
#[derive(Debug, Clone)]
pub struct VoxelGrid<'a> {
    index: &'a PositionIndex,
    origin: Point3<f64>,
    radius: f64,
    cell_edge: f64,
    inverse_cell_edge: f64,
    dims: [usize; 3],
    voxels: Vec<Voxel>,
    central_offsets: [isize; SHELL_SIZE],
}

impl<'a> VoxelGrid<'a> {
    pub(crate) fn build(index: &'a PositionIndex, radius: f64) -> Option<Self> {
        if radius.is_nan() || radius <= 0.0 {
            return None;
        }

        let mut cell_edge = radius;
        let (origin, dims, cell_count) = loop {
            let pad = Vector3::repeat(cell_edge);
            let origin = index.min() - pad;
            let span = index.max() - origin + pad;
            if !span.iter().all(|extent| extent.is_finite()) {
                return None;
            }
            let dims =
                [0, 1, 2].map(|axis| ((span[axis] / cell_edge) as usize).saturating_add(1));
            let cell_count = dims[0]
                .checked_mul(dims[1])
                .and_then(|count| count.checked_mul(dims[2]))
                .filter(|&count| count <= MAX_VOXELS);
            if let Some(cell_count) = cell_count {
                break (origin, dims, cell_count);
            }
            cell_edge *= 2.0;
        };
        let inverse_cell_edge = 1.0 / cell_edge;

        let mut grid = Self {
            index,
            origin,
            radius,
            cell_edge,
            inverse_cell_edge,
            dims,
            voxels: vec![Voxel::default(); cell_count],
            central_offsets: [0; SHELL_SIZE],
        };

        for (i, point) in index.points().iter().enumerate() {
            let cell = [0, 1, 2].map(|axis| {
                let c = ((point[axis] - origin[axis]) * inverse_cell_edge) as usize;
                c.min(dims[axis] - 1)
            });
            let linear = grid.linear_index(cell);
            grid.voxels[linear].points.push(i);
        }

        grid.find_boundary_neighbors();
        grid.compute_central_offsets();

        trace!(
            radius,
            cell_edge,
            points = index.len(),
            nx = dims[0],
            ny = dims[1],
            nz = dims[2],
            "Voxelized position index."
        );
        Some(grid)
    }

    /// The largest query radius this grid supports.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Edge length of one cell; at least [`radius`](Self::radius).
    pub fn cell_edge(&self) -> f64 {
        self.cell_edge
    }

    /// Number of cells along x, y and z.
    pub fn dimensions(&self) -> [usize; 3] {
        self.dims
    }

    /// Returns `true` if some indexed point lies within `sqrt(radius_squared)` of `point`.
    ///
    /// `radius_squared` must not exceed the square of the grid radius. Points outside
    /// the grid are never within range of an indexed point and return `false`.
    pub fn any_within(&self, point: &Point3<f64>, radius_squared: f64) -> bool {
        let Some(cell) = self.locate(point) else {
            return false;
        };
        let this = self.linear_index(cell);
        match &self.voxels[this].neighbors {
            Some(neighbors) => neighbors
                .iter()
                .any(|&voxel| self.voxel_has_point_within(voxel, point, radius_squared)),
            None => self.central_offsets.iter().any(|&offset| {
                let voxel = this.wrapping_add_signed(offset);
                self.voxel_has_point_within(voxel, point, radius_squared)
            }),
        }
    }

    #[inline]
    fn voxel_has_point_within(
        &self,
        voxel: usize,
        point: &Point3<f64>,
        radius_squared: f64,
    ) -> bool {
        let positions = self.index.points();
        self.voxels[voxel]
            .points
            .iter()
            .any(|&i| (positions[i] - point).norm_squared() <= radius_squared)
    }

    fn locate(&self, point: &Point3<f64>) -> Option<[usize; 3]> {
        let mut cell = [0; 3];
        for axis in 0..3 {
            let c = ((point[axis] - self.origin[axis]) * self.inverse_cell_edge).floor();
            if c.is_nan() || c < 0.0 || c >= self.dims[axis] as f64 {
                return None;
            }
            cell[axis] = c as usize;
        }
        Some(cell)
    }

    #[inline]
    fn linear_index(&self, [x, y, z]: [usize; 3]) -> usize {
        x + self.dims[0] * (y + self.dims[1] * z)
    }

    fn is_boundary(&self, [x, y, z]: [usize; 3]) -> bool {
        let [nx, ny, nz] = self.dims;
        x == 0 || x == nx - 1 || y == 0 || y == ny - 1 || z == 0 || z == nz - 1
    }

    fn find_boundary_neighbors(&mut self) {
        let [nx, ny, nz] = self.dims;
        for (z, y, x) in iproduct!(0..nz, 0..ny, 0..nx) {
            if !self.is_boundary([x, y, z]) {
                continue;
            }
            let this = self.linear_index([x, y, z]);
            let mut neighbors = [0; SHELL_SIZE];
            let mut count = 0;
            // Searching the home cell first lets most hits exit early.
            if !self.voxels[this].points.is_empty() {
                neighbors[count] = this;
                count += 1;
            }
            for (dz, dy, dx) in iproduct!(-1isize..=1, -1isize..=1, -1isize..=1) {
                let (Some(nbr_x), Some(nbr_y), Some(nbr_z)) = (
                    x.checked_add_signed(dx).filter(|&v| v < nx),
                    y.checked_add_signed(dy).filter(|&v| v < ny),
                    z.checked_add_signed(dz).filter(|&v| v < nz),
                ) else {
                    continue;
                };
                let other = self.linear_index([nbr_x, nbr_y, nbr_z]);
                if other != this && !self.voxels[other].points.is_empty() {
                    neighbors[count] = other;
                    count += 1;
                }
            }
            self.voxels[this].neighbors = Some(neighbors[..count].to_vec());
        }
    }

    fn compute_central_offsets(&mut self) {
        let nx = self.dims[0] as isize;
        let ny = self.dims[1] as isize;
        let shell = iproduct!(-1isize..=1, -1isize..=1, -1isize..=1)
            .filter(|&offset| offset != (0, 0, 0))
            .map(|(k, j, i)| i + nx * (j + ny * k));
        for (slot, offset) in self.central_offsets.iter_mut().skip(1).zip(shell) {
            *slot = offset;
        }
    }
}
