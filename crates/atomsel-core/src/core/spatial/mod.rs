//! # Spatial Indexing Module
//!
//! Fixed-radius proximity queries over a snapshot of atom coordinates.
//!
//! A [`position_index::PositionIndex`] captures the coordinates of one atom subset
//! and its bounding box. Voxelizing it at a radius `r` yields a
//! [`voxel_grid::VoxelGrid`] of cubic cells of edge `r`, which answers "is any
//! indexed point within `r` of this point?" by looking at no more than 27 cells.
//!
//! Both structures are built per query and dropped with it; nothing here is cached
//! or shared between evaluations.

pub mod position_index;
pub mod voxel_grid;
