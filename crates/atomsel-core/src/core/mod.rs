//! # Core Module
//!
//! Data structures consumed and produced by the selection engine.
//!
//! - **Structural Model** ([`models`]) - Atoms, bonds, the periodic cell and the
//!   [`models::structure::StructureModel`] contract the engine reads them through
//! - **Atom Masks** ([`selection`]) - The boolean [`selection::Selection`] every predicate
//!   reads and writes
//! - **Spatial Indexing** ([`spatial`]) - Coordinate snapshots and the uniform voxel grid
//!   used for fixed-radius existence queries

pub mod models;
pub mod selection;
pub mod spatial;
