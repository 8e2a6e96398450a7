//! # atomsel
//!
//! Spatial and topological atom selection for molecular structures.
//!
//! ## Architecture
//!
//! The crate follows a two-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data: the structural model contract
//!   (`StructureModel`) with an in-memory `MolecularSystem`, the boolean atom mask
//!   (`Selection`), and the voxel-grid spatial index (`PositionIndex`, `VoxelGrid`).
//!
//! - **[`engine`]: The Evaluator.** The predicate tree (`Predicate`) and its
//!   evaluators (`within`, `exwithin`, `pbwithin`, `withinbonds`, `nearest`),
//!   together with tunable search configuration and error types.
//!
//! A predicate tree is built bottom-up by a caller (usually a query parser) and
//! evaluated against a structure through an [`engine::context::EvalContext`]:
//!
//! ```ignore
//! use atomsel::engine::predicate::Predicate;
//!
//! let query = Predicate::within(5.0, Predicate::index([0, 1, 2]));
//! let selected = query.select(&EvalContext::new(&system))?;
//! ```

pub mod core;
pub mod engine;
