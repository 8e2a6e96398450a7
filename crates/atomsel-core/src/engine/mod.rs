//! # Engine Module
//!
//! Evaluation of atom selection predicates against a structural model.
//!
//! ## Overview
//!
//! A query is a tree of [`predicate::Predicate`] nodes built bottom-up by the caller.
//! Evaluating the root narrows a working [`Selection`](crate::core::selection::Selection)
//! in place: leaf and composite nodes evaluate their children into scratch selections,
//! build a voxel grid over the reference atoms when geometry is involved, and combine
//! the results with boolean set operations.
//!
//! ## Architecture
//!
//! - **Predicates** ([`predicate`]) - The predicate tree and its evaluators
//! - **Evaluation Context** ([`context`]) - Structure and configuration shared by one evaluation
//! - **Configuration** ([`config`]) - Tunable constants of the adaptive nearest-neighbor search
//! - **Error Handling** ([`error`]) - Evaluation errors
//!
//! Evaluation is synchronous and single-threaded. Predicates are immutable once built,
//! so one tree may be evaluated from several threads against independent selections.

pub mod config;
pub mod context;
pub mod error;
pub mod predicate;
