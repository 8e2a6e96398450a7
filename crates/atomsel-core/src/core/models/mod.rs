//! # Core Models Module
//!
//! The structural model the selection engine reads from.
//!
//! The engine never owns structural data. It consumes atom coordinates, incident
//! bonds and the global periodic cell through the [`structure::StructureModel`]
//! trait, so any host representation can be queried without copying.
//! [`system::MolecularSystem`] is the in-memory implementation shipped with the crate.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom positions
//! - [`topology`] - Bonds between atom indices
//! - [`cell`] - Periodic box vectors
//! - [`structure`] - The read-only contract consumed by predicates
//! - [`system`] - Growable in-memory structure
//!
//! ## Usage
//!
//! ```ignore
//! use atomsel::core::models::{atom::Atom, system::MolecularSystem};
//!
//! let mut system = MolecularSystem::new();
//! let o = system.add_atom(Atom::new(Point3::new(0.0, 0.0, 0.0)));
//! let h = system.add_atom(Atom::new(Point3::new(0.96, 0.0, 0.0)));
//! system.add_bond(o, h)?;
//! ```

pub mod atom;
pub mod cell;
pub mod structure;
pub mod system;
pub mod topology;
