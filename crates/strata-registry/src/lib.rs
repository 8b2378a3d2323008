//! Append-only sensor registry for Strata detector layouts.
//!
//! Every sensing cell produced during detector construction is appended to
//! a single [`SensorRegistry`]. The registry assigns each cell its global
//! [`SensorId`](strata_core::SensorId) on insertion, owns the cells by value,
//! and maps the opaque placement handles of each cell's sub-volumes back to
//! the owning sensor.
//!
//! # Lifetime
//!
//! The registry is populated once, single-threaded, during construction.
//! Afterwards it is frozen into a [`SharedSensorRegistry`] (`Arc`) and read
//! concurrently by every event worker without synchronization.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod registry;

pub use cell::{SensorCell, SensorCellSpec};
pub use registry::{SensorRegistry, SharedSensorRegistry};
