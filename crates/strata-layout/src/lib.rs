//! Geometry presets and layer/sensor-grid layout for Strata detectors.
//!
//! Turns a named [`GeometryPreset`] into a fully enumerated set of sensor
//! cells. The pipeline runs once, single-threaded, before any event:
//!
//! ```text
//! PresetResolver ──► LayerBuilder ──► SensorGridLayout ──► SensorRegistry
//!   (per-layer       (z stacking,      (coarse grid +       (id assignment,
//!    tables)          volumes)          fine quadrant)       placement map)
//! ```
//!
//! All solid creation and placement goes through the
//! [`SolidEngine`](strata_core::SolidEngine) seam; the layout algorithm
//! itself never touches a solid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod config;
pub mod grid;
pub mod layer;
pub mod materials;
pub mod preset;
pub mod sandwich;

pub use builder::{DetectorConstruction, LayerBuilder, LayoutResult, PlannedLayer};
pub use config::{DetectorConfig, TrackerConfig};
pub use grid::{CellFootprint, GridPass, SensorGridLayout, SplitConvention};
pub use layer::LayerSpec;
pub use materials::{MaterialNames, MaterialSet};
pub use preset::{GeometryPreset, PresetResolver, ResolvedPreset};
pub use sandwich::{build_sandwich, max_clearance, Sandwich, SandwichSpec};
