//! Strata: layered sensor-detector layout and per-event energy accounting.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Strata sub-crates. For most users, adding `strata` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use strata::prelude::*;
//! use strata_test_utils::{FixedPrimary, MemorySink, MockMaterialCatalog, MockSolidEngine};
//!
//! // Build the ten-layer electromagnetic calorimeter.
//! let config = DetectorConfig::new(GeometryPreset::EcalOnly);
//! let builder = LayerBuilder::new(config, &MockMaterialCatalog::with_defaults()).unwrap();
//! let layout = builder.build(&mut MockSolidEngine::new()).unwrap();
//! assert_eq!(layout.registry.len(), 1000);
//!
//! // Route one step into the first sensor's gap.
//! let mut action = EventAction::new();
//! action.attach_generator(Arc::new(FixedPrimary::new("gun", Vec3::along_z(1000.0)))).unwrap();
//! action.attach_detector(Arc::clone(&layout.registry)).unwrap();
//! action.on_event_begin().unwrap();
//! let first = layout.registry.get(SensorId(0)).unwrap();
//! action.on_step(first.active(), 2.5, 0.1).unwrap();
//! let record = action.on_event_end(&mut MemorySink::new()).unwrap();
//! assert_eq!(record.gap.energy, 2.5);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strata-core` | IDs, handles, errors, collaborator traits |
//! | [`registry`] | `strata-registry` | Sensor cells and the append-only registry |
//! | [`layout`] | `strata-layout` | Presets, grids, sandwiches, layer builder |
//! | [`event`] | `strata-event` | Energy accumulator, event and run actions |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`strata-core`).
///
/// Contains the collaborator traits ([`types::SolidEngine`],
/// [`types::MaterialCatalog`], [`types::PrimarySource`],
/// [`types::PersistenceSink`]) and every error type.
pub use strata_core as types;

/// Sensor cells and the append-only registry (`strata-registry`).
pub use strata_registry as registry;

/// Presets, sensor grids, and detector construction (`strata-layout`).
///
/// [`layout::LayerBuilder`] is the entry point; it implements
/// [`layout::DetectorConstruction`].
pub use strata_layout as layout;

/// Per-event accumulation and run lifecycle (`strata-event`).
pub use strata_event as event;

/// Common imports for typical Strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use strata_core::{
        DepositRole, EventRecord, LayerIndex, LayerRole, MaterialCatalog, PersistenceSink,
        PlacementHandle, PrimarySource, SensorId, SolidEngine, Vec3,
    };

    // Errors
    pub use strata_core::{BuildError, ConfigError, EventError, ReadinessError};

    // Registry
    pub use strata_registry::{SensorCell, SensorRegistry, SharedSensorRegistry};

    // Layout
    pub use strata_layout::{
        DetectorConfig, DetectorConstruction, GeometryPreset, LayerBuilder, LayoutResult,
        PresetResolver, SensorGridLayout,
    };

    // Events
    pub use strata_event::{EnergyAccumulator, EventAction, EventHooks, RunAction};
}
