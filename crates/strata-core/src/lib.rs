//! Core types and traits for the Strata detector layout framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Strata workspace:
//! sensor and layer identifiers, opaque handles returned by the external
//! solid-modeling engine, error types, and the collaborator traits the
//! layout core calls out through.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geom;
pub mod handle;
pub mod id;
pub mod record;
pub mod traits;

pub use error::{BuildError, ConfigError, EventError, ReadinessError, RegistryError};
pub use geom::{Rotation, StepLimits, Vec3};
pub use handle::{MaterialHandle, PlacementHandle, SolidHandle, VolumeHandle};
pub use id::{DepositRole, LayerIndex, LayerRole, SensorId};
pub use record::{EnergyTally, EventRecord, PrimaryState, SensorDeposit};
pub use traits::{MaterialCatalog, PersistenceSink, PrimarySource, SolidEngine};
