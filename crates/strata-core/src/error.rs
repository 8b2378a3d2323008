//! Error types for the Strata layout framework.
//!
//! Organized by subsystem: configuration (preset resolution, grid
//! validation, material binding), sensor registry, construction as a
//! whole, collaborator readiness, and per-event accumulation.

use std::error::Error;
use std::fmt;

use crate::handle::PlacementHandle;
use crate::id::LayerIndex;

/// Fatal configuration errors detected before or during construction.
///
/// None of these are recoverable: construction aborts and no partially
/// built layout is returned.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The preset identifier does not name a known geometry.
    UnknownPreset {
        /// The identifier that failed to resolve.
        name: String,
    },
    /// A layer requested zero or negative grid divisions.
    InvalidGranularity {
        /// The offending layer.
        layer: LayerIndex,
        /// The requested granularity.
        granularity: i32,
    },
    /// A quadrant split was requested on a grid whose coarse cells
    /// straddle the layer centre.
    OddSplitGranularity {
        /// The offending layer.
        layer: LayerIndex,
        /// The coarse granularity (odd).
        granularity: i32,
        /// The requested split granularity.
        split: i32,
    },
    /// A required material is absent from the materials catalog.
    MissingMaterial {
        /// What the material is used for (absorber, gap, ...).
        role: &'static str,
        /// The catalog name that was looked up.
        name: String,
    },
    /// Lateral layer size is NaN, infinite, zero, or negative.
    InvalidLayerSize {
        /// The invalid value.
        value: f64,
    },
    /// Layer thickness is NaN, infinite, zero, or negative.
    InvalidThickness {
        /// The offending layer.
        layer: LayerIndex,
        /// The invalid value.
        value: f64,
    },
    /// Absorber fraction outside `[0, 1)`.
    InvalidAbsorberFraction {
        /// The invalid value.
        value: f64,
    },
    /// Calibration factor is NaN or infinite.
    InvalidCalibration {
        /// The invalid value.
        value: f64,
    },
    /// Tracker section settings are inconsistent.
    InvalidTracker {
        /// Description of which setting was rejected.
        reason: String,
    },
    /// A scalar detector setting is out of range.
    InvalidSetting {
        /// Name of the rejected setting.
        field: &'static str,
        /// What the setting must satisfy.
        requirement: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// The sandwich clearance would collapse a layer's absorber or gap box.
    SandwichClearance {
        /// The offending layer.
        layer: LayerIndex,
        /// The configured clearance.
        epsilon: f64,
        /// Exclusive upper bound for this layer.
        limit: f64,
    },
    /// The layer stack does not fit inside the world box.
    OutsideWorld {
        /// Axis along which the stack overflows (`"x"`, `"y"`, or `"z"`).
        axis: &'static str,
        /// Largest distance from the world centre the stack reaches.
        extent: f64,
        /// World half-size along that axis.
        limit: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPreset { name } => write!(f, "unknown geometry preset '{name}'"),
            Self::InvalidGranularity { layer, granularity } => {
                write!(
                    f,
                    "layer {layer}: granularity must be at least 1, got {granularity}"
                )
            }
            Self::OddSplitGranularity {
                layer,
                granularity,
                split,
            } => {
                write!(
                    f,
                    "layer {layer}: split granularity {split} needs an even coarse granularity, got {granularity}"
                )
            }
            Self::MissingMaterial { role, name } => {
                write!(f, "{role} material '{name}' not found in catalog")
            }
            Self::InvalidLayerSize { value } => {
                write!(f, "lateral layer size must be finite and positive, got {value}")
            }
            Self::InvalidThickness { layer, value } => {
                write!(
                    f,
                    "layer {layer}: thickness must be finite and positive, got {value}"
                )
            }
            Self::InvalidAbsorberFraction { value } => {
                write!(f, "absorber fraction must be in [0, 1), got {value}")
            }
            Self::InvalidCalibration { value } => {
                write!(f, "calibration factor must be finite, got {value}")
            }
            Self::InvalidTracker { reason } => write!(f, "invalid tracker config: {reason}"),
            Self::InvalidSetting {
                field,
                requirement,
                value,
            } => write!(f, "{field} must be {requirement}, got {value}"),
            Self::SandwichClearance {
                layer,
                epsilon,
                limit,
            } => {
                write!(
                    f,
                    "layer {layer}: sandwich clearance {epsilon} must be below {limit}"
                )
            }
            Self::OutsideWorld {
                axis,
                extent,
                limit,
            } => {
                write!(
                    f,
                    "detector reaches {extent} along {axis}, outside the world half-size {limit}"
                )
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors from the append-only sensor registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// Every `u32` sensor identifier has been handed out.
    IdSpaceExhausted,
    /// A placement handle is already mapped to another sensor.
    DuplicatePlacement {
        /// The handle that was registered twice.
        placement: PlacementHandle,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdSpaceExhausted => write!(f, "sensor identifier space exhausted"),
            Self::DuplicatePlacement { placement } => {
                write!(f, "{placement} is already registered to a sensor")
            }
        }
    }
}

impl Error for RegistryError {}

/// Errors that abort detector construction.
#[derive(Clone, Debug, PartialEq)]
pub enum BuildError {
    /// Configuration was rejected.
    Config(ConfigError),
    /// The sensor registry refused a cell.
    Registry(RegistryError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Registry(e) => write!(f, "registry: {e}"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Registry(e) => Some(e),
        }
    }
}

impl From<ConfigError> for BuildError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<RegistryError> for BuildError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

/// An event action was used before its collaborators were attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadinessError {
    /// No primary generator has been attached.
    MissingGenerator,
    /// No detector geometry (sensor registry) has been attached.
    MissingDetector,
    /// A collaborator was attached a second time.
    AlreadyAttached {
        /// Which collaborator (`"generator"` or `"detector"`).
        collaborator: &'static str,
    },
}

impl fmt::Display for ReadinessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGenerator => write!(f, "no primary generator attached"),
            Self::MissingDetector => write!(f, "no detector geometry attached"),
            Self::AlreadyAttached { collaborator } => {
                write!(f, "{collaborator} is already attached")
            }
        }
    }
}

impl Error for ReadinessError {}

/// Misuse of the per-event and per-run lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventError {
    /// A deposit or event end arrived with no event in progress.
    NotAccumulating,
    /// An event began while another was still in progress.
    AlreadyAccumulating,
    /// Required collaborators are missing.
    NotReady(ReadinessError),
    /// An event ended outside an open run.
    RunNotOpen,
    /// A run began while another was still open.
    RunAlreadyOpen,
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAccumulating => write!(f, "no event in progress"),
            Self::AlreadyAccumulating => write!(f, "an event is already in progress"),
            Self::NotReady(e) => write!(f, "not ready: {e}"),
            Self::RunNotOpen => write!(f, "no run is open"),
            Self::RunAlreadyOpen => write!(f, "a run is already open"),
        }
    }
}

impl Error for EventError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotReady(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReadinessError> for EventError {
    fn from(e: ReadinessError) -> Self {
        Self::NotReady(e)
    }
}
