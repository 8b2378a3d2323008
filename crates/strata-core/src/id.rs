//! Strongly-typed identifiers and role tags.

use std::fmt;

/// Global identifier of a sensor cell.
///
/// Assigned by the sensor registry in creation order, starting at zero.
/// `SensorId(n)` is the n-th cell appended during detector construction
/// and is never reused for the lifetime of the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SensorId(pub u32);

impl SensorId {
    /// Position of this sensor in the registry's backing storage.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SensorId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Zero-based index of a layer in stacking order.
///
/// Calorimeter layers come first (electromagnetic, then hadronic);
/// tracker layers, when configured, continue the numbering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerIndex(pub u32);

impl fmt::Display for LayerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LayerIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Which detector section a layer belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerRole {
    /// Front calorimeter section.
    Electromagnetic,
    /// Rear calorimeter section.
    Hadronic,
    /// Thin, unabsorbed tracking layer.
    Tracker,
}

impl LayerRole {
    /// Whether this role belongs to the tracking section.
    pub fn is_tracker(self) -> bool {
        matches!(self, Self::Tracker)
    }
}

impl fmt::Display for LayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Electromagnetic => write!(f, "em"),
            Self::Hadronic => write!(f, "hadronic"),
            Self::Tracker => write!(f, "tracker"),
        }
    }
}

/// Material role of a sub-volume that received an energy deposit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DepositRole {
    /// Passive, structural part of a sandwich.
    Absorber,
    /// Active, sensing part of a sandwich.
    Gap,
}

impl fmt::Display for DepositRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absorber => write!(f, "absorber"),
            Self::Gap => write!(f, "gap"),
        }
    }
}
