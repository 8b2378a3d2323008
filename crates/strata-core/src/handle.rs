//! Opaque handles issued by external collaborators.
//!
//! The layout core never dereferences these. It stores them, passes them
//! back to the collaborator that issued them, and uses placement handles
//! as lookup keys when deposits are routed back to sensors.

use std::fmt;

/// A solid (shape) created by the solid-modeling engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SolidHandle(pub u64);

impl fmt::Display for SolidHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "solid#{}", self.0)
    }
}

/// A logical volume: a solid bound to a material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VolumeHandle(pub u64);

impl fmt::Display for VolumeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "volume#{}", self.0)
    }
}

/// A placed (physical) volume in the scene graph.
///
/// Transport reports which placement a step happened in; the sensor
/// registry maps that placement back to a sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacementHandle(pub u64);

impl fmt::Display for PlacementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "placement#{}", self.0)
    }
}

/// A material from the materials catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u64);

impl fmt::Display for MaterialHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "material#{}", self.0)
    }
}
