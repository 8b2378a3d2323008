//! Sensor cell descriptors.

use strata_core::{LayerIndex, PlacementHandle, SensorId, Vec3};

/// Everything known about a sensor before the registry assigns its id.
///
/// Produced by the layer builder once the cell's sandwich has been
/// materialised by the solid engine.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorCellSpec {
    /// Owning layer.
    pub layer: LayerIndex,
    /// Centre of the cell in world coordinates.
    pub center: Vec3,
    /// Side length of the square footprint.
    pub side: f64,
    /// Depth of the cell along the stack axis.
    pub thickness: f64,
    /// Whether the cell lies in a layer's high-granularity quadrant.
    pub small: bool,
    /// Whether the cell belongs to the tracking section.
    pub tracker: bool,
    /// Placement of the active (gap) volume.
    pub active: PlacementHandle,
    /// Placement of the passive absorber volume, if the layer has one.
    pub absorber: Option<PlacementHandle>,
    /// Energy-scale factor forwarded from the owning layer.
    pub calibration: f64,
}

/// One sensing element of the detector.
///
/// Immutable once registered, except for the calibration factor which may
/// be reassigned exactly once.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorCell {
    id: SensorId,
    layer: LayerIndex,
    center: Vec3,
    side: f64,
    thickness: f64,
    small: bool,
    tracker: bool,
    active: PlacementHandle,
    absorber: Option<PlacementHandle>,
    calibration: f64,
    calibration_set: bool,
}

impl SensorCell {
    pub(crate) fn new(id: SensorId, spec: SensorCellSpec) -> Self {
        Self {
            id,
            layer: spec.layer,
            center: spec.center,
            side: spec.side,
            thickness: spec.thickness,
            small: spec.small,
            tracker: spec.tracker,
            active: spec.active,
            absorber: spec.absorber,
            calibration: spec.calibration,
            calibration_set: false,
        }
    }

    /// Global sensor identifier.
    pub fn id(&self) -> SensorId {
        self.id
    }

    /// Owning layer.
    pub fn layer(&self) -> LayerIndex {
        self.layer
    }

    /// Centre in world coordinates.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Side length of the square footprint.
    pub fn side(&self) -> f64 {
        self.side
    }

    /// Depth along the stack axis.
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Footprint area (`side²`).
    pub fn area(&self) -> f64 {
        self.side * self.side
    }

    /// Whether the cell lies in a high-granularity quadrant.
    pub fn is_small(&self) -> bool {
        self.small
    }

    /// Whether the cell belongs to the tracking section.
    pub fn is_tracker(&self) -> bool {
        self.tracker
    }

    /// Placement of the active volume.
    pub fn active(&self) -> PlacementHandle {
        self.active
    }

    /// Placement of the absorber volume, if any.
    pub fn absorber(&self) -> Option<PlacementHandle> {
        self.absorber
    }

    /// Energy-scale factor. Starts at the layer's factor.
    pub fn calibration(&self) -> f64 {
        self.calibration
    }

    /// Replace the energy-scale factor.
    ///
    /// Succeeds only the first time; later calls leave the factor untouched
    /// and return `false`.
    pub fn set_calibration(&mut self, factor: f64) -> bool {
        if self.calibration_set {
            return false;
        }
        self.calibration = factor;
        self.calibration_set = true;
        true
    }
}
