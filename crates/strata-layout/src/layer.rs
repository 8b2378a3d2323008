//! Per-layer construction parameters.

use strata_core::{LayerIndex, LayerRole};

/// Everything needed to build one layer of the stack.
///
/// Produced by [`DetectorConfig::layer_specs`](crate::DetectorConfig::layer_specs)
/// from a resolved preset. Indices are strictly increasing in stacking
/// order.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerSpec {
    /// Zero-based layer index.
    pub index: LayerIndex,
    /// Detector section.
    pub role: LayerRole,
    /// Depth along the stack axis, in millimetres.
    pub thickness: f64,
    /// Coarse grid divisions per side.
    pub granularity: i32,
    /// Fine-quadrant divisions; the sign selects the split convention
    /// (see [`SplitConvention`](crate::SplitConvention)).
    pub split_granularity: i32,
    /// Fraction of each sandwich's depth taken by the absorber.
    pub absorber_fraction: f64,
    /// Energy-scale factor assigned to every cell of the layer.
    pub calibration: f64,
}

impl LayerSpec {
    /// Whether this layer belongs to the tracking section.
    pub fn is_tracker(&self) -> bool {
        self.role.is_tracker()
    }
}
