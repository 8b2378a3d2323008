//! Detector configuration and validation.
//!
//! [`DetectorConfig`] is the builder input for a detector.
//! [`validate()`](DetectorConfig::validate) checks the scalar settings;
//! per-layer grid checks happen when [`LayerBuilder`](crate::LayerBuilder)
//! plans the layers.

use strata_core::{ConfigError, LayerIndex, LayerRole, Vec3};

use crate::layer::LayerSpec;
use crate::materials::MaterialNames;
use crate::preset::{GeometryPreset, PresetResolver, ResolvedPreset};

// ── TrackerConfig ──────────────────────────────────────────────────

/// Settings for the thin tracking layers appended after the calorimeter.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackerConfig {
    /// Number of tracker layers. `None` keeps the preset's count (0 for
    /// every preset).
    pub layers: Option<u32>,
    /// Coarse granularity of each tracker layer. Default: 64.
    pub granularity: i32,
    /// Split granularity of each tracker layer. Default: -1.
    pub split_granularity: i32,
    /// Depth of each tracker layer in mm. Default: 0.3.
    pub thickness: f64,
    /// Distance between consecutive tracker front faces in mm. Default: 50.
    pub pitch: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            layers: None,
            granularity: 64,
            split_granularity: -1,
            thickness: 0.3,
            pitch: 50.0,
        }
    }
}

impl TrackerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.granularity < 1 {
            return Err(ConfigError::InvalidTracker {
                reason: format!("granularity must be >= 1, got {}", self.granularity),
            });
        }
        if !self.thickness.is_finite() || self.thickness <= 0.0 {
            return Err(ConfigError::InvalidTracker {
                reason: format!("thickness must be finite and > 0, got {}", self.thickness),
            });
        }
        if !self.pitch.is_finite() || self.pitch < self.thickness {
            return Err(ConfigError::InvalidTracker {
                reason: format!(
                    "pitch ({}) must be finite and at least the layer thickness ({})",
                    self.pitch, self.thickness,
                ),
            });
        }
        Ok(())
    }
}

// ── DetectorConfig ─────────────────────────────────────────────────

/// Complete configuration of one detector construction.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorConfig {
    /// Geometry preset supplying layer counts, thicknesses, and grids.
    pub preset: GeometryPreset,
    /// Front face of the first calorimeter layer. Default: the origin.
    pub origin: Vec3,
    /// Absorber fraction of electromagnetic layers. Default: 0.95.
    pub absorber_fraction_em: f64,
    /// Absorber fraction of hadronic layers. Default: 0.95.
    pub absorber_fraction_hadronic: f64,
    /// Calibration factor of electromagnetic cells. Default: 1.0.
    pub calibration_em: f64,
    /// Calibration factor of hadronic cells. Default: 1.0.
    pub calibration_hadronic: f64,
    /// Tracker section settings.
    pub tracker: TrackerConfig,
    /// Catalog names of the detector materials.
    pub materials: MaterialNames,
    /// World lateral size as a multiple of the layer size. Default: 1.2.
    pub world_margin: f64,
    /// Half-depth of the world box in mm. Default: 4000.
    pub world_half_z: f64,
    /// Clearance between sandwich surfaces in mm. Default: 0.
    pub sandwich_epsilon: f64,
}

impl DetectorConfig {
    /// Configuration for `preset` with every other setting at its default.
    pub fn new(preset: GeometryPreset) -> Self {
        Self {
            preset,
            origin: Vec3::ZERO,
            absorber_fraction_em: 0.95,
            absorber_fraction_hadronic: 0.95,
            calibration_em: 1.0,
            calibration_hadronic: 1.0,
            tracker: TrackerConfig::default(),
            materials: MaterialNames::default(),
            world_margin: 1.2,
            world_half_z: 4000.0,
            sandwich_epsilon: 0.0,
        }
    }

    /// Check the scalar settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for fraction in [self.absorber_fraction_em, self.absorber_fraction_hadronic] {
            if !(0.0..1.0).contains(&fraction) {
                return Err(ConfigError::InvalidAbsorberFraction { value: fraction });
            }
        }
        for calibration in [self.calibration_em, self.calibration_hadronic] {
            if !calibration.is_finite() {
                return Err(ConfigError::InvalidCalibration { value: calibration });
            }
        }
        if !self.world_margin.is_finite() || self.world_margin < 1.0 {
            return Err(ConfigError::InvalidSetting {
                field: "world_margin",
                requirement: "finite and at least 1",
                value: self.world_margin,
            });
        }
        if !self.world_half_z.is_finite() || self.world_half_z <= 0.0 {
            return Err(ConfigError::InvalidSetting {
                field: "world_half_z",
                requirement: "finite and positive",
                value: self.world_half_z,
            });
        }
        if !self.sandwich_epsilon.is_finite() || self.sandwich_epsilon < 0.0 {
            return Err(ConfigError::InvalidSetting {
                field: "sandwich_epsilon",
                requirement: "finite and non-negative",
                value: self.sandwich_epsilon,
            });
        }
        for (field, value) in [
            ("origin.x", self.origin.x),
            ("origin.y", self.origin.y),
            ("origin.z", self.origin.z),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidSetting {
                    field,
                    requirement: "finite",
                    value,
                });
            }
        }
        if self.tracker.layers.unwrap_or(0) > 0 {
            self.tracker.validate()?;
        }
        Ok(())
    }

    /// Resolve the preset, applying the tracker layer override.
    pub fn resolve(&self) -> ResolvedPreset {
        let mut resolved = PresetResolver::resolve(self.preset);
        if let Some(layers) = self.tracker.layers {
            resolved.tracker_layers = layers;
        }
        resolved
    }

    /// Per-layer specs in stacking order: electromagnetic, hadronic, then
    /// tracker layers, indexed consecutively from zero.
    pub fn layer_specs(&self, resolved: &ResolvedPreset) -> Vec<LayerSpec> {
        let calorimeter = resolved.calorimeter_layers();
        let mut specs = Vec::with_capacity((calorimeter + resolved.tracker_layers) as usize);

        for i in 0..calorimeter {
            let em = i < resolved.em_layers;
            let slot = i as usize;
            specs.push(LayerSpec {
                index: LayerIndex(i),
                role: if em {
                    LayerRole::Electromagnetic
                } else {
                    LayerRole::Hadronic
                },
                thickness: if em {
                    resolved.em_thickness
                } else {
                    resolved.hadronic_thickness
                },
                granularity: resolved.granularity.get(slot).copied().unwrap_or(0),
                split_granularity: resolved.split_granularity.get(slot).copied().unwrap_or(0),
                absorber_fraction: if em {
                    self.absorber_fraction_em
                } else {
                    self.absorber_fraction_hadronic
                },
                calibration: if em {
                    self.calibration_em
                } else {
                    self.calibration_hadronic
                },
            });
        }

        for i in 0..resolved.tracker_layers {
            specs.push(LayerSpec {
                index: LayerIndex(calorimeter + i),
                role: LayerRole::Tracker,
                thickness: self.tracker.thickness,
                granularity: self.tracker.granularity,
                split_granularity: self.tracker.split_granularity,
                absorber_fraction: 0.0,
                calibration: 1.0,
            });
        }
        specs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        for preset in GeometryPreset::ALL {
            assert!(DetectorConfig::new(preset).validate().is_ok());
        }
    }

    #[test]
    fn absorber_fraction_must_leave_a_gap() {
        let mut cfg = DetectorConfig::new(GeometryPreset::Standard);
        cfg.absorber_fraction_hadronic = 1.0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidAbsorberFraction { value: 1.0 })
        );
        cfg.absorber_fraction_hadronic = -0.1;
        assert!(cfg.validate().is_err());
        cfg.absorber_fraction_hadronic = 0.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn nan_calibration_rejected() {
        let mut cfg = DetectorConfig::new(GeometryPreset::EcalOnly);
        cfg.calibration_em = f64::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidCalibration { .. })
        ));
    }

    #[test]
    fn world_and_clearance_errors_name_their_field() {
        let mut cfg = DetectorConfig::new(GeometryPreset::Standard);
        cfg.world_margin = 0.5;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidSetting { field: "world_margin", .. })
        ));

        let mut cfg = DetectorConfig::new(GeometryPreset::Standard);
        cfg.world_half_z = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidSetting { field: "world_half_z", .. })
        ));

        let mut cfg = DetectorConfig::new(GeometryPreset::Standard);
        cfg.sandwich_epsilon = -1.0;
        let err = cfg.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "sandwich_epsilon must be finite and non-negative, got -1"
        );

        let mut cfg = DetectorConfig::new(GeometryPreset::Standard);
        cfg.origin = Vec3::new(f64::INFINITY, 0.0, 0.0);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidSetting { field: "origin.x", .. })
        ));
    }

    #[test]
    fn tracker_checked_only_when_enabled() {
        let mut cfg = DetectorConfig::new(GeometryPreset::EcalOnly);
        cfg.tracker.thickness = 0.0;
        assert!(cfg.validate().is_ok());
        cfg.tracker.layers = Some(2);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidTracker { .. })
        ));
    }

    #[test]
    fn layer_specs_follow_sections() {
        let cfg = DetectorConfig::new(GeometryPreset::Standard);
        let resolved = cfg.resolve();
        let specs = cfg.layer_specs(&resolved);
        assert_eq!(specs.len(), 25);
        assert_eq!(specs[9].role, LayerRole::Electromagnetic);
        assert_eq!(specs[10].role, LayerRole::Hadronic);
        assert_eq!(specs[10].thickness, resolved.hadronic_thickness);
        for (i, spec) in specs.iter().enumerate() {
            assert_eq!(spec.index, LayerIndex(i as u32));
        }
    }

    #[test]
    fn tracker_override_appends_layers() {
        let mut cfg = DetectorConfig::new(GeometryPreset::EcalOnly);
        cfg.tracker.layers = Some(3);
        let resolved = cfg.resolve();
        assert_eq!(resolved.tracker_layers, 3);
        let specs = cfg.layer_specs(&resolved);
        assert_eq!(specs.len(), 13);
        let trackers: Vec<_> = specs.iter().filter(|s| s.is_tracker()).collect();
        assert_eq!(trackers.len(), 3);
        assert_eq!(trackers[0].index, LayerIndex(10));
        assert!(trackers.iter().all(|s| s.absorber_fraction == 0.0
            && s.granularity == 64
            && s.split_granularity == -1));
    }
}
