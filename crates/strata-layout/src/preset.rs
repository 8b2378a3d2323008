//! Named geometry presets and their per-layer tables.
//!
//! Each preset is a fixed table expressed as generation rules: section
//! layer counts, an electromagnetic layer thickness, a total thickness from
//! which the hadronic layer thickness is derived, and a per-layer
//! granularity profile. The profiles are literal; layer-index thresholds are
//! part of each preset's definition and are not derived from a formula.

use std::fmt;
use std::str::FromStr;

use log::warn;
use strata_core::ConfigError;

/// Lateral size used by every preset that does not override it, in mm.
pub const DEFAULT_LATERAL_SIZE: f64 = 352.0;

/// A named detector layout.
///
/// There is deliberately no `Default`: an unrecognised or missing preset
/// is a configuration error, not a fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryPreset {
    /// Sampling calorimeter: 10 EM + 15 hadronic layers, granularity
    /// stepping down with depth, quadrant split at twice the granularity.
    Standard,
    /// 10 EM + 20 hadronic layers over 2 m, uniform fine grids.
    Homogeneous,
    /// Same profile as [`Homogeneous`](Self::Homogeneous) scaled to 300 mm.
    HomogeneousEcalOnly,
    /// 10 EM layers of 20 mm, granularity 10, quadrant split 5.
    EcalOnly,
    /// 20 hadronic layers over 2 m with an irregular granularity profile.
    HcalOnlyIrregular,
    /// The irregular profile compressed to 250 mm.
    EcalOnlyIrregular,
    /// 60 EM layers over 2.5 m, one metre wide, granularity 30.
    HomogeneousNoTracker,
    /// 50 EM layers of 40 mm, granularity 32.
    HomogeneousMuon,
}

impl GeometryPreset {
    /// Every preset, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Standard,
        Self::Homogeneous,
        Self::HomogeneousEcalOnly,
        Self::EcalOnly,
        Self::HcalOnlyIrregular,
        Self::EcalOnlyIrregular,
        Self::HomogeneousNoTracker,
        Self::HomogeneousMuon,
    ];

    /// Canonical identifier, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Homogeneous => "homogeneous",
            Self::HomogeneousEcalOnly => "homogeneous-ecal-only",
            Self::EcalOnly => "ecal-only",
            Self::HcalOnlyIrregular => "hcal-only-irregular",
            Self::EcalOnlyIrregular => "ecal-only-irregular",
            Self::HomogeneousNoTracker => "homogeneous-no-tracker",
            Self::HomogeneousMuon => "homogeneous-muon",
        }
    }
}

impl fmt::Display for GeometryPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeometryPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| ConfigError::UnknownPreset {
                name: s.to_string(),
            })
    }
}

/// Concrete per-section and per-layer values of a preset.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedPreset {
    /// The preset these values came from.
    pub preset: GeometryPreset,
    /// Number of electromagnetic-section layers.
    pub em_layers: u32,
    /// Number of hadronic-section layers.
    pub hadronic_layers: u32,
    /// Thickness of each EM layer (mm).
    pub em_thickness: f64,
    /// Thickness of each hadronic layer (mm), derived.
    pub hadronic_thickness: f64,
    /// Total calorimeter thickness (mm).
    pub total_thickness: f64,
    /// Lateral size of every layer (mm).
    pub lateral_size: f64,
    /// Coarse granularity per calorimeter layer.
    pub granularity: Vec<i32>,
    /// Split granularity per calorimeter layer.
    pub split_granularity: Vec<i32>,
    /// Number of tracker layers the preset asks for.
    pub tracker_layers: u32,
}

impl ResolvedPreset {
    /// Number of calorimeter layers (EM + hadronic).
    pub fn calorimeter_layers(&self) -> u32 {
        self.em_layers + self.hadronic_layers
    }

    /// Sum of both section thicknesses.
    pub fn section_thickness(&self) -> f64 {
        self.em_layers as f64 * self.em_thickness
            + self.hadronic_layers as f64 * self.hadronic_thickness
    }
}

/// Maps presets to their concrete tables.
pub struct PresetResolver;

/// Generation rules for one preset.
struct Table {
    total: f64,
    em_layers: u32,
    hadronic_layers: u32,
    em_thickness: f64,
    lateral_size: f64,
    /// Layer index -> (granularity, split granularity).
    profile: fn(u32) -> (i32, i32),
}

impl PresetResolver {
    /// Resolve a preset into its concrete tables.
    ///
    /// Pure: resolving the same preset twice yields identical values.
    pub fn resolve(preset: GeometryPreset) -> ResolvedPreset {
        let table = Self::table(preset);
        let (hadronic_thickness, total_thickness) = derive_hadronic_thickness(
            preset,
            table.total,
            table.em_layers,
            table.em_thickness,
            table.hadronic_layers,
        );
        let (granularity, split_granularity) = (0..table.em_layers + table.hadronic_layers)
            .map(table.profile)
            .unzip();

        ResolvedPreset {
            preset,
            em_layers: table.em_layers,
            hadronic_layers: table.hadronic_layers,
            em_thickness: table.em_thickness,
            hadronic_thickness,
            total_thickness,
            lateral_size: table.lateral_size,
            granularity,
            split_granularity,
            tracker_layers: 0,
        }
    }

    /// Parse a preset identifier and resolve it.
    pub fn resolve_named(name: &str) -> Result<ResolvedPreset, ConfigError> {
        Ok(Self::resolve(name.parse()?))
    }

    fn table(preset: GeometryPreset) -> Table {
        match preset {
            GeometryPreset::Standard => Table {
                total: 2000.0,
                em_layers: 10,
                hadronic_layers: 15,
                em_thickness: 15.0,
                lateral_size: DEFAULT_LATERAL_SIZE,
                profile: standard_profile,
            },
            GeometryPreset::Homogeneous => Table {
                total: 2000.0,
                em_layers: 10,
                hadronic_layers: 20,
                em_thickness: 80.0 * 2000.0 / 2000.0,
                lateral_size: DEFAULT_LATERAL_SIZE,
                profile: homogeneous_profile,
            },
            GeometryPreset::HomogeneousEcalOnly => Table {
                total: 300.0,
                em_layers: 10,
                hadronic_layers: 20,
                em_thickness: 80.0 * 300.0 / 2000.0,
                lateral_size: DEFAULT_LATERAL_SIZE,
                profile: homogeneous_profile,
            },
            GeometryPreset::EcalOnly => Table {
                total: 200.0,
                em_layers: 10,
                hadronic_layers: 0,
                em_thickness: 20.0,
                lateral_size: DEFAULT_LATERAL_SIZE,
                profile: ecal_only_profile,
            },
            GeometryPreset::HcalOnlyIrregular => Table {
                total: 2000.0,
                em_layers: 0,
                hadronic_layers: 20,
                em_thickness: 15.0,
                lateral_size: DEFAULT_LATERAL_SIZE,
                profile: irregular_profile,
            },
            GeometryPreset::EcalOnlyIrregular => Table {
                total: 250.0,
                em_layers: 0,
                hadronic_layers: 20,
                em_thickness: 15.0,
                lateral_size: DEFAULT_LATERAL_SIZE,
                profile: irregular_profile,
            },
            GeometryPreset::HomogeneousNoTracker => Table {
                total: 2500.0,
                em_layers: 60,
                hadronic_layers: 0,
                em_thickness: 2500.0 / 60.0,
                lateral_size: 1000.0,
                profile: no_tracker_profile,
            },
            GeometryPreset::HomogeneousMuon => Table {
                total: 2000.0,
                em_layers: 50,
                hadronic_layers: 0,
                em_thickness: 2000.0 / 50.0,
                lateral_size: DEFAULT_LATERAL_SIZE,
                profile: muon_profile,
            },
        }
    }
}

/// Split at twice the granularity; no split below 2.
fn standard_profile(layer: u32) -> (i32, i32) {
    let mut granularity = 8;
    if layer > 3 {
        granularity = 6;
    }
    if layer > 7 {
        granularity = 4;
    }
    if layer > 15 {
        granularity = 2;
    }
    let split = if granularity < 2 { 0 } else { 2 * granularity };
    (granularity, split)
}

fn homogeneous_profile(layer: u32) -> (i32, i32) {
    let granularity = match layer {
        27 => 8,
        28 => 2,
        29 => 1,
        _ => 10,
    };
    // Truncates toward zero: granularity 1 gives no split.
    (granularity, -(granularity / 2))
}

fn ecal_only_profile(_layer: u32) -> (i32, i32) {
    (10, 5)
}

fn irregular_profile(layer: u32) -> (i32, i32) {
    let granularity = match layer {
        0 => 8,
        1 => 12,
        2..=3 => 16,
        4..=7 => 12,
        8..=11 => 8,
        12..=13 => 4,
        _ => 2,
    };
    let split = match granularity {
        g if g < 2 => 0,
        16 => 10,
        12 => 8,
        g => g,
    };
    (granularity, split)
}

fn no_tracker_profile(_layer: u32) -> (i32, i32) {
    (30, -15)
}

fn muon_profile(_layer: u32) -> (i32, i32) {
    (32, -16)
}

/// Returns `(hadronic_thickness, total_thickness)`.
///
/// With no hadronic layers the hadronic thickness is forced to zero and the
/// total is recomputed from the EM section alone.
fn derive_hadronic_thickness(
    preset: GeometryPreset,
    total: f64,
    em_layers: u32,
    em_thickness: f64,
    hadronic_layers: u32,
) -> (f64, f64) {
    let em_total = em_layers as f64 * em_thickness;
    if hadronic_layers == 0 {
        warn!(
            "preset '{preset}': no hadronic layers; hadronic thickness forced to 0, \
             total thickness {em_total} mm from EM section (configured {total} mm)"
        );
        return (0.0, em_total);
    }
    ((total - em_total) / hadronic_layers as f64, total)
}
