//! Benchmark profiles and utilities for the Strata detector layout framework.
//!
//! - [`reference_config`]: the standard sampling calorimeter (~5K cells)
//! - [`stress_config`]: the 60-layer homogeneous detector plus two
//!   tracker layers (~62K cells)
//! - [`build_layout`]: construction against the recording mock engine
//! - [`synthetic_steps`]: deterministic step stream over a registry

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strata_core::{BuildError, PlacementHandle};
use strata_layout::{DetectorConfig, DetectorConstruction, GeometryPreset, LayerBuilder, LayoutResult};
use strata_registry::SensorRegistry;
use strata_test_utils::{MockMaterialCatalog, MockSolidEngine};

/// The standard preset with default settings.
pub fn reference_config() -> DetectorConfig {
    DetectorConfig::new(GeometryPreset::Standard)
}

/// The homogeneous no-tracker preset with two tracker layers forced on.
pub fn stress_config() -> DetectorConfig {
    let mut config = DetectorConfig::new(GeometryPreset::HomogeneousNoTracker);
    config.tracker.layers = Some(2);
    config
}

/// Build `config` against a fresh mock engine and the default catalog.
pub fn build_layout(config: DetectorConfig) -> Result<LayoutResult, BuildError> {
    let builder = LayerBuilder::new(config, &MockMaterialCatalog::with_defaults())?;
    builder.build(&mut MockSolidEngine::new())
}

/// Generate `n` deterministic `(placement, energy, track_length)` steps.
///
/// Roughly one step in eight lands outside any sensor (using a placement
/// handle no engine hands out); the rest alternate between gap and
/// absorber placements of pseudo-randomly chosen cells.
pub fn synthetic_steps(
    registry: &SensorRegistry,
    n: usize,
    seed: u64,
) -> Vec<(PlacementHandle, f64, f64)> {
    let cells = registry.as_slice();
    let mut state = seed;
    let mut steps = Vec::with_capacity(n);
    for i in 0..n {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let energy = (state >> 40) as f64 / (1u64 << 24) as f64;
        if cells.is_empty() || state % 8 == 0 {
            steps.push((PlacementHandle(u64::MAX), energy, 0.1));
            continue;
        }
        let cell = &cells[(state >> 16) as usize % cells.len()];
        let placement = match (i % 2, cell.absorber()) {
            (0, Some(absorber)) => absorber,
            _ => cell.active(),
        };
        steps.push((placement, energy, 0.1));
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_builds() {
        let layout = build_layout(reference_config()).unwrap();
        assert!(!layout.registry.is_empty());
    }

    #[test]
    fn stress_profile_validates() {
        stress_config().validate().unwrap();
    }

    #[test]
    fn synthetic_steps_deterministic() {
        let layout = build_layout(DetectorConfig::new(GeometryPreset::EcalOnly)).unwrap();
        let a = synthetic_steps(&layout.registry, 500, 42);
        let b = synthetic_steps(&layout.registry, 500, 42);
        assert_eq!(a, b);
        assert_eq!(a.len(), 500);
        assert!(a.iter().all(|(_, e, _)| (0.0..1.0).contains(e)));
    }
}
