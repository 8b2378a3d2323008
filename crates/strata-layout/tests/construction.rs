//! Integration test: full detector construction through the mock engine.
//!
//! Builds several presets against a recording solid engine and checks the
//! resulting registry against the placements the engine saw.

use strata_core::{ConfigError, DepositRole, LayerIndex, SensorId, Vec3};
use strata_layout::{DetectorConfig, DetectorConstruction, GeometryPreset, LayerBuilder};
use strata_test_utils::{MockMaterialCatalog, MockSolidEngine};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn build(config: DetectorConfig) -> (MockSolidEngine, strata_layout::LayoutResult) {
    init_logging();
    let catalog = MockMaterialCatalog::with_defaults();
    let builder = LayerBuilder::new(config, &catalog).unwrap();
    let mut engine = MockSolidEngine::new();
    let layout = builder.build(&mut engine).unwrap();
    (engine, layout)
}

#[test]
fn ecal_only_cell_count_and_ids() {
    let config = DetectorConfig::new(GeometryPreset::EcalOnly);
    let expected = LayerBuilder::new(config.clone(), &MockMaterialCatalog::with_defaults())
        .unwrap()
        .expected_cell_count()
        .unwrap();
    let (_, layout) = build(config);

    assert_eq!(layout.registry.len(), expected);
    assert_eq!(layout.registry.len(), 1000);
    assert_eq!(layout.layer_placements.len(), 10);
    for (i, cell) in layout.registry.iter().enumerate() {
        assert_eq!(cell.id(), SensorId(i as u32));
    }
}

#[test]
fn world_box_and_limits() {
    let (engine, layout) = build(DetectorConfig::new(GeometryPreset::EcalOnly));
    let world = engine.placement(layout.world).unwrap();
    assert_eq!(world.parent, None);
    assert_eq!(world.position, Vec3::ZERO);
    let half = engine.half_extents_of(layout.world).unwrap();
    assert!((half.x - 1.2 * 352.0 / 2.0).abs() < 1e-9);
    assert_eq!(half.z, 4000.0);
    let limits = engine.limits_of(layout.world_volume).unwrap();
    assert_eq!(limits.max_step, 1.0);
    assert_eq!(limits.max_time, 20.0);

    for placement in &layout.layer_placements {
        assert_eq!(
            engine.placement(*placement).unwrap().parent,
            Some(layout.world_volume)
        );
    }
}

#[test]
fn cells_are_ordered_by_layer_then_scan() {
    let (_, layout) = build(DetectorConfig::new(GeometryPreset::EcalOnly));
    let registry = &layout.registry;

    let mut last_layer = LayerIndex(0);
    let mut last_z = f64::NEG_INFINITY;
    for cell in registry.iter() {
        assert!(cell.layer() >= last_layer);
        assert!(cell.center().z >= last_z);
        last_layer = cell.layer();
        last_z = cell.center().z;
    }

    // Within a layer every coarse cell precedes every fine cell, and fine
    // cells lie in the positive quadrant.
    let layer: Vec<_> = registry.iter_layer(LayerIndex(0)).collect();
    let first_fine = layer.iter().position(|c| c.is_small()).unwrap();
    assert_eq!(first_fine, 75);
    assert!(layer[first_fine..].iter().all(|c| c.is_small()));
    for cell in &layer[first_fine..] {
        assert!(cell.center().x > 0.0 && cell.center().y > 0.0);
    }
}

#[test]
fn every_layer_is_exactly_tiled() {
    let (_, layout) = build(DetectorConfig::new(GeometryPreset::Standard));
    let area = 352.0 * 352.0;
    for layer in layout.registry.layers() {
        assert!((layout.registry.layer_area(layer) - area).abs() < 1e-6);
    }
    assert_eq!(layout.registry.layers().count(), 25);
}

#[test]
fn layer_centres_follow_cumulative_thickness() {
    let (_, layout) = build(DetectorConfig::new(GeometryPreset::Standard));
    let em = layout.preset.em_thickness;
    let had = layout.preset.hadronic_thickness;

    let first = layout.registry.iter_layer(LayerIndex(0)).next().unwrap();
    assert!((first.center().z - em / 2.0).abs() < 1e-9);

    // First hadronic layer starts at the back of the EM section.
    let hadronic = layout.registry.iter_layer(LayerIndex(10)).next().unwrap();
    assert!((hadronic.center().z - (10.0 * em + had / 2.0)).abs() < 1e-9);
}

#[test]
fn placements_resolve_back_to_their_sensor() {
    let (engine, layout) = build(DetectorConfig::new(GeometryPreset::EcalOnly));
    let materials = MockMaterialCatalog::with_defaults();
    for cell in layout.registry.iter().take(200) {
        assert_eq!(
            layout.registry.find_by_placement(cell.active()),
            Some((cell.id(), DepositRole::Gap))
        );
        let absorber = cell.absorber().unwrap();
        assert_eq!(
            layout.registry.find_by_placement(absorber),
            Some((cell.id(), DepositRole::Absorber))
        );
        assert_eq!(engine.material_of(cell.active()), materials.handle("G4_PbWO4"));
        assert_eq!(engine.material_of(absorber), materials.handle("G4_Fe"));
    }
    assert_eq!(layout.registry.find_by_placement(layout.world), None);
}

#[test]
fn calibration_passes_through_to_cells() {
    let mut config = DetectorConfig::new(GeometryPreset::Standard);
    config.calibration_em = 1.1;
    config.calibration_hadronic = 0.9;
    let (_, layout) = build(config);
    for cell in layout.registry.iter() {
        let expected = if cell.layer().0 < 10 { 1.1 } else { 0.9 };
        assert_eq!(cell.calibration(), expected);
    }

    // The layer factor is the starting value; one reassignment remains.
    let mut registry = std::sync::Arc::try_unwrap(layout.registry).unwrap();
    let cell = registry.get_mut(SensorId(0)).unwrap();
    assert!(cell.set_calibration(1.3));
    assert!(!cell.set_calibration(1.4));
    assert_eq!(cell.calibration(), 1.3);
}

#[test]
fn zero_absorber_fraction_creates_no_absorbers() {
    let mut config = DetectorConfig::new(GeometryPreset::EcalOnly);
    config.absorber_fraction_em = 0.0;
    let (engine, layout) = build(config);
    assert!(layout.registry.iter().all(|c| c.absorber().is_none()));
    assert_eq!(engine.placements_named("absorber_").count(), 0);
}

#[test]
fn tracker_cells_are_flagged_and_unabsorbed() {
    let mut config = DetectorConfig::new(GeometryPreset::EcalOnly);
    config.tracker.layers = Some(2);
    let (engine, layout) = build(config);
    let registry = &layout.registry;

    assert_eq!(registry.calorimeter_cells().count(), 1000);
    let trackers: Vec<_> = registry.tracker_cells().collect();
    assert_eq!(trackers.len(), 2 * 64 * 64);
    let silicon = MockMaterialCatalog::with_defaults().handle("G4_Si");
    for cell in trackers.iter().step_by(97) {
        assert!(cell.absorber().is_none());
        assert!(cell.layer() >= LayerIndex(10));
        assert!(cell.center().z < 0.0);
        assert_eq!(engine.material_of(cell.active()), silicon);
    }
    // Tracker cells are registered after every calorimeter cell.
    assert!(registry.as_slice()[..1000].iter().all(|c| !c.is_tracker()));
}

#[test]
fn missing_material_creates_nothing() {
    init_logging();
    let catalog = MockMaterialCatalog::with_defaults().without("G4_Si");
    let err = LayerBuilder::new(DetectorConfig::new(GeometryPreset::EcalOnly), &catalog)
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::MissingMaterial {
            role: "tracker",
            name: "G4_Si".to_string()
        }
    );
}

#[test]
fn bad_layer_grid_aborts_before_any_engine_call() {
    init_logging();
    let mut config = DetectorConfig::new(GeometryPreset::EcalOnly);
    config.tracker.layers = Some(1);
    config.tracker.granularity = 63;
    let builder = LayerBuilder::new(config, &MockMaterialCatalog::with_defaults()).unwrap();
    let mut engine = MockSolidEngine::new();
    let err = builder.build(&mut engine).unwrap_err();
    assert!(matches!(
        err,
        strata_core::BuildError::Config(ConfigError::OddSplitGranularity { .. })
    ));
    assert_eq!(engine.call_count(), 0);
}

#[test]
fn homogeneous_no_tracker_scenario() {
    let config = DetectorConfig::new(GeometryPreset::HomogeneousNoTracker);
    let builder = LayerBuilder::new(config, &MockMaterialCatalog::with_defaults()).unwrap();
    let resolved = builder.resolved();
    assert_eq!(resolved.em_layers, 60);
    assert_eq!(resolved.tracker_layers, 0);
    assert!((resolved.total_thickness - 2500.0).abs() < 1e-9);
    assert!(builder.layer_specs().iter().all(|s| s.granularity == 30
        && s.split_granularity == -15));
    assert_eq!(builder.expected_cell_count().unwrap(), 60 * 900);
}

#[test]
fn repeated_builds_are_identical() {
    let (_, a) = build(DetectorConfig::new(GeometryPreset::EcalOnlyIrregular));
    let (_, b) = build(DetectorConfig::new(GeometryPreset::EcalOnlyIrregular));
    assert_eq!(a.layers, b.layers);
    assert_eq!(a.registry.as_slice(), b.registry.as_slice());
}

#[test]
fn oversized_clearance_aborts_before_any_engine_call() {
    init_logging();
    let mut config = DetectorConfig::new(GeometryPreset::EcalOnly);
    config.sandwich_epsilon = 1.0;
    let builder = LayerBuilder::new(config, &MockMaterialCatalog::with_defaults()).unwrap();
    let mut engine = MockSolidEngine::new();
    let err = builder.build(&mut engine).unwrap_err();
    assert!(matches!(
        err,
        strata_core::BuildError::Config(ConfigError::SandwichClearance { .. })
    ));
    assert_eq!(engine.call_count(), 0);
}

#[test]
fn accepted_clearance_yields_positive_boxes() {
    let mut config = DetectorConfig::new(GeometryPreset::Standard);
    config.tracker.layers = Some(2);
    config.sandwich_epsilon = 0.05;
    let (engine, _) = build(config);
    for record in &engine.boxes {
        let h = record.half_extents;
        assert!(
            h.x > 0.0 && h.y > 0.0 && h.z > 0.0,
            "{} has half extents {h:?}",
            record.name
        );
    }
}

#[test]
fn misplaced_stack_aborts_before_any_engine_call() {
    init_logging();
    let mut config = DetectorConfig::new(GeometryPreset::Standard);
    config.world_half_z = 100.0;
    config.origin = Vec3::new(500.0, 0.0, 0.0);
    let builder = LayerBuilder::new(config, &MockMaterialCatalog::with_defaults()).unwrap();
    let mut engine = MockSolidEngine::new();
    let err = builder.build(&mut engine).unwrap_err();
    assert!(matches!(
        err,
        strata_core::BuildError::Config(ConfigError::OutsideWorld { .. })
    ));
    assert_eq!(engine.call_count(), 0);
}

#[test]
fn every_cell_lies_inside_the_world() {
    let mut config = DetectorConfig::new(GeometryPreset::EcalOnly);
    config.tracker.layers = Some(3);
    config.origin = Vec3::new(10.0, -10.0, 50.0);
    let (engine, layout) = build(config);
    let world = engine.half_extents_of(layout.world).unwrap();
    for cell in layout.registry.iter() {
        let c = cell.center();
        let h = cell.side() / 2.0;
        assert!(c.x.abs() + h <= world.x);
        assert!(c.y.abs() + h <= world.y);
        assert!(c.z.abs() + cell.thickness() / 2.0 <= world.z);
    }
}
