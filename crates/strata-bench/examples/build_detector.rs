//! End-to-end construction and event loop example.
//!
//! Demonstrates: preset → LayerBuilder → shared registry → EventAction and
//! RunAction → per-event records. Set `RUST_LOG=debug` to see every cell.

use std::sync::Arc;

use env_logger::Env;
use log::info;
use strata_bench::synthetic_steps;
use strata_core::Vec3;
use strata_event::{EventAction, EventHooks, RunAction};
use strata_layout::{DetectorConfig, DetectorConstruction, GeometryPreset, LayerBuilder};
use strata_test_utils::{FixedPrimary, MemorySink, MockMaterialCatalog, MockSolidEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut config = DetectorConfig::new(GeometryPreset::Standard);
    config.tracker.layers = Some(1);
    let builder = LayerBuilder::new(config, &MockMaterialCatalog::with_defaults())?;
    let mut engine = MockSolidEngine::new();
    let layout = builder.build(&mut engine)?;
    info!(
        "{} engine calls, {} sensors, {} tracker",
        engine.call_count(),
        layout.registry.len(),
        layout.registry.tracker_cells().count()
    );

    let mut action = EventAction::new();
    action.attach_generator(Arc::new(FixedPrimary::new("gun", Vec3::along_z(10_000.0))))?;
    action.attach_detector(Arc::clone(&layout.registry))?;
    let mut run = RunAction::new(&action, MemorySink::new(), "standard.out")?;

    run.begin_run(&mut action)?;
    for event in 0..3u64 {
        action.on_event_begin()?;
        for (placement, energy, length) in synthetic_steps(&layout.registry, 1000, event) {
            action.on_step(placement, energy, length)?;
        }
        let record = run.end_event(&mut action)?;
        println!(
            "event {}: absorber {:>8.3} MeV, gap {:>8.3} MeV, {:>4} sensors hit",
            record.event,
            record.absorber.energy,
            record.gap.energy,
            record.sensors.len()
        );
    }
    run.end_run(&action)?;
    Ok(())
}
