//! Layer stacking and detector construction.
//!
//! [`LayerBuilder`] turns a validated [`DetectorConfig`] into solids,
//! placements, and a populated [`SensorRegistry`]. Construction runs in
//! two phases:
//!
//! 1. **Plan**: every layer's thickness and grid is validated and its
//!    front face computed. No engine call is made, so a configuration
//!    error leaves nothing behind.
//! 2. **Materialise**: world, layer volumes, and one sandwich per cell are
//!    created through the [`SolidEngine`] and each cell is registered in
//!    creation order.
//!
//! Calorimeter layers are stacked from the configured origin, each front
//! face at the previous layer's back face. Tracker layers are placed
//! upstream of the calorimeter at a fixed pitch.

use log::{debug, info};
use strata_core::{
    BuildError, ConfigError, MaterialCatalog, PlacementHandle, SolidEngine, StepLimits, Vec3,
    VolumeHandle,
};
use strata_registry::{SensorCellSpec, SensorRegistry, SharedSensorRegistry};

use crate::config::DetectorConfig;
use crate::grid::SensorGridLayout;
use crate::layer::LayerSpec;
use crate::materials::MaterialSet;
use crate::preset::ResolvedPreset;
use crate::sandwich::{build_sandwich, max_clearance, SandwichSpec};

/// Maximum step inside the world volume, in mm.
pub const WORLD_MAX_STEP: f64 = 1.0;
/// Maximum tracking time inside the world volume, in seconds.
pub const WORLD_MAX_TIME: f64 = 20.0;
/// Maximum tracking time inside a layer volume, in seconds.
pub const LAYER_MAX_TIME: f64 = 2.0;

/// Everything a finished construction hands back.
#[derive(Clone, Debug)]
pub struct LayoutResult {
    /// Placement of the world volume.
    pub world: PlacementHandle,
    /// Logical world volume, parent of every layer.
    pub world_volume: VolumeHandle,
    /// Layer specs in stacking order.
    pub layers: Vec<LayerSpec>,
    /// Placement of each layer volume, parallel to `layers`.
    pub layer_placements: Vec<PlacementHandle>,
    /// Frozen registry of every sensor cell.
    pub registry: SharedSensorRegistry,
    /// The resolved preset tables the layout was built from.
    pub preset: ResolvedPreset,
}

/// Builds a detector through a solid engine.
pub trait DetectorConstruction {
    /// Create the full detector and return its placements and registry.
    fn build(&self, engine: &mut dyn SolidEngine) -> Result<LayoutResult, BuildError>;
}

/// A layer with its validated grid and longitudinal position.
#[derive(Clone, Debug)]
pub struct PlannedLayer {
    /// The layer's construction parameters.
    pub spec: LayerSpec,
    /// Its sensor grid.
    pub grid: SensorGridLayout,
    /// World z of the layer's front face.
    pub front_z: f64,
}

impl PlannedLayer {
    /// World z of the layer's centre.
    pub fn center_z(&self) -> f64 {
        self.front_z + self.spec.thickness / 2.0
    }

    fn name(&self, tracker_base: u32) -> String {
        if self.spec.is_tracker() {
            format!("tracker{}", self.spec.index.0 - tracker_base)
        } else {
            format!("layer{}", self.spec.index.0)
        }
    }
}

/// Stacks layers and materialises their sensor cells.
#[derive(Clone, Debug)]
pub struct LayerBuilder {
    config: DetectorConfig,
    resolved: ResolvedPreset,
    specs: Vec<LayerSpec>,
    materials: MaterialSet,
}

impl LayerBuilder {
    /// Validate `config`, resolve its preset, and bind its materials.
    pub fn new(config: DetectorConfig, catalog: &dyn MaterialCatalog) -> Result<Self, ConfigError> {
        config.validate()?;
        let resolved = config.resolve();
        let specs = config.layer_specs(&resolved);
        let materials = MaterialSet::resolve(catalog, &config.materials)?;
        Ok(Self {
            config,
            resolved,
            specs,
            materials,
        })
    }

    /// The configuration this builder was created from.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// The resolved preset tables.
    pub fn resolved(&self) -> &ResolvedPreset {
        &self.resolved
    }

    /// Layer specs in stacking order.
    pub fn layer_specs(&self) -> &[LayerSpec] {
        &self.specs
    }

    /// Bound material handles.
    pub fn materials(&self) -> &MaterialSet {
        &self.materials
    }

    /// Validate every layer and compute its front face.
    ///
    /// Also checks that the sandwich clearance leaves every box of every
    /// cell non-degenerate and that the whole stack fits inside the world.
    pub fn plan(&self) -> Result<Vec<PlannedLayer>, ConfigError> {
        let size = self.resolved.lateral_size;
        let tracker_layers = self.resolved.tracker_layers as f64;
        let tracker_origin = self.config.origin.z - tracker_layers * self.config.tracker.pitch;

        let mut calorimeter_front = self.config.origin.z;
        let mut tracker_slot = 0.0;
        let mut planned = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            if !spec.thickness.is_finite() || spec.thickness <= 0.0 {
                return Err(ConfigError::InvalidThickness {
                    layer: spec.index,
                    value: spec.thickness,
                });
            }
            let grid =
                SensorGridLayout::new(spec.index, size, spec.granularity, spec.split_granularity)?;
            let smallest_side = grid
                .passes()
                .iter()
                .map(|pass| pass.side)
                .fold(f64::INFINITY, f64::min);
            let limit = max_clearance(smallest_side, spec.thickness, spec.absorber_fraction);
            if self.config.sandwich_epsilon >= limit {
                return Err(ConfigError::SandwichClearance {
                    layer: spec.index,
                    epsilon: self.config.sandwich_epsilon,
                    limit,
                });
            }
            let front_z = if spec.is_tracker() {
                let z = tracker_origin + tracker_slot * self.config.tracker.pitch;
                tracker_slot += 1.0;
                z
            } else {
                let z = calorimeter_front;
                calorimeter_front += spec.thickness;
                z
            };
            planned.push(PlannedLayer {
                spec: spec.clone(),
                grid,
                front_z,
            });
        }
        self.check_fits_world(&planned)?;
        Ok(planned)
    }

    fn check_fits_world(&self, planned: &[PlannedLayer]) -> Result<(), ConfigError> {
        let size = self.resolved.lateral_size;
        let half_xy = self.config.world_margin * size / 2.0;
        let origin = self.config.origin;
        for (axis, offset) in [("x", origin.x), ("y", origin.y)] {
            let extent = offset.abs() + size / 2.0;
            if extent > half_xy {
                return Err(ConfigError::OutsideWorld {
                    axis,
                    extent,
                    limit: half_xy,
                });
            }
        }

        let Some(first) = planned.first() else {
            return Ok(());
        };
        let (lo, hi) = planned.iter().fold(
            (first.front_z, first.front_z + first.spec.thickness),
            |(lo, hi), layer| {
                (
                    lo.min(layer.front_z),
                    hi.max(layer.front_z + layer.spec.thickness),
                )
            },
        );
        let extent = lo.abs().max(hi.abs());
        if extent > self.config.world_half_z {
            return Err(ConfigError::OutsideWorld {
                axis: "z",
                extent,
                limit: self.config.world_half_z,
            });
        }
        Ok(())
    }

    /// Number of sensor cells a build would create.
    pub fn expected_cell_count(&self) -> Result<usize, ConfigError> {
        Ok(self.plan()?.iter().map(|l| l.grid.cell_count()).sum())
    }

    fn build_world(&self, engine: &mut dyn SolidEngine) -> (PlacementHandle, VolumeHandle) {
        let half_xy = self.config.world_margin * self.resolved.lateral_size / 2.0;
        let solid = engine.create_box(
            "world",
            Vec3::new(half_xy, half_xy, self.config.world_half_z),
        );
        let volume = engine.create_logical_volume("world", solid, self.materials.default);
        engine.set_step_limits(
            volume,
            StepLimits {
                max_step: WORLD_MAX_STEP,
                max_time: WORLD_MAX_TIME,
            },
        );
        let placement = engine.place("world", volume, Vec3::ZERO, None, None);
        (placement, volume)
    }

    fn build_layer(
        &self,
        engine: &mut dyn SolidEngine,
        registry: &mut SensorRegistry,
        world: VolumeHandle,
        layer: &PlannedLayer,
    ) -> Result<PlacementHandle, BuildError> {
        let spec = &layer.spec;
        let size = layer.grid.lateral_size();
        let name = layer.name(self.resolved.calorimeter_layers());
        let position = Vec3::new(self.config.origin.x, self.config.origin.y, layer.center_z());

        let solid = engine.create_box(
            &name,
            Vec3::new(size / 2.0, size / 2.0, spec.thickness / 2.0),
        );
        let volume = engine.create_logical_volume(&name, solid, self.materials.default);
        engine.set_step_limits(volume, StepLimits::for_depth(spec.thickness, LAYER_MAX_TIME));
        let placement = engine.place(&name, volume, position, None, Some(world));

        let gap_material = if spec.is_tracker() {
            self.materials.tracker
        } else {
            self.materials.gap
        };

        let mut created = 0usize;
        for cell in layer.grid.cells() {
            let kind = if cell.small { "fine" } else { "sensor" };
            let sandwich = build_sandwich(
                engine,
                &self.materials,
                volume,
                gap_material,
                &SandwichSpec {
                    name: format!("{name}_{kind}_{}_{}", cell.column, cell.row),
                    side: cell.side,
                    thickness: spec.thickness,
                    absorber_fraction: spec.absorber_fraction,
                    epsilon: self.config.sandwich_epsilon,
                    position: Vec3::new(cell.x, cell.y, 0.0),
                    rotation: None,
                },
            );
            let center = position + Vec3::new(cell.x, cell.y, 0.0);
            let id = registry.append(SensorCellSpec {
                layer: spec.index,
                center,
                side: cell.side,
                thickness: spec.thickness,
                small: cell.small,
                tracker: spec.is_tracker(),
                active: sandwich.active,
                absorber: sandwich.absorber,
                calibration: spec.calibration,
            })?;
            debug!("created sensor {id} side {}mm at {center}", cell.side);
            created += 1;
        }

        info!(
            "{name} ({}) at z={:.3}: {created} sensors, granularity {}, split {}",
            spec.role, layer.front_z, spec.granularity, spec.split_granularity,
        );
        Ok(placement)
    }
}

impl DetectorConstruction for LayerBuilder {
    fn build(&self, engine: &mut dyn SolidEngine) -> Result<LayoutResult, BuildError> {
        let planned = self.plan()?;
        let (world, world_volume) = self.build_world(engine);

        let mut registry = SensorRegistry::new();
        let mut layer_placements = Vec::with_capacity(planned.len());
        for layer in &planned {
            layer_placements.push(self.build_layer(engine, &mut registry, world_volume, layer)?);
        }

        info!(
            "{}: created {} sensors in {} layers ({} tracker)",
            self.resolved.preset,
            registry.len(),
            planned.len(),
            self.resolved.tracker_layers,
        );

        Ok(LayoutResult {
            world,
            world_volume,
            layers: self.specs.clone(),
            layer_placements,
            registry: registry.into_shared(),
            preset: self.resolved.clone(),
        })
    }
}
