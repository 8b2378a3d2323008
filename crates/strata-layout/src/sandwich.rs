//! Materialisation of one sensor cell as an absorber/gap sandwich.
//!
//! ```text
//!        z ──►
//!   ┌──────────────┬──────┐
//!   │   absorber   │ gap  │   container: default material
//!   └──────────────┴──────┘
//!   -t/2      -t/2+a      t/2
//! ```
//!
//! The absorber occupies the front `a = fraction × t` of the container and
//! the gap the remaining depth. Only the gap is sensitive.

use strata_core::{
    MaterialHandle, PlacementHandle, Rotation, SolidEngine, StepLimits, Vec3, VolumeHandle,
};

use crate::materials::MaterialSet;

/// Maximum tracking time inside a gap volume, in seconds.
pub const GAP_MAX_TIME: f64 = 2.0;

/// Geometry of one sandwich.
#[derive(Clone, Debug, PartialEq)]
pub struct SandwichSpec {
    /// Name suffix shared by every volume of the sandwich.
    pub name: String,
    /// Lateral side of the square footprint.
    pub side: f64,
    /// Depth along the stack axis.
    pub thickness: f64,
    /// Fraction of the depth taken by the absorber, in `[0, 1)`.
    pub absorber_fraction: f64,
    /// Clearance subtracted from the container (once) and the
    /// sub-volumes (twice) to keep neighbouring surfaces apart.
    pub epsilon: f64,
    /// Centre of the container relative to its parent.
    pub position: Vec3,
    /// Optional rotation applied to the container and both sub-volumes.
    pub rotation: Option<Rotation>,
}

impl SandwichSpec {
    /// Depth of the absorber plate.
    pub fn absorber_depth(&self) -> f64 {
        self.absorber_fraction * self.thickness
    }

    /// Depth of the active gap.
    pub fn gap_depth(&self) -> f64 {
        (1.0 - self.absorber_fraction) * self.thickness
    }
}

/// Exclusive upper bound on the clearance of a sandwich.
///
/// The absorber and gap boxes shrink by `2ε` on every half-extent, so `ε`
/// must stay below a quarter of the smallest full extent among the side,
/// the gap depth, and (when present) the absorber depth.
pub fn max_clearance(side: f64, thickness: f64, absorber_fraction: f64) -> f64 {
    let gap = (1.0 - absorber_fraction) * thickness;
    let mut smallest = side.min(gap);
    if absorber_fraction > 0.0 {
        smallest = smallest.min(absorber_fraction * thickness);
    }
    smallest / 4.0
}

/// Placements created for one sandwich.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sandwich {
    /// The enclosing container.
    pub container: PlacementHandle,
    /// The absorber plate, absent when the fraction is zero.
    pub absorber: Option<PlacementHandle>,
    /// The active gap.
    pub active: PlacementHandle,
}

/// Create the container, absorber, and gap volumes of one sandwich inside
/// `parent`.
///
/// `gap_material` selects the active material, so tracker layers can swap
/// in silicon while keeping the rest of the sandwich unchanged.
pub fn build_sandwich(
    engine: &mut dyn SolidEngine,
    materials: &MaterialSet,
    parent: VolumeHandle,
    gap_material: MaterialHandle,
    spec: &SandwichSpec,
) -> Sandwich {
    let half = spec.side / 2.0;
    let eps = spec.epsilon;
    let absorber_depth = spec.absorber_depth();
    let gap_depth = spec.gap_depth();

    let container_name = format!("sandwich_{}", spec.name);
    let solid = engine.create_box(
        &container_name,
        Vec3::new(half - eps, half - eps, spec.thickness / 2.0 - eps),
    );
    let container_volume = engine.create_logical_volume(&container_name, solid, materials.default);

    let absorber = (spec.absorber_fraction > 0.0).then(|| {
        let name = format!("absorber_{}", spec.name);
        let solid = engine.create_box(
            &name,
            Vec3::new(half - 2.0 * eps, half - 2.0 * eps, absorber_depth / 2.0 - 2.0 * eps),
        );
        let volume = engine.create_logical_volume(&name, solid, materials.absorber);
        engine.place(
            &name,
            volume,
            Vec3::along_z(-spec.thickness / 2.0 + absorber_depth / 2.0),
            spec.rotation,
            Some(container_volume),
        )
    });

    let gap_name = format!("gap_{}", spec.name);
    let gap_solid = engine.create_box(
        &gap_name,
        Vec3::new(half - 2.0 * eps, half - 2.0 * eps, gap_depth / 2.0 - 2.0 * eps),
    );
    let gap_volume = engine.create_logical_volume(&gap_name, gap_solid, gap_material);
    engine.set_step_limits(
        gap_volume,
        StepLimits::for_depth(spec.thickness, GAP_MAX_TIME),
    );
    let active = engine.place(
        &gap_name,
        gap_volume,
        Vec3::along_z(absorber_depth / 2.0),
        spec.rotation,
        Some(container_volume),
    );

    let container = engine.place(
        &container_name,
        container_volume,
        spec.position,
        spec.rotation,
        Some(parent),
    );

    Sandwich {
        container,
        absorber,
        active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_test_utils::{MockMaterialCatalog, MockSolidEngine};

    use crate::materials::MaterialNames;

    fn setup() -> (MockSolidEngine, MaterialSet, VolumeHandle) {
        let catalog = MockMaterialCatalog::with_defaults();
        let materials = MaterialSet::resolve(&catalog, &MaterialNames::default()).unwrap();
        let mut engine = MockSolidEngine::new();
        let solid = engine.create_box("layer", Vec3::new(10.0, 10.0, 10.0));
        let parent = engine.create_logical_volume("layer", solid, materials.default);
        (engine, materials, parent)
    }

    fn spec(fraction: f64) -> SandwichSpec {
        SandwichSpec {
            name: "0_0".to_string(),
            side: 44.0,
            thickness: 20.0,
            absorber_fraction: fraction,
            epsilon: 0.0,
            position: Vec3::new(1.0, 2.0, 0.0),
            rotation: None,
        }
    }

    #[test]
    fn absorber_sits_in_front_of_gap() {
        let (mut engine, materials, parent) = setup();
        let s = build_sandwich(&mut engine, &materials, parent, materials.gap, &spec(0.75));

        let absorber = engine.placement(s.absorber.unwrap()).unwrap().clone();
        let gap = engine.placement(s.active).unwrap().clone();
        // Absorber depth 15 starts at the container front face (-10).
        assert_eq!(absorber.position, Vec3::along_z(-2.5));
        assert_eq!(gap.position, Vec3::along_z(7.5));
        assert_eq!(
            engine.half_extents_of(s.absorber.unwrap()),
            Some(Vec3::new(22.0, 22.0, 7.5))
        );
        assert_eq!(
            engine.half_extents_of(s.active),
            Some(Vec3::new(22.0, 22.0, 2.5))
        );
        assert_eq!(engine.material_of(s.active), Some(materials.gap));
        assert_eq!(engine.material_of(s.absorber.unwrap()), Some(materials.absorber));

        let container = engine.placement(s.container).unwrap();
        assert_eq!(container.parent, Some(parent));
        assert_eq!(container.position, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(absorber.parent, Some(container.volume));
        assert_eq!(gap.parent, Some(container.volume));
    }

    #[test]
    fn gap_carries_step_limits() {
        let (mut engine, materials, parent) = setup();
        let s = build_sandwich(&mut engine, &materials, parent, materials.gap, &spec(0.5));
        let gap_volume = engine.placement(s.active).unwrap().volume;
        let limits = engine.limits_of(gap_volume).unwrap();
        assert_eq!(limits.max_step, 1.0);
        assert_eq!(limits.max_time, GAP_MAX_TIME);
    }

    #[test]
    fn zero_fraction_has_no_absorber() {
        let (mut engine, materials, parent) = setup();
        let s = build_sandwich(&mut engine, &materials, parent, materials.tracker, &spec(0.0));
        assert_eq!(s.absorber, None);
        assert_eq!(engine.placements_named("absorber_").count(), 0);
        assert_eq!(engine.placement(s.active).unwrap().position, Vec3::ZERO);
        assert_eq!(engine.half_extents_of(s.active), Some(Vec3::new(22.0, 22.0, 10.0)));
        assert_eq!(engine.material_of(s.active), Some(materials.tracker));
    }

    #[test]
    fn epsilon_shrinks_container_once_and_parts_twice() {
        let (mut engine, materials, parent) = setup();
        let mut sp = spec(0.5);
        sp.epsilon = 0.5;
        let s = build_sandwich(&mut engine, &materials, parent, materials.gap, &sp);
        assert_eq!(
            engine.half_extents_of(s.container),
            Some(Vec3::new(21.5, 21.5, 9.5))
        );
        assert_eq!(
            engine.half_extents_of(s.active),
            Some(Vec3::new(21.0, 21.0, 4.0))
        );
    }

    #[test]
    fn clearance_bound_tracks_thinnest_part() {
        // Side 44, gap 10, absorber 10.
        assert_eq!(max_clearance(44.0, 20.0, 0.5), 2.5);
        // Thin gap dominates.
        assert!((max_clearance(44.0, 20.0, 0.95) - 0.25).abs() < 1e-12);
        // No absorber: only side and gap count.
        assert_eq!(max_clearance(8.0, 20.0, 0.0), 2.0);
    }

    #[test]
    fn clearance_below_bound_keeps_boxes_positive() {
        let (mut engine, materials, parent) = setup();
        let mut sp = spec(0.95);
        sp.epsilon = 0.9 * max_clearance(sp.side, sp.thickness, sp.absorber_fraction);
        build_sandwich(&mut engine, &materials, parent, materials.gap, &sp);
        for record in &engine.boxes {
            let h = record.half_extents;
            assert!(h.x > 0.0 && h.y > 0.0 && h.z > 0.0, "{}: {h:?}", record.name);
        }
    }

    #[test]
    fn rotation_is_forwarded() {
        let (mut engine, materials, parent) = setup();
        let mut sp = spec(0.5);
        sp.rotation = Some(Rotation::about_x(0.25));
        let s = build_sandwich(&mut engine, &materials, parent, materials.gap, &sp);
        for handle in [s.container, s.active, s.absorber.unwrap()] {
            assert_eq!(
                engine.placement(handle).unwrap().rotation,
                Some(Rotation::about_x(0.25))
            );
        }
    }
}
