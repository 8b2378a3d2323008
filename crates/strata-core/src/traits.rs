//! Collaborator traits the layout core calls out through.
//!
//! Solid modeling, material lookup, primary generation, and output
//! persistence all belong to external engines. The core depends only on
//! these seams and treats every returned handle as opaque.

use crate::geom::{Rotation, StepLimits, Vec3};
use crate::handle::{MaterialHandle, PlacementHandle, SolidHandle, VolumeHandle};
use crate::record::{EventRecord, PrimaryState};

/// Factory for solids, logical volumes, and placements.
///
/// Calls are one-shot: the core never reads back what it created.
pub trait SolidEngine {
    /// Create an axis-aligned box with the given half extents.
    fn create_box(&mut self, name: &str, half_extents: Vec3) -> SolidHandle;

    /// Bind a solid to a material.
    fn create_logical_volume(
        &mut self,
        name: &str,
        solid: SolidHandle,
        material: MaterialHandle,
    ) -> VolumeHandle;

    /// Place a logical volume inside `parent` (or as the world root when
    /// `parent` is `None`). `position` is relative to the parent's centre.
    fn place(
        &mut self,
        name: &str,
        volume: VolumeHandle,
        position: Vec3,
        rotation: Option<Rotation>,
        parent: Option<VolumeHandle>,
    ) -> PlacementHandle;

    /// Attach transport limits to a logical volume.
    fn set_step_limits(&mut self, volume: VolumeHandle, limits: StepLimits);
}

/// Read-only materials catalog.
pub trait MaterialCatalog {
    /// Look a material up by name. `None` if the catalog has no such entry.
    fn lookup_material(&self, name: &str) -> Option<MaterialHandle>;
}

/// Source of primary particles for each event.
///
/// `Send + Sync` because one generator description may be shared by the
/// event actions of several worker threads.
pub trait PrimarySource: Send + Sync {
    /// Human-readable generator name.
    fn name(&self) -> &str;

    /// State of the most recently generated primary.
    fn primary(&self) -> PrimaryState;
}

/// Column-oriented output writer owning the on-disk schema.
pub trait PersistenceSink {
    /// Open an output file for a new run.
    fn open(&mut self, file_name: &str);

    /// Append one event's record.
    fn write_event(&mut self, record: &EventRecord);

    /// Flush and close the current output file.
    fn close(&mut self);
}
