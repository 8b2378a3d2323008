//! Test utilities and mock collaborators for Strata development.
//!
//! Provides recording implementations of the collaborator traits
//! ([`SolidEngine`], [`MaterialCatalog`]) so construction can be
//! exercised and inspected without a real solid-modeling engine, plus
//! event-side fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{FixedPrimary, MemorySink, SinkCall};

use indexmap::IndexMap;
use strata_core::{
    MaterialCatalog, MaterialHandle, PlacementHandle, Rotation, SolidEngine, SolidHandle,
    StepLimits, Vec3, VolumeHandle,
};

/// A box created through [`MockSolidEngine::create_box`].
#[derive(Clone, Debug, PartialEq)]
pub struct BoxRecord {
    pub handle: SolidHandle,
    pub name: String,
    pub half_extents: Vec3,
}

/// A logical volume created through the mock engine.
#[derive(Clone, Debug, PartialEq)]
pub struct VolumeRecord {
    pub handle: VolumeHandle,
    pub name: String,
    pub solid: SolidHandle,
    pub material: MaterialHandle,
}

/// A placement created through the mock engine.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementRecord {
    pub handle: PlacementHandle,
    pub name: String,
    pub volume: VolumeHandle,
    pub position: Vec3,
    pub rotation: Option<Rotation>,
    pub parent: Option<VolumeHandle>,
}

/// Solid engine that records every call and hands out sequential handles.
///
/// All three handle kinds share one counter, so no two handles of any
/// kind carry the same value.
#[derive(Debug, Default)]
pub struct MockSolidEngine {
    pub boxes: Vec<BoxRecord>,
    pub volumes: Vec<VolumeRecord>,
    pub placements: Vec<PlacementRecord>,
    pub step_limits: Vec<(VolumeHandle, StepLimits)>,
    next: u64,
}

impl MockSolidEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    /// Total number of engine calls made so far.
    pub fn call_count(&self) -> usize {
        self.boxes.len() + self.volumes.len() + self.placements.len() + self.step_limits.len()
    }

    pub fn placement(&self, handle: PlacementHandle) -> Option<&PlacementRecord> {
        self.placements.iter().find(|p| p.handle == handle)
    }

    pub fn volume(&self, handle: VolumeHandle) -> Option<&VolumeRecord> {
        self.volumes.iter().find(|v| v.handle == handle)
    }

    pub fn solid(&self, handle: SolidHandle) -> Option<&BoxRecord> {
        self.boxes.iter().find(|b| b.handle == handle)
    }

    /// Half extents of the box behind a placement.
    pub fn half_extents_of(&self, handle: PlacementHandle) -> Option<Vec3> {
        let placement = self.placement(handle)?;
        let volume = self.volume(placement.volume)?;
        self.solid(volume.solid).map(|b| b.half_extents)
    }

    /// Material of the logical volume behind a placement.
    pub fn material_of(&self, handle: PlacementHandle) -> Option<MaterialHandle> {
        let placement = self.placement(handle)?;
        self.volume(placement.volume).map(|v| v.material)
    }

    /// Step limits attached to a logical volume, if any.
    pub fn limits_of(&self, volume: VolumeHandle) -> Option<StepLimits> {
        self.step_limits
            .iter()
            .find(|(v, _)| *v == volume)
            .map(|(_, l)| *l)
    }

    /// Placements whose name starts with `prefix`.
    pub fn placements_named<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a PlacementRecord> + 'a {
        self.placements
            .iter()
            .filter(move |p| p.name.starts_with(prefix))
    }
}

impl SolidEngine for MockSolidEngine {
    fn create_box(&mut self, name: &str, half_extents: Vec3) -> SolidHandle {
        let handle = SolidHandle(self.next_handle());
        self.boxes.push(BoxRecord {
            handle,
            name: name.to_string(),
            half_extents,
        });
        handle
    }

    fn create_logical_volume(
        &mut self,
        name: &str,
        solid: SolidHandle,
        material: MaterialHandle,
    ) -> VolumeHandle {
        let handle = VolumeHandle(self.next_handle());
        self.volumes.push(VolumeRecord {
            handle,
            name: name.to_string(),
            solid,
            material,
        });
        handle
    }

    fn place(
        &mut self,
        name: &str,
        volume: VolumeHandle,
        position: Vec3,
        rotation: Option<Rotation>,
        parent: Option<VolumeHandle>,
    ) -> PlacementHandle {
        let handle = PlacementHandle(self.next_handle());
        self.placements.push(PlacementRecord {
            handle,
            name: name.to_string(),
            volume,
            position,
            rotation,
            parent,
        });
        handle
    }

    fn set_step_limits(&mut self, volume: VolumeHandle, limits: StepLimits) {
        self.step_limits.push((volume, limits));
    }
}

/// Material catalog backed by a name → handle map.
#[derive(Clone, Debug, Default)]
pub struct MockMaterialCatalog {
    materials: IndexMap<String, MaterialHandle>,
}

impl MockMaterialCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the four default detector materials.
    pub fn with_defaults() -> Self {
        ["Galactic", "G4_Fe", "G4_PbWO4", "G4_Si"]
            .into_iter()
            .fold(Self::new(), |c, name| c.with(name))
    }

    /// Add a material, assigning the next handle.
    pub fn with(mut self, name: &str) -> Self {
        let handle = MaterialHandle(self.materials.len() as u64 + 1000);
        self.materials.insert(name.to_string(), handle);
        self
    }

    /// Remove a material.
    pub fn without(mut self, name: &str) -> Self {
        self.materials.shift_remove(name);
        self
    }

    pub fn handle(&self, name: &str) -> Option<MaterialHandle> {
        self.materials.get(name).copied()
    }
}

impl MaterialCatalog for MockMaterialCatalog {
    fn lookup_material(&self, name: &str) -> Option<MaterialHandle> {
        self.handle(name)
    }
}
