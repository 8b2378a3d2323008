//! The append-only sensor arena.

use std::sync::Arc;

use indexmap::IndexMap;
use strata_core::{DepositRole, LayerIndex, PlacementHandle, RegistryError, SensorId};

use crate::cell::{SensorCell, SensorCellSpec};

/// Ordered, append-only collection of every sensor cell in the detector.
///
/// Insertion order, id order, and creation order coincide: `SensorId(n)`
/// lives at index `n`. There is no removal; the registry lives as long as
/// the detector.
#[derive(Clone, Debug, Default)]
pub struct SensorRegistry {
    cells: Vec<SensorCell>,
    /// Maps every active and absorber placement to its sensor.
    by_placement: IndexMap<PlacementHandle, (SensorId, DepositRole)>,
    /// Half-open index span covering each layer's cells.
    layer_spans: IndexMap<LayerIndex, (usize, usize)>,
}

/// Frozen registry shared read-only by every event worker.
pub type SharedSensorRegistry = Arc<SensorRegistry>;

impl SensorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell, assigning it the next sequential identifier.
    ///
    /// Fails only if the identifier space is exhausted or one of the cell's
    /// placements is already owned by another sensor.
    pub fn append(&mut self, spec: SensorCellSpec) -> Result<SensorId, RegistryError> {
        let index = self.cells.len();
        let id = u32::try_from(index)
            .map(SensorId)
            .map_err(|_| RegistryError::IdSpaceExhausted)?;

        for placement in std::iter::once(spec.active).chain(spec.absorber) {
            if self.by_placement.contains_key(&placement) {
                return Err(RegistryError::DuplicatePlacement { placement });
            }
        }
        if spec.absorber == Some(spec.active) {
            return Err(RegistryError::DuplicatePlacement {
                placement: spec.active,
            });
        }

        self.by_placement
            .insert(spec.active, (id, DepositRole::Gap));
        if let Some(absorber) = spec.absorber {
            self.by_placement
                .insert(absorber, (id, DepositRole::Absorber));
        }
        let span = self
            .layer_spans
            .entry(spec.layer)
            .or_insert((index, index));
        span.1 = index + 1;

        self.cells.push(SensorCell::new(id, spec));
        Ok(id)
    }

    /// Number of registered cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell has been registered.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Look a cell up by id.
    pub fn get(&self, id: SensorId) -> Option<&SensorCell> {
        self.cells.get(id.index())
    }

    /// Mutable access for post-construction calibration.
    ///
    /// Only reachable before the registry is frozen with
    /// [`into_shared`](Self::into_shared).
    pub fn get_mut(&mut self, id: SensorId) -> Option<&mut SensorCell> {
        self.cells.get_mut(id.index())
    }

    /// All cells in id order.
    pub fn iter(&self) -> std::slice::Iter<'_, SensorCell> {
        self.cells.iter()
    }

    /// All cells as a slice, indexable by [`SensorId::index`].
    pub fn as_slice(&self) -> &[SensorCell] {
        &self.cells
    }

    /// Resolve a placement reported by transport to its sensor and the
    /// material role of the sub-volume.
    ///
    /// Returns `None` for placements that are not sensor sub-volumes
    /// (world, layer containers, sandwich containers).
    pub fn find_by_placement(&self, placement: PlacementHandle) -> Option<(SensorId, DepositRole)> {
        self.by_placement.get(&placement).copied()
    }

    /// Cells of one layer in creation order.
    pub fn iter_layer(&self, layer: LayerIndex) -> impl Iterator<Item = &SensorCell> + '_ {
        let (start, end) = self.layer_spans.get(&layer).copied().unwrap_or((0, 0));
        self.cells[start..end]
            .iter()
            .filter(move |c| c.layer() == layer)
    }

    /// Layers that own at least one cell, in the order they were first seen.
    pub fn layers(&self) -> impl Iterator<Item = LayerIndex> + '_ {
        self.layer_spans.keys().copied()
    }

    /// Cells belonging to the tracking section.
    pub fn tracker_cells(&self) -> impl Iterator<Item = &SensorCell> + '_ {
        self.cells.iter().filter(|c| c.is_tracker())
    }

    /// Cells belonging to the calorimeter.
    pub fn calorimeter_cells(&self) -> impl Iterator<Item = &SensorCell> + '_ {
        self.cells.iter().filter(|c| !c.is_tracker())
    }

    /// Summed footprint area of every cell in `layer`.
    pub fn layer_area(&self, layer: LayerIndex) -> f64 {
        self.iter_layer(layer).map(SensorCell::area).sum()
    }

    /// Summed footprint area of every cell in the detector.
    pub fn total_area(&self) -> f64 {
        self.cells.iter().map(SensorCell::area).sum()
    }

    /// Freeze the registry for shared read-only use.
    pub fn into_shared(self) -> SharedSensorRegistry {
        Arc::new(self)
    }
}

impl<'a> IntoIterator for &'a SensorRegistry {
    type Item = &'a SensorCell;
    type IntoIter = std::slice::Iter<'a, SensorCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strata_core::Vec3;

    fn spec(layer: u32, active: u64, absorber: Option<u64>) -> SensorCellSpec {
        SensorCellSpec {
            layer: LayerIndex(layer),
            center: Vec3::ZERO,
            side: 10.0,
            thickness: 1.0,
            small: false,
            tracker: false,
            active: PlacementHandle(active),
            absorber: absorber.map(PlacementHandle),
            calibration: 1.0,
        }
    }

    #[test]
    fn append_assigns_sequential_ids() {
        let mut reg = SensorRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.append(spec(0, 1, Some(2))).unwrap(), SensorId(0));
        assert_eq!(reg.append(spec(0, 3, Some(4))).unwrap(), SensorId(1));
        assert_eq!(reg.append(spec(1, 5, None)).unwrap(), SensorId(2));
        assert_eq!(reg.len(), 3);
        for (i, cell) in reg.iter().enumerate() {
            assert_eq!(cell.id().index(), i);
        }
    }

    #[test]
    fn placements_resolve_to_sensor_and_role() {
        let mut reg = SensorRegistry::new();
        reg.append(spec(0, 1, Some(2))).unwrap();
        let id = reg.append(spec(0, 3, Some(4))).unwrap();
        assert_eq!(
            reg.find_by_placement(PlacementHandle(3)),
            Some((id, DepositRole::Gap))
        );
        assert_eq!(
            reg.find_by_placement(PlacementHandle(4)),
            Some((id, DepositRole::Absorber))
        );
        assert_eq!(reg.find_by_placement(PlacementHandle(99)), None);
    }

    #[test]
    fn duplicate_placement_rejected_without_side_effects() {
        let mut reg = SensorRegistry::new();
        reg.append(spec(0, 1, Some(2))).unwrap();
        let err = reg.append(spec(0, 2, None)).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicatePlacement {
                placement: PlacementHandle(2)
            }
        );
        assert_eq!(reg.len(), 1);
        // The next successful append still gets the next id.
        assert_eq!(reg.append(spec(0, 7, None)).unwrap(), SensorId(1));
    }

    #[test]
    fn active_and_absorber_must_differ() {
        let mut reg = SensorRegistry::new();
        assert!(reg.append(spec(0, 5, Some(5))).is_err());
        assert!(reg.is_empty());
    }

    #[test]
    fn iter_layer_returns_only_that_layer() {
        let mut reg = SensorRegistry::new();
        reg.append(spec(0, 1, None)).unwrap();
        reg.append(spec(0, 2, None)).unwrap();
        reg.append(spec(1, 3, None)).unwrap();
        assert_eq!(reg.iter_layer(LayerIndex(0)).count(), 2);
        assert_eq!(reg.iter_layer(LayerIndex(1)).count(), 1);
        assert_eq!(reg.iter_layer(LayerIndex(5)).count(), 0);
        assert_eq!(
            reg.layers().collect::<Vec<_>>(),
            vec![LayerIndex(0), LayerIndex(1)]
        );
        assert_eq!(reg.layer_area(LayerIndex(0)), 200.0);
        assert_eq!(reg.total_area(), 300.0);
    }

    #[test]
    fn tracker_and_calorimeter_partition() {
        let mut reg = SensorRegistry::new();
        reg.append(spec(0, 1, None)).unwrap();
        let mut trk = spec(1, 2, None);
        trk.tracker = true;
        reg.append(trk).unwrap();
        assert_eq!(reg.tracker_cells().count(), 1);
        assert_eq!(reg.calorimeter_cells().count(), 1);
    }

    #[test]
    fn calibration_set_before_freezing() {
        let mut reg = SensorRegistry::new();
        let id = reg.append(spec(0, 1, None)).unwrap();
        assert!(reg.get_mut(id).unwrap().set_calibration(1.1));
        let shared = reg.into_shared();
        assert_eq!(shared.get(id).unwrap().calibration(), 1.1);
    }

    proptest! {
        #[test]
        fn ids_match_insertion_order(layers in proptest::collection::vec(0u32..4, 1..64)) {
            let mut reg = SensorRegistry::new();
            let mut sorted = layers.clone();
            sorted.sort();
            for (i, layer) in sorted.iter().enumerate() {
                let id = reg.append(spec(*layer, i as u64, None)).unwrap();
                prop_assert_eq!(id, SensorId(i as u32));
            }
            let total: usize = reg.layers().map(|l| reg.iter_layer(l).count()).sum();
            prop_assert_eq!(total, reg.len());
        }
    }
}
