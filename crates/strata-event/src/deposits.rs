//! Per-sensor deposits of the current event.

use indexmap::IndexMap;
use strata_core::{SensorDeposit, SensorId};
use strata_registry::SensorCell;

/// Active-volume energy and track length per sensor hit in one event.
///
/// Keyed by sensor id in first-hit order; [`drain_sorted`] hands the
/// entries back in id order.
///
/// [`drain_sorted`]: SensorDeposits::drain_sorted
#[derive(Clone, Debug, Default)]
pub struct SensorDeposits {
    by_sensor: IndexMap<SensorId, SensorDeposit>,
}

impl SensorDeposits {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step's deposit to `cell`'s running total.
    pub fn add(&mut self, cell: &SensorCell, energy: f64, track_length: f64) {
        let entry = self
            .by_sensor
            .entry(cell.id())
            .or_insert_with(|| SensorDeposit {
                sensor: cell.id(),
                layer: cell.layer(),
                energy: 0.0,
                track_length: 0.0,
                calibration: cell.calibration(),
            });
        entry.energy += energy;
        entry.track_length += track_length;
    }

    /// Number of distinct sensors hit.
    pub fn len(&self) -> usize {
        self.by_sensor.len()
    }

    /// Whether no sensor has been hit.
    pub fn is_empty(&self) -> bool {
        self.by_sensor.is_empty()
    }

    /// Running total of one sensor.
    pub fn get(&self, sensor: SensorId) -> Option<&SensorDeposit> {
        self.by_sensor.get(&sensor)
    }

    /// Discard every entry.
    pub fn clear(&mut self) {
        self.by_sensor.clear();
    }

    /// Take every entry, ordered by sensor id, leaving the map empty.
    pub fn drain_sorted(&mut self) -> Vec<SensorDeposit> {
        self.by_sensor.sort_keys();
        self.by_sensor.drain(..).map(|(_, d)| d).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::{LayerIndex, PlacementHandle, Vec3};
    use strata_registry::{SensorCellSpec, SensorRegistry};

    fn registry() -> SensorRegistry {
        let mut reg = SensorRegistry::new();
        for i in 0..3u64 {
            reg.append(SensorCellSpec {
                layer: LayerIndex(0),
                center: Vec3::ZERO,
                side: 1.0,
                thickness: 1.0,
                small: false,
                tracker: false,
                active: PlacementHandle(i),
                absorber: None,
                calibration: 1.0,
            })
            .unwrap();
        }
        reg
    }

    #[test]
    fn drains_in_id_order() {
        let reg = registry();
        let mut deposits = SensorDeposits::new();
        deposits.add(reg.get(SensorId(2)).unwrap(), 1.0, 0.1);
        deposits.add(reg.get(SensorId(0)).unwrap(), 2.0, 0.2);
        deposits.add(reg.get(SensorId(2)).unwrap(), 3.0, 0.3);
        assert_eq!(deposits.len(), 2);
        assert_eq!(deposits.get(SensorId(2)).unwrap().energy, 4.0);

        let drained = deposits.drain_sorted();
        assert_eq!(
            drained.iter().map(|d| d.sensor).collect::<Vec<_>>(),
            vec![SensorId(0), SensorId(2)]
        );
        assert!(deposits.is_empty());
    }
}
