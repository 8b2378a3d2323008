//! Per-event values handed to the persistence collaborator.

use crate::geom::Vec3;
use crate::id::{LayerIndex, SensorId};

/// Running (energy, track length) pair for one material role.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EnergyTally {
    /// Deposited energy in MeV.
    pub energy: f64,
    /// Charged track length in millimetres.
    pub track_length: f64,
}

impl EnergyTally {
    /// Add one step's contribution.
    pub fn add(&mut self, energy: f64, track_length: f64) {
        self.energy += energy;
        self.track_length += track_length;
    }
}

/// Kinematic state of the primary particle, as reported by the generator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PrimaryState {
    /// Momentum in MeV/c.
    pub momentum: Vec3,
    /// Polarization vector.
    pub polarization: Vec3,
}

/// Accumulated quantities for a single sensor over one event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorDeposit {
    /// The sensor that was hit.
    pub sensor: SensorId,
    /// Layer owning the sensor.
    pub layer: LayerIndex,
    /// Raw deposited energy in the active volume.
    pub energy: f64,
    /// Track length in the active volume.
    pub track_length: f64,
    /// Energy-scale factor carried by the sensor.
    pub calibration: f64,
}

/// Everything persisted at the end of one event.
#[derive(Clone, Debug, PartialEq)]
pub struct EventRecord {
    /// Zero-based event number within the run.
    pub event: u64,
    /// Totals over every absorber volume.
    pub absorber: EnergyTally,
    /// Totals over every gap (active) volume.
    pub gap: EnergyTally,
    /// Primary particle state at event end.
    pub primary: PrimaryState,
    /// Per-sensor totals, ordered by sensor id. Sensors with no deposit
    /// are omitted.
    pub sensors: Vec<SensorDeposit>,
}
