//! Per-event absorber/gap energy totals.

use strata_core::{DepositRole, EnergyTally, EventError};

/// Lifecycle state of an [`EnergyAccumulator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccumulatorState {
    /// No event in progress.
    Idle,
    /// Between event begin and event end.
    Accumulating,
}

/// Final totals of one event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EventTotals {
    /// Summed over every absorber step.
    pub absorber: EnergyTally,
    /// Summed over every gap step.
    pub gap: EnergyTally,
}

/// Two-state accumulator of (energy, track length) per deposit role.
///
/// Deposits are only accepted while accumulating, and totals are only
/// readable by ending the event.
#[derive(Debug)]
pub struct EnergyAccumulator {
    state: AccumulatorState,
    totals: EventTotals,
}

impl EnergyAccumulator {
    /// A fresh, idle accumulator.
    pub fn new() -> Self {
        Self {
            state: AccumulatorState::Idle,
            totals: EventTotals::default(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AccumulatorState {
        self.state
    }

    /// Whether an event is in progress.
    pub fn is_accumulating(&self) -> bool {
        self.state == AccumulatorState::Accumulating
    }

    /// Zero both tallies and start accumulating.
    pub fn begin_event(&mut self) -> Result<(), EventError> {
        if self.is_accumulating() {
            return Err(EventError::AlreadyAccumulating);
        }
        self.totals = EventTotals::default();
        self.state = AccumulatorState::Accumulating;
        Ok(())
    }

    /// Add one step's deposit to the tally of `role`.
    pub fn add_deposit(
        &mut self,
        energy: f64,
        track_length: f64,
        role: DepositRole,
    ) -> Result<(), EventError> {
        if !self.is_accumulating() {
            return Err(EventError::NotAccumulating);
        }
        match role {
            DepositRole::Absorber => self.totals.absorber.add(energy, track_length),
            DepositRole::Gap => self.totals.gap.add(energy, track_length),
        }
        Ok(())
    }

    /// Stop accumulating and return the event's totals.
    pub fn end_event(&mut self) -> Result<EventTotals, EventError> {
        if !self.is_accumulating() {
            return Err(EventError::NotAccumulating);
        }
        self.state = AccumulatorState::Idle;
        Ok(self.totals)
    }
}

impl Default for EnergyAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
