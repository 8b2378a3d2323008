//! Event action: readiness, step routing, and end-of-event persistence.

use std::sync::Arc;

use log::{debug, trace};
use strata_core::{
    DepositRole, EventError, EventRecord, PersistenceSink, PlacementHandle, PrimarySource,
    PrimaryState, ReadinessError,
};
use strata_registry::SharedSensorRegistry;

use crate::accumulator::EnergyAccumulator;
use crate::deposits::SensorDeposits;
use crate::metrics::EventMetrics;

/// Per-event callbacks driven by the host's event loop.
pub trait EventHooks {
    /// Start a new event, zeroing every running total.
    fn on_event_begin(&mut self) -> Result<(), EventError>;

    /// Add a deposit of known role that is not attributed to any sensor.
    fn on_deposit(
        &mut self,
        energy: f64,
        track_length: f64,
        role: DepositRole,
    ) -> Result<(), EventError>;

    /// Finish the event, push its record to `sink`, and return it.
    fn on_event_end(&mut self, sink: &mut dyn PersistenceSink)
        -> Result<EventRecord, EventError>;
}

/// One worker's event-side state.
///
/// Needs a primary generator and the detector's sensor registry before
/// the first event; [`check_ready`](Self::check_ready) reports which is
/// missing. Each worker thread owns its own `EventAction`; only the
/// attached registry and generator are shared.
pub struct EventAction {
    generator: Option<Arc<dyn PrimarySource>>,
    detector: Option<SharedSensorRegistry>,
    accumulator: EnergyAccumulator,
    deposits: SensorDeposits,
    metrics: EventMetrics,
    last_metrics: EventMetrics,
    events: u64,
}

impl EventAction {
    /// An action with no collaborators attached.
    pub fn new() -> Self {
        Self {
            generator: None,
            detector: None,
            accumulator: EnergyAccumulator::new(),
            deposits: SensorDeposits::new(),
            metrics: EventMetrics::default(),
            last_metrics: EventMetrics::default(),
            events: 0,
        }
    }

    /// Attach the primary generator. Only one may ever be attached.
    pub fn attach_generator(
        &mut self,
        generator: Arc<dyn PrimarySource>,
    ) -> Result<(), ReadinessError> {
        if self.generator.is_some() {
            return Err(ReadinessError::AlreadyAttached {
                collaborator: "generator",
            });
        }
        debug!("attached generator '{}'", generator.name());
        self.generator = Some(generator);
        Ok(())
    }

    /// Attach the detector's frozen sensor registry. Only one may ever be
    /// attached.
    pub fn attach_detector(&mut self, registry: SharedSensorRegistry) -> Result<(), ReadinessError> {
        if self.detector.is_some() {
            return Err(ReadinessError::AlreadyAttached {
                collaborator: "detector",
            });
        }
        debug!("attached detector with {} sensors", registry.len());
        self.detector = Some(registry);
        Ok(())
    }

    /// Confirm both collaborators are attached.
    pub fn check_ready(&self) -> Result<(), ReadinessError> {
        if self.generator.is_none() {
            return Err(ReadinessError::MissingGenerator);
        }
        if self.detector.is_none() {
            return Err(ReadinessError::MissingDetector);
        }
        Ok(())
    }

    /// Whether [`check_ready`](Self::check_ready) would succeed.
    pub fn is_ready(&self) -> bool {
        self.check_ready().is_ok()
    }

    /// Route one transport step by the placement it occurred in.
    ///
    /// Gap steps add to the gap tally and to the sensor's own deposit;
    /// absorber steps add to the absorber tally. Steps in any other
    /// volume are counted and dropped.
    pub fn on_step(
        &mut self,
        placement: PlacementHandle,
        energy: f64,
        track_length: f64,
    ) -> Result<(), EventError> {
        if !self.accumulator.is_accumulating() {
            return Err(EventError::NotAccumulating);
        }
        let registry = self
            .detector
            .as_ref()
            .ok_or(EventError::NotReady(ReadinessError::MissingDetector))?;

        let Some((sensor, role)) = registry.find_by_placement(placement) else {
            self.metrics.steps_ignored += 1;
            return Ok(());
        };
        self.accumulator.add_deposit(energy, track_length, role)?;
        self.metrics.steps_routed += 1;
        match role {
            DepositRole::Absorber => self.metrics.absorber_steps += 1,
            DepositRole::Gap => {
                self.metrics.gap_steps += 1;
                if let Some(cell) = registry.get(sensor) {
                    self.deposits.add(cell, energy, track_length);
                }
            }
        }
        trace!("step {energy} MeV over {track_length} mm in {role} of sensor {sensor}");
        Ok(())
    }

    /// Number of events completed since the last reset.
    pub fn event_count(&self) -> u64 {
        self.events
    }

    /// Restart event numbering at zero.
    pub fn reset_event_count(&mut self) {
        self.events = 0;
    }

    /// Whether an event is in progress.
    pub fn in_event(&self) -> bool {
        self.accumulator.is_accumulating()
    }

    /// Running counters of the current event.
    pub fn current_metrics(&self) -> &EventMetrics {
        &self.metrics
    }

    /// Counters of the most recently completed event.
    pub fn last_metrics(&self) -> &EventMetrics {
        &self.last_metrics
    }

    /// The attached registry, if any.
    pub fn detector(&self) -> Option<&SharedSensorRegistry> {
        self.detector.as_ref()
    }

    fn primary(&self) -> PrimaryState {
        self.generator
            .as_ref()
            .map(|g| g.primary())
            .unwrap_or_default()
    }
}

impl Default for EventAction {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHooks for EventAction {
    fn on_event_begin(&mut self) -> Result<(), EventError> {
        self.check_ready()?;
        self.accumulator.begin_event()?;
        self.deposits.clear();
        self.metrics = EventMetrics::default();
        Ok(())
    }

    fn on_deposit(
        &mut self,
        energy: f64,
        track_length: f64,
        role: DepositRole,
    ) -> Result<(), EventError> {
        self.accumulator.add_deposit(energy, track_length, role)
    }

    fn on_event_end(
        &mut self,
        sink: &mut dyn PersistenceSink,
    ) -> Result<EventRecord, EventError> {
        let totals = self.accumulator.end_event()?;
        let sensors = self.deposits.drain_sorted();
        self.metrics.sensors_hit = sensors.len();

        let record = EventRecord {
            event: self.events,
            absorber: totals.absorber,
            gap: totals.gap,
            primary: self.primary(),
            sensors,
        };
        sink.write_event(&record);

        debug!(
            "event {}: absorber {:.3} MeV, gap {:.3} MeV, {} sensors hit, {} steps ignored",
            record.event,
            record.absorber.energy,
            record.gap.energy,
            self.metrics.sensors_hit,
            self.metrics.steps_ignored,
        );
        self.last_metrics = std::mem::take(&mut self.metrics);
        self.events += 1;
        Ok(record)
    }
}
