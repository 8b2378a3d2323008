//! Run-level persistence lifecycle.

use log::info;
use strata_core::{EventError, EventRecord, PersistenceSink, ReadinessError};

use crate::action::{EventAction, EventHooks};
use crate::metrics::EventMetrics;

/// Opens the sink at run begin, forwards each finished event to it, and
/// closes it at run end.
///
/// Can only be created for an [`EventAction`] that is already ready.
#[derive(Debug)]
pub struct RunAction<S: PersistenceSink> {
    sink: S,
    file_name: String,
    open: bool,
    runs: u64,
    metrics: EventMetrics,
}

impl<S: PersistenceSink> RunAction<S> {
    /// Create a run action writing to `file_name` through `sink`.
    pub fn new(
        action: &EventAction,
        sink: S,
        file_name: impl Into<String>,
    ) -> Result<Self, ReadinessError> {
        action.check_ready()?;
        Ok(Self {
            sink,
            file_name: file_name.into(),
            open: false,
            runs: 0,
            metrics: EventMetrics::default(),
        })
    }

    /// Whether a run is in progress.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Number of runs begun so far.
    pub fn run_count(&self) -> u64 {
        self.runs
    }

    /// Step-routing counters summed over the current (or last) run.
    pub fn run_metrics(&self) -> &EventMetrics {
        &self.metrics
    }

    /// Re-check readiness, open the sink, and restart event numbering.
    pub fn begin_run(&mut self, action: &mut EventAction) -> Result<(), EventError> {
        if self.open {
            return Err(EventError::RunAlreadyOpen);
        }
        action.check_ready()?;
        self.sink.open(&self.file_name);
        action.reset_event_count();
        self.metrics = EventMetrics::default();
        self.open = true;
        self.runs += 1;
        info!("run {} opened '{}'", self.runs, self.file_name);
        Ok(())
    }

    /// End the action's current event and persist its record.
    pub fn end_event(&mut self, action: &mut EventAction) -> Result<EventRecord, EventError> {
        if !self.open {
            return Err(EventError::RunNotOpen);
        }
        let record = action.on_event_end(&mut self.sink)?;
        self.metrics.accumulate(action.last_metrics());
        Ok(record)
    }

    /// Flush and close the sink.
    pub fn end_run(&mut self, action: &EventAction) -> Result<(), EventError> {
        if !self.open {
            return Err(EventError::RunNotOpen);
        }
        self.sink.close();
        self.open = false;
        info!(
            "run {} closed '{}' after {} events: {} steps routed ({} absorber, {} gap), {} ignored, {} sensor hits",
            self.runs,
            self.file_name,
            action.event_count(),
            self.metrics.steps_routed,
            self.metrics.absorber_steps,
            self.metrics.gap_steps,
            self.metrics.steps_ignored,
            self.metrics.sensors_hit,
        );
        Ok(())
    }

    /// The sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give the sink back.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
