//! Per-event energy accumulation and run lifecycle for Strata detectors.
//!
//! Each worker thread owns one [`EventAction`], which holds its own
//! [`EnergyAccumulator`] and per-sensor deposit map. All workers share the
//! frozen [`SensorRegistry`](strata_registry::SensorRegistry) read-only.
//!
//! ```text
//!   transport ──on_step──► EventAction ──► EnergyAccumulator (absorber/gap)
//!                              │       └──► SensorDeposits    (per sensor)
//!                              └──on_event_end──► PersistenceSink
//! ```
//!
//! [`RunAction`] wraps the sink's open/close around a run of events.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod accumulator;
pub mod action;
pub mod deposits;
pub mod metrics;
pub mod run;

pub use accumulator::{AccumulatorState, EnergyAccumulator, EventTotals};
pub use action::{EventAction, EventHooks};
pub use deposits::SensorDeposits;
pub use metrics::EventMetrics;
pub use run::RunAction;
