//! Event-side fixtures.
//!
//! - [`FixedPrimary`]: a generator that always reports the same primary.
//! - [`MemorySink`]: a persistence sink that keeps every call in memory.

use strata_core::{EventRecord, PersistenceSink, PrimarySource, PrimaryState, Vec3};

/// Primary source reporting a constant state.
#[derive(Clone, Debug)]
pub struct FixedPrimary {
    pub name: String,
    pub state: PrimaryState,
}

impl FixedPrimary {
    pub fn new(name: impl Into<String>, momentum: Vec3) -> Self {
        Self {
            name: name.into(),
            state: PrimaryState {
                momentum,
                polarization: Vec3::ZERO,
            },
        }
    }
}

impl PrimarySource for FixedPrimary {
    fn name(&self) -> &str {
        &self.name
    }

    fn primary(&self) -> PrimaryState {
        self.state
    }
}

/// One call received by a [`MemorySink`].
#[derive(Clone, Debug, PartialEq)]
pub enum SinkCall {
    Open(String),
    Write(EventRecord),
    Close,
}

/// Persistence sink recording every call in order.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub calls: Vec<SinkCall>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record written so far, in write order.
    pub fn records(&self) -> Vec<&EventRecord> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SinkCall::Write(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    /// Whether the most recent open has not yet been closed.
    pub fn is_open(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                SinkCall::Open(_) => Some(true),
                SinkCall::Close => Some(false),
                SinkCall::Write(_) => None,
            })
            .unwrap_or(false)
    }
}

impl PersistenceSink for MemorySink {
    fn open(&mut self, file_name: &str) {
        self.calls.push(SinkCall::Open(file_name.to_string()));
    }

    fn write_event(&mut self, record: &EventRecord) {
        self.calls.push(SinkCall::Write(record.clone()));
    }

    fn close(&mut self) {
        self.calls.push(SinkCall::Close);
    }
}
