//! Per-event step-routing counters.

/// Counters collected while routing the steps of one event.
///
/// [`EventAction`](crate::EventAction) resets these at event begin and
/// exposes the finished event's values after event end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventMetrics {
    /// Steps that landed in an absorber or gap volume.
    pub steps_routed: u64,
    /// Steps in non-sensor volumes (world, layers, containers).
    pub steps_ignored: u64,
    /// Routed steps that landed in an absorber.
    pub absorber_steps: u64,
    /// Routed steps that landed in a gap.
    pub gap_steps: u64,
    /// Distinct sensors whose gap received at least one step.
    pub sensors_hit: usize,
}

impl EventMetrics {
    /// Add another event's counters to these.
    pub fn accumulate(&mut self, other: &EventMetrics) {
        self.steps_routed += other.steps_routed;
        self.steps_ignored += other.steps_ignored;
        self.absorber_steps += other.absorber_steps;
        self.gap_steps += other.gap_steps;
        self.sensors_hit += other.sensors_hit;
    }
}
