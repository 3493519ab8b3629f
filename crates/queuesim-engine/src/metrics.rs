//! Run statistics for the dispatcher.
//!
//! [`RunMetrics`] accumulates over the lifetime of a dispatcher; each
//! [`RunReport`] carries a copy taken when its run stopped.

use queuesim_core::SimTime;

/// Counters collected while dispatching events.
///
/// Counts are cumulative across runs of the same dispatcher.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunMetrics {
    /// Events applied to the role queues.
    pub dispatched: u64,
    /// Times a `TryRequest` found no free resource and was reinserted.
    pub deferrals: u64,
    /// Largest queue position at which an event was dispatched.
    pub max_lookahead: usize,
    /// Pending events advanced by time-compaction.
    pub compacted: u64,
    /// Total simulated time deferred events were pushed past their
    /// original schedule, summed at dispatch.
    pub deferral_delay: SimTime,
    /// Wall-clock time spent inside `run`, in microseconds.
    pub elapsed_us: u64,
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// No events were pending.
    Drained,
    /// Every pending event was a blocked service attempt.
    Stalled,
    /// The step budget was used up.
    StepBudget,
    /// The next pending event lies beyond the end time.
    TimeBudget,
}

/// Result of a completed [`Dispatcher::run`](crate::Dispatcher::run).
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Why the run stopped.
    pub stop: StopReason,
    /// Events dispatched during this run.
    pub steps: u64,
    /// Time of the last dispatched event.
    pub clock: SimTime,
    /// Cumulative counters at the end of the run.
    pub metrics: RunMetrics,
}
