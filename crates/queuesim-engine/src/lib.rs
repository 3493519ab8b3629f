//! Event dispatcher for the queuesim kernel.
//!
//! Provides the [`Dispatcher`] that owns the five role queues, the pending
//! [`EventQueue`](queuesim_queue::EventQueue) and the
//! [`TimelineRecorder`](queuesim_timeline::TimelineRecorder), and advances
//! simulated time one event at a time. Configuration lives in [`config`],
//! run statistics in [`metrics`], seeded random timing and seed events in
//! [`timing`] and [`seed`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dispatcher;
pub mod metrics;
pub mod seed;
pub mod timing;

pub use config::{Budget, ConfigError, RunConfig, SimConfig};
pub use dispatcher::{Dispatcher, RunError, StepOutcome, Transition};
pub use metrics::{RunMetrics, RunReport, StopReason};
pub use seed::random_requests;
pub use timing::Jittered;
