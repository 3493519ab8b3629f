//! Error types for the queuesim kernel, organized by subsystem: the
//! timeline recorder and the event dispatcher.
//!
//! Recoverable conditions (an empty queue, no free resource) are part of
//! normal control flow and never surface here.

use thiserror::Error;

use crate::id::{EntityName, SimTime};
use crate::state::EntityState;

/// Errors from recording entity states on the timeline.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum TimelineError {
    /// An observation was recorded without an entity name.
    #[error("cannot record a state without an entity name")]
    MissingEntity,
    /// The observation time is NaN, infinite or negative.
    #[error("time {time} is not a valid simulation time")]
    InvalidTime {
        /// The rejected time.
        time: SimTime,
    },
    /// An observation precedes the latest checkpoint already recorded for
    /// the same entity. Per-entity time must be monotonic; this is a
    /// kernel defect, not a recoverable condition.
    #[error("ordering inversion for '{entity}': t={time} precedes latest t={latest}")]
    OrderingInversion {
        /// The entity whose timeline would run backwards.
        entity: String,
        /// The rejected observation time.
        time: SimTime,
        /// The entity's latest recorded time.
        latest: SimTime,
    },
}

/// Errors that abort a dispatch step.
///
/// Each of these signals a broken kernel invariant rather than a
/// recoverable condition. The run should not continue after one.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DispatchError {
    /// The event queue holds no event at the requested rank.
    #[error("no pending event at queue position {position}")]
    EventNotFound {
        /// The requested rank, counted from the soonest event.
        position: usize,
    },
    /// An event refers to an entity no role queue holds.
    #[error("unknown entity '{name}'")]
    UnknownEntity {
        /// The unresolved name.
        name: EntityName,
    },
    /// An event requires its subject in a state it is not in.
    #[error("entity '{name}' expected {expected}, found {found}")]
    WrongState {
        /// The event subject.
        name: EntityName,
        /// The state the transition starts from.
        expected: EntityState,
        /// The state the entity is actually in.
        found: EntityState,
    },
    /// Recording the transition failed.
    #[error("timeline: {0}")]
    Timeline(#[from] TimelineError),
}
