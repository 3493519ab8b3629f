//! Simulation and run configuration, validation, and error types.
//!
//! [`SimConfig`] is the builder input for a [`Dispatcher`](crate::Dispatcher):
//! the initial population of each role queue plus presentation settings.
//! [`RunConfig`] describes one call to
//! [`Dispatcher::run`](crate::Dispatcher::run): how far to go and which
//! external events to inject first.

use indexmap::IndexSet;
use thiserror::Error;

use queuesim_core::{
    Entity, EntityName, Requester, Resource, Role, SimTime, StateSymbols, TimelineError,
};
use queuesim_queue::EventQueue;

/// Delay between a kernel-generated request and its service attempt.
pub const DEFAULT_RETHINK_OFFSET: SimTime = 0.01;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a [`SimConfig`] or [`RunConfig`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// An entity was configured with an empty name.
    #[error("entity names must not be empty")]
    MissingName,
    /// Two entities share a name. Names identify entities across all
    /// role queues and must be unique.
    #[error("entity name '{name}' is used more than once")]
    DuplicateEntity {
        /// The repeated name.
        name: EntityName,
    },
    /// `rethink_offset` is NaN, infinite or negative.
    #[error("rethink_offset must be finite and non-negative, got {value}")]
    InvalidRethinkOffset {
        /// The invalid value.
        value: SimTime,
    },
    /// `Budget::Until` end time is NaN, infinite or negative.
    #[error("end time must be finite and non-negative, got {value}")]
    InvalidEndTime {
        /// The invalid value.
        value: SimTime,
    },
    /// A seed event is scheduled at an invalid time or before the clock.
    #[error("seed event at t={time} is invalid (clock is at t={clock})")]
    InvalidSeedTime {
        /// The seed event time.
        time: SimTime,
        /// The dispatcher clock at merge.
        clock: SimTime,
    },
    /// A seed event refers to an entity the dispatcher does not hold.
    #[error("seed event refers to unknown entity '{name}'")]
    UnknownSeedEntity {
        /// The unresolved name.
        name: EntityName,
    },
    /// A seed event refers to an entity of the other role.
    #[error("seed event expects '{name}' to be a {expected}, but it is a {found}")]
    SeedRoleMismatch {
        /// The entity name.
        name: EntityName,
        /// The role the event requires.
        expected: Role,
        /// The entity's actual role.
        found: Role,
    },
    /// Recording the initial states failed.
    #[error("timeline: {0}")]
    Timeline(#[from] TimelineError),
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Initial population and settings for a [`Dispatcher`](crate::Dispatcher).
///
/// Every entity is placed in exactly one initial queue. Requesters in
/// `waiting` get a service attempt at t=0, oldest first.
#[derive(Debug)]
pub struct SimConfig {
    /// Resources available at t=0, in service order.
    pub free: Vec<Resource>,
    /// Resources engaged at t=0. They never finish on their own.
    pub busy: Vec<Resource>,
    /// Requesters with an outstanding request at t=0.
    pub waiting: Vec<Requester>,
    /// Requesters without a request at t=0.
    pub satisfied: Vec<Requester>,
    /// Timeline symbols. Default: [`StateSymbols::default`].
    pub symbols: StateSymbols,
    /// Delay between a think-time follow-up request and its service
    /// attempt. Default: [`DEFAULT_RETHINK_OFFSET`].
    pub rethink_offset: SimTime,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            free: Vec::new(),
            busy: Vec::new(),
            waiting: Vec::new(),
            satisfied: Vec::new(),
            symbols: StateSymbols::default(),
            rethink_offset: DEFAULT_RETHINK_OFFSET,
        }
    }
}

impl SimConfig {
    /// Validate names and settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Names are non-empty and unique across both roles.
        let mut seen = IndexSet::new();
        let names = self
            .free
            .iter()
            .chain(&self.busy)
            .map(|r| r.name())
            .chain(self.waiting.iter().chain(&self.satisfied).map(|c| c.name()));
        for name in names {
            if name.is_empty() {
                return Err(ConfigError::MissingName);
            }
            if !seen.insert(name) {
                return Err(ConfigError::DuplicateEntity { name: name.clone() });
            }
        }
        // 2. Re-think offset.
        if !self.rethink_offset.is_finite() || self.rethink_offset < 0.0 {
            return Err(ConfigError::InvalidRethinkOffset {
                value: self.rethink_offset,
            });
        }
        Ok(())
    }

    /// Total number of configured entities.
    pub fn entity_count(&self) -> usize {
        self.free.len() + self.busy.len() + self.waiting.len() + self.satisfied.len()
    }
}

// ── RunConfig ──────────────────────────────────────────────────────

/// How far a run may advance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Budget {
    /// Dispatch events with time `<=` the given end time.
    Until(SimTime),
    /// Dispatch at most this many events.
    Steps(u64),
}

/// Parameters of one [`Dispatcher::run`](crate::Dispatcher::run) call.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Stop condition.
    pub budget: Budget,
    /// External events merged into the pending queue before the loop.
    pub seed_events: Option<EventQueue>,
}

impl RunConfig {
    /// Run until simulated time `end`.
    pub fn until(end: SimTime) -> Self {
        Self {
            budget: Budget::Until(end),
            seed_events: None,
        }
    }

    /// Run for at most `n` dispatched events.
    pub fn steps(n: u64) -> Self {
        Self {
            budget: Budget::Steps(n),
            seed_events: None,
        }
    }

    /// Inject `events` before the loop starts.
    pub fn with_seeds(mut self, events: EventQueue) -> Self {
        self.seed_events = Some(events);
        self
    }

    /// Validate the budget. Seed events are checked against the
    /// dispatcher when they are merged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Budget::Until(end) = self.budget {
            if !end.is_finite() || end < 0.0 {
                return Err(ConfigError::InvalidEndTime { value: end });
            }
        }
        Ok(())
    }

    /// Latest event time the budget admits.
    pub(crate) fn horizon(&self) -> SimTime {
        match self.budget {
            Budget::Until(end) => end,
            Budget::Steps(_) => SimTime::INFINITY,
        }
    }
}
