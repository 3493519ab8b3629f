//! Entity roles, the five role states, and their display symbols.

use std::fmt;

/// Capability role of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Server-like entity that satisfies requests.
    Resource,
    /// Customer-like entity that issues requests.
    Requester,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource => write!(f, "resource"),
            Self::Requester => write!(f, "requester"),
        }
    }
}

/// Discrete state of an entity. Each state is backed by one role queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityState {
    /// Resource available for a match.
    Free,
    /// Resource currently serving a requester.
    Busy,
    /// Requester with an outstanding request.
    Waiting,
    /// Requester currently being served.
    InService,
    /// Requester with no outstanding request.
    Satisfied,
}

impl EntityState {
    /// All five states, resource states first.
    pub const ALL: [EntityState; 5] = [
        Self::Free,
        Self::Busy,
        Self::Waiting,
        Self::InService,
        Self::Satisfied,
    ];

    /// The role whose entities can occupy this state.
    pub fn role(self) -> Role {
        match self {
            Self::Free | Self::Busy => Role::Resource,
            Self::Waiting | Self::InService | Self::Satisfied => Role::Requester,
        }
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Busy => write!(f, "busy"),
            Self::Waiting => write!(f, "waiting"),
            Self::InService => write!(f, "in service"),
            Self::Satisfied => write!(f, "satisfied"),
        }
    }
}

/// One-character codes written to the timeline for each state.
///
/// Defaults follow the usual Gantt notation: `.` idle, `X` engaged,
/// `?` waiting for service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateSymbols {
    /// Symbol for [`EntityState::Free`]. Default: `.`.
    pub free: char,
    /// Symbol for [`EntityState::Busy`]. Default: `X`.
    pub busy: char,
    /// Symbol for [`EntityState::Waiting`]. Default: `?`.
    pub waiting: char,
    /// Symbol for [`EntityState::InService`]. Default: `X`.
    pub in_service: char,
    /// Symbol for [`EntityState::Satisfied`]. Default: `.`.
    pub satisfied: char,
}

impl Default for StateSymbols {
    fn default() -> Self {
        Self {
            free: '.',
            busy: 'X',
            waiting: '?',
            in_service: 'X',
            satisfied: '.',
        }
    }
}

impl StateSymbols {
    /// Symbol for the given state.
    pub fn symbol(&self, state: EntityState) -> char {
        match state {
            EntityState::Free => self.free,
            EntityState::Busy => self.busy,
            EntityState::Waiting => self.waiting,
            EntityState::InService => self.in_service,
            EntityState::Satisfied => self.satisfied,
        }
    }
}
