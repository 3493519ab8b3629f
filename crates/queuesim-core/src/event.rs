//! Events: something that happens to an entity at a simulation time.
//!
//! The vocabulary is closed. [`EventKind::RequestService`] and
//! [`EventKind::TryRequest`] always target a requester, which the
//! constructors enforce; [`EventKind::FinishService`] targets either role
//! through a tagged [`EntityRef`].

use std::fmt;

use crate::id::{EntityName, SimTime};
use crate::state::Role;

/// What happens when an event is dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A satisfied requester starts waiting for service.
    RequestService,
    /// A waiting requester asks for a free resource.
    TryRequest,
    /// A service ends for the subject (resource or requester).
    FinishService,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestService => write!(f, "RequestService"),
            Self::TryRequest => write!(f, "TryRequest"),
            Self::FinishService => write!(f, "FinishService"),
        }
    }
}

/// Role-tagged reference to the subject of an event.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// A resource, by name.
    Resource(EntityName),
    /// A requester, by name.
    Requester(EntityName),
}

impl EntityRef {
    /// The referenced entity's name.
    pub fn name(&self) -> &EntityName {
        match self {
            Self::Resource(n) | Self::Requester(n) => n,
        }
    }

    /// The referenced entity's role.
    pub fn role(&self) -> Role {
        match self {
            Self::Resource(_) => Role::Resource,
            Self::Requester(_) => Role::Requester,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Where an event came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Supplied from outside the kernel: initial requests and seed queues.
    Seeded,
    /// Generated by the dispatcher as the consequence of another event.
    Scheduled,
}

/// A pending occurrence `(time, kind, subject)`.
///
/// Only the time and the deferred flag change after construction. The
/// time moves forward when the event is compacted after a deferral;
/// [`scheduled_at`](Event::scheduled_at) keeps the time it was first
/// scheduled for, so the accumulated delay stays observable.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    time: SimTime,
    kind: EventKind,
    subject: EntityRef,
    deferred: bool,
    scheduled_at: SimTime,
    origin: Origin,
}

impl Event {
    fn new(time: SimTime, kind: EventKind, subject: EntityRef) -> Self {
        Self {
            time,
            kind,
            subject,
            deferred: false,
            scheduled_at: time,
            origin: Origin::Seeded,
        }
    }

    /// The requester starts waiting for service at `time`.
    pub fn request_service(time: SimTime, requester: impl Into<EntityName>) -> Self {
        Self::new(
            time,
            EventKind::RequestService,
            EntityRef::Requester(requester.into()),
        )
    }

    /// The requester asks for a free resource at `time`.
    pub fn try_request(time: SimTime, requester: impl Into<EntityName>) -> Self {
        Self::new(
            time,
            EventKind::TryRequest,
            EntityRef::Requester(requester.into()),
        )
    }

    /// The subject's current service ends at `time`.
    pub fn finish_service(time: SimTime, subject: EntityRef) -> Self {
        Self::new(time, EventKind::FinishService, subject)
    }

    /// Mark the event as generated by the dispatcher.
    pub fn scheduled(mut self) -> Self {
        self.origin = Origin::Scheduled;
        self
    }

    /// Current event time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Event kind.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The entity the event happens to.
    pub fn subject(&self) -> &EntityRef {
        &self.subject
    }

    /// Whether the event has been deferred at least once.
    pub fn is_deferred(&self) -> bool {
        self.deferred
    }

    /// The time the event was originally scheduled for.
    pub fn scheduled_at(&self) -> SimTime {
        self.scheduled_at
    }

    /// Where the event came from.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// How far the event has been pushed past its original time.
    pub fn delay(&self) -> SimTime {
        self.time - self.scheduled_at
    }

    /// Mark the event as deferred. Ordering is unaffected.
    pub fn defer(&mut self) {
        self.deferred = true;
    }

    /// Move the event to a new time. Callers holding the event inside a
    /// queue must restore the queue order themselves.
    pub fn set_time(&mut self, time: SimTime) {
        self.time = time;
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(t={:.3}, {}, {}", self.time, self.kind, self.subject)?;
        if self.deferred {
            write!(f, ", deferred")?;
        }
        write!(f, ")")
    }
}
