//! Entity roles and their timing capabilities.
//!
//! An entity is a named participant in one of two roles. Domain-specific
//! timing is injected by construction through a capability trait rather
//! than by subclassing:
//!
//! - [`Resource`] carries a [`ServiceTime`]: how long one service takes.
//! - [`Requester`] carries a [`ThinkTime`]: how long after being served
//!   it requests service again.
//!
//! Both capabilities may return a different value on every call (random
//! jitter, scripted sequences). A value `<= 0` means "no follow-up event":
//! a resource with a non-positive duration stays busy, a requester with a
//! non-positive think time stays satisfied for good. Neither is an error.

use std::fmt;

use crate::id::EntityName;
use crate::state::Role;

/// Sentinel returned by timing capabilities that never schedule a
/// follow-up event.
pub const NO_FOLLOW_UP: f64 = -1.0;

/// Capability supplied by resources: the duration of one service.
pub trait ServiceTime: Send {
    /// Duration of the service about to start. Called once per match.
    fn service_duration(&mut self) -> f64;
}

/// Capability supplied by requesters: the delay until the next request.
pub trait ThinkTime: Send {
    /// Delay between finishing one service and requesting the next.
    /// Called once per finished service.
    fn think_time(&mut self) -> f64;
}

impl<F> ServiceTime for F
where
    F: FnMut() -> f64 + Send,
{
    fn service_duration(&mut self) -> f64 {
        self()
    }
}

impl<F> ThinkTime for F
where
    F: FnMut() -> f64 + Send,
{
    fn think_time(&mut self) -> f64 {
        self()
    }
}

/// Constant timing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fixed(pub f64);

impl ServiceTime for Fixed {
    fn service_duration(&mut self) -> f64 {
        self.0
    }
}

impl ThinkTime for Fixed {
    fn think_time(&mut self) -> f64 {
        self.0
    }
}

/// Timing that never schedules a follow-up ([`NO_FOLLOW_UP`]).
///
/// The default for requesters that should be served exactly once.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Never;

impl ServiceTime for Never {
    fn service_duration(&mut self) -> f64 {
        NO_FOLLOW_UP
    }
}

impl ThinkTime for Never {
    fn think_time(&mut self) -> f64 {
        NO_FOLLOW_UP
    }
}

/// Anything that lives in a role queue.
pub trait Entity {
    /// The role every value of this type plays.
    const ROLE: Role;

    /// The entity's identity.
    fn name(&self) -> &EntityName;
}

/// A server-like entity.
pub struct Resource {
    name: EntityName,
    timing: Box<dyn ServiceTime>,
}

impl Resource {
    /// Create a resource with the given service-time capability.
    pub fn new(name: impl Into<EntityName>, timing: impl ServiceTime + 'static) -> Self {
        Self {
            name: name.into(),
            timing: Box::new(timing),
        }
    }

    /// Draw the duration of the next service.
    pub fn service_duration(&mut self) -> f64 {
        self.timing.service_duration()
    }
}

impl Entity for Resource {
    const ROLE: Role = Role::Resource;

    fn name(&self) -> &EntityName {
        &self.name
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource").field("name", &self.name).finish()
    }
}

/// A customer-like entity.
pub struct Requester {
    name: EntityName,
    timing: Box<dyn ThinkTime>,
}

impl Requester {
    /// Create a requester with the given think-time capability.
    pub fn new(name: impl Into<EntityName>, timing: impl ThinkTime + 'static) -> Self {
        Self {
            name: name.into(),
            timing: Box::new(timing),
        }
    }

    /// A requester that is served once and then stays satisfied.
    pub fn one_shot(name: impl Into<EntityName>) -> Self {
        Self::new(name, Never)
    }

    /// Draw the delay until the next request.
    pub fn think_time(&mut self) -> f64 {
        self.timing.think_time()
    }
}

impl Entity for Requester {
    const ROLE: Role = Role::Requester;

    fn name(&self) -> &EntityName {
        &self.name
    }
}

impl fmt::Debug for Requester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requester").field("name", &self.name).finish()
    }
}
