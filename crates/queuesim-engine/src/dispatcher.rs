//! The event dispatcher.
//!
//! [`Dispatcher`] owns every entity, distributed over five role queues
//! (free, busy, waiting, in service, satisfied), the pending
//! [`EventQueue`], and the [`TimelineRecorder`]. Each dispatch cycle
//! applies one event: it moves entities between role queues, records the
//! new states, and schedules follow-up events.
//!
//! # Lookahead
//!
//! When the soonest event is a `TryRequest` and no resource is free, the
//! event is marked deferred and reinserted at its own time, and the cycle
//! examines the next-soonest event instead. A cycle examines each pending
//! event at most once; if every pending event is a blocked `TryRequest`
//! the cycle reports [`StepOutcome::Stalled`].
//!
//! # Time-compaction
//!
//! After every `FinishService` all pending events scheduled strictly
//! before the current time are advanced to it, so deferred requests
//! retry as soon as a resource may have been released.

use std::time::Instant;

use indexmap::IndexMap;
use tracing::{debug, info, trace, warn};

use queuesim_core::{
    DispatchError, Entity, EntityName, EntityRef, EntityState, Event, EventKind, Origin,
    Requester, Resource, Role, SimTime, StateSymbols, TimelineError,
};
use queuesim_queue::{EventQueue, RoleQueue};
use queuesim_timeline::{Timeline, TimelineRecorder};

use crate::config::{Budget, ConfigError, RunConfig, SimConfig};
use crate::metrics::{RunMetrics, RunReport, StopReason};

// Compile-time assertion: a Dispatcher can be moved to another thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Dispatcher>();
    }
};

// ── Transition / StepOutcome / RunError ─────────────────────────

/// One entry of the transition log.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// When the transition happened.
    pub time: SimTime,
    /// The entity that changed state.
    pub entity: EntityName,
    /// Previous state; `None` for the initial placement.
    pub from: Option<EntityState>,
    /// New state.
    pub to: EntityState,
}

/// Result of one dispatch cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// An event was applied.
    Dispatched {
        /// The applied event.
        event: Event,
        /// Queue position it was taken from (0 = soonest).
        lookahead: usize,
    },
    /// The next examined event lies beyond the horizon.
    BeyondHorizon,
    /// No events are pending.
    Drained,
    /// Every pending event is a blocked `TryRequest`.
    Stalled,
}

/// Errors from [`Dispatcher::run`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RunError {
    /// The run configuration or its seed events were rejected.
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    /// A dispatch cycle hit a broken invariant.
    #[error("dispatch: {0}")]
    Dispatch(#[from] DispatchError),
}

// ── Dispatcher ──────────────────────────────────────────────────

/// Single-threaded discrete-event kernel.
///
/// Created from a [`SimConfig`] via [`new()`](Dispatcher::new), driven by
/// [`run()`](Dispatcher::run) or one cycle at a time by
/// [`step()`](Dispatcher::step).
///
/// # Example
///
/// ```ignore
/// let mut sim = Dispatcher::new(config)?;
/// let report = sim.run(RunConfig::until(120.0))?;
/// println!("{}", sim.timeline());
/// ```
pub struct Dispatcher {
    free: RoleQueue<Resource>,
    busy: RoleQueue<Resource>,
    waiting: RoleQueue<Requester>,
    in_service: RoleQueue<Requester>,
    satisfied: RoleQueue<Requester>,
    /// Every entity ever placed, with its role.
    roster: IndexMap<EntityName, Role>,
    events: EventQueue,
    recorder: TimelineRecorder,
    transitions: Vec<Transition>,
    metrics: RunMetrics,
    symbols: StateSymbols,
    rethink_offset: SimTime,
    clock: SimTime,
}

impl Dispatcher {
    /// Create a dispatcher from a validated [`SimConfig`].
    ///
    /// Records every entity's initial state at t=0 and schedules a
    /// `TryRequest` at t=0 for each waiting requester, so that the oldest
    /// waiting requester is served first.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let SimConfig {
            free,
            busy,
            waiting,
            satisfied,
            symbols,
            rethink_offset,
        } = config;

        let mut sim = Self {
            free: RoleQueue::new(EntityState::Free),
            busy: RoleQueue::new(EntityState::Busy),
            waiting: RoleQueue::new(EntityState::Waiting),
            in_service: RoleQueue::new(EntityState::InService),
            satisfied: RoleQueue::new(EntityState::Satisfied),
            roster: IndexMap::new(),
            events: EventQueue::new(),
            recorder: TimelineRecorder::new(),
            transitions: Vec::new(),
            metrics: RunMetrics::default(),
            symbols,
            rethink_offset,
            clock: 0.0,
        };

        for (state, group) in [(EntityState::Free, &free), (EntityState::Busy, &busy)] {
            for r in group {
                sim.roster.insert(r.name().clone(), Role::Resource);
                sim.note(r.name(), 0.0, None, state)?;
            }
        }
        for (state, group) in [
            (EntityState::Waiting, &waiting),
            (EntityState::Satisfied, &satisfied),
        ] {
            for c in group {
                sim.roster.insert(c.name().clone(), Role::Requester);
                sim.note(c.name(), 0.0, None, state)?;
            }
        }

        // Ties rank newest first: seed from the newest so the oldest is
        // attempted first.
        for c in waiting.iter().rev() {
            sim.events.insert(Event::try_request(0.0, c.name().clone()));
        }

        sim.free.extend(free);
        sim.busy.extend(busy);
        sim.waiting.extend(waiting);
        sim.satisfied.extend(satisfied);

        info!(
            entities = sim.roster.len(),
            pending = sim.events.len(),
            "dispatcher ready"
        );
        Ok(sim)
    }

    // ── Queries ────────────────────────────────────────────────

    /// Time of the last dispatched event.
    pub fn now(&self) -> SimTime {
        self.clock
    }

    /// Pending events.
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Current state of `name`, if the dispatcher holds it.
    pub fn state_of(&self, name: &str) -> Option<EntityState> {
        match self.roster.get(name)? {
            Role::Resource => [&self.free, &self.busy]
                .into_iter()
                .find(|q| q.contains(name))
                .map(RoleQueue::state),
            Role::Requester => [&self.waiting, &self.in_service, &self.satisfied]
                .into_iter()
                .find(|q| q.contains(name))
                .map(RoleQueue::state),
        }
    }

    /// Names of the entities in `state`, oldest first.
    pub fn members(&self, state: EntityState) -> Vec<&EntityName> {
        match state {
            EntityState::Free => self.free.iter().map(Entity::name).collect(),
            EntityState::Busy => self.busy.iter().map(Entity::name).collect(),
            EntityState::Waiting => self.waiting.iter().map(Entity::name).collect(),
            EntityState::InService => self.in_service.iter().map(Entity::name).collect(),
            EntityState::Satisfied => self.satisfied.iter().map(Entity::name).collect(),
        }
    }

    /// Whether every entity sits in exactly one role queue.
    pub fn check_exclusive(&self) -> bool {
        let placed = self.free.len()
            + self.busy.len()
            + self.waiting.len()
            + self.in_service.len()
            + self.satisfied.len();
        placed == self.roster.len()
            && self.roster.keys().all(|name| {
                EntityState::ALL
                    .iter()
                    .filter(|&&s| self.members(s).iter().any(|m| *m == name))
                    .count()
                    == 1
            })
    }

    /// The sparse timeline recorded so far.
    pub fn recorder(&self) -> &TimelineRecorder {
        &self.recorder
    }

    /// The recorded timeline, rendered.
    pub fn timeline(&self) -> Timeline {
        self.recorder.render()
    }

    /// Every state transition, in dispatch order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Cumulative counters.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    // ── Driving ────────────────────────────────────────────────

    /// Merge externally supplied events into the pending queue.
    ///
    /// Every event must lie at a finite time no earlier than the clock and
    /// refer to a known entity of the role its kind requires. Nothing is
    /// merged if any event is rejected.
    pub fn merge(&mut self, seeds: EventQueue) -> Result<(), ConfigError> {
        for event in seeds.iter() {
            let time = event.time();
            if !time.is_finite() || time < 0.0 || time < self.clock {
                return Err(ConfigError::InvalidSeedTime {
                    time,
                    clock: self.clock,
                });
            }
            let subject = event.subject();
            let found = self.roster.get(subject.name().as_str()).copied().ok_or_else(|| {
                ConfigError::UnknownSeedEntity {
                    name: subject.name().clone(),
                }
            })?;
            if found != subject.role() {
                return Err(ConfigError::SeedRoleMismatch {
                    name: subject.name().clone(),
                    expected: subject.role(),
                    found,
                });
            }
        }
        debug!(seeds = seeds.len(), "merging seed events");
        self.events.merge(seeds);
        Ok(())
    }

    /// Run one dispatch cycle, admitting events with time `<= horizon`.
    pub fn step(&mut self, horizon: SimTime) -> Result<StepOutcome, DispatchError> {
        let pending = self.events.len();
        if pending == 0 {
            return Ok(StepOutcome::Drained);
        }
        trace!(queue = %self.events, "dispatch cycle");

        for pos in 0..pending {
            let time = self
                .events
                .peek(pos)
                .map(Event::time)
                .ok_or(DispatchError::EventNotFound { position: pos })?;
            if time > horizon {
                return Ok(StepOutcome::BeyondHorizon);
            }
            let mut event = self
                .events
                .extract(pos)
                .ok_or(DispatchError::EventNotFound { position: pos })?;

            let applied = match (event.kind(), event.subject().clone()) {
                (EventKind::TryRequest, EntityRef::Requester(name)) => {
                    self.try_serve(&name, time)?
                }
                (EventKind::RequestService, EntityRef::Requester(name)) => {
                    self.request(&name, time, event.origin())?;
                    true
                }
                (EventKind::FinishService, EntityRef::Requester(name)) => {
                    self.finish_requester(&name, time)?;
                    true
                }
                (EventKind::FinishService, EntityRef::Resource(name)) => {
                    self.finish_resource(&name, time)?;
                    true
                }
                (EventKind::TryRequest | EventKind::RequestService, EntityRef::Resource(name)) => {
                    return Err(DispatchError::UnknownEntity { name });
                }
            };

            if !applied {
                trace!(%event, position = pos, "no free resource, deferring");
                event.defer();
                self.events.insert(event);
                self.metrics.deferrals += 1;
                continue;
            }

            debug!(%event, lookahead = pos, "dispatched");
            self.clock = time;
            self.metrics.dispatched += 1;
            self.metrics.max_lookahead = self.metrics.max_lookahead.max(pos);
            if event.is_deferred() {
                self.metrics.deferral_delay += event.delay();
            }
            return Ok(StepOutcome::Dispatched {
                event,
                lookahead: pos,
            });
        }

        warn!(pending, clock = self.clock, "every pending event is blocked");
        Ok(StepOutcome::Stalled)
    }

    /// Dispatch events until the budget is used up, the queue drains, or
    /// no pending event can be serviced.
    pub fn run(&mut self, config: RunConfig) -> Result<RunReport, RunError> {
        config.validate()?;
        let horizon = config.horizon();
        let limit = match config.budget {
            Budget::Steps(n) => Some(n),
            Budget::Until(_) => None,
        };
        if let Some(seeds) = config.seed_events {
            self.merge(seeds)?;
        }

        info!(
            budget = ?config.budget,
            clock = self.clock,
            pending = self.events.len(),
            "run start"
        );
        let start = Instant::now();
        let mut steps = 0u64;
        let stop = loop {
            if limit.is_some_and(|n| steps >= n) {
                break StopReason::StepBudget;
            }
            match self.step(horizon)? {
                StepOutcome::Dispatched { .. } => steps += 1,
                StepOutcome::BeyondHorizon => break StopReason::TimeBudget,
                StepOutcome::Drained => break StopReason::Drained,
                StepOutcome::Stalled => break StopReason::Stalled,
            }
        };
        self.metrics.elapsed_us += start.elapsed().as_micros() as u64;

        info!(
            stop = ?stop,
            steps,
            clock = self.clock,
            deferrals = self.metrics.deferrals,
            "run stop"
        );
        Ok(RunReport {
            stop,
            steps,
            clock: self.clock,
            metrics: self.metrics.clone(),
        })
    }

    // ── Transitions ────────────────────────────────────────────

    /// Match `name` with the oldest free resource. Returns `false`, with
    /// nothing changed, if no resource is free.
    fn try_serve(&mut self, name: &EntityName, now: SimTime) -> Result<bool, DispatchError> {
        if !self.waiting.contains(name.as_str()) {
            return Err(self.misplaced(name, EntityState::Waiting));
        }
        let Some(mut resource) = self.free.dequeue() else {
            return Ok(false);
        };
        let requester = self
            .waiting
            .remove(name.as_str())
            .ok_or_else(|| self.misplaced(name, EntityState::Waiting))?;

        let duration = resource.service_duration();
        let resource_name = resource.name().clone();
        self.busy.enqueue(resource);
        self.in_service.enqueue(requester);
        self.note(&resource_name, now, Some(EntityState::Free), EntityState::Busy)?;
        self.note(name, now, Some(EntityState::Waiting), EntityState::InService)?;

        if duration > 0.0 {
            let end = now + duration;
            self.events
                .insert(Event::finish_service(end, EntityRef::Resource(resource_name)).scheduled());
            self.events
                .insert(Event::finish_service(end, EntityRef::Requester(name.clone())).scheduled());
        }
        Ok(true)
    }

    /// Move a satisfied requester to waiting and schedule its attempt.
    /// A request from a requester that already waits or is being served
    /// is absorbed.
    fn request(&mut self, name: &EntityName, now: SimTime, origin: Origin) -> Result<(), DispatchError> {
        let Some(requester) = self.satisfied.remove(name.as_str()) else {
            return match self.state_of(name.as_str()) {
                Some(state @ (EntityState::Waiting | EntityState::InService)) => {
                    debug!(entity = %name, %state, "request absorbed");
                    Ok(())
                }
                _ => Err(self.misplaced(name, EntityState::Satisfied)),
            };
        };
        self.waiting.enqueue(requester);
        self.note(name, now, Some(EntityState::Satisfied), EntityState::Waiting)?;

        let at = match origin {
            Origin::Seeded => now,
            Origin::Scheduled => now + self.rethink_offset,
        };
        let attempt = Event::try_request(at, name.clone());
        self.events.insert(match origin {
            Origin::Seeded => attempt,
            Origin::Scheduled => attempt.scheduled(),
        });
        Ok(())
    }

    fn finish_requester(&mut self, name: &EntityName, now: SimTime) -> Result<(), DispatchError> {
        let mut requester = self
            .in_service
            .remove(name.as_str())
            .ok_or_else(|| self.misplaced(name, EntityState::InService))?;
        let think = requester.think_time();
        self.satisfied.enqueue(requester);
        self.note(name, now, Some(EntityState::InService), EntityState::Satisfied)?;

        if think > 0.0 {
            self.events
                .insert(Event::request_service(now + think, name.clone()).scheduled());
        }
        self.compact(now);
        Ok(())
    }

    fn finish_resource(&mut self, name: &EntityName, now: SimTime) -> Result<(), DispatchError> {
        let resource = self
            .busy
            .remove(name.as_str())
            .ok_or_else(|| self.misplaced(name, EntityState::Busy))?;
        self.free.enqueue(resource);
        self.note(name, now, Some(EntityState::Busy), EntityState::Free)?;
        self.compact(now);
        Ok(())
    }

    fn compact(&mut self, now: SimTime) {
        let shifted = self.events.shift_later_than(now, now);
        if shifted > 0 {
            trace!(shifted, now, "compacted stale events");
            self.metrics.compacted += shifted as u64;
        }
    }

    /// Record a state change on the timeline and in the transition log.
    fn note(
        &mut self,
        name: &EntityName,
        time: SimTime,
        from: Option<EntityState>,
        to: EntityState,
    ) -> Result<(), TimelineError> {
        self.recorder.record(name, time, self.symbols.symbol(to))?;
        self.transitions.push(Transition {
            time,
            entity: name.clone(),
            from,
            to,
        });
        Ok(())
    }

    /// The error for an event whose subject is not in `expected`.
    fn misplaced(&self, name: &EntityName, expected: EntityState) -> DispatchError {
        match self.state_of(name.as_str()) {
            Some(found) => DispatchError::WrongState {
                name: name.clone(),
                expected,
                found,
            },
            None => DispatchError::UnknownEntity { name: name.clone() },
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("clock", &self.clock)
            .field("free", &self.free.len())
            .field("busy", &self.busy.len())
            .field("waiting", &self.waiting.len())
            .field("in_service", &self.in_service.len())
            .field("satisfied", &self.satisfied.len())
            .field("pending", &self.events.len())
            .finish()
    }
}
