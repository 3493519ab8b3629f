//! queuesim: a discrete-event simulation kernel for systems of resources
//! and requesters.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all queuesim sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use queuesim::prelude::*;
//!
//! // One barmaid, two thirsty customers served once each.
//! let config = SimConfig {
//!     free: vec![Resource::new("elke", Fixed(2.0))],
//!     waiting: vec![Requester::one_shot("peter"), Requester::one_shot("paul")],
//!     ..SimConfig::default()
//! };
//! let mut sim = Dispatcher::new(config).unwrap();
//! let report = sim.run(RunConfig::until(10.0)).unwrap();
//!
//! assert_eq!(report.stop, StopReason::Drained);
//! assert_eq!(sim.state_of("paul"), Some(EntityState::Satisfied));
//! let timeline = sim.timeline();
//! assert_eq!(timeline.rows()[1].get("paul"), Some('X'));
//! println!("{timeline}");
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `queuesim-core` | names, roles, capability traits, events, errors |
//! | [`queue`] | `queuesim-queue` | time-ordered event queue, role queues |
//! | [`timeline`] | `queuesim-timeline` | state recorder and rendered table |
//! | [`engine`] | `queuesim-engine` | dispatcher, configuration, metrics, random timing |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and errors (`queuesim-core`).
///
/// Entities implement [`types::Entity`]; their timing is supplied through
/// [`types::ServiceTime`] and [`types::ThinkTime`].
pub use queuesim_core as types;

/// Event queue and role queues (`queuesim-queue`).
pub use queuesim_queue as queue;

/// Timeline recording and rendering (`queuesim-timeline`).
pub use queuesim_timeline as timeline;

/// The dispatcher and its configuration (`queuesim-engine`).
///
/// [`engine::Dispatcher`] runs a simulation described by an
/// [`engine::SimConfig`].
pub use queuesim_engine as engine;

/// Common imports for typical queuesim usage.
///
/// ```rust
/// use queuesim::prelude::*;
/// ```
pub mod prelude {
    // Entities and events
    pub use queuesim_core::{
        Entity, EntityName, EntityRef, EntityState, Event, EventKind, Fixed, Never, Requester,
        Resource, Role, ServiceTime, SimTime, StateSymbols, ThinkTime,
    };

    // Errors
    pub use queuesim_core::{DispatchError, TimelineError};

    // Queues and timeline
    pub use queuesim_queue::EventQueue;
    pub use queuesim_timeline::{Timeline, TimelineRow};

    // Engine
    pub use queuesim_engine::{
        random_requests, Budget, ConfigError, Dispatcher, Jittered, RunConfig, RunError,
        RunMetrics, RunReport, SimConfig, StepOutcome, StopReason,
    };
}
