//! Core types and traits for the queuesim discrete-event kernel.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the whole workspace: entity names, the two
//! entity roles and their timing capabilities, events, the five role
//! states with their display symbols, and the error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod entity;
pub mod error;
pub mod event;
pub mod id;
pub mod state;

pub use entity::{Entity, Fixed, Never, Requester, Resource, ServiceTime, ThinkTime, NO_FOLLOW_UP};
pub use error::{DispatchError, TimelineError};
pub use event::{EntityRef, Event, EventKind, Origin};
pub use id::{EntityName, SimTime};
pub use state::{EntityState, Role, StateSymbols};
