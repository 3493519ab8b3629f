//! Queues for the queuesim kernel.
//!
//! - [`EventQueue`]: pending events in time order with positional
//!   extraction, used by the dispatcher for lookahead.
//! - [`RoleQueue`]: a FIFO of entities of one role representing one
//!   discrete state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod event_queue;
pub mod role;

pub use event_queue::EventQueue;
pub use role::RoleQueue;
