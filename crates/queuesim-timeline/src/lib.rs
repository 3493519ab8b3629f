//! State timeline for the queuesim kernel.
//!
//! [`TimelineRecorder`] stores sparse checkpoints: at a given time, the
//! entities whose state changed and the symbol of their new state.
//! [`TimelineRecorder::render`] expands them into a dense [`Timeline`],
//! one row per checkpoint and one column per entity, forward-filling
//! entities that did not change.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod recorder;
pub mod table;

pub use recorder::{Checkpoint, TimelineRecorder};
pub use table::{Timeline, TimelineRow};
