//! Test utilities for queuesim development.
//!
//! Provides scripted timing fixtures in [`fixtures`] and shorthand
//! constructors for populating role queues.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{CountingTiming, Script};

use queuesim_core::{Fixed, Requester, Resource};

/// Resources with a constant service duration.
pub fn fixed_resources(names: &[&str], duration: f64) -> Vec<Resource> {
    names
        .iter()
        .map(|&n| Resource::new(n, Fixed(duration)))
        .collect()
}

/// Requesters that are served once and then stay satisfied.
pub fn one_shot_requesters(names: &[&str]) -> Vec<Requester> {
    names.iter().map(|&n| Requester::one_shot(n)).collect()
}

/// Requesters with a constant think time.
pub fn cycling_requesters(names: &[&str], think: f64) -> Vec<Requester> {
    names
        .iter()
        .map(|&n| Requester::new(n, Fixed(think)))
        .collect()
}
