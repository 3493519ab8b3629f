//! Benchmark profiles for the queuesim kernel.
//!
//! Provides pre-built [`SimConfig`] profiles:
//!
//! - [`reference_profile`]: 4 resources, 64 cycling requesters
//! - [`stress_profile`]: 32 resources, 2048 cycling requesters
//! - [`burst_profile`]: few resources, every requester seeded at once

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use queuesim_core::{Fixed, Requester, Resource};
use queuesim_engine::{random_requests, Jittered, SimConfig};
use queuesim_queue::EventQueue;

/// Build a profile with `resources` servers and `requesters` customers,
/// all waiting at t=0 and returning after a jittered think time.
pub fn cycling_profile(resources: usize, requesters: usize, seed: u64) -> SimConfig {
    let free = (0..resources)
        .map(|i| Resource::new(format!("r{i}"), Jittered::new(2.0, 1.0, seed ^ i as u64)))
        .collect();
    let waiting = (0..requesters)
        .map(|i| {
            let think = 10.0 + (i % 7) as f64 * 5.0;
            Requester::new(
                format!("c{i}"),
                Jittered::new(think, 1.0, seed.wrapping_add(1 + i as u64)),
            )
        })
        .collect();
    SimConfig {
        free,
        waiting,
        ..SimConfig::default()
    }
}

/// 4 resources, 64 requesters.
pub fn reference_profile(seed: u64) -> SimConfig {
    cycling_profile(4, 64, seed)
}

/// 32 resources, 2048 requesters.
pub fn stress_profile(seed: u64) -> SimConfig {
    cycling_profile(32, 2048, seed)
}

/// `resources` fixed-duration servers and `requesters` one-shot customers,
/// plus seed events requesting service at random times in
/// `[0, interval)`. Exercises deferral and lookahead heavily.
pub fn burst_profile(
    resources: usize,
    requesters: usize,
    interval: f64,
    seed: u64,
) -> (SimConfig, EventQueue) {
    let free = (0..resources)
        .map(|i| Resource::new(format!("car{i}"), Fixed(2.0)))
        .collect();
    let names: Vec<String> = (0..requesters).map(|i| format!("house{i}")).collect();
    let satisfied = names.iter().map(|n| Requester::one_shot(n.as_str())).collect();
    let seeds = random_requests(names, interval, seed);
    (
        SimConfig {
            free,
            satisfied,
            ..SimConfig::default()
        },
        seeds,
    )
}
