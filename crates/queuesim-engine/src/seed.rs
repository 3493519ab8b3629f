//! Generators for externally injected events.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use queuesim_core::{EntityName, Event, SimTime};
use queuesim_queue::EventQueue;

/// One `RequestService` per requester at a uniformly random time in
/// `[0, interval)`, reproducible from `seed`.
///
/// Times are drawn in the order the names are given.
pub fn random_requests<I>(names: I, interval: SimTime, seed: u64) -> EventQueue
where
    I: IntoIterator,
    I::Item: Into<EntityName>,
{
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    names
        .into_iter()
        .map(|name| {
            let u: f64 = rng.gen();
            Event::request_service(u * interval, name)
        })
        .collect()
}
