//! Seeded random timing.
//!
//! [`Jittered`] draws uniformly from `[mean - half_width, mean + half_width)`
//! with a ChaCha8 generator, so a given seed always yields the same
//! sequence of durations.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use queuesim_core::{ServiceTime, ThinkTime};

/// Uniform jitter around a mean duration.
#[derive(Clone, Debug)]
pub struct Jittered {
    mean: f64,
    half_width: f64,
    rng: ChaCha8Rng,
}

impl Jittered {
    /// Durations uniform in `mean ± half_width`, reproducible from `seed`.
    pub fn new(mean: f64, half_width: f64, seed: u64) -> Self {
        Self {
            mean,
            half_width: half_width.abs(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The mean duration.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    fn draw(&mut self) -> f64 {
        let u: f64 = self.rng.gen();
        self.mean + self.half_width * (2.0 * u - 1.0)
    }
}

impl ServiceTime for Jittered {
    fn service_duration(&mut self) -> f64 {
        self.draw()
    }
}

impl ThinkTime for Jittered {
    fn think_time(&mut self) -> f64 {
        self.draw()
    }
}
