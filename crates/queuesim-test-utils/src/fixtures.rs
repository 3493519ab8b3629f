//! Reusable timing fixtures.
//!
//! - [`Script`]: replays a fixed sequence of durations, cycling.
//! - [`CountingTiming`]: a constant duration that counts how often it was
//!   drawn, observable from outside after the entity has been moved.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use queuesim_core::{ServiceTime, ThinkTime};

/// Returns the scripted values in order, starting over at the end.
#[derive(Clone, Debug)]
pub struct Script {
    values: Vec<f64>,
    next: usize,
}

impl Script {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "Script needs at least one value");
        Self { values, next: 0 }
    }

    fn draw(&mut self) -> f64 {
        let v = self.values[self.next];
        self.next = (self.next + 1) % self.values.len();
        v
    }
}

impl ServiceTime for Script {
    fn service_duration(&mut self) -> f64 {
        self.draw()
    }
}

impl ThinkTime for Script {
    fn think_time(&mut self) -> f64 {
        self.draw()
    }
}

/// Constant duration with a shared draw counter.
#[derive(Clone, Debug)]
pub struct CountingTiming {
    pub value: f64,
    calls: Arc<AtomicUsize>,
}

impl CountingTiming {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle to the counter, valid after `self` has been moved.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    fn draw(&self) -> f64 {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.value
    }
}

impl ServiceTime for CountingTiming {
    fn service_duration(&mut self) -> f64 {
        self.draw()
    }
}

impl ThinkTime for CountingTiming {
    fn think_time(&mut self) -> f64 {
        self.draw()
    }
}
