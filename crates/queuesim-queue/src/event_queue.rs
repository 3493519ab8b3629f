//! Time-ordered queue of pending events.
//!
//! # Ordering
//!
//! Events are ranked ascending by time. Among events with equal time the
//! most recently inserted ranks first: a new event is placed before the
//! first existing entry whose time is `>=` its own. Rank 0 is always the
//! globally soonest pending event, rank `k` the k-th soonest.
//!
//! Storage is a `Vec` kept in *descending* time order so that the soonest
//! event sits at the tail. Extracting rank 0 is then a `pop`, and the
//! insertion point is found by binary search from the latest end.

use std::fmt;

use queuesim_core::{Event, SimTime};

/// Pending events ordered by time, with lookahead access by rank.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    /// Descending by time; the soonest event is last.
    entries: Vec<Event>,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no events are pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an event, keeping time order. Ties rank newest first.
    pub fn insert(&mut self, event: Event) {
        let t = event.time();
        let idx = self.entries.partition_point(|e| e.time() >= t);
        self.entries.insert(idx, event);
    }

    /// Move every event of `other` into this queue.
    ///
    /// Events keep their relative order among themselves; against events
    /// already pending at the same time they rank first, as any newer
    /// insertion does.
    pub fn merge(&mut self, other: EventQueue) {
        // Latest first, so that ties keep other's relative order.
        for event in other.entries {
            self.insert(event);
        }
    }

    /// The event at `rank` (0 = soonest), if any.
    pub fn peek(&self, rank: usize) -> Option<&Event> {
        self.index_of(rank).map(|i| &self.entries[i])
    }

    /// Remove and return the event at `rank` (0 = soonest).
    ///
    /// Returns `None` if fewer than `rank + 1` events are pending.
    pub fn extract(&mut self, rank: usize) -> Option<Event> {
        let idx = self.index_of(rank)?;
        Some(self.entries.remove(idx))
    }

    /// Time of the soonest pending event.
    pub fn next_time(&self) -> Option<SimTime> {
        self.peek(0).map(Event::time)
    }

    /// Advance every pending event whose time is strictly less than `time`
    /// to `new_time`, and restore the queue order.
    ///
    /// Events already at `time` are left alone. Events that would move
    /// backwards keep their time. Shifted events keep their relative order
    /// and rank before events already pending at their new time. Returns
    /// the number of events whose time changed.
    pub fn shift_later_than(&mut self, time: SimTime, new_time: SimTime) -> usize {
        let cut = self.entries.partition_point(|e| e.time() >= time);
        if cut == self.entries.len() {
            return 0;
        }
        let stale = self.entries.split_off(cut);
        let mut shifted = 0;
        for mut event in stale {
            if event.time() < new_time {
                event.set_time(new_time);
                shifted += 1;
            }
            self.insert(event);
        }
        shifted
    }

    /// Iterate pending events from the soonest to the latest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Event> + ExactSizeIterator {
        self.entries.iter().rev()
    }

    /// Discard all pending events.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn index_of(&self, rank: usize) -> Option<usize> {
        self.entries.len().checked_sub(rank.checked_add(1)?)
    }
}

impl FromIterator<Event> for EventQueue {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        let mut queue = Self::new();
        for event in iter {
            queue.insert(event);
        }
        queue
    }
}

impl Extend<Event> for EventQueue {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        for event in iter {
            self.insert(event);
        }
    }
}

impl fmt::Display for EventQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, event) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{event}")?;
        }
        write!(f, "]")
    }
}
