//! FIFO queues of entities, one per discrete state.
//!
//! The dispatcher owns one [`RoleQueue`] per [`EntityState`]. Membership
//! in a queue *is* the entity's state: moving an entity from one queue to
//! another is the state transition.

use std::collections::VecDeque;

use queuesim_core::{Entity, EntityState};

/// Insertion-ordered queue of entities sharing one role and one state.
///
/// [`dequeue`](RoleQueue::dequeue) returns the oldest member. Removal by
/// name returns the first match in insertion order.
#[derive(Debug)]
pub struct RoleQueue<T> {
    state: EntityState,
    members: VecDeque<T>,
}

impl<T: Entity> RoleQueue<T> {
    /// Create an empty queue representing `state`.
    ///
    /// # Panics
    ///
    /// Panics if `state` belongs to a different role than `T`.
    pub fn new(state: EntityState) -> Self {
        assert!(
            state.role() == T::ROLE,
            "a {} queue cannot hold state '{state}'",
            T::ROLE
        );
        Self {
            state,
            members: VecDeque::new(),
        }
    }

    /// The state this queue represents.
    pub fn state(&self) -> EntityState {
        self.state
    }

    /// Append an entity at the tail.
    pub fn enqueue(&mut self, entity: T) {
        self.members.push_back(entity);
    }

    /// Remove and return the oldest entity.
    pub fn dequeue(&mut self) -> Option<T> {
        self.members.pop_front()
    }

    /// Remove and return the first entity named `name`.
    pub fn remove(&mut self, name: &str) -> Option<T> {
        let idx = self.position(name)?;
        self.members.remove(idx)
    }

    /// Whether an entity named `name` is queued here.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Number of queued entities.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the queue holds no entities.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate from the oldest to the newest member.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.members.iter()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|e| e.name().as_str() == name)
    }
}

impl<T: Entity> Extend<T> for RoleQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.members.extend(iter);
    }
}
