//! Entity names and the [`SimTime`] type alias.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Logical simulation time in model units (minutes, hours, ...).
///
/// Always finite and non-negative for events that reach the kernel;
/// configuration validation rejects anything else.
pub type SimTime = f64;

/// Identifies an entity.
///
/// Entity identity is by name: role-queue membership queries, event
/// subjects and timeline columns all key on it. Cloning is cheap (the
/// string is shared), so names can be carried by events while the
/// entity itself moves between role queues.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityName(Arc<str>);

impl EntityName {
    /// Create a name from anything string-like.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityName {
    fn from(v: &str) -> Self {
        Self(Arc::from(v))
    }
}

impl From<String> for EntityName {
    fn from(v: String) -> Self {
        Self(Arc::from(v))
    }
}

impl From<&EntityName> for EntityName {
    fn from(v: &EntityName) -> Self {
        v.clone()
    }
}

impl Borrow<str> for EntityName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
