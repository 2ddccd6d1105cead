//! Agent Identity
//!
//! Stable identifiers for population slots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a population slot, e.g. `Player_3`.
///
/// Identities are assigned once at setup and never reused or renumbered,
/// even when the strategy bound to the slot is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identity for the zero-based population slot `index` (`Player_<index + 1>`).
    pub fn for_slot(index: usize) -> Self {
        Self(format!("Player_{}", index + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
