//! Shared data types and serialization for the rewiring simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod agent;
pub mod moves;
pub mod round;
pub mod snapshot;

pub use agent::AgentId;
pub use moves::{History, Move};
pub use round::{MatchOutcome, MatchRecord, Replacement, RoundRecord, RoundReport, Standing};
pub use snapshot::{EdgeSnapshot, GraphSnapshot};
