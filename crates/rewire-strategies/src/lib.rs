//! Strategy library for the rewiring simulation.
//!
//! Strategies are the pluggable decision logic bound to population slots.
//! The engine never inspects how a strategy decides; it only instantiates
//! fresh copies, labels them, and hands pairs of them to a [`Match`].
//!
//! # Modules
//!
//! - [`strategies`]: built-in iterated prisoner's dilemma strategies
//! - [`registry`]: name-based lookup and the default random-assignment pool
//! - [`game`]: payoff matrix and the match runner

pub mod game;
pub mod registry;
pub mod strategies;

use rand::rngs::SmallRng;
use std::fmt;

use rewire_events::{History, Move};

pub use game::{Game, Match};
pub use registry::{create, default_pool, default_pool_names, names, StrategyError};

/// Capability contract for a population member's decision logic.
pub trait Strategy: fmt::Debug + Send + Sync {
    /// Label identifying the strategy type, e.g. `"TitForTat"`
    fn name(&self) -> &'static str;

    /// Chooses the next move given both sides' history in the current match.
    fn decide(&mut self, own: &History, opponent: &History, rng: &mut SmallRng) -> Move;

    /// A new instance of the same strategy type with no match state.
    fn clone_fresh(&self) -> Box<dyn Strategy>;
}
