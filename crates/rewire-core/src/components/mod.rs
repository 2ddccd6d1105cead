//! Engine Resources
//!
//! The relationship graph, payoff ledger, and population that make up the
//! simulation state.

pub mod graph;
pub mod ledger;
pub mod population;

pub use graph::*;
pub use ledger::*;
pub use population::*;
