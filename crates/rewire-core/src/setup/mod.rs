//! Simulation Setup
//!
//! Strategy assignment and the initial population, graph, and ledger.

pub mod players;

pub use players::*;
