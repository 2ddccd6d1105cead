//! Networked Iterated-Game Evolution Engine
//!
//! Agents bound to strategies play iterated prisoner's dilemma matches
//! along the edges of a relationship graph. Matches move edge weights,
//! weak edges are severed and sometimes rebuilt, and Moran selection lets
//! successful strategies spread.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod error;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::*;
pub use config::{ConfigError, SimConfig};
pub use error::{SimError, SimResult};
pub use simulation::Simulation;

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
