//! Player Setup
//!
//! Binds strategies to population slots and inserts the starting
//! resources: a complete graph at the initial weight and a zeroed ledger.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use tracing::debug;

use rewire_strategies::{registry, Strategy};

use crate::components::{PayoffLedger, Population, RelationshipGraph};
use crate::config::{ConfigError, NetworkConfig, PopulationConfig};
use crate::error::SimError;

/// Strategies for every slot, in slot order.
///
/// With `random_players`, each of the `player_count` slots draws one
/// strategy uniformly from the pool (one `choose` per slot). Otherwise the
/// roster is used as given and no randomness is consumed.
pub fn assign_strategies(
    config: &PopulationConfig,
    rng: &mut SmallRng,
) -> Result<Vec<Box<dyn Strategy>>, SimError> {
    if !config.random_players {
        return Ok(registry::create_all(&config.roster)?);
    }

    let pool = registry::create_all(&config.pool_names())?;
    let mut strategies = Vec::with_capacity(config.player_count);
    for _ in 0..config.player_count {
        let template = pool
            .choose(rng)
            .ok_or_else(|| ConfigError::Invalid("strategy pool is empty".into()))?;
        strategies.push(template.clone_fresh());
    }
    Ok(strategies)
}

/// Inserts the population, its complete relationship graph, and a zeroed
/// payoff ledger into the world.
pub fn spawn_population(
    world: &mut World,
    strategies: Vec<Box<dyn Strategy>>,
    network: &NetworkConfig,
) -> Result<(), SimError> {
    let population = Population::new(strategies);
    let ids = population.ids();
    let graph = RelationshipGraph::complete(ids.clone(), network.init_weight)?;
    let ledger = PayoffLedger::new(ids);

    for slot in population.slots() {
        debug!("{} plays {}", slot.id, slot.label());
    }

    world.insert_resource(population);
    world.insert_resource(graph);
    world.insert_resource(ledger);
    Ok(())
}
