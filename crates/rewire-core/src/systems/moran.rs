//! Moran Selection
//!
//! One birth-death step per round: a slot chosen in proportion to its
//! cumulative payoff reproduces into a different, uniformly chosen slot.

use bevy_ecs::prelude::*;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::SmallRng;
use rand::Rng;
use tracing::{debug, info};

use rewire_events::Replacement;

use crate::components::{PayoffLedger, Population};
use crate::SimRng;

use super::RoundLog;

/// Fitness-proportional reproduction over the population
pub struct MoranSelector;

impl MoranSelector {
    /// Performs one step. Returns `None` without drawing from `rng` when
    /// total fitness is zero, no slot has positive fitness, or there are
    /// fewer than two slots.
    ///
    /// Negative payoffs count as zero weight. The replaced slot gets a fresh
    /// instance of the reproducing slot's strategy; the ledger is untouched.
    pub fn step(
        population: &mut Population,
        ledger: &PayoffLedger,
        rng: &mut SmallRng,
    ) -> Option<Replacement> {
        let n = population.len();
        if n < 2 {
            debug!("selection skipped: population has {} slots", n);
            return None;
        }

        if ledger.total() == 0 {
            debug!("selection skipped: total fitness is zero");
            return None;
        }

        let weights: Vec<u64> = population
            .slots()
            .iter()
            .map(|slot| ledger.get(&slot.id).max(0).unsigned_abs())
            .collect();
        let dist = match WeightedIndex::new(&weights) {
            Ok(dist) => dist,
            Err(e) => {
                debug!("selection skipped: {}", e);
                return None;
            }
        };

        let reproducing = dist.sample(rng);
        let mut replaced = rng.gen_range(0..n - 1);
        if replaced >= reproducing {
            replaced += 1;
        }

        let offspring = population.slot(reproducing)?.strategy().clone_fresh();
        let strategy = offspring.name();
        let previous = population.replace(replaced, offspring)?;

        Some(Replacement {
            reproducing: population.slot(reproducing)?.id.clone(),
            replaced: population.slot(replaced)?.id.clone(),
            strategy: strategy.to_string(),
            previous_strategy: previous.to_string(),
        })
    }
}

/// System: selection phase
pub fn moran_step(
    mut population: ResMut<Population>,
    ledger: Res<PayoffLedger>,
    mut rng: ResMut<SimRng>,
    mut log: ResMut<RoundLog>,
) {
    let replacement = MoranSelector::step(&mut population, &ledger, &mut rng.0);
    if let Some(ref r) = replacement {
        info!(
            "round {}: {} ({}) replaced {} ({})",
            log.round, r.reproducing, r.strategy, r.replaced, r.previous_strategy
        );
    }
    log.replacement = replacement;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rewire_events::AgentId;
    use rewire_strategies::strategies::{Cooperator, Defector, Gradual, TitForTat};
    use rewire_strategies::Strategy;

    fn with_fitness(
        strategies: Vec<Box<dyn Strategy>>,
        fitness: &[i64],
    ) -> (Population, PayoffLedger) {
        let population = Population::new(strategies);
        let mut ledger = PayoffLedger::new(population.ids());
        for (i, amount) in fitness.iter().enumerate() {
            ledger.add(&AgentId::for_slot(i), *amount).unwrap();
        }
        (population, ledger)
    }

    #[test]
    fn test_zero_total_fitness_is_noop() {
        let (mut population, ledger) = with_fitness(
            vec![Box::new(Cooperator), Box::new(Defector), Box::new(TitForTat)],
            &[0, 0, 0],
        );
        let mut rng = SmallRng::seed_from_u64(42);

        assert!(MoranSelector::step(&mut population, &ledger, &mut rng).is_none());
        assert_eq!(population.labels(), vec!["Cooperator", "Defector", "TitForTat"]);
    }

    #[test]
    fn test_no_draws_when_skipped() {
        let (mut population, ledger) =
            with_fitness(vec![Box::new(Cooperator), Box::new(Defector)], &[0, 0]);
        let mut rng = SmallRng::seed_from_u64(42);
        MoranSelector::step(&mut population, &ledger, &mut rng);

        let mut untouched = SmallRng::seed_from_u64(42);
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn test_negative_fitness_counts_as_zero() {
        let (mut population, ledger) =
            with_fitness(vec![Box::new(Cooperator), Box::new(Defector)], &[-5, 0]);
        let mut rng = SmallRng::seed_from_u64(42);
        assert!(MoranSelector::step(&mut population, &ledger, &mut rng).is_none());
        assert_eq!(population.labels(), vec!["Cooperator", "Defector"]);
    }

    #[test]
    fn test_never_replaces_itself() {
        for seed in 0..50 {
            let (mut population, ledger) =
                with_fitness(vec![Box::new(Cooperator), Box::new(Defector)], &[10, 0]);
            let mut rng = SmallRng::seed_from_u64(seed);

            let replacement = MoranSelector::step(&mut population, &ledger, &mut rng).unwrap();
            assert_eq!(replacement.reproducing, AgentId::for_slot(0));
            assert_eq!(replacement.replaced, AgentId::for_slot(1));
            assert_eq!(population.labels(), vec!["Cooperator", "Cooperator"]);
        }
    }

    #[test]
    fn test_zero_fitness_never_reproduces() {
        for seed in 0..50 {
            let (mut population, ledger) = with_fitness(
                vec![Box::new(Cooperator), Box::new(Defector), Box::new(TitForTat)],
                &[0, 7, 0],
            );
            let mut rng = SmallRng::seed_from_u64(seed);

            let replacement = MoranSelector::step(&mut population, &ledger, &mut rng).unwrap();
            assert_eq!(replacement.reproducing, AgentId::for_slot(1));
            assert_ne!(replacement.replaced, replacement.reproducing);
            assert_eq!(replacement.strategy, "Defector");
        }
    }

    #[test]
    fn test_replacement_is_fresh_and_counted() {
        let (mut population, ledger) = with_fitness(
            vec![Box::new(Gradual::default()), Box::new(Cooperator)],
            &[9, 0],
        );
        let mut rng = SmallRng::seed_from_u64(5);

        let replacement = MoranSelector::step(&mut population, &ledger, &mut rng).unwrap();
        assert_eq!(replacement.previous_strategy, "Cooperator");

        let slot = population.slot(1).unwrap();
        assert_eq!(slot.id, AgentId::for_slot(1));
        assert_eq!(slot.label(), "Gradual");
        assert_eq!(slot.replacements(), 1);
        assert_eq!(population.slot(0).unwrap().replacements(), 0);
        // Fitness carries over to the new binding
        assert_eq!(ledger.get(&AgentId::for_slot(1)), 0);
    }

    #[test]
    fn test_single_slot_is_noop() {
        let (mut population, ledger) = with_fitness(vec![Box::new(Cooperator)], &[4]);
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(MoranSelector::step(&mut population, &ledger, &mut rng).is_none());
    }
}
