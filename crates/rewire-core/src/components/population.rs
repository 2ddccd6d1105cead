//! Population
//!
//! Fixed, ordered slots of agent identities, each bound to a strategy.
//! Identities never change; bindings are replaced by selection.

use bevy_ecs::prelude::*;
use std::collections::BTreeMap;

use rewire_events::{AgentId, Standing};
use rewire_strategies::Strategy;

use super::ledger::PayoffLedger;

/// A population slot
#[derive(Debug)]
pub struct Slot {
    pub id: AgentId,
    strategy: Box<dyn Strategy>,
    replacements: u32,
}

impl Slot {
    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }

    /// Label of the bound strategy
    pub fn label(&self) -> &'static str {
        self.strategy.name()
    }

    /// Times this slot's binding has been replaced
    pub fn replacements(&self) -> u32 {
        self.replacements
    }
}

/// Resource: all population slots in index order
#[derive(Resource, Debug, Default)]
pub struct Population {
    slots: Vec<Slot>,
}

impl Population {
    /// Binds each strategy to a new slot `Player_1..Player_n`
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        let slots = strategies
            .into_iter()
            .enumerate()
            .map(|(i, strategy)| Slot {
                id: AgentId::for_slot(i),
                strategy,
                replacements: 0,
            })
            .collect();
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn ids(&self) -> Vec<AgentId> {
        self.slots.iter().map(|s| s.id.clone()).collect()
    }

    /// Strategy labels in slot order
    pub fn labels(&self) -> Vec<&'static str> {
        self.slots.iter().map(Slot::label).collect()
    }

    /// Rebinds a slot to a new strategy. Returns the label of the strategy
    /// it replaced, or `None` if the index is out of range.
    pub fn replace(&mut self, index: usize, strategy: Box<dyn Strategy>) -> Option<&'static str> {
        let slot = self.slots.get_mut(index)?;
        let previous = slot.strategy.name();
        slot.strategy = strategy;
        slot.replacements += 1;
        Some(previous)
    }

    /// Number of slots bound to each strategy label
    pub fn strategy_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for slot in &self.slots {
            *counts.entry(slot.label()).or_insert(0) += 1;
        }
        counts
    }

    /// Standings listing for the current bindings and ledger
    pub fn standings(&self, ledger: &PayoffLedger) -> Vec<Standing> {
        self.slots
            .iter()
            .map(|slot| Standing {
                agent_id: slot.id.clone(),
                payoff: ledger.get(&slot.id),
                strategy: slot.label().to_string(),
                replacements: slot.replacements,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewire_strategies::strategies::{Cooperator, Defector, TitForTat};

    fn lineup() -> Population {
        Population::new(vec![
            Box::new(Cooperator),
            Box::new(Defector),
            Box::new(Cooperator),
        ])
    }

    #[test]
    fn test_slots_get_sequential_ids() {
        let population = lineup();
        assert_eq!(population.len(), 3);
        assert_eq!(
            population.ids(),
            vec![AgentId::for_slot(0), AgentId::for_slot(1), AgentId::for_slot(2)]
        );
        assert_eq!(population.labels(), vec!["Cooperator", "Defector", "Cooperator"]);
    }

    #[test]
    fn test_replace_keeps_identity() {
        let mut population = lineup();
        let previous = population.replace(1, Box::new(TitForTat));

        assert_eq!(previous, Some("Defector"));
        let slot = population.slot(1).unwrap();
        assert_eq!(slot.id, AgentId::for_slot(1));
        assert_eq!(slot.label(), "TitForTat");
        assert_eq!(slot.replacements(), 1);
        assert!(population.replace(3, Box::new(TitForTat)).is_none());
    }

    #[test]
    fn test_strategy_counts() {
        let counts = lineup().strategy_counts();
        assert_eq!(counts.get("Cooperator"), Some(&2));
        assert_eq!(counts.get("Defector"), Some(&1));
    }

    #[test]
    fn test_standings_read_ledger() {
        let population = lineup();
        let mut ledger = PayoffLedger::new(population.ids());
        ledger.add(&AgentId::for_slot(1), 25).unwrap();

        let standings = population.standings(&ledger);
        assert_eq!(standings.len(), 3);
        assert_eq!(standings[1].payoff, 25);
        assert_eq!(standings[1].strategy, "Defector");
        assert_eq!(standings[0].to_string(), "Player_1: 0 (Strategy: Cooperator)");
    }
}
