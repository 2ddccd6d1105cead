//! Payoff Ledger
//!
//! Cumulative match payoffs per agent. The ledger only ever accumulates;
//! it is never reset, not even when selection replaces a slot's strategy.

use bevy_ecs::prelude::*;
use std::collections::HashMap;
use thiserror::Error;

use rewire_events::AgentId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("no ledger entry for agent {0}")]
    UnknownAgent(AgentId),
}

/// Resource: cumulative payoff for every agent, in slot order
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct PayoffLedger {
    entries: Vec<(AgentId, i64)>,
    index: HashMap<AgentId, usize>,
}

impl PayoffLedger {
    /// Creates a ledger with a zero balance for each agent
    pub fn new(agents: impl IntoIterator<Item = AgentId>) -> Self {
        let mut ledger = Self::default();
        for agent in agents {
            if ledger.index.contains_key(&agent) {
                continue;
            }
            ledger.index.insert(agent.clone(), ledger.entries.len());
            ledger.entries.push((agent, 0));
        }
        ledger
    }

    /// Adds a match payoff to an agent's total. Returns the new total.
    pub fn add(&mut self, agent: &AgentId, amount: i64) -> Result<i64, LedgerError> {
        let i = *self
            .index
            .get(agent)
            .ok_or_else(|| LedgerError::UnknownAgent(agent.clone()))?;
        let total = &mut self.entries[i].1;
        *total += amount;
        Ok(*total)
    }

    /// Current total for an agent (0 if the agent has no entry)
    pub fn get(&self, agent: &AgentId) -> i64 {
        self.index
            .get(agent)
            .map(|&i| self.entries[i].1)
            .unwrap_or(0)
    }

    /// Sum of all totals
    pub fn total(&self) -> i64 {
        self.entries.iter().map(|(_, amount)| amount).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, agent: &AgentId) -> bool {
        self.index.contains_key(agent)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AgentId, i64)> + '_ {
        self.entries.iter().map(|(agent, amount)| (agent, *amount))
    }

    /// Owned copy of all totals in slot order
    pub fn snapshot(&self) -> Vec<(AgentId, i64)> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ledger_is_zeroed() {
        let ledger = PayoffLedger::new((0..4).map(AgentId::for_slot));
        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.total(), 0);
        assert!(ledger.iter().all(|(_, amount)| amount == 0));
    }

    #[test]
    fn test_add_accumulates() {
        let mut ledger = PayoffLedger::new((0..2).map(AgentId::for_slot));
        let a = AgentId::for_slot(0);

        assert_eq!(ledger.add(&a, 5).unwrap(), 5);
        assert_eq!(ledger.add(&a, 7).unwrap(), 12);
        assert_eq!(ledger.add(&a, -2).unwrap(), 10);
        assert_eq!(ledger.get(&a), 10);
        assert_eq!(ledger.total(), 10);
    }

    #[test]
    fn test_unknown_agent() {
        let mut ledger = PayoffLedger::new((0..2).map(AgentId::for_slot));
        let ghost = AgentId::from("ghost");
        assert_eq!(
            ledger.add(&ghost, 1).unwrap_err(),
            LedgerError::UnknownAgent(ghost.clone())
        );
        assert_eq!(ledger.get(&ghost), 0);
        assert!(!ledger.contains(&ghost));
    }

    #[test]
    fn test_snapshot_keeps_slot_order() {
        let mut ledger = PayoffLedger::new((0..11).map(AgentId::for_slot));
        ledger.add(&AgentId::for_slot(10), 3).unwrap();

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot[0].0.as_str(), "Player_1");
        assert_eq!(snapshot[10], (AgentId::from("Player_11"), 3));
    }
}
