//! Round Types
//!
//! Match outcomes, the ephemeral per-round record, and the per-round report
//! emitted after graph maintenance and selection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{AgentId, Move};

/// Result of one iterated match between two strategies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Move pairs in turn order, `(first player, second player)`
    pub turns: Vec<(Move, Move)>,
    /// Final scores, `(first player, second player)`
    pub scores: (i64, i64),
}

impl MatchOutcome {
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Number of turns where both players cooperated
    pub fn mutual_cooperations(&self) -> usize {
        self.turns
            .iter()
            .filter(|(a, b)| a.is_cooperate() && b.is_cooperate())
            .count()
    }
}

/// A match played between two connected agents during a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// The pair in ascending slot order
    pub players: (AgentId, AgentId),
    pub outcome: MatchOutcome,
    /// Delta applied to the pair's relationship weight
    pub relationship_change: i64,
    /// Relationship weight after the delta was applied
    pub weight_after: i64,
}

/// All matches of a single round, in play order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub matches: Vec<MatchRecord>,
}

impl RoundRecord {
    pub fn new(round: u32) -> Self {
        Self {
            round,
            matches: Vec::new(),
        }
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Finds the match played between two agents, in either order
    pub fn find(&self, a: &AgentId, b: &AgentId) -> Option<&MatchRecord> {
        self.matches.iter().find(|m| {
            (&m.players.0 == a && &m.players.1 == b) || (&m.players.0 == b && &m.players.1 == a)
        })
    }
}

/// One line of the standings listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub agent_id: AgentId,
    /// Cumulative payoff since the start of the run
    pub payoff: i64,
    /// Label of the strategy currently bound to the slot
    pub strategy: String,
    /// How many times the slot's strategy has been replaced by selection
    #[serde(default)]
    pub replacements: u32,
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (Strategy: {})",
            self.agent_id, self.payoff, self.strategy
        )
    }
}

/// A Moran replacement event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub reproducing: AgentId,
    pub replaced: AgentId,
    /// Strategy copied into the replaced slot
    pub strategy: String,
    /// Strategy the replaced slot held before
    pub previous_strategy: String,
}

/// Summary emitted after each round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    pub matches_played: usize,
    pub edges_severed: usize,
    pub edges_rebuilt: usize,
    /// Edge count after severing and rebuilding
    pub edge_count: usize,
    /// Standings in slot order
    pub standings: Vec<Standing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<Replacement>,
}

impl RoundReport {
    /// Ledger snapshot as `(agent, payoff)` pairs in slot order
    pub fn payoffs(&self) -> Vec<(AgentId, i64)> {
        self.standings
            .iter()
            .map(|s| (s.agent_id.clone(), s.payoff))
            .collect()
    }

    /// Serializes to a single JSON line (no trailing newline)
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
