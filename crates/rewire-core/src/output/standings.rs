//! Standings output
//!
//! Human-readable standings listings and the final JSON summary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rewire_events::Standing;

use super::OutputError;

pub const FINAL_SUMMARY_FILE: &str = "final.json";

/// Renders a heading followed by one `Player_k: payoff (Strategy: label)`
/// line per standing.
pub fn format_standings(heading: &str, standings: &[Standing]) -> String {
    let mut out = String::from(heading);
    out.push('\n');
    for standing in standings {
        out.push_str(&standing.to_string());
        out.push('\n');
    }
    out
}

/// End-of-run summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalSummary {
    pub seed: u64,
    pub rounds_played: u32,
    pub edge_count: usize,
    pub standings: Vec<Standing>,
    /// Slots per strategy label
    pub strategy_counts: BTreeMap<String, usize>,
}

impl FinalSummary {
    pub fn new(seed: u64, rounds_played: u32, edge_count: usize, standings: Vec<Standing>) -> Self {
        let mut strategy_counts = BTreeMap::new();
        for standing in &standings {
            *strategy_counts.entry(standing.strategy.clone()).or_insert(0) += 1;
        }
        Self {
            seed,
            rounds_played,
            edge_count,
            standings,
            strategy_counts,
        }
    }

    /// Highest cumulative payoff, earliest slot first on ties
    pub fn leader(&self) -> Option<&Standing> {
        self.standings
            .iter()
            .rev()
            .max_by_key(|standing| standing.payoff)
    }

    pub fn write(&self, path: &Path) -> Result<(), OutputError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
