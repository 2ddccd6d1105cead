//! Match System
//!
//! Plays one iterated match for every connected pair, credits the payoffs,
//! and moves each pair's relationship weight by how the match went.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use tracing::debug;

use rewire_events::{MatchRecord, Move, RoundRecord};
use rewire_strategies::Match;

use crate::components::{PayoffLedger, Population, RelationshipGraph};
use crate::error::SimError;
use crate::SimRng;

use super::{RoundLog, RoundParams};

/// Weight change for a whole match: +1 per mutual cooperation, -1 per
/// exploited turn, -2 per mutual defection.
pub fn relationship_change(turns: &[(Move, Move)]) -> i64 {
    turns
        .iter()
        .map(|turn| match turn {
            (Move::Cooperate, Move::Cooperate) => 1,
            (Move::Cooperate, Move::Defect) | (Move::Defect, Move::Cooperate) => -1,
            (Move::Defect, Move::Defect) => -2,
        })
        .sum()
}

/// Runs the match phase of a round
#[derive(Debug, Clone, Copy)]
pub struct MatchEngine {
    game_match: Match,
}

impl MatchEngine {
    pub fn new(game_match: Match) -> Self {
        Self { game_match }
    }

    /// Plays every connected pair `(i, j)`, `i < j`, in ascending slot order.
    ///
    /// Edge presence is checked once per pair before its match; the edge
    /// set itself only changes after the match phase.
    pub fn play_round(
        &self,
        round: u32,
        population: &Population,
        graph: &mut RelationshipGraph,
        ledger: &mut PayoffLedger,
        rng: &mut SmallRng,
    ) -> Result<RoundRecord, SimError> {
        let mut record = RoundRecord::new(round);
        let slots = population.slots();

        for (i, first) in slots.iter().enumerate() {
            for (j, second) in slots.iter().enumerate().skip(i + 1) {
                if !graph.has_edge_between(i, j) {
                    continue;
                }

                let outcome = self
                    .game_match
                    .play(first.strategy(), second.strategy(), rng);
                ledger.add(&first.id, outcome.scores.0)?;
                ledger.add(&second.id, outcome.scores.1)?;

                let change = relationship_change(&outcome.turns);
                let weight_after = graph.update_between(i, j, change)?;

                debug!(
                    "round {}: {} ({}) vs {} ({}) scored {}:{}, {} mutual C, weight {:+} -> {}",
                    round,
                    first.id,
                    first.label(),
                    second.id,
                    second.label(),
                    outcome.scores.0,
                    outcome.scores.1,
                    outcome.mutual_cooperations(),
                    change,
                    weight_after
                );

                record.matches.push(MatchRecord {
                    players: (first.id.clone(), second.id.clone()),
                    outcome,
                    relationship_change: change,
                    weight_after,
                });
            }
        }

        Ok(record)
    }
}

/// System: match phase
pub fn play_matches(
    params: Res<RoundParams>,
    population: Res<Population>,
    mut graph: ResMut<RelationshipGraph>,
    mut ledger: ResMut<PayoffLedger>,
    mut rng: ResMut<SimRng>,
    mut log: ResMut<RoundLog>,
) {
    let engine = MatchEngine::new(params.game_match);
    let round = log.round;
    match engine.play_round(round, &population, &mut graph, &mut ledger, &mut rng.0) {
        Ok(record) => log.record = record,
        Err(e) => log.fail(e),
    }
}
