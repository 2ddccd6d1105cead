//! ECS Systems
//!
//! The phases of one round and the schedule that runs them in order:
//! matches, threshold severing, rebuilding, then optional selection.

pub mod matches;
pub mod moran;
pub mod topology;

pub use matches::{play_matches, relationship_change, MatchEngine};
pub use moran::{moran_step, MoranSelector};
pub use topology::{apply_thresholds, rebuild_relationships};

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;

use rewire_events::{AgentId, Replacement, RoundRecord};
use rewire_strategies::Match;

use crate::config::SimConfig;
use crate::error::SimError;

/// Resource: fixed per-run parameters read by the round systems
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RoundParams {
    pub num_rounds: u32,
    pub threshold: i64,
    pub rebuild_chance: f64,
    /// Weight given to rebuilt edges
    pub rebuild_weight: i64,
    pub game_match: Match,
    pub use_moran_process: bool,
}

impl From<&SimConfig> for RoundParams {
    fn from(config: &SimConfig) -> Self {
        Self {
            num_rounds: config.simulation.num_rounds,
            threshold: config.network.threshold,
            rebuild_chance: config.network.rebuild_chance,
            rebuild_weight: config.network.rebuild_weight(),
            game_match: Match::new(config.simulation.num_turns, config.game),
            use_moran_process: config.population.use_moran_process,
        }
    }
}

/// Resource: what happened during the current round
#[derive(Resource, Debug, Default)]
pub struct RoundLog {
    /// 1-based number of the round in progress (0 before the first)
    pub round: u32,
    pub record: RoundRecord,
    pub severed: Vec<(AgentId, AgentId)>,
    pub rebuilt: Vec<(AgentId, AgentId)>,
    pub replacement: Option<Replacement>,
    /// First error raised by a system this round; later phases are skipped
    pub fault: Option<SimError>,
}

impl RoundLog {
    /// Clears the previous round and starts `round`
    pub fn start(&mut self, round: u32) {
        *self = Self {
            round,
            record: RoundRecord::new(round),
            ..Self::default()
        };
    }

    pub fn fail(&mut self, error: impl Into<SimError>) {
        if self.fault.is_none() {
            self.fault = Some(error.into());
        }
    }
}

/// System: advance the round counter and reset the log
pub fn begin_round(mut log: ResMut<RoundLog>) {
    let next = log.round + 1;
    log.start(next);
}

/// Run condition: no system has failed this round
pub fn round_healthy(log: Res<RoundLog>) -> bool {
    log.fault.is_none()
}

/// Run condition: selection is switched on
pub fn moran_enabled(params: Res<RoundParams>) -> bool {
    params.use_moran_process
}

/// Builds the schedule for one round.
///
/// Systems are chained and run on the single-threaded executor, so every
/// draw from `SimRng` happens in the same order on every run.
pub fn build_round_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            begin_round,
            play_matches,
            apply_thresholds.run_if(round_healthy),
            rebuild_relationships.run_if(round_healthy),
            moran_step.run_if(moran_enabled).run_if(round_healthy),
        )
            .chain(),
    );
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{LedgerError, PayoffLedger, Population, RelationshipGraph};
    use crate::SimRng;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use rewire_strategies::strategies::Cooperator;
    use rewire_strategies::{Game, Strategy};

    fn cooperators(n: usize) -> Vec<Box<dyn Strategy>> {
        (0..n).map(|_| Box::new(Cooperator) as Box<dyn Strategy>).collect()
    }

    fn fitness(population: &Population, amounts: &[i64]) -> PayoffLedger {
        let mut ledger = PayoffLedger::new(population.ids());
        for (i, amount) in amounts.iter().enumerate() {
            ledger.add(&AgentId::for_slot(i), *amount).unwrap();
        }
        ledger
    }

    #[test]
    fn test_params_from_config() {
        let mut config = SimConfig::default();
        config.network.init_weight = 101;
        config.simulation.num_turns = 7;

        let params = RoundParams::from(&config);
        assert_eq!(params.rebuild_weight, 50);
        assert_eq!(params.game_match.turns, 7);
        assert_eq!(params.num_rounds, 20);
        assert!(params.use_moran_process);
    }

    #[test]
    fn test_round_log_keeps_first_fault() {
        let mut log = RoundLog::default();
        log.start(3);
        log.fail(LedgerError::UnknownAgent(AgentId::from("a")));
        log.fail(SimError::Finished(1));

        assert_eq!(log.round, 3);
        assert!(matches!(log.fault, Some(SimError::Ledger(_))));

        log.start(4);
        assert!(log.fault.is_none());
        assert_eq!(log.record.round, 4);
    }

    #[test]
    fn test_begin_round_advances_counter() {
        let mut world = World::new();
        world.insert_resource(RoundLog::default());

        let mut schedule = Schedule::default();
        schedule.add_systems(begin_round);
        schedule.run(&mut world);
        schedule.run(&mut world);

        assert_eq!(world.resource::<RoundLog>().round, 2);
    }

    #[test]
    fn test_rebuild_draws_before_selection() {
        let amounts = [10, 20, 30, 40];
        let population = Population::new(cooperators(4));
        let ledger = fitness(&population, &amounts);
        // No edges, so no matches and 6 absent pairs to roll for
        let graph = RelationshipGraph::new(population.ids()).unwrap();

        let mut world = World::new();
        world.insert_resource(RoundParams {
            num_rounds: 1,
            threshold: 0,
            rebuild_chance: 0.0,
            rebuild_weight: 50,
            game_match: Match::new(1, Game::default()),
            use_moran_process: true,
        });
        world.insert_resource(population);
        world.insert_resource(graph);
        world.insert_resource(ledger);
        world.insert_resource(SimRng(SmallRng::seed_from_u64(21)));
        world.insert_resource(RoundLog::default());

        build_round_schedule().run(&mut world);

        let mut rng = SmallRng::seed_from_u64(21);
        let ids: Vec<AgentId> = (0..4).map(AgentId::for_slot).collect();
        let mut expected_graph = RelationshipGraph::new(ids).unwrap();
        expected_graph.rebuild(0.0, 50, &mut rng);
        let mut expected_population = Population::new(cooperators(4));
        let expected_ledger = fitness(&expected_population, &amounts);
        let expected = MoranSelector::step(&mut expected_population, &expected_ledger, &mut rng);

        let log = world.resource::<RoundLog>();
        assert!(log.fault.is_none());
        assert!(log.rebuilt.is_empty());
        assert!(expected.is_some());
        assert_eq!(log.replacement, expected);
        let mut actual = world.resource::<SimRng>().0.clone();
        assert_eq!(actual.gen::<u64>(), rng.gen::<u64>());
    }
}
