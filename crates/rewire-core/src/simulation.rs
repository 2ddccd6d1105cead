//! Simulation driver
//!
//! Owns the ECS world and the round schedule. All engine state lives in
//! world resources; nothing is global.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{info, warn};

use rewire_events::{GraphSnapshot, RoundRecord, RoundReport, Standing};
use rewire_strategies::Strategy;

use crate::components::{PayoffLedger, Population, RelationshipGraph};
use crate::config::{ConfigError, SimConfig};
use crate::error::{SimError, SimResult};
use crate::output::{FinalSummary, GraphSink};
use crate::setup::{assign_strategies, spawn_population};
use crate::systems::{build_round_schedule, RoundLog, RoundParams};
use crate::SimRng;

pub struct Simulation {
    world: World,
    schedule: Schedule,
    seed: u64,
    /// Round in which a system fault was reported; no further rounds run
    faulted_at: Option<u32>,
}

impl Simulation {
    /// Validates `config`, assigns strategies (drawing from the seeded RNG
    /// in random mode), and builds the initial world.
    pub fn new(config: &SimConfig) -> SimResult<Self> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(config.simulation.seed);
        let strategies = assign_strategies(&config.population, &mut rng)?;
        Self::build(config, strategies, rng)
    }

    /// Builds a simulation around an explicit lineup, ignoring the
    /// population section of `config`.
    pub fn with_strategies(
        config: &SimConfig,
        strategies: Vec<Box<dyn Strategy>>,
    ) -> SimResult<Self> {
        if strategies.len() < 2 {
            return Err(ConfigError::Invalid(format!(
                "population needs at least 2 strategies, got {}",
                strategies.len()
            ))
            .into());
        }
        let mut checked = config.clone();
        checked.population = Default::default();
        checked.validate()?;

        let rng = SmallRng::seed_from_u64(config.simulation.seed);
        Self::build(config, strategies, rng)
    }

    fn build(
        config: &SimConfig,
        strategies: Vec<Box<dyn Strategy>>,
        rng: SmallRng,
    ) -> SimResult<Self> {
        let mut world = World::new();
        world.insert_resource(RoundParams::from(config));
        world.insert_resource(SimRng(rng));
        world.insert_resource(RoundLog::default());
        spawn_population(&mut world, strategies, &config.network)?;

        let graph = world.resource::<RelationshipGraph>();
        info!(
            "created {} players, {} edges at weight {}",
            graph.node_count(),
            graph.edge_count(),
            config.network.init_weight
        );
        for (label, count) in world.resource::<Population>().strategy_counts() {
            info!("  {}: {}", label, count);
        }
        let game = &config.game;
        if !game.is_prisoners_dilemma() {
            warn!(
                "payoffs R={} S={} T={} P={} do not form a prisoner's dilemma",
                game.reward, game.sucker, game.temptation, game.punishment
            );
        }

        Ok(Self {
            world,
            schedule: build_round_schedule(),
            seed: config.simulation.seed,
            faulted_at: None,
        })
    }

    /// Plays one round: matches, severing, rebuilding, then selection if
    /// enabled.
    ///
    /// If a phase fails, its error is returned and the simulation stays
    /// faulted: the round's partial effects are kept and every later call
    /// returns [`SimError::Faulted`].
    pub fn run_round(&mut self) -> SimResult<RoundReport> {
        if let Some(round) = self.faulted_at {
            return Err(SimError::Faulted(round));
        }
        let total = self.num_rounds();
        if self.rounds_played() >= total {
            return Err(SimError::Finished(total));
        }

        self.schedule.run(&mut self.world);

        let (round, matches_played, edges_severed, edges_rebuilt, replacement) = {
            let mut log = self.world.resource_mut::<RoundLog>();
            if let Some(fault) = log.fault.take() {
                self.faulted_at = Some(log.round);
                return Err(fault);
            }
            (
                log.round,
                log.record.match_count(),
                log.severed.len(),
                log.rebuilt.len(),
                log.replacement.clone(),
            )
        };

        let edge_count = self.graph().edge_count();
        info!(
            "round {}/{}: {} matches, {} severed, {} rebuilt, {} edges",
            round, total, matches_played, edges_severed, edges_rebuilt, edge_count
        );

        Ok(RoundReport {
            round,
            matches_played,
            edges_severed,
            edges_rebuilt,
            edge_count,
            standings: self.standings(),
            replacement,
        })
    }

    /// Runs every remaining round, handing each report to `on_round`.
    pub fn run<F>(&mut self, mut on_round: F) -> SimResult<()>
    where
        F: FnMut(&RoundReport),
    {
        while !self.is_finished() {
            let report = self.run_round()?;
            on_round(&report);
        }
        Ok(())
    }

    /// Runs every remaining round and returns the reports
    pub fn run_collect(&mut self) -> SimResult<Vec<RoundReport>> {
        let mut reports = Vec::new();
        self.run(|report| reports.push(report.clone()))?;
        Ok(reports)
    }

    pub fn rounds_played(&self) -> u32 {
        self.world.resource::<RoundLog>().round
    }

    pub fn num_rounds(&self) -> u32 {
        self.world.resource::<RoundParams>().num_rounds
    }

    pub fn is_finished(&self) -> bool {
        self.rounds_played() >= self.num_rounds()
    }

    pub fn graph(&self) -> &RelationshipGraph {
        self.world.resource::<RelationshipGraph>()
    }

    pub fn ledger(&self) -> &PayoffLedger {
        self.world.resource::<PayoffLedger>()
    }

    pub fn population(&self) -> &Population {
        self.world.resource::<Population>()
    }

    /// Matches of the most recent round
    pub fn last_record(&self) -> &RoundRecord {
        &self.world.resource::<RoundLog>().record
    }

    pub fn standings(&self) -> Vec<Standing> {
        self.population().standings(self.ledger())
    }

    pub fn graph_snapshot(&self) -> GraphSnapshot {
        self.graph().snapshot(self.rounds_played())
    }

    /// Hands the current graph to a consumer
    pub fn export_graph(&self, sink: &mut dyn GraphSink) -> SimResult<()> {
        sink.write_graph(&self.graph_snapshot())?;
        Ok(())
    }

    pub fn final_summary(&self) -> FinalSummary {
        FinalSummary::new(
            self.seed,
            self.rounds_played(),
            self.graph().edge_count(),
            self.standings(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewire_strategies::registry;

    fn small_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.simulation.num_rounds = 3;
        config.simulation.num_turns = 5;
        config.population.player_count = 4;
        config
    }

    #[test]
    fn test_new_builds_complete_graph() {
        let sim = Simulation::new(&small_config()).unwrap();
        assert_eq!(sim.population().len(), 4);
        assert_eq!(sim.graph().edge_count(), 6);
        assert_eq!(sim.ledger().total(), 0);
        assert_eq!(sim.rounds_played(), 0);
        assert!(!sim.is_finished());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = small_config();
        config.population.player_count = 1;
        assert!(matches!(
            Simulation::new(&config),
            Err(SimError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_with_strategies_needs_two() {
        let lineup = registry::create_all(&["Cooperator"]).unwrap();
        assert!(Simulation::with_strategies(&small_config(), lineup).is_err());
    }

    #[test]
    fn test_run_stops_after_num_rounds() {
        let mut sim = Simulation::new(&small_config()).unwrap();
        let reports = sim.run_collect().unwrap();

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[2].round, 3);
        assert!(sim.is_finished());
        assert!(matches!(sim.run_round(), Err(SimError::Finished(3))));
    }

    #[test]
    fn test_report_matches_world_state() {
        let mut sim = Simulation::new(&small_config()).unwrap();
        let report = sim.run_round().unwrap();

        assert_eq!(report.round, 1);
        assert_eq!(report.matches_played, 6);
        assert_eq!(report.matches_played, sim.last_record().match_count());
        assert_eq!(report.edge_count, sim.graph().edge_count());
        assert_eq!(report.payoffs(), sim.ledger().snapshot());
    }

    #[test]
    fn test_fault_stops_later_rounds() {
        let mut sim = Simulation::new(&small_config()).unwrap();
        // A ledger without entries makes the match phase fail
        sim.world.insert_resource(PayoffLedger::default());

        assert!(matches!(sim.run_round(), Err(SimError::Ledger(_))));
        assert_eq!(sim.rounds_played(), 1);
        // Later phases of the faulted round were skipped
        assert!(sim.world.resource::<RoundLog>().severed.is_empty());
        assert!(matches!(sim.run_round(), Err(SimError::Faulted(1))));
        assert!(sim.run_collect().is_err());
    }

    #[test]
    fn test_export_graph_to_sink() {
        let mut sim = Simulation::new(&small_config()).unwrap();
        sim.run_round().unwrap();

        let mut sink: Vec<GraphSnapshot> = Vec::new();
        sim.export_graph(&mut sink).unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].round, 1);
        assert_eq!(sink[0].nodes.len(), 4);
    }

    #[test]
    fn test_final_summary() {
        let mut sim = Simulation::new(&small_config()).unwrap();
        sim.run_collect().unwrap();

        let summary = sim.final_summary();
        assert_eq!(summary.seed, 42);
        assert_eq!(summary.rounds_played, 3);
        assert_eq!(summary.standings.len(), 4);
        assert_eq!(summary.strategy_counts.values().sum::<usize>(), 4);
    }
}
