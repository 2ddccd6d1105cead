//! Scenario tests
//!
//! Small hand-checkable runs of the full round schedule.

use std::collections::BTreeSet;

use rewire_core::{SimConfig, SimError, Simulation};
use rewire_events::AgentId;

fn fixed(roster: &[&str]) -> SimConfig {
    let mut config = SimConfig::default();
    config.population.random_players = false;
    config.population.use_moran_process = false;
    config.population.roster = roster.iter().map(|s| s.to_string()).collect();
    config.network.rebuild_chance = 0.0;
    config
}

#[test]
fn test_two_cooperators_strengthen_their_edge() {
    let mut config = fixed(&["Cooperator", "Cooperator"]);
    config.network.init_weight = 100;
    config.network.threshold = 0;
    config.simulation.num_turns = 5;
    config.simulation.num_rounds = 3;
    config.game.reward = 1;

    let mut sim = Simulation::new(&config).unwrap();
    sim.run_collect().unwrap();

    let a = AgentId::for_slot(0);
    let b = AgentId::for_slot(1);
    assert_eq!(sim.graph().weight(&a, &b), 115);
    assert_eq!(sim.ledger().get(&a), 15);
    assert_eq!(sim.ledger().get(&b), 15);
}

#[test]
fn test_edge_at_threshold_is_severed_before_next_round() {
    let mut config = fixed(&["Defector", "Defector"]);
    config.network.init_weight = 10;
    config.network.threshold = 0;
    config.simulation.num_turns = 5;
    config.simulation.num_rounds = 2;

    let mut sim = Simulation::new(&config).unwrap();
    let first = sim.run_round().unwrap();
    assert_eq!(first.edges_severed, 1);
    assert_eq!(first.edge_count, 0);
    let after_first = sim.ledger().snapshot();

    let second = sim.run_round().unwrap();
    assert_eq!(second.matches_played, 0);
    assert_eq!(sim.ledger().snapshot(), after_first);
}

#[test]
fn test_severed_edge_rebuilt_at_half_weight() {
    let mut config = fixed(&["Defector", "Defector"]);
    config.network.init_weight = 11;
    config.network.threshold = 5;
    config.network.rebuild_chance = 1.0;
    config.simulation.num_turns = 3;
    config.simulation.num_rounds = 1;

    let mut sim = Simulation::new(&config).unwrap();
    let report = sim.run_round().unwrap();

    assert_eq!(report.edges_severed, 1);
    assert_eq!(report.edges_rebuilt, 1);
    assert_eq!(sim.graph().weight(&AgentId::for_slot(0), &AgentId::for_slot(1)), 5);
}

#[test]
fn test_identity_set_is_invariant() {
    let mut config = SimConfig::default();
    config.simulation.num_rounds = 15;
    config.simulation.num_turns = 10;
    config.network.rebuild_chance = 0.2;

    let mut sim = Simulation::new(&config).unwrap();
    let expected: BTreeSet<AgentId> = sim.population().ids().into_iter().collect();

    let mut replacements = 0;
    for report in sim.run_collect().unwrap() {
        let ids: BTreeSet<AgentId> = report.standings.iter().map(|s| s.agent_id.clone()).collect();
        assert_eq!(ids, expected);
        if report.replacement.is_some() {
            replacements += 1;
        }
    }

    let ledger_ids: BTreeSet<AgentId> = sim.ledger().iter().map(|(id, _)| id.clone()).collect();
    assert_eq!(ledger_ids, expected);
    let node_ids: BTreeSet<AgentId> = sim.graph().nodes().iter().cloned().collect();
    assert_eq!(node_ids, expected);

    let counted: u32 = sim.standings().iter().map(|s| s.replacements).sum();
    assert_eq!(counted, replacements);
}

#[test]
fn test_new_edges_only_at_rebuild_weight() {
    let mut config = fixed(&["Defector", "TitForTat", "Bully", "Defector", "Grudger", "Random"]);
    config.network.init_weight = 101;
    config.network.threshold = 0;
    config.network.rebuild_chance = 0.5;
    config.simulation.num_turns = 20;
    config.simulation.num_rounds = 10;

    let mut sim = Simulation::new(&config).unwrap();
    let mut previous = sim.graph_snapshot();
    for _ in 0..10 {
        sim.run_round().unwrap();
        let current = sim.graph_snapshot();
        for edge in &current.edges {
            assert!(edge.weight > 0, "edge at or below threshold survived");
            if previous.weight(&edge.source, &edge.target).is_none() {
                assert_eq!(edge.weight, 50);
            }
        }
        previous = current;
    }
}

#[test]
fn test_moran_off_keeps_bindings() {
    let mut config = fixed(&["Cooperator", "Defector", "TitForTat"]);
    config.simulation.num_rounds = 5;

    let mut sim = Simulation::new(&config).unwrap();
    for report in sim.run_collect().unwrap() {
        assert!(report.replacement.is_none());
    }
    assert_eq!(sim.population().labels(), vec!["Cooperator", "Defector", "TitForTat"]);
}

#[test]
fn test_running_past_the_end() {
    let mut config = fixed(&["Cooperator", "Cooperator"]);
    config.simulation.num_rounds = 1;

    let mut sim = Simulation::new(&config).unwrap();
    sim.run_round().unwrap();
    assert!(matches!(sim.run_round(), Err(SimError::Finished(1))));
}
