//! Topology Systems
//!
//! Between-round edge maintenance: sever weak relationships, then give
//! unconnected pairs a chance to reconnect.

use bevy_ecs::prelude::*;
use tracing::debug;

use crate::components::RelationshipGraph;
use crate::SimRng;

use super::{RoundLog, RoundParams};

/// System: remove every edge at or below the threshold
pub fn apply_thresholds(
    params: Res<RoundParams>,
    mut graph: ResMut<RelationshipGraph>,
    mut log: ResMut<RoundLog>,
) {
    let severed = graph.sever_below_threshold(params.threshold);
    for (a, b) in &severed {
        debug!("round {}: severed {} -- {}", log.round, a, b);
    }
    log.severed = severed;
}

/// System: reconnect absent pairs at the rebuild weight
pub fn rebuild_relationships(
    params: Res<RoundParams>,
    mut graph: ResMut<RelationshipGraph>,
    mut rng: ResMut<SimRng>,
    mut log: ResMut<RoundLog>,
) {
    let rebuilt = graph.rebuild(params.rebuild_chance, params.rebuild_weight, &mut rng.0);
    for (a, b) in &rebuilt {
        debug!(
            "round {}: rebuilt {} -- {} at {}",
            log.round, a, b, params.rebuild_weight
        );
    }
    log.rebuilt = rebuilt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use rewire_events::AgentId;
    use rewire_strategies::{Game, Match};

    fn world_with(graph: RelationshipGraph, rebuild_chance: f64) -> World {
        let mut world = World::new();
        world.insert_resource(RoundParams {
            num_rounds: 1,
            threshold: 0,
            rebuild_chance,
            rebuild_weight: 50,
            game_match: Match::new(1, Game::default()),
            use_moran_process: false,
        });
        world.insert_resource(graph);
        world.insert_resource(SimRng(SmallRng::seed_from_u64(9)));
        world.insert_resource(RoundLog::default());
        world
    }

    #[test]
    fn test_threshold_edge_is_severed() {
        let ids: Vec<AgentId> = (0..3).map(AgentId::for_slot).collect();
        let mut graph = RelationshipGraph::complete(ids.clone(), 2).unwrap();
        graph.add_or_update_edge(&ids[0], &ids[1], -2).unwrap();
        graph.add_or_update_edge(&ids[1], &ids[2], -1).unwrap();

        let mut world = world_with(graph, 0.0);
        let mut schedule = Schedule::default();
        schedule.add_systems(apply_thresholds);
        schedule.run(&mut world);

        let graph = world.resource::<RelationshipGraph>();
        assert!(!graph.has_edge(&ids[0], &ids[1]));
        assert!(graph.has_edge(&ids[1], &ids[2]));
        assert_eq!(world.resource::<RoundLog>().severed.len(), 1);
    }

    #[test]
    fn test_rebuild_uses_rebuild_weight() {
        let ids: Vec<AgentId> = (0..4).map(AgentId::for_slot).collect();
        let graph = RelationshipGraph::new(ids).unwrap();

        let mut world = world_with(graph, 1.0);
        let mut schedule = Schedule::default();
        schedule.add_systems(rebuild_relationships);
        schedule.run(&mut world);

        let graph = world.resource::<RelationshipGraph>();
        assert_eq!(graph.edge_count(), 6);
        assert!(graph.edges().all(|(_, _, weight)| weight == 50));
        assert_eq!(world.resource::<RoundLog>().rebuilt.len(), 6);
    }
}
