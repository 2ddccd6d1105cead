//! Graph Snapshot
//!
//! Serializable copy of the relationship graph, handed to visualization
//! consumers at the end of a run.

use serde::{Deserialize, Serialize};

use crate::AgentId;

/// A weighted, undirected edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub source: AgentId,
    pub target: AgentId,
    pub weight: i64,
}

/// Nodes and weighted edges of the relationship graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Rounds completed when the snapshot was taken
    #[serde(default)]
    pub round: u32,
    pub nodes: Vec<AgentId>,
    pub edges: Vec<EdgeSnapshot>,
}

impl GraphSnapshot {
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Weight of the edge between two agents, in either order
    pub fn weight(&self, a: &AgentId, b: &AgentId) -> Option<i64> {
        self.edges
            .iter()
            .find(|e| (&e.source == a && &e.target == b) || (&e.source == b && &e.target == a))
            .map(|e| e.weight)
    }

    /// Nodes with no incident edge
    pub fn isolated_nodes(&self) -> Vec<&AgentId> {
        self.nodes
            .iter()
            .filter(|n| !self.edges.iter().any(|e| &e.source == *n || &e.target == *n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_lookup_is_symmetric() {
        let a = AgentId::for_slot(0);
        let b = AgentId::for_slot(1);
        let c = AgentId::for_slot(2);
        let snapshot = GraphSnapshot {
            round: 1,
            nodes: vec![a.clone(), b.clone(), c.clone()],
            edges: vec![EdgeSnapshot {
                source: a.clone(),
                target: b.clone(),
                weight: 42,
            }],
        };

        assert_eq!(snapshot.weight(&b, &a), Some(42));
        assert_eq!(snapshot.weight(&a, &c), None);
        assert_eq!(snapshot.isolated_nodes(), vec![&c]);
    }
}
