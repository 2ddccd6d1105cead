//! Relationship Graph
//!
//! Undirected weighted graph over agent identities. An edge means the pair
//! is matched this round; its weight is the strength of the relationship.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use rewire_events::{AgentId, EdgeSnapshot, GraphSnapshot};

/// Errors from graph mutations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("self-loop on {0} is not allowed")]
    SelfLoop(AgentId),
    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),
    #[error("agent {0} appears more than once")]
    DuplicateAgent(AgentId),
}

/// Resource: relationship graph between all agents
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipGraph {
    nodes: Vec<AgentId>,
    index: HashMap<AgentId, usize>,
    /// Maps (lower node index, higher node index) -> weight
    edges: BTreeMap<(usize, usize), i64>,
}

/// Canonical key for an unordered pair
fn pair_key(i: usize, j: usize) -> (usize, usize) {
    if i < j {
        (i, j)
    } else {
        (j, i)
    }
}

impl RelationshipGraph {
    /// Creates a graph with the given nodes and no edges
    pub fn new(nodes: Vec<AgentId>) -> Result<Self, GraphError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, id) in nodes.iter().enumerate() {
            if index.insert(id.clone(), i).is_some() {
                return Err(GraphError::DuplicateAgent(id.clone()));
            }
        }
        Ok(Self {
            nodes,
            index,
            edges: BTreeMap::new(),
        })
    }

    /// Creates a graph where every pair is connected with `init_weight`
    pub fn complete(nodes: Vec<AgentId>, init_weight: i64) -> Result<Self, GraphError> {
        let mut graph = Self::new(nodes)?;
        let n = graph.nodes.len();
        for i in 0..n {
            for j in (i + 1)..n {
                graph.edges.insert((i, j), init_weight);
            }
        }
        Ok(graph)
    }

    pub fn nodes(&self) -> &[AgentId] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn key(&self, a: &AgentId, b: &AgentId) -> Result<(usize, usize), GraphError> {
        let i = *self
            .index
            .get(a)
            .ok_or_else(|| GraphError::UnknownAgent(a.clone()))?;
        let j = *self
            .index
            .get(b)
            .ok_or_else(|| GraphError::UnknownAgent(b.clone()))?;
        if i == j {
            return Err(GraphError::SelfLoop(a.clone()));
        }
        Ok(pair_key(i, j))
    }

    /// Check if an edge exists (in either direction)
    pub fn has_edge(&self, a: &AgentId, b: &AgentId) -> bool {
        self.key(a, b)
            .map(|key| self.edges.contains_key(&key))
            .unwrap_or(false)
    }

    /// Edge weight, or 0 if there is no edge
    pub fn weight(&self, a: &AgentId, b: &AgentId) -> i64 {
        self.key(a, b)
            .ok()
            .and_then(|key| self.edges.get(&key).copied())
            .unwrap_or(0)
    }

    /// Adds `delta` to the pair's weight, creating the edge from 0 if absent.
    /// Returns the new weight.
    pub fn add_or_update_edge(
        &mut self,
        a: &AgentId,
        b: &AgentId,
        delta: i64,
    ) -> Result<i64, GraphError> {
        let key = self.key(a, b)?;
        Ok(self.update_key(key, delta))
    }

    /// Index-based edge check for callers iterating node positions
    pub fn has_edge_between(&self, i: usize, j: usize) -> bool {
        i != j && self.edges.contains_key(&pair_key(i, j))
    }

    /// Index-based variant of [`add_or_update_edge`](Self::add_or_update_edge).
    /// Indices must be distinct positions in [`nodes`](Self::nodes).
    pub fn update_between(&mut self, i: usize, j: usize, delta: i64) -> Result<i64, GraphError> {
        if i >= self.nodes.len() || j >= self.nodes.len() {
            let missing = AgentId::for_slot(i.max(j));
            return Err(GraphError::UnknownAgent(missing));
        }
        if i == j {
            return Err(GraphError::SelfLoop(self.nodes[i].clone()));
        }
        Ok(self.update_key(pair_key(i, j), delta))
    }

    fn update_key(&mut self, key: (usize, usize), delta: i64) -> i64 {
        let weight = self.edges.entry(key).or_insert(0);
        *weight += delta;
        *weight
    }

    /// Removes every edge whose weight is at or below `threshold`.
    /// Returns the removed pairs in ascending order.
    pub fn sever_below_threshold(&mut self, threshold: i64) -> Vec<(AgentId, AgentId)> {
        let doomed: Vec<(usize, usize)> = self
            .edges
            .iter()
            .filter(|&(_, &weight)| weight <= threshold)
            .map(|(&key, _)| key)
            .collect();

        for key in &doomed {
            self.edges.remove(key);
        }
        doomed.into_iter().map(|key| self.pair_ids(key)).collect()
    }

    /// For every unconnected pair, in ascending order, draws one uniform
    /// number and creates the edge with `weight` if it falls below
    /// `rebuild_chance`. Existing edges are never touched.
    /// Returns the created pairs.
    pub fn rebuild(
        &mut self,
        rebuild_chance: f64,
        weight: i64,
        rng: &mut SmallRng,
    ) -> Vec<(AgentId, AgentId)> {
        let n = self.nodes.len();
        let mut created = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.edges.contains_key(&(i, j)) {
                    continue;
                }
                if rng.gen::<f64>() < rebuild_chance {
                    self.edges.insert((i, j), weight);
                    created.push((i, j));
                }
            }
        }
        created.into_iter().map(|key| self.pair_ids(key)).collect()
    }

    fn pair_ids(&self, (i, j): (usize, usize)) -> (AgentId, AgentId) {
        (self.nodes[i].clone(), self.nodes[j].clone())
    }

    /// All edges in ascending pair order
    pub fn edges(&self) -> impl Iterator<Item = (&AgentId, &AgentId, i64)> + '_ {
        self.edges
            .iter()
            .map(|(&(i, j), &weight)| (&self.nodes[i], &self.nodes[j], weight))
    }

    pub fn snapshot(&self, round: u32) -> GraphSnapshot {
        GraphSnapshot {
            round,
            nodes: self.nodes.clone(),
            edges: self
                .edges()
                .map(|(source, target, weight)| EdgeSnapshot {
                    source: source.clone(),
                    target: target.clone(),
                    weight,
                })
                .collect(),
        }
    }
}
