//! Graph Export
//!
//! Consumers for the final relationship graph. Nodes are agent identities,
//! edges carry their relationship weight.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use rewire_events::GraphSnapshot;

use super::OutputError;

pub const GRAPH_JSON_FILE: &str = "graph.json";
pub const GRAPH_DOT_FILE: &str = "graph.dot";

/// Receives the final graph of a run.
pub trait GraphSink {
    fn write_graph(&mut self, snapshot: &GraphSnapshot) -> Result<(), OutputError>;
}

/// Collects snapshots in memory
impl GraphSink for Vec<GraphSnapshot> {
    fn write_graph(&mut self, snapshot: &GraphSnapshot) -> Result<(), OutputError> {
        self.push(snapshot.clone());
        Ok(())
    }
}

/// Writes the graph as pretty-printed JSON
#[derive(Debug, Clone)]
pub struct JsonGraphWriter {
    path: PathBuf,
}

impl JsonGraphWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GraphSink for JsonGraphWriter {
    fn write_graph(&mut self, snapshot: &GraphSnapshot) -> Result<(), OutputError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        write_file(&self.path, &json)
    }
}

/// Writes the graph in Graphviz DOT format, edge labels showing weights
#[derive(Debug, Clone)]
pub struct DotGraphWriter {
    path: PathBuf,
}

impl DotGraphWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GraphSink for DotGraphWriter {
    fn write_graph(&mut self, snapshot: &GraphSnapshot) -> Result<(), OutputError> {
        write_file(&self.path, &render_dot(snapshot))
    }
}

/// Renders an undirected DOT graph
pub fn render_dot(snapshot: &GraphSnapshot) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "graph relationships {{");
    let _ = writeln!(out, "  label=\"round {}\";", snapshot.round);
    let _ = writeln!(out, "  node [style=filled, fillcolor=skyblue];");
    for node in &snapshot.nodes {
        let _ = writeln!(out, "  \"{}\";", node);
    }
    for edge in &snapshot.edges {
        let _ = writeln!(
            out,
            "  \"{}\" -- \"{}\" [label=\"{}\", weight={}];",
            edge.source,
            edge.target,
            edge.weight,
            edge.weight.max(0)
        );
    }
    out.push_str("}\n");
    out
}

fn write_file(path: &Path, contents: &str) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(())
}
