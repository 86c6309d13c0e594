//! waypoint-persist: JSON file adapter for waypoint-core graphs.
//!
//! Owns the on-disk format, file lifecycle, and malformed-input errors.
//! The core stays free of I/O; this crate populates a graph through
//! `add_node`/`add_edge` and exports one through `all_nodes`/`neighbors_out`.
//!
//! File shape (inherited from the system this replaces):
//!
//! ```json
//! {
//!   "nodes": { "0": { "id": 0, "pos": { "x": 1.0, "y": 2.0, "Z": 0.0 } } },
//!   "edges": { "0": { "1": 1.5 } }
//! }
//! ```
//!
//! Node records are keyed by stringified id but carry their own `id`
//! field, which is authoritative. `pos` is optional; its z key is the
//! capital `Z` the legacy files use. Edges map source id → destination
//! id → weight.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use waypoint_core::{Graph, GraphError, NodeId, Position, Weight};

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed graph file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid node id in file: {0:?}")]
    InvalidNodeId(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type Result<T> = std::result::Result<T, PersistError>;

#[derive(Debug, Serialize, Deserialize)]
struct PosRecord {
    x: f64,
    y: f64,
    #[serde(rename = "Z")]
    z: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeRecord {
    id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pos: Option<PosRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct GraphFile {
    nodes: HashMap<String, NodeRecord>,
    edges: HashMap<String, HashMap<String, Weight>>,
}

/// Read a graph from a JSON file.
///
/// All nodes are inserted before any edge, so edge endpoints missing from
/// the `nodes` object surface as `GraphError::UnknownNode` rather than
/// partially applied structure. Duplicate ids, unparseable id keys, and
/// invalid weights are likewise typed errors, never silent skips.
pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph> {
    let started = Instant::now();
    let text = fs::read_to_string(&path)?;
    let file: GraphFile = serde_json::from_str(&text)?;

    let mut graph = Graph::with_capacity(file.nodes.len());
    for record in file.nodes.values() {
        let position = record.pos.as_ref().map(|p| Position {
            x: p.x,
            y: p.y,
            z: p.z,
        });
        graph.add_node(record.id, position)?;
    }
    for (src, out) in &file.edges {
        let src = parse_id(src)?;
        for (dest, &weight) in out {
            graph.add_edge(src, parse_id(dest)?, weight)?;
        }
    }

    info!(
        path = %path.as_ref().display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "graph loaded"
    );
    Ok(graph)
}

/// Write a graph to a JSON file in the same shape `load_graph` reads.
pub fn save_graph(path: impl AsRef<Path>, graph: &Graph) -> Result<()> {
    let started = Instant::now();
    let mut file = GraphFile::default();

    for (id, node) in graph.all_nodes() {
        let pos = node.position.map(|p| PosRecord {
            x: p.x,
            y: p.y,
            z: p.z,
        });
        file.nodes.insert(id.to_string(), NodeRecord { id, pos });

        let out = graph.neighbors_out(id)?;
        if !out.is_empty() {
            file.edges.insert(
                id.to_string(),
                out.iter().map(|(&d, &w)| (d.to_string(), w)).collect(),
            );
        }
    }

    fs::write(&path, serde_json::to_string_pretty(&file)?)?;
    info!(
        path = %path.as_ref().display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "graph saved"
    );
    Ok(())
}

fn parse_id(raw: &str) -> Result<NodeId> {
    raw.parse()
        .map_err(|_| PersistError::InvalidNodeId(raw.to_string()))
}
