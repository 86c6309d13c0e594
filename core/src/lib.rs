//! waypoint-core: weighted directed graph engine.
//!
//! A pure Rust library that maintains an adjacency-map graph and provides
//! single-source shortest paths (Dijkstra), greedy multi-stop tour
//! construction, and graph-center computation. No I/O: persistence and
//! rendering live in adapter crates against the `add_node`/`add_edge`/
//! `all_nodes`/`neighbors_out` surface.
//!
//! Shortest-path state (distances, predecessors) is owned by the call that
//! produced it, not by the graph, so any number of queries may run against
//! one `&Graph` without stepping on each other.

mod dijkstra;
mod error;
mod graph;
mod routing;

pub use dijkstra::{shortest_path, shortest_path_tree, ShortestPathTree};
pub use error::{GraphError, Result};
pub use graph::{Graph, NodeId, NodeInfo, Position, Weight};
pub use routing::{center_point, route, Tour};
