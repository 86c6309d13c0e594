use thiserror::Error;

use crate::graph::{NodeId, Weight};

/// Failures surfaced by graph mutation and the algorithms on top.
///
/// These are caller errors, not transient conditions; nothing here is
/// retried, and an unreachable `shortest_path` destination is a defined
/// result rather than an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("unknown node id: {0}")]
    UnknownNode(NodeId),

    #[error("node {0} already exists")]
    DuplicateNode(NodeId),

    #[error("invalid edge weight: {0}")]
    InvalidWeight(Weight),

    #[error("self-loop on node {0} is not allowed")]
    SelfLoop(NodeId),

    #[error("no remaining stop is reachable from node {0}")]
    Unreachable(NodeId),

    #[error("graph has no finite center")]
    NoFiniteCenter,
}

pub type Result<T> = std::result::Result<T, GraphError>;
