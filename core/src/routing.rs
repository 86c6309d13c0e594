use std::collections::HashSet;

use tracing::debug;

use crate::dijkstra::shortest_path_tree;
use crate::error::{GraphError, Result};
use crate::graph::{Graph, NodeId, Weight};

/// A multi-stop tour: the full node sequence walked and its total weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub path: Vec<NodeId>,
    pub distance: Weight,
}

/// Greedy nearest-stop tour over `stops`.
///
/// Starts at the first stop and repeatedly extends the tour to the closest
/// not-yet-visited stop, measured by shortest path from the current
/// position (one Dijkstra run serves as the distance oracle for all
/// candidates of a leg). Ties go to the earliest candidate. Duplicate
/// stops are collapsed, first occurrence wins. Empty input is a defined
/// empty tour; a leg with no reachable candidate fails with `Unreachable`.
///
/// This is an approximation: the tour is built left to right and earlier
/// choices are never revisited, so it need not be globally minimal.
pub fn route(graph: &Graph, stops: &[NodeId]) -> Result<Tour> {
    for &stop in stops {
        if !graph.contains(stop) {
            return Err(GraphError::UnknownNode(stop));
        }
    }

    let mut seen = HashSet::new();
    let stops: Vec<NodeId> = stops.iter().copied().filter(|s| seen.insert(*s)).collect();

    let Some((&first, rest)) = stops.split_first() else {
        return Ok(Tour {
            path: Vec::new(),
            distance: 0.0,
        });
    };

    let mut remaining: Vec<NodeId> = rest.to_vec();
    let mut path = vec![first];
    let mut distance = 0.0;
    let mut current = first;

    while !remaining.is_empty() {
        let tree = shortest_path_tree(graph, current)?;

        // First minimum wins on ties.
        let mut best: Option<(usize, Weight)> = None;
        for (i, &stop) in remaining.iter().enumerate() {
            let d = tree.distance(stop);
            if d.is_finite() && best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((i, d));
            }
        }
        let Some((idx, leg_distance)) = best else {
            return Err(GraphError::Unreachable(current));
        };

        let next = remaining.remove(idx);
        // The leg starts at `current`, which is already the tour's tail.
        path.extend(tree.path_to(next).into_iter().skip(1));
        distance += leg_distance;
        current = next;
    }

    debug!(
        stops = stops.len(),
        nodes = path.len(),
        distance,
        "greedy tour built"
    );
    Ok(Tour { path, distance })
}

/// Find the graph's center: the node whose farthest shortest-path distance
/// (eccentricity) is smallest. Returns the center id and its eccentricity.
///
/// A finite center only exists when every node reaches every other, so any
/// source that misses part of the graph decides the outcome: `NoFiniteCenter`.
/// A zero eccentricity in a graph of more than one node is a measurement
/// artifact and is excluded from the candidate set. Eccentricity ties break
/// toward the smaller node id.
pub fn center_point(graph: &Graph) -> Result<(NodeId, Weight)> {
    let total = graph.node_count();
    if total == 0 {
        return Err(GraphError::NoFiniteCenter);
    }

    let mut best: Option<(NodeId, Weight)> = None;
    for (source, _) in graph.all_nodes() {
        let tree = shortest_path_tree(graph, source)?;
        if tree.reached_count() < total {
            return Err(GraphError::NoFiniteCenter);
        }

        let eccentricity = graph
            .all_nodes()
            .map(|(other, _)| tree.distance(other))
            .fold(0.0, Weight::max);

        if eccentricity == 0.0 && total > 1 {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_id, best_ecc)) => {
                eccentricity < best_ecc || (eccentricity == best_ecc && source < best_id)
            }
        };
        if better {
            best = Some((source, eccentricity));
        }
    }

    let (center, eccentricity) = best.ok_or(GraphError::NoFiniteCenter)?;
    debug!(center, eccentricity, "graph center found");
    Ok((center, eccentricity))
}
