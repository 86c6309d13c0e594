use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::error::{GraphError, Result};
use crate::graph::{Graph, NodeId, Weight};

/// Heap entry: tentative distance plus the node it was pushed for.
#[derive(Debug, Clone, Copy, PartialEq)]
struct QueueEntry {
    dist: Weight,
    node: NodeId,
}

impl Eq for QueueEntry {}

// Reversed ordering turns std's max-heap into a min-heap on distance.
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .partial_cmp(&self.dist)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Distances and predecessors from one shortest-path run.
///
/// Owned by the caller; the graph itself is never mutated by a run, so
/// trees from different sources coexist and runs can proceed in parallel
/// against the same `&Graph`. Nodes absent from the maps were unreached.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: NodeId,
    dist: HashMap<NodeId, Weight>,
    pred: HashMap<NodeId, NodeId>,
}

impl ShortestPathTree {
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Best known distance from the source, `f64::INFINITY` when unreached.
    pub fn distance(&self, node: NodeId) -> Weight {
        self.dist.get(&node).copied().unwrap_or(Weight::INFINITY)
    }

    /// Predecessor of `node` on its shortest path. None for the source
    /// itself and for unreached nodes.
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.pred.get(&node).copied()
    }

    /// Number of nodes reached from the source, the source included.
    pub fn reached_count(&self) -> usize {
        self.dist.len()
    }

    /// Reconstruct the node sequence source → `target` by walking
    /// predecessor links. Empty when `target` was not reached.
    pub fn path_to(&self, target: NodeId) -> Vec<NodeId> {
        if !self.dist.contains_key(&target) {
            return Vec::new();
        }
        let mut path = vec![target];
        let mut current = target;
        while let Some(parent) = self.predecessor(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }
}

/// Dijkstra from `source` over the whole graph.
///
/// Classic min-queue relaxation with lazy decrease-key: a node may sit in
/// the queue several times, and entries worse than the node's current best
/// distance are dropped on pop. Correct only for non-negative weights,
/// which `Graph::add_edge` enforces.
pub fn shortest_path_tree(graph: &Graph, source: NodeId) -> Result<ShortestPathTree> {
    if !graph.contains(source) {
        return Err(GraphError::UnknownNode(source));
    }

    let mut dist: HashMap<NodeId, Weight> = HashMap::new();
    let mut pred: HashMap<NodeId, NodeId> = HashMap::new();
    let mut queue: BinaryHeap<QueueEntry> = BinaryHeap::new();

    dist.insert(source, 0.0);
    queue.push(QueueEntry {
        dist: 0.0,
        node: source,
    });

    while let Some(QueueEntry { dist: d, node: u }) = queue.pop() {
        // Stale entry: a later relaxation already found something better.
        if d > dist.get(&u).copied().unwrap_or(Weight::INFINITY) {
            continue;
        }
        for (&v, &w) in graph.neighbors_out(u)? {
            let candidate = d + w;
            if candidate < dist.get(&v).copied().unwrap_or(Weight::INFINITY) {
                dist.insert(v, candidate);
                pred.insert(v, u);
                queue.push(QueueEntry {
                    dist: candidate,
                    node: v,
                });
            }
        }
    }

    Ok(ShortestPathTree { source, dist, pred })
}

/// Shortest path between two nodes: total weight plus the node sequence.
///
/// Both ids must exist in the graph. An unreachable destination is not an
/// error: it is the defined result `(f64::INFINITY, [])`.
pub fn shortest_path(graph: &Graph, from: NodeId, to: NodeId) -> Result<(Weight, Vec<NodeId>)> {
    if !graph.contains(from) {
        return Err(GraphError::UnknownNode(from));
    }
    if !graph.contains(to) {
        return Err(GraphError::UnknownNode(to));
    }

    let tree = shortest_path_tree(graph, from)?;
    let total = tree.distance(to);
    if total.is_infinite() {
        return Ok((Weight::INFINITY, Vec::new()));
    }
    Ok((total, tree.path_to(to)))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Chain 0 → 1 → ... with the given per-hop weights.
    fn make_chain(weights: &[Weight]) -> Graph {
        let mut g = Graph::new();
        for id in 0..=weights.len() as NodeId {
            g.add_node(id, None).unwrap();
        }
        for (i, &w) in weights.iter().enumerate() {
            g.add_edge(i as NodeId, i as NodeId + 1, w).unwrap();
        }
        g
    }

    /// Directed cycle 0 → 1 → ... → n-1 → 0, uniform weight.
    fn make_cycle(n: NodeId, w: Weight) -> Graph {
        let mut g = Graph::new();
        for id in 0..n {
            g.add_node(id, None).unwrap();
        }
        for id in 0..n {
            g.add_edge(id, (id + 1) % n, w).unwrap();
        }
        g
    }

    #[test]
    fn test_chain_distances_and_paths() {
        // 0 →(1) 1 →(4) 2
        let g = make_chain(&[1.0, 4.0]);
        assert_eq!(shortest_path(&g, 0, 1).unwrap(), (1.0, vec![0, 1]));
        assert_eq!(shortest_path(&g, 0, 2).unwrap(), (5.0, vec![0, 1, 2]));
        // No reverse edges
        let (d, p) = shortest_path(&g, 2, 0).unwrap();
        assert!(d.is_infinite());
        assert!(p.is_empty());
    }

    #[test]
    fn test_source_equals_destination() {
        let g = make_chain(&[1.0, 4.0]);
        assert_eq!(shortest_path(&g, 1, 1).unwrap(), (0.0, vec![1]));
    }

    #[test]
    fn test_unknown_endpoints() {
        let g = make_chain(&[1.0]);
        assert_eq!(shortest_path(&g, 9, 0), Err(GraphError::UnknownNode(9)));
        assert_eq!(shortest_path(&g, 0, 9), Err(GraphError::UnknownNode(9)));
        assert!(matches!(
            shortest_path_tree(&g, 9),
            Err(GraphError::UnknownNode(9))
        ));
    }

    #[test]
    fn test_unreachable_across_components() {
        let mut g = Graph::new();
        for id in 0..4 {
            g.add_node(id, None).unwrap();
        }
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(2, 3, 1.0).unwrap();

        let (d, p) = shortest_path(&g, 0, 3).unwrap();
        assert!(d.is_infinite());
        assert!(p.is_empty());
    }

    #[test]
    fn test_relaxation_prefers_cheaper_detour() {
        // Direct edge 0→3 costs 10; the detour through 1 costs 3.
        let mut g = Graph::new();
        for id in 0..4 {
            g.add_node(id, None).unwrap();
        }
        g.add_edge(0, 3, 10.0).unwrap();
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(1, 3, 2.0).unwrap();
        g.add_edge(0, 2, 7.0).unwrap();

        assert_eq!(shortest_path(&g, 0, 3).unwrap(), (3.0, vec![0, 1, 3]));
    }

    #[test]
    fn test_stale_queue_entries_skipped() {
        // Node 1 is pushed first at distance 10, then improved to 2 via 2.
        // The stale (10, 1) entry must not clobber the finished node.
        let mut g = Graph::new();
        for id in 0..4 {
            g.add_node(id, None).unwrap();
        }
        g.add_edge(0, 1, 10.0).unwrap();
        g.add_edge(0, 2, 1.0).unwrap();
        g.add_edge(2, 1, 1.0).unwrap();
        g.add_edge(1, 3, 1.0).unwrap();

        assert_eq!(shortest_path(&g, 0, 1).unwrap(), (2.0, vec![0, 2, 1]));
        assert_eq!(shortest_path(&g, 0, 3).unwrap(), (3.0, vec![0, 2, 1, 3]));
    }

    #[test]
    fn test_path_edges_exist_and_weights_sum() {
        let g = make_cycle(7, 2.5);
        let (total, path) = shortest_path(&g, 1, 5).unwrap();

        let mut sum = 0.0;
        for pair in path.windows(2) {
            let out = g.neighbors_out(pair[0]).unwrap();
            let w = out.get(&pair[1]).copied();
            assert!(w.is_some(), "path uses missing edge {}→{}", pair[0], pair[1]);
            sum += w.unwrap();
        }
        assert_eq!(sum, total);
        assert_eq!(path.first(), Some(&1));
        assert_eq!(path.last(), Some(&5));
    }

    #[test]
    fn test_triangle_inequality() {
        let mut g = Graph::new();
        for id in 0..3 {
            g.add_node(id, None).unwrap();
        }
        g.add_edge(0, 1, 2.0).unwrap();
        g.add_edge(1, 2, 3.0).unwrap();
        g.add_edge(0, 2, 4.0).unwrap();
        g.add_edge(1, 0, 2.0).unwrap();
        g.add_edge(2, 1, 3.0).unwrap();
        g.add_edge(2, 0, 4.0).unwrap();

        for a in 0..3 {
            for b in 0..3 {
                for c in 0..3 {
                    let (ac, _) = shortest_path(&g, a, c).unwrap();
                    let (ab, _) = shortest_path(&g, a, b).unwrap();
                    let (bc, _) = shortest_path(&g, b, c).unwrap();
                    assert!(ac <= ab + bc + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_zero_weight_edges() {
        let mut g = Graph::new();
        for id in 0..3 {
            g.add_node(id, None).unwrap();
        }
        g.add_edge(0, 1, 0.0).unwrap();
        g.add_edge(1, 2, 0.0).unwrap();

        assert_eq!(shortest_path(&g, 0, 2).unwrap(), (0.0, vec![0, 1, 2]));
    }

    #[test]
    fn test_tree_accessors() {
        let g = make_chain(&[1.0, 4.0]);
        let tree = shortest_path_tree(&g, 0).unwrap();

        assert_eq!(tree.source(), 0);
        assert_eq!(tree.distance(2), 5.0);
        assert!(tree.distance(99).is_infinite());
        assert_eq!(tree.predecessor(2), Some(1));
        assert_eq!(tree.predecessor(0), None);
        assert_eq!(tree.reached_count(), 3);
        assert!(tree.path_to(99).is_empty());

        // From mid-chain, the upstream node is out of reach
        let tree = shortest_path_tree(&g, 1).unwrap();
        assert_eq!(tree.reached_count(), 2);
        assert!(tree.distance(0).is_infinite());
        assert!(tree.path_to(0).is_empty());
    }

    #[test]
    fn test_reruns_are_independent() {
        // A second run from another source must see none of the first
        // run's state: distances live in the returned tree, not on nodes.
        let g = make_chain(&[1.0, 1.0]);

        let from_0 = shortest_path_tree(&g, 0).unwrap();
        assert_eq!(from_0.distance(2), 2.0);

        let from_1 = shortest_path_tree(&g, 1).unwrap();
        assert!(from_1.distance(0).is_infinite());
        assert_eq!(from_1.distance(2), 1.0);

        // The first tree is unaffected by the second run
        assert_eq!(from_0.distance(1), 1.0);
        assert_eq!(from_0.distance(2), 2.0);
    }
}
