use std::time::Instant;

use waypoint_core::{center_point, route, shortest_path, Graph, NodeId, Position};

// center_point runs one Dijkstra per node; keep it off huge graphs.
const CENTER_MAX_NODES: u64 = 5_000;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(100_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: waypoint-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all       Run all generators and benchmark each (default)");
        println!("  ring      Bidirectional ring lattice with shortcut chords");
        println!("  random    Uniform random weighted edges");
        println!("  grid      Square lattice with 4-neighborhood");
        println!();
        println!("Default node_count: 100000");
        return;
    }

    println!("waypoint-bench");
    println!("==============");
    println!();

    let generators: Vec<(&str, fn(u64) -> Graph)> = match mode {
        "ring" => vec![("Ring lattice", gen_ring)],
        "random" => vec![("Uniform random", gen_random)],
        "grid" => vec![("Square grid", gen_grid)],
        "all" => vec![
            ("Ring lattice", gen_ring as fn(u64) -> Graph),
            ("Uniform random", gen_random),
            ("Square grid", gen_grid),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Graph, node_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count);
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s — {} nodes, {} edges",
        gen_time.as_secs_f64(),
        graph.node_count(),
        graph.edge_count()
    );
    println!();

    // Shortest path: node 0 to a spread of targets
    println!("{:>12} {:>14} {:>10} {:>10}", "target", "distance", "hops", "time");
    println!("{:->12} {:->14} {:->10} {:->10}", "", "", "", "");
    let n = graph.node_count() as u64;
    for target in [n / 4, n / 2, n - 1] {
        let t = Instant::now();
        let result = shortest_path(&graph, 0, target);
        let elapsed = t.elapsed();
        match result {
            Ok((dist, path)) if dist.is_finite() => println!(
                "{:>12} {:>14.2} {:>10} {:>8.1}ms",
                target,
                dist,
                path.len().saturating_sub(1),
                elapsed.as_secs_f64() * 1000.0
            ),
            Ok(_) => println!(
                "{:>12} {:>14} {:>10} {:>8.1}ms",
                target,
                "unreachable",
                "-",
                elapsed.as_secs_f64() * 1000.0
            ),
            Err(e) => println!("{:>12} error: {}", target, e),
        }
    }

    // Greedy tour over evenly spread stops
    let stops: Vec<NodeId> = (0..8).map(|i| i * (n / 8).max(1)).filter(|&s| s < n).collect();
    println!();
    let t = Instant::now();
    match route(&graph, &stops) {
        Ok(tour) => println!(
            "Tour over {} stops: {} nodes, distance {:.2} in {:.1}ms",
            stops.len(),
            tour.path.len(),
            tour.distance,
            t.elapsed().as_secs_f64() * 1000.0
        ),
        Err(e) => println!("Tour over {} stops: {}", stops.len(), e),
    }

    // Center: n Dijkstra runs, only worth timing on small graphs
    if n <= CENTER_MAX_NODES {
        let t = Instant::now();
        match center_point(&graph) {
            Ok((center, ecc)) => println!(
                "Center: node {} (eccentricity {:.2}) in {:.1}ms",
                center,
                ecc,
                t.elapsed().as_secs_f64() * 1000.0
            ),
            Err(e) => println!("Center: {}", e),
        }
    } else {
        println!("Center: skipped (> {} nodes)", CENTER_MAX_NODES);
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators — O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_weight(&mut self) -> f64 {
        // Weights in [1, 10)
        1.0 + 9.0 * (self.next(1 << 20) as f64 / (1u64 << 20) as f64)
    }
}

/// Bidirectional ring lattice with random chords: strongly connected, so
/// every operation (center included) has a finite answer.
fn gen_ring(node_count: u64) -> Graph {
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(42);

    for i in 0..node_count {
        let angle = i as f64 / node_count as f64 * std::f64::consts::TAU;
        let position = Position {
            x: angle.cos() * 100.0,
            y: angle.sin() * 100.0,
            z: 0.0,
        };
        graph.add_node(i, Some(position)).expect("fresh id");
    }

    for i in 0..node_count {
        let next = (i + 1) % node_count;
        let w = rng.next_weight();
        graph.add_edge(i, next, w).expect("ring edge");
        graph.add_edge(next, i, w).expect("ring edge");
    }

    // One chord per ~10 nodes shortens paths across the ring
    for _ in 0..node_count / 10 {
        let a = rng.next(node_count);
        let b = rng.next(node_count);
        if a != b {
            graph.add_edge(a, b, rng.next_weight()).expect("chord");
        }
    }

    graph
}

/// Uniform random weighted edges, ~8 per node. No connectivity guarantee.
fn gen_random(node_count: u64) -> Graph {
    let mut graph = Graph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(12345);

    for i in 0..node_count {
        graph.add_node(i, None).expect("fresh id");
    }

    for _ in 0..node_count * 8 {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            graph.add_edge(from, to, rng.next_weight()).expect("random edge");
        }
    }

    graph
}

/// Square lattice with bidirectional 4-neighborhood edges and grid
/// positions. Long shortest paths, heavy relaxation traffic.
fn gen_grid(node_count: u64) -> Graph {
    let side = (node_count as f64).sqrt().ceil() as u64;
    let total = side * side;
    let mut graph = Graph::with_capacity(total as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..total {
        let position = Position {
            x: (i % side) as f64,
            y: (i / side) as f64,
            z: 0.0,
        };
        graph.add_node(i, Some(position)).expect("fresh id");
    }

    for i in 0..total {
        let (col, row) = (i % side, i / side);
        if col + 1 < side {
            let w = rng.next_weight();
            graph.add_edge(i, i + 1, w).expect("grid edge");
            graph.add_edge(i + 1, i, w).expect("grid edge");
        }
        if row + 1 < side {
            let w = rng.next_weight();
            graph.add_edge(i, i + side, w).expect("grid edge");
            graph.add_edge(i + side, i, w).expect("grid edge");
        }
    }

    graph
}
