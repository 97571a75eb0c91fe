// Cross-checks of the routing graph against petgraph's Dijkstra
use courier_dispatch::utils::{seed_routing_graph, RoutingGraph, SEED_LOCATIONS};
use petgraph::algo::dijkstra;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPSILON: f64 = 1e-9;

fn random_graph(rng: &mut StdRng, locations: usize, edges: usize) -> RoutingGraph {
    let names: Vec<String> = (0..locations).map(|i| format!("Stop-{}", i)).collect();
    let mut graph = RoutingGraph::new(names);
    for _ in 0..edges {
        let from = rng.gen_range(0..locations);
        let to = rng.gen_range(0..locations);
        let distance = (rng.gen_range(1..200) as f64) / 4.0;
        graph.add_edge(from, to, distance);
    }
    graph
}

fn assert_matches_reference(graph: &RoutingGraph) {
    let storage = graph.as_graph();
    for start in 0..graph.len() {
        let reference = dijkstra(storage, NodeIndex::new(start), None, |e| *e.weight());
        for end in 0..graph.len() {
            let path = graph.shortest_path(start, end);
            match reference.get(&NodeIndex::new(end)) {
                Some(expected) => {
                    assert_eq!(path.first(), Some(&start));
                    assert_eq!(path.last(), Some(&end));
                    // Every hop is a real edge
                    for pair in path.windows(2) {
                        assert!(graph.neighbors(pair[0]).any(|(t, _)| t == pair[1]));
                    }
                    let relaxed: f64 = path
                        .windows(2)
                        .map(|pair| {
                            graph
                                .neighbors(pair[0])
                                .filter(|&(t, _)| t == pair[1])
                                .map(|(_, d)| d)
                                .fold(f64::INFINITY, f64::min)
                        })
                        .sum();
                    assert!(
                        (relaxed - expected).abs() < EPSILON,
                        "{} -> {}: got {}, expected {}",
                        start,
                        end,
                        relaxed,
                        expected
                    );
                }
                None => assert!(path.is_empty(), "{} -> {} should be unreachable", start, end),
            }
        }
    }
}

#[test]
fn seed_graph_matches_reference_dijkstra() {
    assert_matches_reference(&seed_routing_graph());
}

#[test]
fn random_graphs_match_reference_dijkstra() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let locations = rng.gen_range(1..=12);
        let edges = rng.gen_range(0..=20);
        let graph = random_graph(&mut rng, locations, edges);
        assert_matches_reference(&graph);
    }
}

#[test]
fn seed_graph_is_symmetric() {
    let graph = seed_routing_graph();
    for edge in graph.as_graph().edge_references() {
        let (u, v) = (edge.source().index(), edge.target().index());
        assert_eq!(graph.get_distance(u, v), graph.get_distance(v, u));
        assert_eq!(graph.get_distance(u, v), Some(*edge.weight()));
    }
    for x in 0..graph.len() {
        assert_eq!(graph.get_distance(x, x), Some(0.0));
    }
}

#[test]
fn shortest_path_to_self_is_single_location() {
    let graph = seed_routing_graph();
    for s in 0..graph.len() {
        let route = graph.route(s, s);
        assert_eq!(route.path, vec![s]);
        assert_eq!(route.distance, 0.0);
    }
}

#[test]
fn seed_routes_from_warehouse() {
    let graph = seed_routing_graph();
    let expected = [
        ("Zone-A-East", vec![9, 0, 1], 11.5),
        ("Zone-B-South", vec![9, 3, 5], 14.5),
        ("Zone-C-West", vec![9, 6, 8], 15.5),
    ];

    for (name, path, distance) in expected {
        let target = SEED_LOCATIONS.iter().position(|&n| n == name).unwrap();
        let route = graph.route(9, target);
        assert_eq!(route.path, path, "route to {}", name);
        assert_eq!(route.distance, distance, "distance to {}", name);
    }
}
