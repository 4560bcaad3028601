#![allow(dead_code)]

use rand::{rngs::StdRng, Rng, SeedableRng};
use weighted_paths::graphs::attribute_graph::AttributeGraph;

/// nodes {A,B,C,D}, undirected
pub fn small_undirected() -> AttributeGraph<char, u32> {
    let mut graph = AttributeGraph::new_undirected();
    graph.add_weighted_edges_from(
        "weight",
        [
            ('A', 'B', 4),
            ('A', 'C', 2),
            ('B', 'C', 1),
            ('B', 'D', 6),
            ('C', 'D', 8),
        ],
    );
    graph
}

/// directed path 0 -> 1 -> ... -> n-1 with unit weights
pub fn directed_path(n: u32) -> AttributeGraph<u32, i64> {
    let mut graph = AttributeGraph::new_directed();
    graph.add_weighted_edges_from("weight", (1..n).map(|head| (head - 1, head, 1)));
    graph
}

pub fn random_graph(
    directed: bool,
    number_of_nodes: u32,
    number_of_edges: u32,
    seed: u64,
) -> AttributeGraph<u32, u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = if directed {
        AttributeGraph::new_directed()
    } else {
        AttributeGraph::new_undirected()
    };

    for node in 0..number_of_nodes {
        graph.add_node(node);
    }
    for _ in 0..number_of_edges {
        let tail = rng.gen_range(0..number_of_nodes);
        let head = rng.gen_range(0..number_of_nodes);
        graph.add_weighted_edge(tail, head, "weight", rng.gen_range(0..100));
    }
    graph
}

/// Directed graph whose edges all point from lower to higher node ids, so
/// negative weights never form a cycle.
pub fn random_dag(number_of_nodes: u32, number_of_edges: u32, seed: u64) -> AttributeGraph<u32, i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = AttributeGraph::new_directed();

    for node in 0..number_of_nodes {
        graph.add_node(node);
    }
    for _ in 0..number_of_edges {
        let tail = rng.gen_range(0..number_of_nodes - 1);
        let head = rng.gen_range(tail + 1..number_of_nodes);
        graph.add_weighted_edge(tail, head, "weight", rng.gen_range(-20..50));
    }
    graph
}
