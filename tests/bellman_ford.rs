mod common;

use common::{directed_path, random_dag, random_graph};
use ahash::HashMapExt;
use weighted_paths::{
    graphs::{attribute_graph::AttributeGraph, GraphView},
    search::{
        bellman_ford::{
            bellman_ford_multisource, bellman_ford_path_length,
            bellman_ford_predecessor_and_distance, negative_edge_cycle,
            single_source_bellman_ford,
        },
        collections::search_data::{PathMap, PredecessorMap, SearchOutputs},
        error::SearchError,
        path::path_weight,
        weight::{AttributeWeight, WeightFn},
        SearchOptions,
    },
};

#[test]
fn path_graph_distances_and_predecessors() {
    let graph = directed_path(5);
    let (predecessors, distances) = bellman_ford_predecessor_and_distance(
        &graph,
        &0,
        &AttributeWeight::<i64>::new("weight"),
        &SearchOptions::default(),
    )
    .unwrap();

    assert_eq!(distances[&4], 4);
    assert_eq!(predecessors[&4], vec![3]);
    assert!(predecessors[&0].is_empty());
}

#[test]
fn negative_cycle_is_detected() {
    let mut graph = directed_path(5);
    graph.add_weighted_edge(4, 0, "weight", 1);
    graph.add_weighted_edge(1, 2, "weight", -7);

    let weight = AttributeWeight::<i64>::new("weight");
    let result = bellman_ford_multisource(
        &graph,
        [0],
        &weight,
        &SearchOptions::default(),
        SearchOutputs::none(),
    );
    assert_eq!(result, Err(SearchError::NegativeCycleDetected));
    assert!(negative_edge_cycle(&graph, &weight).unwrap());
}

#[test]
fn matches_dynamic_program_on_random_dags() {
    let weight = AttributeWeight::<i64>::new("weight");

    for seed in 0..10 {
        let graph = random_dag(40, 160, seed);

        // edges only go forward, so one pass in id order is exact
        let mut expected: Vec<Option<i64>> = vec![None; 40];
        expected[0] = Some(0);
        for tail in 0..40_u32 {
            let Some(distance) = expected[tail as usize] else {
                continue;
            };
            for (head, attributes) in graph.neighbors(&tail).unwrap() {
                let candidate = distance + attributes["weight"];
                let best = &mut expected[*head as usize];
                if best.map_or(true, |best| candidate < best) {
                    *best = Some(candidate);
                }
            }
        }

        let (distances, paths) =
            single_source_bellman_ford(&graph, &0, &weight, &SearchOptions::default()).unwrap();
        for node in 0..40_u32 {
            assert_eq!(distances.get(&node).copied(), expected[node as usize], "seed {seed}");
        }
        for (node, path) in paths.iter() {
            assert_eq!(path.first(), Some(&0));
            assert_eq!(path.last(), Some(node));
            assert_eq!(path_weight(&graph, path, &weight).unwrap(), distances[node]);
        }
        assert!(!negative_edge_cycle(&graph, &weight).unwrap());
    }
}

#[test]
fn paths_start_at_source_with_zero_weight_cycles() {
    // few distinct weights, so zero-cost cycles through the source are common
    let weight = WeightFn::new(|_: &u32, _: &u32, attributes: &ahash::HashMap<String, u64>| {
        attributes.get("weight").map(|cost| cost % 3)
    });

    for seed in 0..20 {
        let graph = random_graph(seed % 2 == 0, 12, 30, seed);
        let (distances, paths) =
            single_source_bellman_ford(&graph, &0, &weight, &SearchOptions::default()).unwrap();

        assert_eq!(paths[&0], vec![0], "seed {seed}");
        for (node, path) in paths.iter() {
            assert_eq!(path.first(), Some(&0), "seed {seed}");
            assert_eq!(path.last(), Some(node), "seed {seed}");
            assert_eq!(path_weight(&graph, path, &weight).unwrap(), distances[node]);
        }
    }
}

#[test]
fn repeated_runs_are_identical() {
    let weight = AttributeWeight::<u64>::new("weight");
    let graph = random_graph(true, 50, 200, 5);

    let run = || {
        let mut predecessors = PredecessorMap::new();
        let mut paths = PathMap::new();
        let distances = bellman_ford_multisource(
            &graph,
            [0],
            &weight,
            &SearchOptions::default(),
            SearchOutputs::none()
                .predecessors(&mut predecessors)
                .paths(&mut paths),
        )
        .unwrap();
        (distances, predecessors, paths)
    };

    assert_eq!(run(), run());
}

#[test]
fn queued_predecessor_skip_does_not_change_results() {
    let weight = AttributeWeight::<i64>::new("weight");

    for seed in 0..5 {
        let graph = random_dag(30, 120, seed);
        let run = |skip: bool| {
            let mut predecessors = PredecessorMap::new();
            let distances = bellman_ford_multisource(
                &graph,
                [0],
                &weight,
                &SearchOptions::default().skip_queued_predecessors(skip),
                SearchOutputs::none().predecessors(&mut predecessors),
            )
            .unwrap();
            (distances, predecessors)
        };

        let (skipped, _) = run(true);
        let (plain, _) = run(false);
        assert_eq!(skipped, plain, "seed {seed}");
    }
}

#[test]
fn cutoff_and_target_prune_candidates() {
    let graph = directed_path(6);
    let weight = AttributeWeight::<i64>::new("weight");

    let distances = bellman_ford_multisource(
        &graph,
        [0],
        &weight,
        &SearchOptions::default().cutoff(2),
        SearchOutputs::none(),
    )
    .unwrap();
    assert_eq!(distances.len(), 3);

    assert_eq!(bellman_ford_path_length(&graph, &0, &3, &weight), Ok(3));
    assert!(matches!(
        bellman_ford_path_length(&graph, &3, &0, &weight),
        Err(SearchError::NoPathFound { .. })
    ));
}

#[test]
fn skipped_edges_are_ignored() {
    let mut graph: AttributeGraph<char, i64> = AttributeGraph::new_directed();
    graph.add_weighted_edges_from("weight", [('s', 'a', 1), ('a', 't', -5), ('s', 't', 2)]);

    // hide the negative edge
    let weight = WeightFn::new(|_: &char, _: &char, attributes: &ahash::HashMap<String, i64>| {
        attributes.get("weight").copied().filter(|cost| *cost >= 0)
    });
    let (distances, paths) =
        single_source_bellman_ford(&graph, &'s', &weight, &SearchOptions::default()).unwrap();

    assert_eq!(distances[&'t'], 2);
    assert_eq!(paths[&'t'], vec!['s', 't']);
}
