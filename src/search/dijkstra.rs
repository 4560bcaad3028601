use std::cmp::Ordering;

use ahash::{HashMap, HashMapExt, HashSet};
use itertools::Itertools;
use tracing::{debug, trace, warn};

use super::{
    collections::{
        frontier::{Frontier, FrontierEntry},
        search_data::{DistanceMap, PathMap, PredecessorMap, SearchOutputs},
    },
    error::{SearchError, SearchResult},
    path::Path,
    weight::{Cost, WeightResolver},
    SearchOptions,
};
use crate::graphs::GraphView;

/// Uniform-cost search from every node in `sources` at distance zero.
///
/// See [`dijkstra_multisource_seeded`].
pub fn dijkstra_multisource<G, R, W, I>(
    graph: &G,
    sources: I,
    weight: &R,
    options: &SearchOptions<G::Node, W>,
    outputs: SearchOutputs<'_, G::Node>,
) -> SearchResult<DistanceMap<G::Node, W>>
where
    G: GraphView,
    R: WeightResolver<G::Node, G::Payload, W>,
    W: Cost,
    I: IntoIterator<Item = G::Node>,
{
    let seeds = sources.into_iter().map(|source| (source, W::zero()));
    dijkstra_multisource_seeded(graph, seeds, weight, options, outputs)
}

/// Uniform-cost search from `(source, initial distance)` seeds.
///
/// Returns the finalized distance of every node reachable within the cutoff.
/// Unreachable nodes are absent. If a target is set the search stops as soon
/// as the target is finalized. Edges whose weight resolves to `None` are
/// skipped.
///
/// Fails with [`SearchError::ContradictoryPath`] if an already finalized node
/// is improved, which only happens with negative weights.
pub fn dijkstra_multisource_seeded<G, R, W, I>(
    graph: &G,
    seeds: I,
    weight: &R,
    options: &SearchOptions<G::Node, W>,
    outputs: SearchOutputs<'_, G::Node>,
) -> SearchResult<DistanceMap<G::Node, W>>
where
    G: GraphView,
    R: WeightResolver<G::Node, G::Payload, W>,
    W: Cost,
    I: IntoIterator<Item = (G::Node, W)>,
{
    let seeds = seeds.into_iter().collect_vec();
    if seeds.is_empty() {
        return Err(SearchError::NoSources);
    }
    for (source, _) in seeds.iter() {
        graph.ensure_contains(source)?;
    }
    if let Some(target) = &options.target {
        graph.ensure_contains(target)?;
    }

    let SearchOutputs {
        mut predecessors,
        mut paths,
    } = outputs;

    debug!(
        sources = seeds.len(),
        cutoff = ?options.cutoff,
        target = ?options.target,
        "starting uniform-cost search"
    );

    let sources: HashSet<G::Node> = seeds.iter().map(|(source, _)| source.clone()).collect();
    let mut distances = DistanceMap::new();
    let mut seen: HashMap<G::Node, W> = HashMap::new();
    let mut frontier = Frontier::new();

    for (source, distance) in seeds {
        let improves = seen
            .get(&source)
            .map_or(true, |best| distance.total_cmp(best) == Ordering::Less);
        if improves {
            seen.insert(source.clone(), distance);
        }
        if let Some(predecessors) = predecessors.as_deref_mut() {
            predecessors.insert(source.clone(), Vec::new());
        }
        if let Some(paths) = paths.as_deref_mut() {
            paths.insert(source.clone(), vec![source.clone()]);
        }
        frontier.push(distance, source, ());
    }

    while let Some(FrontierEntry {
        priority: distance_tail,
        node: tail,
        ..
    }) = frontier.pop()
    {
        // stale entry, the node was finalized through a shorter path
        if distances.contains_key(&tail) {
            continue;
        }
        distances.insert(tail.clone(), distance_tail);
        trace!(node = ?tail, distance = ?distance_tail, "finalized");

        if options.target.as_ref() == Some(&tail) {
            break;
        }

        for (head, payload) in graph.neighbors(&tail)? {
            let Some(cost) = weight.weight(&tail, head, payload) else {
                continue;
            };
            let distance_head = distance_tail + cost;

            if let Some(finalized) = distances.get(head) {
                if distance_head.total_cmp(finalized) == Ordering::Less {
                    warn!(node = ?head, "improving update to a finalized node");
                    return Err(SearchError::ContradictoryPath);
                }
                continue;
            }

            if let Some(cutoff) = options.cutoff {
                if distance_head.total_cmp(&cutoff) == Ordering::Greater {
                    continue;
                }
            }

            match seen.get(head).map(|best| distance_head.total_cmp(best)) {
                None | Some(Ordering::Less) => {
                    seen.insert(head.clone(), distance_head);
                    frontier.push(distance_head, head.clone(), ());

                    if let Some(paths) = paths.as_deref_mut() {
                        let mut path = paths
                            .get(&tail)
                            .cloned()
                            .unwrap_or_else(|| vec![tail.clone()]);
                        path.push(head.clone());
                        paths.insert(head.clone(), path);
                    }
                    if let Some(predecessors) = predecessors.as_deref_mut() {
                        predecessors.insert(head.clone(), vec![tail.clone()]);
                    }
                }
                // a tie never gives a source a predecessor
                Some(Ordering::Equal) if !sources.contains(head) => {
                    if let Some(predecessors) = predecessors.as_deref_mut() {
                        predecessors
                            .entry(head.clone())
                            .or_default()
                            .push(tail.clone());
                    }
                }
                Some(Ordering::Equal) | Some(Ordering::Greater) => {}
            }
        }
    }

    debug!(finalized = distances.len(), "uniform-cost search finished");
    Ok(distances)
}

/// Distances and paths from `source` to every reachable node.
pub fn single_source_dijkstra<G, R, W>(
    graph: &G,
    source: &G::Node,
    weight: &R,
    options: &SearchOptions<G::Node, W>,
) -> SearchResult<(DistanceMap<G::Node, W>, PathMap<G::Node>)>
where
    G: GraphView,
    R: WeightResolver<G::Node, G::Payload, W>,
    W: Cost,
{
    let mut paths = PathMap::new();
    let distances = dijkstra_multisource(
        graph,
        [source.clone()],
        weight,
        options,
        SearchOutputs::none().paths(&mut paths),
    )?;
    // paths may contain nodes that were seen but never finalized
    paths.retain(|node, _| distances.contains_key(node));
    Ok((distances, paths))
}

/// Predecessor lists and distances from `source`.
pub fn dijkstra_predecessor_and_distance<G, R, W>(
    graph: &G,
    source: &G::Node,
    weight: &R,
    options: &SearchOptions<G::Node, W>,
) -> SearchResult<(PredecessorMap<G::Node>, DistanceMap<G::Node, W>)>
where
    G: GraphView,
    R: WeightResolver<G::Node, G::Payload, W>,
    W: Cost,
{
    let mut predecessors = PredecessorMap::new();
    let distances = dijkstra_multisource(
        graph,
        [source.clone()],
        weight,
        options,
        SearchOutputs::none().predecessors(&mut predecessors),
    )?;
    predecessors.retain(|node, _| distances.contains_key(node));
    Ok((predecessors, distances))
}

/// Shortest path from `source` to `target`.
///
/// Fails with [`SearchError::NoPathFound`] if `target` is not reachable.
pub fn dijkstra_path<G, R, W>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    weight: &R,
) -> SearchResult<Path<G::Node, W>>
where
    G: GraphView,
    R: WeightResolver<G::Node, G::Payload, W>,
    W: Cost,
{
    let options = SearchOptions::default().target(target.clone());
    let mut paths = PathMap::new();
    let distances = dijkstra_multisource(
        graph,
        [source.clone()],
        weight,
        &options,
        SearchOutputs::none().paths(&mut paths),
    )?;

    let distance = *distances
        .get(target)
        .ok_or_else(|| SearchError::no_path_found(source, target))?;
    let vertices = paths
        .remove(target)
        .ok_or_else(|| SearchError::no_path_found(source, target))?;

    Ok(Path { vertices, distance })
}

/// Length of the shortest path from `source` to `target`.
pub fn dijkstra_path_length<G, R, W>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    weight: &R,
) -> SearchResult<W>
where
    G: GraphView,
    R: WeightResolver<G::Node, G::Payload, W>,
    W: Cost,
{
    let options = SearchOptions::default().target(target.clone());
    let distances =
        dijkstra_multisource(graph, [source.clone()], weight, &options, SearchOutputs::none())?;

    distances
        .get(target)
        .copied()
        .ok_or_else(|| SearchError::no_path_found(source, target))
}

#[cfg(test)]
mod tests {
    use ahash::{HashMap, HashMapExt};

    use super::{dijkstra_multisource, dijkstra_multisource_seeded};
    use crate::{
        graphs::attribute_graph::AttributeGraph,
        search::{
            collections::search_data::{PredecessorMap, SearchOutputs},
            error::SearchError,
            weight::{AttributeWeight, WeightFn},
            SearchOptions,
        },
    };

    fn diamond() -> AttributeGraph<char, u32> {
        let mut graph = AttributeGraph::new_directed();
        graph.add_weighted_edges_from(
            "weight",
            [('s', 'a', 1), ('s', 'b', 1), ('a', 't', 1), ('b', 't', 1)],
        );
        graph
    }

    #[test]
    fn records_tied_predecessors_in_relaxation_order() {
        let graph = diamond();
        let mut predecessors = PredecessorMap::new();
        let distances = dijkstra_multisource(
            &graph,
            ['s'],
            &AttributeWeight::new("weight"),
            &SearchOptions::default(),
            SearchOutputs::none().predecessors(&mut predecessors),
        )
        .unwrap();

        assert_eq!(distances[&'t'], 2);
        assert_eq!(predecessors[&'t'], vec!['a', 'b']);
        assert!(predecessors[&'s'].is_empty());
    }

    #[test]
    fn sources_reached_at_zero_cost_keep_no_predecessor() {
        let mut graph = AttributeGraph::new_undirected();
        graph.add_weighted_edges_from("weight", [(0, 1, 0), (1, 2, 0), (2, 3, 1)]);

        let mut predecessors = PredecessorMap::new();
        let distances = dijkstra_multisource(
            &graph,
            [0, 1],
            &AttributeWeight::<u32>::new("weight"),
            &SearchOptions::default(),
            SearchOutputs::none().predecessors(&mut predecessors),
        )
        .unwrap();

        assert_eq!(distances[&3], 1);
        assert!(predecessors[&0].is_empty());
        assert!(predecessors[&1].is_empty());
        assert_eq!(predecessors[&2], vec![1]);
    }

    #[test]
    fn masked_edges_are_skipped() {
        let graph = diamond();
        let weight = WeightFn::new(|tail: &char, _: &char, _: &HashMap<String, u32>| {
            (*tail != 'a').then_some(1_u32)
        });
        let mut predecessors = PredecessorMap::new();
        let distances = dijkstra_multisource(
            &graph,
            ['s'],
            &weight,
            &SearchOptions::default(),
            SearchOutputs::none().predecessors(&mut predecessors),
        )
        .unwrap();

        assert_eq!(distances[&'t'], 2);
        assert_eq!(predecessors[&'t'], vec!['b']);
    }

    #[test]
    fn cutoff_prunes_distant_nodes() {
        let graph = diamond();
        let distances = dijkstra_multisource(
            &graph,
            ['s'],
            &AttributeWeight::new("weight"),
            &SearchOptions::default().cutoff(1),
            SearchOutputs::none(),
        )
        .unwrap();

        assert_eq!(distances.len(), 3);
        assert!(!distances.contains_key(&'t'));
    }

    #[test]
    fn seeds_start_at_their_distance() {
        let graph = diamond();
        let distances = dijkstra_multisource_seeded(
            &graph,
            [('a', 5), ('b', 0)],
            &AttributeWeight::new("weight"),
            &SearchOptions::default(),
            SearchOutputs::none(),
        )
        .unwrap();

        assert_eq!(distances[&'a'], 5);
        assert_eq!(distances[&'t'], 1);
    }

    #[test]
    fn negative_edge_contradicts_finalized_node() {
        let mut graph = AttributeGraph::new_directed();
        graph.add_weighted_edges_from("weight", [(0, 1, 1), (0, 2, 5), (2, 1, -10)]);

        let result = dijkstra_multisource(
            &graph,
            [0],
            &AttributeWeight::<i32>::new("weight"),
            &SearchOptions::default(),
            SearchOutputs::none(),
        );
        assert_eq!(result, Err(SearchError::ContradictoryPath));
    }

    #[test]
    fn empty_sources_are_rejected() {
        let graph = diamond();
        let result = dijkstra_multisource(
            &graph,
            Vec::<char>::new(),
            &AttributeWeight::<u32>::new("weight"),
            &SearchOptions::default(),
            SearchOutputs::none(),
        );
        assert_eq!(result, Err(SearchError::NoSources));
    }
}
