use std::{cmp::Ordering, collections::VecDeque};

use ahash::{HashMap, HashMapExt, HashSet};
use itertools::Itertools;
use tracing::{debug, warn};

use super::{
    collections::search_data::{
        reconstruct_path, DistanceMap, PathMap, PredecessorMap, SearchOutputs,
    },
    error::{SearchError, SearchResult},
    path::Path,
    weight::{Cost, WeightResolver},
    SearchOptions,
};
use crate::graphs::GraphView;

/// Label-correcting relaxation from every node in `sources`.
///
/// Weights may be negative. Nodes are relaxed in FIFO order; a node that is
/// re-queued as often as the graph has nodes proves an improving cycle and
/// the search fails with [`SearchError::NegativeCycleDetected`]. Negative
/// self-loops are rejected before any relaxation.
///
/// Cutoff and target pruning compare candidate distances, not settled ones.
/// Tied distances append the relaxing node to the predecessor list.
pub fn bellman_ford_multisource<G, R, W, I>(
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
    let sources = sources.into_iter().unique().collect_vec();
    relax(
        graph,
        sources,
        weight,
        options,
        outputs,
        graph.number_of_nodes(),
    )
}

fn relax<G, R, W>(
    graph: &G,
    sources: Vec<G::Node>,
    weight: &R,
    options: &SearchOptions<G::Node, W>,
    outputs: SearchOutputs<'_, G::Node>,
    relabel_limit: usize,
) -> SearchResult<DistanceMap<G::Node, W>>
where
    G: GraphView,
    R: WeightResolver<G::Node, G::Payload, W>,
    W: Cost,
{
    if sources.is_empty() {
        return Err(SearchError::NoSources);
    }
    for source in sources.iter() {
        graph.ensure_contains(source)?;
    }
    if let Some(target) = &options.target {
        graph.ensure_contains(target)?;
    }

    reject_negative_self_loops(graph, weight)?;

    debug!(
        sources = sources.len(),
        cutoff = ?options.cutoff,
        target = ?options.target,
        "starting label-correcting search"
    );

    let mut distances: DistanceMap<G::Node, W> = sources
        .iter()
        .map(|source| (source.clone(), W::zero()))
        .collect();
    let mut predecessors: PredecessorMap<G::Node> = sources
        .iter()
        .map(|source| (source.clone(), Vec::new()))
        .collect();
    let mut relabels: HashMap<G::Node, usize> = HashMap::new();

    let seeds: HashSet<G::Node> = sources.iter().cloned().collect();
    let mut in_queue = seeds.clone();
    let mut queue: VecDeque<G::Node> = sources.into();

    while let Some(tail) = queue.pop_front() {
        in_queue.remove(&tail);

        // a queued predecessor will relax this node's successors again
        if options.skip_queued_predecessors
            && predecessors
                .get(&tail)
                .is_some_and(|list| list.iter().any(|node| in_queue.contains(node)))
        {
            continue;
        }

        let Some(&distance_tail) = distances.get(&tail) else {
            continue;
        };

        for (head, payload) in graph.neighbors(&tail)? {
            let Some(cost) = weight.weight(&tail, head, payload) else {
                continue;
            };
            let distance_head = distance_tail + cost;

            if let Some(cutoff) = options.cutoff {
                if distance_head.total_cmp(&cutoff) == Ordering::Greater {
                    continue;
                }
            }

            if let Some(target_distance) = options
                .target
                .as_ref()
                .and_then(|target| distances.get(target))
            {
                if distance_head.total_cmp(target_distance) == Ordering::Greater {
                    continue;
                }
            }

            match distances.get(head).map(|best| distance_head.total_cmp(best)) {
                None | Some(Ordering::Less) => {
                    if !in_queue.contains(head) {
                        let count = relabels.entry(head.clone()).or_insert(0);
                        *count += 1;
                        if *count == relabel_limit {
                            warn!(node = ?head, "negative cost cycle detected");
                            return Err(SearchError::NegativeCycleDetected);
                        }
                        queue.push_back(head.clone());
                        in_queue.insert(head.clone());
                    }
                    distances.insert(head.clone(), distance_head);
                    predecessors.insert(head.clone(), vec![tail.clone()]);
                }
                // a source keeps its empty list, so paths start there
                Some(Ordering::Equal) if !seeds.contains(head) => {
                    predecessors
                        .entry(head.clone())
                        .or_default()
                        .push(tail.clone());
                }
                Some(Ordering::Equal) | Some(Ordering::Greater) => {}
            }
        }
    }

    let SearchOutputs {
        predecessors: predecessor_output,
        paths: path_output,
    } = outputs;

    if let Some(paths) = path_output {
        match &options.target {
            Some(target) => {
                if let Some(path) = reconstruct_path(&predecessors, target) {
                    paths.insert(target.clone(), path);
                }
            }
            None => {
                for node in predecessors.keys() {
                    if let Some(path) = reconstruct_path(&predecessors, node) {
                        paths.insert(node.clone(), path);
                    }
                }
            }
        }
    }
    if let Some(predecessor_output) = predecessor_output {
        predecessor_output.extend(predecessors);
    }

    debug!(reached = distances.len(), "label-correcting search finished");
    Ok(distances)
}

/// Fails if any node has a self-loop with negative weight. Such a loop is a
/// one-node negative cycle that the relabel counter would never see.
fn reject_negative_self_loops<G, R, W>(graph: &G, weight: &R) -> SearchResult<()>
where
    G: GraphView,
    R: WeightResolver<G::Node, G::Payload, W>,
    W: Cost,
{
    for node in graph.nodes() {
        for (head, payload) in graph.neighbors(node)? {
            if head != node {
                continue;
            }
            if weight
                .weight(node, head, payload)
                .is_some_and(|cost| cost.is_negative())
            {
                warn!(?node, "negative self-loop");
                return Err(SearchError::NegativeCycleDetected);
            }
        }
    }
    Ok(())
}

/// Predecessor lists and distances from `source`.
pub fn bellman_ford_predecessor_and_distance<G, R, W>(
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
    let distances = bellman_ford_multisource(
        graph,
        [source.clone()],
        weight,
        options,
        SearchOutputs::none().predecessors(&mut predecessors),
    )?;
    Ok((predecessors, distances))
}

/// Distances and paths from `source` to every reachable node.
pub fn single_source_bellman_ford<G, R, W>(
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
    let distances = bellman_ford_multisource(
        graph,
        [source.clone()],
        weight,
        options,
        SearchOutputs::none().paths(&mut paths),
    )?;
    Ok((distances, paths))
}

/// Shortest path from `source` to `target`, negative weights allowed.
pub fn bellman_ford_path<G, R, W>(
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
    let distances = bellman_ford_multisource(
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
pub fn bellman_ford_path_length<G, R, W>(
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
    bellman_ford_path(graph, source, target, weight).map(|path| path.distance)
}

/// Whether the graph contains a negative cycle anywhere.
///
/// Relaxes from every node at once, as if a virtual source were connected to
/// all nodes by zero-cost edges.
pub fn negative_edge_cycle<G, R, W>(graph: &G, weight: &R) -> SearchResult<bool>
where
    G: GraphView,
    R: WeightResolver<G::Node, G::Payload, W>,
    W: Cost,
{
    let sources = graph.nodes().cloned().collect_vec();
    if sources.is_empty() {
        return Ok(false);
    }

    let result = relax(
        graph,
        sources,
        weight,
        &SearchOptions::default(),
        SearchOutputs::none(),
        // the virtual source counts as a node
        graph.number_of_nodes() + 1,
    );

    match result {
        Ok(_) => Ok(false),
        Err(SearchError::NegativeCycleDetected) => Ok(true),
        Err(error) => Err(error),
    }
}
