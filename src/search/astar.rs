use std::cmp::Ordering;

use ahash::{HashMap, HashMapExt};
use tracing::debug;

use super::{
    collections::frontier::{Frontier, FrontierEntry},
    error::{SearchError, SearchResult},
    path::path_weight,
    weight::{Cost, WeightResolver},
    Heuristic,
};
use crate::graphs::GraphView;

/// Shortest path from `source` to `target` guided by `heuristic`.
///
/// Returns the node sequence from `source` to `target`. Only one path is
/// returned if several have the same cost. The heuristic is not checked;
/// an estimate above the true remaining cost can lead to a longer path.
pub fn astar_path<G, R, H, W>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    weight: &R,
    heuristic: &H,
) -> SearchResult<Vec<G::Node>>
where
    G: GraphView,
    R: WeightResolver<G::Node, G::Payload, W>,
    H: Heuristic<G::Node, W>,
    W: Cost,
{
    graph.ensure_contains(source)?;
    graph.ensure_contains(target)?;

    debug!(?source, ?target, "starting A* search");

    // payload is (cost from source, parent)
    let mut frontier: Frontier<G::Node, W, (W, Option<G::Node>)> = Frontier::new();
    frontier.push(W::zero(), source.clone(), (W::zero(), None));

    // best enqueued cost and cached heuristic per node
    let mut enqueued: HashMap<G::Node, (W, W)> = HashMap::new();
    // expanded node -> parent, only used for backtracking
    let mut explored: HashMap<G::Node, Option<G::Node>> = HashMap::new();

    while let Some(FrontierEntry {
        node: current,
        payload: (distance, parent),
        ..
    }) = frontier.pop()
    {
        if &current == target {
            let mut vertices = vec![current];
            let mut node = parent;
            while let Some(vertex) = node {
                node = explored.get(&vertex).cloned().flatten();
                vertices.push(vertex);
            }
            vertices.reverse();

            debug!(explored = explored.len(), "A* search reached target");
            return Ok(vertices);
        }

        if explored.contains_key(&current) {
            continue;
        }
        explored.insert(current.clone(), parent);

        for (neighbor, payload) in graph.neighbors(&current)? {
            if explored.contains_key(neighbor) {
                continue;
            }
            let Some(cost) = weight.weight(&current, neighbor, payload) else {
                continue;
            };
            let neighbor_cost = distance + cost;

            let estimate = match enqueued.get(neighbor) {
                Some(&(queued_cost, estimate)) => {
                    // a path at least as cheap is already queued
                    if queued_cost.total_cmp(&neighbor_cost) != Ordering::Greater {
                        continue;
                    }
                    estimate
                }
                None => heuristic.estimate(neighbor, target),
            };

            enqueued.insert(neighbor.clone(), (neighbor_cost, estimate));
            frontier.push(
                neighbor_cost + estimate,
                neighbor.clone(),
                (neighbor_cost, Some(current.clone())),
            );
        }
    }

    Err(SearchError::no_path_found(source, target))
}

/// Cost of the path returned by [`astar_path`].
pub fn astar_path_length<G, R, H, W>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    weight: &R,
    heuristic: &H,
) -> SearchResult<W>
where
    G: GraphView,
    R: WeightResolver<G::Node, G::Payload, W>,
    H: Heuristic<G::Node, W>,
    W: Cost,
{
    let vertices = astar_path(graph, source, target, weight, heuristic)?;
    path_weight(graph, &vertices, weight)
}
