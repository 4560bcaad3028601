use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{
    error::{SearchError, SearchResult},
    weight::{Cost, WeightResolver},
};
use crate::graphs::GraphView;

/// Represents a path in a graph.
///
/// This struct encapsulates the vertices that form a path in the graph and the
/// total distance associated with traversing this path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path<N, W> {
    pub vertices: Vec<N>,
    pub distance: W,
}

/// Represents a request for finding a shortest path in a graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPathRequest<N> {
    pub source: N,
    pub target: N,
}

/// A shortest path request along with the distance of a shortest path, if
/// there exists one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShortestPathTestCase<N, W> {
    pub request: ShortestPathRequest<N>,
    pub distance: Option<W>,
}

/// Sums the edge weights along `vertices`.
///
/// Between two consecutive nodes the cheapest participating edge is used.
/// A single node has length zero.
pub fn path_weight<G, R, W>(graph: &G, vertices: &[G::Node], weight: &R) -> SearchResult<W>
where
    G: GraphView,
    R: WeightResolver<G::Node, G::Payload, W>,
    W: Cost,
{
    if let Some(first) = vertices.first() {
        graph.ensure_contains(first)?;
    }

    let mut total = W::zero();
    for pair in vertices.windows(2) {
        let (tail, head) = (&pair[0], &pair[1]);
        let cheapest = graph
            .neighbors(tail)?
            .filter(|(other, _)| *other == head)
            .filter_map(|(other, payload)| weight.weight(tail, other, payload))
            .min_by(|a, b| a.total_cmp(b))
            .ok_or_else(|| SearchError::missing_edge(tail, head))?;
        total = total + cheapest;
    }

    Ok(total)
}

/// Check if a path is correct for a given test case.
pub fn validate_path<G, R, W>(
    graph: &G,
    weight: &R,
    test_case: &ShortestPathTestCase<G::Node, W>,
    path: &Option<Path<G::Node, W>>,
) -> Result<(), String>
where
    G: GraphView,
    R: WeightResolver<G::Node, G::Payload, W>,
    W: Cost,
{
    let Some(path) = path else {
        if test_case.distance.is_some() {
            return Err("no path is found but there should be one".to_string());
        }
        return Ok(());
    };
    let Some(distance) = test_case.distance else {
        return Err("a path was found where there should be none".to_string());
    };

    if path.distance.total_cmp(&distance) != Ordering::Equal {
        return Err(format!(
            "wrong path distance {:?}, expected {:?}",
            path.distance, distance
        ));
    }

    // Ensure fist and last vertex of path are source and target of request.
    if path.vertices.first() != Some(&test_case.request.source) {
        return Err("first vertex of path is not source of request".to_string());
    }
    if path.vertices.last() != Some(&test_case.request.target) {
        return Err("last vertex of path is not target of request".to_string());
    }

    // check if total weight of path is correct.
    let true_cost = path_weight(graph, &path.vertices, weight).map_err(|error| error.to_string())?;
    if true_cost.total_cmp(&distance) != Ordering::Equal {
        return Err(format!(
            "path edges sum to {:?}, expected {:?}",
            true_cost, distance
        ));
    }

    Ok(())
}
