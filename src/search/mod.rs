use std::marker::PhantomData;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::graphs::GraphView;
use error::SearchResult;
use path::Path;
use weight::{Cost, WeightResolver};

pub mod astar;
pub mod bellman_ford;
pub mod collections;
pub mod dijkstra;
pub mod error;
pub mod path;
pub mod weight;

/// Estimate of the remaining cost from `node` to `target`.
///
/// A* trusts the estimate as is. An estimate that overestimates the true
/// remaining cost may yield a suboptimal path.
pub trait Heuristic<N, W>: Send + Sync {
    fn estimate(&self, node: &N, target: &N) -> W;
}

/// Always estimates zero, which turns A* into uniform-cost search.
pub struct TrivialHeuristic {}

impl<N, W: Cost> Heuristic<N, W> for TrivialHeuristic {
    fn estimate(&self, _node: &N, _target: &N) -> W {
        W::zero()
    }
}

/// Caller supplied heuristic function of `(node, target)`.
pub struct FnHeuristic<F, W> {
    function: F,
    _weight: PhantomData<fn() -> W>,
}

impl<F, W> FnHeuristic<F, W> {
    pub fn new(function: F) -> Self {
        FnHeuristic {
            function,
            _weight: PhantomData,
        }
    }
}

impl<N, W, F> Heuristic<N, W> for FnHeuristic<F, W>
where
    F: Fn(&N, &N) -> W + Send + Sync,
{
    fn estimate(&self, node: &N, target: &N) -> W {
        (self.function)(node, target)
    }
}

/// Pruning options shared by uniform-cost search and Bellman-Ford.
#[derive(Clone, Debug)]
pub struct SearchOptions<N, W> {
    /// Maximum distance to explore.
    pub cutoff: Option<W>,
    /// Stop once this node is settled.
    pub target: Option<N>,
    /// Bellman-Ford only: do not relax a node while one of its recorded
    /// predecessors is still queued. Results are identical either way.
    pub skip_queued_predecessors: bool,
}

impl<N, W> Default for SearchOptions<N, W> {
    fn default() -> Self {
        SearchOptions {
            cutoff: None,
            target: None,
            skip_queued_predecessors: true,
        }
    }
}

impl<N, W> SearchOptions<N, W> {
    pub fn cutoff(mut self, cutoff: W) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    pub fn target(mut self, target: N) -> Self {
        self.target = Some(target);
        self
    }

    pub fn skip_queued_predecessors(mut self, skip: bool) -> Self {
        self.skip_queued_predecessors = skip;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Algorithm {
    Dijkstra,
    #[value(name = "astar")]
    AStar,
    BellmanFord,
}

/// Single-pair shortest path with the chosen algorithm. A* runs with the
/// trivial heuristic.
pub fn shortest_path<G, R, W>(
    algorithm: Algorithm,
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
    match algorithm {
        Algorithm::Dijkstra => dijkstra::dijkstra_path(graph, source, target, weight),
        Algorithm::AStar => {
            let vertices =
                astar::astar_path(graph, source, target, weight, &TrivialHeuristic {})?;
            let distance = path::path_weight(graph, &vertices, weight)?;
            Ok(Path { vertices, distance })
        }
        Algorithm::BellmanFord => bellman_ford::bellman_ford_path(graph, source, target, weight),
    }
}
