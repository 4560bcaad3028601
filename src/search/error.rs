use std::fmt::Debug;

use thiserror::Error;

/// Errors reported by the search entry points.
///
/// Node identities are rendered with their `Debug` representation so the
/// error type stays independent of the graph's node type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A source, target or queried node is not part of the graph.
    #[error("node {0} not found in graph")]
    NodeNotFound(String),

    /// The frontier was exhausted without reaching the target.
    #[error("node {to} not reachable from {from}")]
    NoPathFound { from: String, to: String },

    /// A cycle of negative total weight is reachable from the sources.
    #[error("negative cost cycle detected")]
    NegativeCycleDetected,

    /// Uniform-cost search improved an already finalized node.
    #[error("contradictory paths found: negative weights?")]
    ContradictoryPath,

    /// A multi-source search was started without sources.
    #[error("sources must not be empty")]
    NoSources,

    /// Two consecutive path nodes are not joined by a participating edge.
    #[error("no edge between {tail} and {head}")]
    MissingEdge { tail: String, head: String },
}

impl SearchError {
    pub fn node_not_found<N: Debug>(node: &N) -> Self {
        SearchError::NodeNotFound(format!("{:?}", node))
    }

    pub fn no_path_found<N: Debug>(source: &N, target: &N) -> Self {
        SearchError::NoPathFound {
            from: format!("{:?}", source),
            to: format!("{:?}", target),
        }
    }

    pub fn missing_edge<N: Debug>(tail: &N, head: &N) -> Self {
        SearchError::MissingEdge {
            tail: format!("{:?}", tail),
            head: format!("{:?}", head),
        }
    }
}

pub type SearchResult<T> = Result<T, SearchError>;
