use std::{fmt::Debug, hash::Hash};

use ahash::HashMap;

use crate::search::error::{SearchError, SearchResult};

pub mod attribute_graph;
pub mod graph_file;

/// Attribute bag attached to an edge of an [`attribute_graph::AttributeGraph`].
pub type Attributes<W> = HashMap<String, W>;

/// Boxed iterator over the outgoing edges of a node.
pub type Neighbors<'a, N, P> = Box<dyn Iterator<Item = (&'a N, &'a P)> + Send + 'a>;

/// Read-only view of a graph as needed by the search algorithms.
///
/// Directed graphs expose their successors, undirected graphs expose every
/// incident edge from both endpoints.
pub trait GraphView: Send + Sync {
    type Node: Clone + Eq + Hash + Debug + Send + Sync;
    type Payload: Sync;

    fn is_directed(&self) -> bool;

    fn number_of_nodes(&self) -> usize;

    fn contains(&self, node: &Self::Node) -> bool;

    fn nodes(&self) -> Box<dyn Iterator<Item = &Self::Node> + Send + '_>;

    /// Outgoing edges of `node` as `(neighbor, payload)` pairs.
    ///
    /// Fails with [`SearchError::NodeNotFound`] if `node` is not part of the
    /// graph.
    fn neighbors(&self, node: &Self::Node) -> SearchResult<Neighbors<'_, Self::Node, Self::Payload>>;

    fn ensure_contains(&self, node: &Self::Node) -> SearchResult<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(SearchError::node_not_found(node))
        }
    }
}

/// Keyed access to an edge's attributes.
pub trait AttributeBag<W> {
    fn attribute(&self, key: &str) -> Option<W>;
}

impl<W: Copy> AttributeBag<W> for Attributes<W> {
    fn attribute(&self, key: &str) -> Option<W> {
        self.get(key).copied()
    }
}
