use std::{fmt::Debug, hash::Hash};

use ahash::{HashMap, HashMapExt};

use super::{Attributes, GraphView, Neighbors};
use crate::search::error::{SearchError, SearchResult};

/// In-memory graph whose edges carry attribute bags.
///
/// Nodes and adjacency lists keep insertion order, so two graphs built by
/// the same sequence of calls are traversed identically.
#[derive(Clone, Debug)]
pub struct AttributeGraph<N, W> {
    directed: bool,
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    adjacency: Vec<Vec<(usize, Attributes<W>)>>,
}

impl<N, W> AttributeGraph<N, W>
where
    N: Clone + Eq + Hash,
    W: Clone,
{
    pub fn new_directed() -> Self {
        Self::with_direction(true)
    }

    pub fn new_undirected() -> Self {
        Self::with_direction(false)
    }

    fn with_direction(directed: bool) -> Self {
        AttributeGraph {
            directed,
            nodes: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
        }
    }

    /// Adds `node` if it is not present yet and returns its internal index.
    pub fn add_node(&mut self, node: N) -> usize {
        if let Some(&index) = self.index.get(&node) {
            return index;
        }

        let index = self.nodes.len();
        self.index.insert(node.clone(), index);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        index
    }

    /// Adds the edge `tail -> head`, creating missing endpoints. Re-adding an
    /// existing edge replaces its attributes. Undirected graphs store the
    /// edge in both adjacency lists.
    pub fn add_edge(&mut self, tail: N, head: N, attributes: Attributes<W>) {
        let tail = self.add_node(tail);
        let head = self.add_node(head);

        if !self.directed && tail != head {
            self.set_adjacent(head, tail, attributes.clone());
        }
        self.set_adjacent(tail, head, attributes);
    }

    /// Adds an edge with a single attribute `key = value`.
    pub fn add_weighted_edge(&mut self, tail: N, head: N, key: &str, value: W) {
        let mut attributes = Attributes::new();
        attributes.insert(key.to_string(), value);
        self.add_edge(tail, head, attributes);
    }

    /// Adds all edges in `edges` with their value stored under `key`.
    pub fn add_weighted_edges_from<I>(&mut self, key: &str, edges: I)
    where
        I: IntoIterator<Item = (N, N, W)>,
    {
        edges
            .into_iter()
            .for_each(|(tail, head, value)| self.add_weighted_edge(tail, head, key, value));
    }

    /// Attributes of the edge `tail -> head`, if present.
    pub fn edge_attributes(&self, tail: &N, head: &N) -> Option<&Attributes<W>> {
        let tail = *self.index.get(tail)?;
        let head = *self.index.get(head)?;
        self.adjacency[tail]
            .iter()
            .find(|(other, _)| *other == head)
            .map(|(_, attributes)| attributes)
    }

    /// Every edge once as `(tail, head, attributes)`. Undirected edges are
    /// reported from the endpoint that was added first.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, &Attributes<W>)> + '_ {
        let directed = self.directed;
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(move |(tail, edges)| {
                edges
                    .iter()
                    .filter(move |(head, _)| directed || tail <= *head)
                    .map(move |(head, attributes)| (tail, *head, attributes))
            })
            .map(move |(tail, head, attributes)| (&self.nodes[tail], &self.nodes[head], attributes))
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges().count()
    }

    fn set_adjacent(&mut self, tail: usize, head: usize, attributes: Attributes<W>) {
        let edges = &mut self.adjacency[tail];
        match edges.iter_mut().find(|(other, _)| *other == head) {
            Some((_, current)) => *current = attributes,
            None => edges.push((head, attributes)),
        }
    }
}

impl<N, W> GraphView for AttributeGraph<N, W>
where
    N: Clone + Eq + Hash + Debug + Send + Sync,
    W: Send + Sync,
{
    type Node = N;
    type Payload = Attributes<W>;

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = &N> + Send + '_> {
        Box::new(self.nodes.iter())
    }

    fn neighbors(&self, node: &N) -> SearchResult<Neighbors<'_, N, Attributes<W>>> {
        let &tail = self
            .index
            .get(node)
            .ok_or_else(|| SearchError::node_not_found(node))?;

        let nodes = &self.nodes;
        Ok(Box::new(
            self.adjacency[tail]
                .iter()
                .map(move |(head, attributes)| (&nodes[*head], attributes)),
        ))
    }
}
