use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::{attribute_graph::AttributeGraph, Attributes, GraphView};

/// Graph loaded from a file. Node identifiers are strings, attribute values
/// are `f64`.
pub type FileGraph = AttributeGraph<String, f64>;

#[derive(Debug, Error)]
pub enum GraphFileError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json graph: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid bincode graph: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("unsupported graph file format {0:?}, expected .json, .bincode or .gr")]
    UnsupportedFormat(String),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Serialized form of an attribute graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphFile {
    pub directed: bool,
    #[serde(default)]
    pub nodes: Vec<String>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub tail: String,
    pub head: String,
    #[serde(default)]
    pub attributes: Attributes<f64>,
}

impl GraphFile {
    pub fn from_graph(graph: &FileGraph) -> Self {
        GraphFile {
            directed: graph.is_directed(),
            nodes: graph.nodes().cloned().collect(),
            edges: graph
                .edges()
                .map(|(tail, head, attributes)| EdgeRecord {
                    tail: tail.clone(),
                    head: head.clone(),
                    attributes: attributes.clone(),
                })
                .collect(),
        }
    }

    pub fn into_graph(self) -> FileGraph {
        let mut graph = if self.directed {
            AttributeGraph::new_directed()
        } else {
            AttributeGraph::new_undirected()
        };

        for node in self.nodes {
            graph.add_node(node);
        }
        for EdgeRecord {
            tail,
            head,
            attributes,
        } in self.edges
        {
            graph.add_edge(tail, head, attributes);
        }

        graph
    }
}

/// Reads a graph, choosing the format by file extension.
pub fn read_graph(path: &Path) -> Result<FileGraph, GraphFileError> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or_default();

    let graph = match extension {
        "json" => {
            let reader = BufReader::new(File::open(path)?);
            let file: GraphFile = serde_json::from_reader(reader)?;
            file.into_graph()
        }
        "bincode" => {
            let reader = BufReader::new(File::open(path)?);
            let file: GraphFile = bincode::deserialize_from(reader)?;
            file.into_graph()
        }
        "gr" => read_gr(BufReader::new(File::open(path)?))?,
        other => return Err(GraphFileError::UnsupportedFormat(other.to_string())),
    };

    info!(
        path = %path.display(),
        nodes = graph.number_of_nodes(),
        edges = graph.number_of_edges(),
        "graph loaded"
    );
    Ok(graph)
}

/// Writes `file` as json or bincode, choosing the format by file extension.
pub fn write_graph(path: &Path, file: &GraphFile) -> Result<(), GraphFileError> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or_default();

    match extension {
        "json" => serde_json::to_writer(BufWriter::new(File::create(path)?), file)?,
        "bincode" => bincode::serialize_into(BufWriter::new(File::create(path)?), file)?,
        other => return Err(GraphFileError::UnsupportedFormat(other.to_string())),
    }
    Ok(())
}

/// Reads a directed graph in DIMACS shortest path format.
///
/// `c` lines are comments, the `p sp <nodes> <arcs>` line declares nodes
/// `1..=nodes` and every `a <tail> <head> <cost>` line adds an arc whose cost
/// is stored under the `weight` key.
pub fn read_gr<B: BufRead>(reader: B) -> Result<FileGraph, GraphFileError> {
    let mut graph = AttributeGraph::new_directed();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let mut values = line.split_whitespace();

        match values.next() {
            None | Some("c") => {}
            Some("p") => {
                let number_of_nodes: usize = values
                    .nth(1)
                    .ok_or_else(|| parse_error(number, "no node count in problem line"))?
                    .parse()
                    .map_err(|_| parse_error(number, "unable to parse node count"))?;
                for node in 1..=number_of_nodes {
                    graph.add_node(node.to_string());
                }
            }
            Some("a") => {
                let tail = values
                    .next()
                    .ok_or_else(|| parse_error(number, "no tail found"))?;
                let head = values
                    .next()
                    .ok_or_else(|| parse_error(number, "no head found"))?;
                let cost: f64 = values
                    .next()
                    .ok_or_else(|| parse_error(number, "no cost found"))?
                    .parse()
                    .map_err(|_| parse_error(number, "unable to parse cost"))?;
                graph.add_weighted_edge(tail.to_string(), head.to_string(), "weight", cost);
            }
            Some(other) => {
                return Err(parse_error(number, &format!("unknown line type {other:?}")));
            }
        }
    }

    Ok(graph)
}

fn parse_error(line: usize, message: &str) -> GraphFileError {
    GraphFileError::Parse {
        line,
        message: message.to_string(),
    }
}
