use std::{collections::BTreeMap, fs::File, io::BufWriter, path::PathBuf};

use clap::Parser;
use serde::Serialize;
use tracing::info;
use weighted_paths::{
    graphs::graph_file::read_graph,
    search::{
        bellman_ford::single_source_bellman_ford, dijkstra::single_source_dijkstra,
        shortest_path, weight::AttributeWeight, Algorithm, SearchOptions,
    },
    utility::{get_progressspinner, init_tracing},
};

/// Computes shortest paths on a graph file (`.json`, `.bincode` or `.gr`).
///
/// With a target a single path is printed, otherwise distances and paths to
/// every reachable node.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph file
    #[arg(short, long)]
    graph: PathBuf,
    /// Search algorithm
    #[arg(short, long, value_enum, default_value_t = Algorithm::Dijkstra)]
    algorithm: Algorithm,
    /// Source node
    #[arg(short, long)]
    source: String,
    /// Target node, required for astar
    #[arg(short, long)]
    target: Option<String>,
    /// Maximum distance to explore, ignored for single pair queries
    #[arg(short, long)]
    cutoff: Option<f64>,
    /// Edge attribute holding the weight
    #[arg(short, long, default_value = "weight")]
    weight_key: String,
    /// Weight of edges without the attribute
    #[arg(long, default_value_t = 1.0)]
    default_weight: f64,
    /// Write the result here instead of stdout
    #[arg(short, long)]
    out_file: Option<PathBuf>,
}

#[derive(Serialize)]
struct SingleSourceResult {
    source: String,
    distances: BTreeMap<String, f64>,
    paths: BTreeMap<String, Vec<String>>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let spinner = get_progressspinner("Reading graph");
    let graph = read_graph(&args.graph)?;
    spinner.finish_and_clear();

    let weight = AttributeWeight::with_default(&args.weight_key, args.default_weight);

    let json = match &args.target {
        Some(target) => {
            let path = shortest_path(args.algorithm, &graph, &args.source, target, &weight)?;
            info!(distance = path.distance, hops = path.vertices.len(), "path found");
            serde_json::to_value(&path)?
        }
        None => {
            let mut options = SearchOptions::default();
            if let Some(cutoff) = args.cutoff {
                options = options.cutoff(cutoff);
            }

            let (distances, paths) = match args.algorithm {
                Algorithm::Dijkstra => {
                    single_source_dijkstra(&graph, &args.source, &weight, &options)?
                }
                Algorithm::BellmanFord => {
                    single_source_bellman_ford(&graph, &args.source, &weight, &options)?
                }
                Algorithm::AStar => return Err("astar needs a --target".into()),
            };
            info!(reached = distances.len(), "search finished");

            serde_json::to_value(SingleSourceResult {
                source: args.source.clone(),
                distances: distances.into_iter().collect(),
                paths: paths.into_iter().collect(),
            })?
        }
    };

    match args.out_file {
        Some(out_file) => {
            let writer = BufWriter::new(File::create(out_file)?);
            serde_json::to_writer_pretty(writer, &json)?;
        }
        None => println!("{}", serde_json::to_string_pretty(&json)?),
    }

    Ok(())
}
