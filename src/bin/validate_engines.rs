use std::{fs::File, io::BufWriter, path::PathBuf};

use clap::Parser;
use indicatif::ParallelProgressIterator;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{info, warn};
use weighted_paths::{
    graphs::{
        graph_file::{read_graph, FileGraph},
        GraphView,
    },
    search::{
        bellman_ford::{bellman_ford_predecessor_and_distance, negative_edge_cycle},
        dijkstra::dijkstra_predecessor_and_distance,
        error::SearchError,
        path::path_weight,
        weight::AttributeWeight,
        Algorithm, SearchOptions,
    },
    utility::{generate_random_pair_test_cases, init_tracing, validate_and_time},
};

/// Cross-checks uniform-cost search against Bellman-Ford from random sources
/// and validates every algorithm on random single pair queries.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph file
    #[arg(short, long)]
    graph: PathBuf,
    /// Number of sources to compare full searches from
    #[arg(short, long, default_value_t = 100)]
    number_of_sources: usize,
    /// Number of random single pair queries
    #[arg(short = 'p', long, default_value_t = 1000)]
    number_of_test_cases: u32,
    /// Edge attribute holding the weight
    #[arg(short, long, default_value = "weight")]
    weight_key: String,
    /// Seed for source and query selection
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Path where the generated test cases shall be saved
    #[arg(short, long)]
    test_cases: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let graph = read_graph(&args.graph)?;
    let weight = AttributeWeight::<f64>::new(&args.weight_key);
    let mut rng = StdRng::seed_from_u64(args.seed);

    if negative_edge_cycle(&graph, &weight)? {
        warn!("graph contains a negative cycle, nothing to compare");
        return Ok(());
    }

    let mut sources: Vec<String> = graph.nodes().cloned().collect();
    sources.shuffle(&mut rng);
    sources.truncate(args.number_of_sources);

    info!(sources = sources.len(), "comparing full searches");
    let mismatches: Vec<String> = sources
        .par_iter()
        .progress_count(sources.len() as u64)
        .filter_map(|source| compare_from(&graph, &weight, source).err())
        .collect();
    if let Some(first) = mismatches.first() {
        return Err(format!("{} sources disagree, first: {}", mismatches.len(), first).into());
    }

    info!(test_cases = args.number_of_test_cases, "generating single pair queries");
    let test_cases =
        generate_random_pair_test_cases(&graph, &weight, args.number_of_test_cases, &mut rng);
    if let Some(path) = &args.test_cases {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, &test_cases)?;
    }

    for algorithm in [Algorithm::Dijkstra, Algorithm::AStar, Algorithm::BellmanFord] {
        let results = validate_and_time(algorithm, &graph, &weight, &test_cases)?;
        let average = results
            .iter()
            .map(|result| result.timing_in_seconds)
            .sum::<f64>()
            / results.len().max(1) as f64;
        info!(?algorithm, average_seconds = average, "all correct");
    }

    Ok(())
}

/// Distances of both searches must agree and every predecessor must lie on
/// a shortest path.
fn compare_from(
    graph: &FileGraph,
    weight: &AttributeWeight<f64>,
    source: &String,
) -> Result<(), String> {
    let options = SearchOptions::default();
    let (bf_predecessors, bf_distances) =
        bellman_ford_predecessor_and_distance(graph, source, weight, &options)
            .map_err(|error| format!("bellman-ford from {source:?}: {error}"))?;

    match dijkstra_predecessor_and_distance(graph, source, weight, &options) {
        Ok((_, distances)) => {
            if distances != bf_distances {
                return Err(format!("distances from {source:?} differ"));
            }
        }
        // negative weights can make uniform-cost search bail out
        Err(SearchError::ContradictoryPath) => {}
        Err(error) => return Err(format!("dijkstra from {source:?}: {error}")),
    }

    for (node, predecessors) in bf_predecessors.iter() {
        for predecessor in predecessors {
            let edge = path_weight(graph, &[predecessor.clone(), node.clone()], weight)
                .map_err(|error| error.to_string())?;
            if bf_distances[predecessor] + edge != bf_distances[node] {
                return Err(format!("predecessor {predecessor:?} of {node:?} is not tight"));
            }
        }
    }

    Ok(())
}
