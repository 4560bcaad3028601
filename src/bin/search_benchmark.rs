use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use weighted_paths::{
    graphs::{graph_file::read_graph, GraphView},
    search::{shortest_path, weight::AttributeWeight, Algorithm},
    utility::{get_progressbar, init_tracing, random_request},
};

/// Does a single threaded benchmark of random single pair queries.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph file
    #[arg(short, long)]
    graph: PathBuf,
    /// Algorithms to benchmark
    #[arg(short, long, value_enum, num_args = 1.., default_values_t = [Algorithm::Dijkstra, Algorithm::AStar, Algorithm::BellmanFord])]
    algorithms: Vec<Algorithm>,
    /// Number of benchmarks to be run.
    #[arg(short, long)]
    number_of_benchmarks: u32,
    /// Edge attribute holding the weight
    #[arg(short, long, default_value = "weight")]
    weight_key: String,
    /// Seed for query selection
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let graph = read_graph(&args.graph)?;
    let weight = AttributeWeight::<f64>::new(&args.weight_key);
    let nodes: Vec<String> = graph.nodes().cloned().collect();

    for &algorithm in args.algorithms.iter() {
        // every algorithm answers the same queries
        let mut rng = StdRng::seed_from_u64(args.seed);
        let mut durations = Vec::new();
        let mut unreachable = 0;

        let bar = get_progressbar(&format!("{:?}", algorithm), args.number_of_benchmarks as u64);
        for _ in 0..args.number_of_benchmarks {
            let Some(request) = random_request(&nodes, &mut rng) else {
                break;
            };

            let start = Instant::now();
            let result = shortest_path(algorithm, &graph, &request.source, &request.target, &weight);
            durations.push(start.elapsed());

            if result.is_err() {
                unreachable += 1;
            }
            bar.inc(1);
        }
        bar.finish_and_clear();

        if durations.is_empty() {
            println!("{:?}: graph needs at least two nodes", algorithm);
            continue;
        }
        println!(
            "{:?}: average duration {:?} over {} queries ({} without path)",
            algorithm,
            durations.iter().sum::<Duration>() / durations.len() as u32,
            durations.len(),
            unreachable
        );
    }

    Ok(())
}
