use std::time::Instant;

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator, ProgressStyle};
use rand::Rng;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::{
    graphs::GraphView,
    search::{
        dijkstra::dijkstra_path_length,
        path::{validate_path, Path, ShortestPathRequest, ShortestPathTestCase},
        shortest_path,
        weight::{Cost, WeightResolver},
        Algorithm,
    },
};

pub fn get_progressbar(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    if let Ok(style) =
        ProgressStyle::with_template(" {msg} {wide_bar} estimated remaining: {eta_precise}")
    {
        bar.set_style(style);
    }
    bar
}

pub fn get_progressspinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// Installs a fmt subscriber filtered by `RUST_LOG`, `info` if unset.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // a subscriber installed by a test harness wins
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Random request with `source != target`, `None` if there are fewer than
/// two nodes.
pub fn random_request<N: Clone, R: Rng>(nodes: &[N], rng: &mut R) -> Option<ShortestPathRequest<N>> {
    if nodes.len() <= 1 {
        return None;
    }

    // guarantee that source != target
    let source = rng.gen_range(0..nodes.len());
    let mut target = rng.gen_range(0..nodes.len() - 1);
    if target >= source {
        target += 1;
    }

    Some(ShortestPathRequest {
        source: nodes[source].clone(),
        target: nodes[target].clone(),
    })
}

/// `number_of_test_cases` random requests, each answered by uniform-cost
/// search. Unreachable targets get a `None` distance.
pub fn generate_random_pair_test_cases<G, R, W, Rn>(
    graph: &G,
    weight: &R,
    number_of_test_cases: u32,
    rng: &mut Rn,
) -> Vec<ShortestPathTestCase<G::Node, W>>
where
    G: GraphView,
    R: WeightResolver<G::Node, G::Payload, W> + Sync,
    W: Cost,
    Rn: Rng,
{
    let nodes: Vec<G::Node> = graph.nodes().cloned().collect();

    let requests: Vec<_> = (0..number_of_test_cases)
        .filter_map(|_| random_request(&nodes, rng))
        .collect();

    requests
        .par_iter()
        .progress_count(requests.len() as u64)
        .map(|request| ShortestPathTestCase {
            request: request.clone(),
            distance: dijkstra_path_length(graph, &request.source, &request.target, weight).ok(),
        })
        .collect()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShortestPathTestTimingResult<N, W> {
    pub test_case: ShortestPathTestCase<N, W>,
    pub algorithm: Algorithm,
    pub timing_in_seconds: f64,
}

/// Answers every test case with `algorithm`, timing each query, then checks
/// every answer with [`validate_path`].
///
/// Returns the timings, or the first failed test case with its error.
pub fn validate_and_time<G, R, W>(
    algorithm: Algorithm,
    graph: &G,
    weight: &R,
    test_cases: &[ShortestPathTestCase<G::Node, W>],
) -> Result<Vec<ShortestPathTestTimingResult<G::Node, W>>, String>
where
    G: GraphView,
    R: WeightResolver<G::Node, G::Payload, W>,
    W: Cost,
{
    let mut times = Vec::new();
    let mut paths: Vec<Option<Path<G::Node, W>>> = Vec::new();

    for test_case in test_cases.iter().progress() {
        let request = &test_case.request;
        let start = Instant::now();
        let path = shortest_path(algorithm, graph, &request.source, &request.target, weight).ok();
        let duration = start.elapsed();

        times.push(ShortestPathTestTimingResult {
            test_case: test_case.clone(),
            algorithm,
            timing_in_seconds: duration.as_secs_f64(),
        });
        paths.push(path);
    }

    for (test_case, path) in test_cases.iter().zip(paths.iter()) {
        validate_path(graph, weight, test_case, path).map_err(|error| {
            format!(
                "{:?} wrong for {:?} -> {:?}: {}",
                algorithm, test_case.request.source, test_case.request.target, error
            )
        })?;
    }

    Ok(times)
}
