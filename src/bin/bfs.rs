//! `bfs`: run the parallel traversal on a graph file and write `result_<N>.txt`.
//!
//! ```bash
//! bfs 4 graph4096.txt
//! bfs 8 --generate 100000 --seed 7 --verify --report run.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{error, info};

use frontier_bfs::format::{read_instance, result_file_name, save_costs};
use frontier_bfs::reference::sequential_bfs;
use frontier_bfs::{BfsError, BfsInstance, BfsResult, ConfigError, GraphBuilder, ParallelBfs};

#[derive(Parser, Debug)]
#[command(name = "bfs", version, about = "Level-synchronous parallel BFS")]
struct Args {
    /// Number of worker threads.
    threads: usize,

    /// Graph file in the interchange format.
    #[arg(value_name = "INPUT_FILE", required_unless_present = "generate", conflicts_with = "generate")]
    input: Option<PathBuf>,

    /// Generate a random graph with this many nodes in memory instead of reading a file.
    #[arg(long, value_name = "NODES")]
    generate: Option<u64>,

    /// Seed for `--generate`. Random when absent.
    #[arg(long, requires = "generate")]
    seed: Option<u64>,

    /// Result file. Defaults to `result_<N>.txt`.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write run statistics as JSON.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Check the costs against a sequential BFS.
    #[arg(long, default_value_t = false)]
    verify: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::from(1) } else { ExitCode::SUCCESS };
        }
    };
    frontier_bfs::logging::init(&args.log_level);
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> BfsResult<()> {
    let engine = ParallelBfs::with_threads(args.threads)?;
    let instance = load(args)?;
    let traversal = engine.run_instance(&instance)?;
    let stats = &traversal.stats;
    info!(
        "node count={}, edge count={}, memory footprint={} k bytes",
        stats.nodes,
        stats.edges,
        stats.memory_bytes / 1024
    );
    info!("compute time: {:.6} seconds over {} levels with {} threads", stats.elapsed_ms / 1000.0, stats.levels, stats.threads);

    if args.verify {
        let expected = sequential_bfs(&instance.graph, instance.source);
        if let Some((node, (&e, &a))) = expected.iter().zip(&traversal.costs).enumerate().find(|(_, (e, a))| e != a) {
            return Err(BfsError::VerificationFailed { node, expected: e, actual: a });
        }
        info!("costs match sequential BFS");
    }

    let output = args.output.clone().unwrap_or_else(|| result_file_name(stats.nodes));
    save_costs(&output, &traversal.costs)?;
    info!("result stored in {}", output.display());

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(stats)?;
        std::fs::write(path, json).map_err(|source| BfsError::Write { path: path.clone(), source })?;
        info!("report stored in {}", path.display());
    }
    Ok(())
}

fn load(args: &Args) -> BfsResult<BfsInstance> {
    match (args.generate, &args.input) {
        (Some(nodes), _) => {
            let mut rng = match args.seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_entropy(),
            };
            Ok(GraphBuilder::default().generate(nodes, &mut rng)?)
        }
        (None, Some(path)) => Ok(read_instance(path)?),
        (None, None) => Err(ConfigError::invalid_value("input", "either INPUT_FILE or --generate is required").into()),
    }
}
