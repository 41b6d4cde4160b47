//! `graphgen`: write a random undirected graph in the interchange format.
//!
//! ```bash
//! graphgen 8192 8k        # writes graph8k.txt
//! graphgen 4096 --seed 1  # writes graph4096.txt
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{error, info};

use frontier_bfs::format::{graph_file_name, save_instance};
use frontier_bfs::{BfsResult, BuilderConfig, GraphBuilder};

#[derive(Parser, Debug)]
#[command(name = "graphgen", version, about = "Random undirected graph generator")]
struct Args {
    /// Number of nodes (at least the configured minimum, 20 by default).
    num: u64,

    /// Output file name bit: the graph goes to `graph<SUFFIX>.txt`. Defaults to NUM.
    suffix: Option<String>,

    /// Explicit output path, overriding the suffix naming.
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// RNG seed for reproducible graphs. Random when absent.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding degree/weight ranges and the minimum node count.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

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
    let config = match &args.config {
        Some(path) => BuilderConfig::from_json(path)?,
        None => BuilderConfig::default(),
    };
    let builder = GraphBuilder::new(config)?;
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    info!("generating graph with {} nodes", args.num);
    let instance = builder.generate(args.num, &mut rng)?;

    let path = match (&args.out, &args.suffix) {
        (Some(out), _) => out.clone(),
        (None, Some(suffix)) => graph_file_name(suffix),
        (None, None) => graph_file_name(&args.num.to_string()),
    };
    info!("writing to file \"{}\"", path.display());
    save_instance(&path, &instance)?;
    Ok(())
}
