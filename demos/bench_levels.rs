use std::fs::File;
use std::io::Write;
use std::time::Instant;

use frontier_bfs::reference::sequential_bfs;
use frontier_bfs::{EngineConfig, GraphBuilder, ParallelBfs};
use rand::{rngs::SmallRng, SeedableRng};

fn run_one(n: u64, threads: &[usize], seed: u64) -> serde_json::Value {
    let inst = GraphBuilder::default().generate(n, &mut SmallRng::seed_from_u64(seed)).expect("generate");
    let t0 = Instant::now();
    let baseline = sequential_bfs(&inst.graph, inst.source);
    let baseline_ms = t0.elapsed().as_secs_f64() * 1000.0;
    let mut runs = Vec::new();
    for &t in threads {
        let engine = ParallelBfs::with_threads(t).expect("threads");
        let out = engine.run_instance(&inst).expect("run");
        assert_eq!(out.costs, baseline, "parity fail n={} threads={}", n, t);
        runs.push(serde_json::json!({
            "threads": out.stats.threads,
            "elapsed_ms": out.stats.elapsed_ms,
            "speedup_vs_sequential": baseline_ms / out.stats.elapsed_ms.max(1e-9),
            "stats": out.stats,
        }));
    }
    serde_json::json!({
        "n": n, "m": inst.graph.edge_count(), "source": inst.source,
        "sequential_ms": baseline_ms,
        "runs": runs
    })
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help") {
        eprintln!("Usage: bench_levels --sizes 10000,100000 --threads 1,2,4,8 --seed 42 --out benchmarks/levels.json");
        eprintln!("Without --threads, FRONTIER_BFS_THREADS (or all cores) is used.");
        return;
    }
    let arg = |name: &str| args.iter().position(|a| a == name).and_then(|i| args.get(i + 1)).cloned();
    let sizes: Vec<u64> = arg("--sizes").unwrap_or("10000,100000".into()).split(',').filter_map(|s| s.parse().ok()).collect();
    let threads: Vec<usize> = match arg("--threads") {
        Some(t) => t.split(',').filter_map(|s| s.parse().ok()).collect(),
        None => vec![EngineConfig::from_env().threads],
    };
    let seed: u64 = arg("--seed").and_then(|v| v.parse().ok()).unwrap_or(42);
    let out_path = arg("--out").unwrap_or("benchmarks/levels.json".into());

    let results: Vec<_> = sizes.iter().map(|&n| run_one(n, &threads, seed)).collect();
    let json = serde_json::Value::Array(results);
    if let Some(dir) = std::path::Path::new(&out_path).parent() {
        std::fs::create_dir_all(dir).ok();
    }
    let mut f = File::create(&out_path).expect("create out");
    f.write_all(serde_json::to_string_pretty(&json).unwrap().as_bytes()).unwrap();
    eprintln!("wrote {}", out_path);
}
