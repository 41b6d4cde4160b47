//! Level-synchronous parallel BFS.
//!
//! A fixed pool of workers each owns a contiguous slice of the node index
//! space. Every level is two passes over all nodes separated by full barriers:
//!
//!  * expand: each frontier node clears its frontier bit and, for every
//!    neighbor not yet visited, writes `cost[node] + 1` into the neighbor's
//!    cost and sets its next-frontier bit.
//!  * commit: each next-frontier node moves into the frontier and becomes
//!    visited. The number of committed nodes is the level-progress signal.
//!
//! Several workers may write the same neighbor in one expand pass. All of them
//! belong to the same frontier, so they hold the same distance and write the
//! same cost and the same flag value. That only holds while no worker can
//! start level `k + 1` before every commit of level `k` is done, which is what
//! the barriers enforce. Cells are plain atomics with `Relaxed` ordering; the
//! barrier is the only release/acquire edge the protocol needs.

use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering::Relaxed};
use std::sync::{Barrier, Condvar, Mutex, PoisonError};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::{BfsError, BfsResult, ConfigError};
use crate::format::BfsInstance;
use crate::graph::CsrGraph;

/// Cost of a node that is not reachable from the source.
pub const UNREACHED: i32 = -1;

/// Per-run counters, serialisable for reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraversalStats {
    pub nodes: usize,
    pub edges: usize,
    pub source: u32,
    /// Workers actually used (the requested count capped at `nodes`).
    pub threads: usize,
    /// Level steps executed, including the last one that committed nothing.
    pub levels: usize,
    pub reached: usize,
    pub max_cost: i32,
    /// `frontier_sizes[k]` is the number of nodes at distance `k`.
    pub frontier_sizes: Vec<usize>,
    pub elapsed_ms: f64,
    /// Graph plus traversal state.
    pub memory_bytes: usize,
}

#[derive(Clone, Debug)]
pub struct Traversal {
    pub costs: Vec<i32>,
    pub stats: TraversalStats,
}

#[derive(Clone, Debug)]
pub struct ParallelBfs {
    config: EngineConfig,
}

impl ParallelBfs {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_threads(threads: usize) -> Result<Self, ConfigError> {
        Self::new(EngineConfig::with_threads(threads))
    }

    pub fn run_instance(&self, instance: &BfsInstance) -> BfsResult<Traversal> {
        self.run(&instance.graph, instance.source)
    }

    /// Computes edge-count distances from `source` to every node.
    ///
    /// The result does not depend on the thread count or on scheduling.
    pub fn run(&self, graph: &CsrGraph, source: u32) -> BfsResult<Traversal> {
        let n = graph.node_count();
        if n == 0 {
            return Err(ConfigError::EmptyGraph.into());
        }
        if source as usize >= n {
            return Err(ConfigError::SourceOutOfRange { node: source as u64, nodes: n as u64 }.into());
        }
        let ranges = partition(n, self.config.threads);
        let threads = ranges.len();
        info!(nodes = n, edges = graph.edge_count(), source, threads, "starting traversal");

        let start = Instant::now();
        let state = LevelState::new(n, source);
        let barrier = Barrier::new(threads);
        let gate = StartGate::default();
        let frontier_sizes = {
            let (state, barrier, gate) = (&state, &barrier, &gate);
            std::thread::scope(|scope| {
                let mut handles = Vec::with_capacity(threads - 1);
                for (i, range) in ranges[1..].iter().cloned().enumerate() {
                    let id = i + 1;
                    let spawned = std::thread::Builder::new()
                        .name(format!("bfs-worker-{id}"))
                        .spawn_scoped(scope, move || gate.wait().then(|| state.worker(id, graph, range, barrier)));
                    match spawned {
                        Ok(h) => handles.push(h),
                        Err(source) => {
                            gate.open(false);
                            return Err(BfsError::Spawn { threads, source });
                        }
                    }
                }
                gate.open(true);
                let sizes = state.worker(0, graph, ranges[0].clone(), barrier);
                for h in handles {
                    if let Err(panic) = h.join() {
                        std::panic::resume_unwind(panic);
                    }
                }
                Ok(sizes)
            })?
        };
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let costs = state.into_costs();
        let reached = costs.iter().filter(|&&c| c != UNREACHED).count();
        let stats = TraversalStats {
            nodes: n,
            edges: graph.edge_count(),
            source,
            threads,
            levels: frontier_sizes.len(),
            reached,
            max_cost: frontier_sizes.len() as i32 - 1,
            frontier_sizes,
            elapsed_ms,
            memory_bytes: graph.memory_bytes() + LevelState::memory_bytes(n),
        };
        info!(levels = stats.levels, reached, elapsed_ms, "traversal finished");
        Ok(Traversal { costs, stats })
    }
}

/// Splits `0..n` into at most `threads` non-empty contiguous ranges.
fn partition(n: usize, threads: usize) -> Vec<Range<u32>> {
    let t = threads.clamp(1, n.max(1));
    (0..t)
        .map(|i| {
            let lo = (i as u64 * n as u64 / t as u64) as u32;
            let hi = ((i as u64 + 1) * n as u64 / t as u64) as u32;
            lo..hi
        })
        .collect()
}

/// Holds spawned workers until the whole pool exists, so a failed spawn never
/// leaves anyone parked on a barrier that cannot fill.
#[derive(Default)]
struct StartGate {
    decision: Mutex<Option<bool>>,
    cond: Condvar,
}

impl StartGate {
    fn open(&self, go: bool) {
        *self.decision.lock().unwrap_or_else(PoisonError::into_inner) = Some(go);
        self.cond.notify_all();
    }

    /// Blocks until [`StartGate::open`]; true means run.
    fn wait(&self) -> bool {
        let guard = self.decision.lock().unwrap_or_else(PoisonError::into_inner);
        let guard = self.cond.wait_while(guard, |d| d.is_none()).unwrap_or_else(PoisonError::into_inner);
        guard.unwrap_or(false)
    }
}

struct LevelState {
    frontier: Vec<AtomicBool>,
    next_frontier: Vec<AtomicBool>,
    visited: Vec<AtomicBool>,
    cost: Vec<AtomicI32>,
    /// Nodes committed in a level, indexed by level parity. The barrier leader
    /// clears the slot for level `k + 1` once everyone has read it for `k - 1`.
    committed: [AtomicUsize; 2],
}

impl LevelState {
    fn new(n: usize, source: u32) -> Self {
        let flags = || (0..n).map(|_| AtomicBool::new(false)).collect::<Vec<_>>();
        let state = Self {
            frontier: flags(),
            next_frontier: flags(),
            visited: flags(),
            cost: (0..n).map(|_| AtomicI32::new(UNREACHED)).collect(),
            committed: [AtomicUsize::new(0), AtomicUsize::new(0)],
        };
        let s = source as usize;
        state.cost[s].store(0, Relaxed);
        state.visited[s].store(true, Relaxed);
        state.frontier[s].store(true, Relaxed);
        state
    }

    fn memory_bytes(n: usize) -> usize {
        n * (3 * std::mem::size_of::<AtomicBool>() + std::mem::size_of::<AtomicI32>())
    }

    /// Runs levels until one commits nothing. Returns the frontier size of
    /// every level, starting with the source's level.
    fn worker(&self, id: usize, graph: &CsrGraph, range: Range<u32>, barrier: &Barrier) -> Vec<usize> {
        let mut sizes = vec![1];
        let mut level = 0usize;
        loop {
            self.expand(graph, range.clone());
            if barrier.wait().is_leader() {
                self.committed[(level + 1) % 2].store(0, Relaxed);
            }
            let local = self.commit(range.clone());
            if local > 0 {
                self.committed[level % 2].fetch_add(local, Relaxed);
            }
            barrier.wait();
            let total = self.committed[level % 2].load(Relaxed);
            level += 1;
            if id == 0 {
                debug!(level, committed = total, "level done");
            }
            if total == 0 {
                return sizes;
            }
            sizes.push(total);
        }
    }

    fn expand(&self, graph: &CsrGraph, range: Range<u32>) {
        for tid in range {
            let t = tid as usize;
            if !self.frontier[t].load(Relaxed) {
                continue;
            }
            self.frontier[t].store(false, Relaxed);
            let next = self.cost[t].load(Relaxed) + 1;
            for id in graph.neighbors(tid) {
                let v = id as usize;
                if !self.visited[v].load(Relaxed) {
                    self.cost[v].store(next, Relaxed);
                    self.next_frontier[v].store(true, Relaxed);
                }
            }
        }
    }

    fn commit(&self, range: Range<u32>) -> usize {
        let mut count = 0;
        for tid in range {
            let t = tid as usize;
            if self.next_frontier[t].load(Relaxed) {
                self.frontier[t].store(true, Relaxed);
                self.visited[t].store(true, Relaxed);
                self.next_frontier[t].store(false, Relaxed);
                count += 1;
            }
        }
        count
    }

    fn into_costs(self) -> Vec<i32> {
        self.cost.into_iter().map(AtomicI32::into_inner).collect()
    }
}
