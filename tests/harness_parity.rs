use frontier_bfs::reference::sequential_bfs;
use frontier_bfs::{CsrGraph, Edge, GraphBuilder, ParallelBfs, UNREACHED};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

const THREAD_COUNTS: [usize; 5] = [1, 2, 3, 8, 16];

fn path_graph(n: u32) -> CsrGraph {
    let pairs: Vec<_> = (0..n.saturating_sub(1)).map(|u| (u, u + 1)).collect();
    CsrGraph::from_undirected_edges(n, &pairs).unwrap()
}

fn star_graph(k: u32) -> CsrGraph { // center 0, leaves 1..=k
    let pairs: Vec<_> = (1..=k).map(|leaf| (0, leaf)).collect();
    CsrGraph::from_undirected_edges(k + 1, &pairs).unwrap()
}

fn complete_graph(n: u32) -> CsrGraph {
    let mut pairs = Vec::new();
    for u in 0..n { for v in u + 1..n { pairs.push((u, v)); } }
    CsrGraph::from_undirected_edges(n, &pairs).unwrap()
}

fn bridge_cliques(a: u32, b: u32) -> CsrGraph { // two cliques joined by a-1 -- a
    let n = a + b;
    let mut pairs = Vec::new();
    for u in 0..a { for v in u + 1..a { pairs.push((u, v)); } }
    for u in a..n { for v in u + 1..n { pairs.push((u, v)); } }
    pairs.push((a - 1, a));
    CsrGraph::from_undirected_edges(n, &pairs).unwrap()
}

/// Diamond-heavy layered graph: every node of layer k links to every node of layer k+1.
fn layered_graph(layers: u32, width: u32) -> CsrGraph {
    let n = 1 + layers * width;
    let mut pairs = Vec::new();
    for v in 1..=width { pairs.push((0, v)); }
    for l in 0..layers - 1 {
        for i in 0..width { for j in 0..width { pairs.push((1 + l * width + i, 1 + (l + 1) * width + j)); } }
    }
    CsrGraph::from_undirected_edges(n, &pairs).unwrap()
}

fn hash_costs(costs: &[i32]) -> u64 { // FNV-style mixing; not cryptographic
    let mut h: u64 = 1469598103934665603;
    for (i, &c) in costs.iter().enumerate() { h ^= (c as u32 as u64) ^ (i as u64).wrapping_mul(1099511628211); h = h.wrapping_mul(1099511628211); }
    h
}

fn run(g: &CsrGraph, source: u32, threads: usize) -> Vec<i32> {
    ParallelBfs::with_threads(threads).unwrap().run(g, source).unwrap().costs
}

fn assert_parity(g: &CsrGraph, source: u32) {
    let base = sequential_bfs(g, source);
    let bhash = hash_costs(&base);
    for t in THREAD_COUNTS {
        let costs = run(g, source, t);
        assert_eq!(base, costs, "cost mismatch with {} threads from source {}", t, source);
        assert_eq!(bhash, hash_costs(&costs));
    }
}

#[test]
fn parity_core_small_graphs() {
    let graphs = vec![path_graph(10), star_graph(12), bridge_cliques(4, 4), complete_graph(6), layered_graph(5, 6)];
    for g in &graphs {
        for source in [0, g.node_count() as u32 - 1] {
            assert_parity(g, source);
        }
    }
}

#[test]
fn parity_random_graphs() {
    let builder = GraphBuilder::default();
    for seed in 1..=5u64 {
        let inst = builder.generate(40 * seed, &mut SmallRng::seed_from_u64(seed * 7919)).unwrap();
        assert_parity(&inst.graph, inst.source);
    }
}

#[test]
fn parity_minimum_size_generated_graphs() {
    let builder = GraphBuilder::default();
    for seed in 0..16u64 {
        let inst = builder.generate(20, &mut SmallRng::seed_from_u64(seed)).unwrap();
        assert_eq!(inst.graph.node_count(), 20);
        assert_parity(&inst.graph, inst.source);
        assert_parity(&inst.graph, 19);
    }
}

#[test]
fn concrete_scenarios() {
    let g = CsrGraph::from_undirected_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
    assert_eq!(run(&g, 0, 4), vec![0, 1, 2, 3]);
    let g = CsrGraph::from_undirected_edges(4, &[(0, 1), (1, 2), (2, 3), (0, 3)]).unwrap();
    assert_eq!(run(&g, 0, 4), vec![0, 1, 2, 1]);
}

#[test]
fn disconnected_components_keep_sentinel() {
    let g = CsrGraph::from_undirected_edges(6, &[(0, 1), (1, 2), (3, 4), (4, 5)]).unwrap();
    for t in THREAD_COUNTS {
        assert_eq!(run(&g, 1, t), vec![1, 0, 1, UNREACHED, UNREACHED, UNREACHED]);
    }
}

#[test]
fn isolated_source_in_generated_sized_graph() {
    // 20 nodes, source 0 has no edges.
    let pairs: Vec<_> = (1..19).map(|u| (u, u + 1)).collect();
    let g = CsrGraph::from_undirected_edges(20, &pairs).unwrap();
    assert_eq!(g.span(0).degree, 0);
    let costs = run(&g, 0, 4);
    assert_eq!(costs[0], 0);
    assert!(costs[1..].iter().all(|&c| c == UNREACHED));
}

#[test]
fn repeated_runs_are_identical() {
    let inst = GraphBuilder::default().generate(5000, &mut SmallRng::seed_from_u64(99)).unwrap();
    let first = run(&inst.graph, inst.source, 8);
    for _ in 0..3 {
        assert_eq!(first, run(&inst.graph, inst.source, 8));
    }
    assert_eq!(first, run(&inst.graph, inst.source, 1));
}

#[test]
fn frontier_sizes_sum_to_reached() {
    let inst = GraphBuilder::default().generate(2000, &mut SmallRng::seed_from_u64(5)).unwrap();
    let t = ParallelBfs::with_threads(4).unwrap().run_instance(&inst).unwrap();
    assert_eq!(t.stats.frontier_sizes.iter().sum::<usize>(), t.stats.reached);
    assert_eq!(t.stats.max_cost, *t.costs.iter().max().unwrap());
    assert!(t.stats.levels <= t.stats.nodes);
    assert_eq!(t.costs[inst.source as usize], 0);
}

fn arb_graph() -> impl Strategy<Value = (CsrGraph, u32)> {
    (1u32..40).prop_flat_map(|n| {
        (
            prop::collection::vec((0..n, 0..n), 0..(n as usize * 3)),
            0..n,
        )
            .prop_map(move |(pairs, source)| {
                let mut adjacency = vec![Vec::new(); n as usize];
                for (u, v) in pairs {
                    adjacency[u as usize].push(Edge { dest: v, weight: 1 });
                    adjacency[v as usize].push(Edge { dest: u, weight: 1 });
                }
                (CsrGraph::from_adjacency(adjacency).unwrap(), source)
            })
    })
}

proptest! {
    #[test]
    fn parallel_matches_sequential((g, source) in arb_graph(), threads in 1usize..9) {
        let expected = sequential_bfs(&g, source);
        let costs = run(&g, source, threads);
        prop_assert_eq!(costs[source as usize], 0);
        prop_assert_eq!(expected, costs);
    }
}
