//! Sequential queue-based BFS used as the correctness baseline.

use std::collections::VecDeque;

use crate::engine::UNREACHED;
use crate::graph::CsrGraph;

/// Edge-count distances from `source`; `UNREACHED` for unreachable nodes.
///
/// Panics if `source` is out of range.
pub fn sequential_bfs(graph: &CsrGraph, source: u32) -> Vec<i32> {
    let mut cost = vec![UNREACHED; graph.node_count()];
    let mut queue = VecDeque::new();
    cost[source as usize] = 0;
    queue.push_back(source);
    while let Some(u) = queue.pop_front() {
        let next = cost[u as usize] + 1;
        for v in graph.neighbors(u) {
            if cost[v as usize] == UNREACHED {
                cost[v as usize] = next;
                queue.push_back(v);
            }
        }
    }
    cost
}
