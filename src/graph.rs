//! Compressed adjacency graph: a per-node (offset, degree) table into one flat
//! edge array. Undirected graphs store both directions explicitly.

use crate::error::MalformedInputError;

/// One directed edge record. `weight` is carried for interchange only.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub dest: u32,
    pub weight: u32,
}

/// Node `i` owns edges `[starting, starting + degree)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeSpan {
    pub starting: u32,
    pub degree: u32,
}

impl NodeSpan {
    #[inline(always)]
    pub fn end(&self) -> u64 {
        self.starting as u64 + self.degree as u64
    }
}

/// Immutable once built. Every destination id is `< node_count()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsrGraph {
    nodes: Vec<NodeSpan>,
    edges: Vec<Edge>,
}

impl CsrGraph {
    /// Validates the node table against the edge array.
    ///
    /// Offsets must be non-decreasing and each span must lie inside the edge
    /// array. Gaps between spans are accepted.
    pub fn new(nodes: Vec<NodeSpan>, edges: Vec<Edge>) -> Result<Self, MalformedInputError> {
        let m = edges.len() as u64;
        let n = nodes.len() as u64;
        let mut previous = 0u32;
        for (i, span) in nodes.iter().enumerate() {
            if span.starting < previous {
                return Err(MalformedInputError::NonMonotoneOffsets { node: i as u32, starting: span.starting, previous });
            }
            if span.end() > m {
                return Err(MalformedInputError::SpanOutOfRange { node: i as u32, start: span.starting as u64, end: span.end(), edges: m });
            }
            previous = span.starting;
        }
        if let Some((e, edge)) = edges.iter().enumerate().find(|(_, e)| e.dest as u64 >= n) {
            return Err(MalformedInputError::DestinationOutOfRange { edge: e as u64, dest: edge.dest, nodes: n });
        }
        Ok(Self { nodes, edges })
    }

    /// Flattens per-node edge lists in increasing node order with prefix-summed
    /// offsets, so the result is always tightly packed.
    pub fn from_adjacency(adjacency: Vec<Vec<Edge>>) -> Result<Self, MalformedInputError> {
        let total: usize = adjacency.iter().map(Vec::len).sum();
        let mut nodes = Vec::with_capacity(adjacency.len());
        let mut edges = Vec::with_capacity(total);
        for (i, list) in adjacency.into_iter().enumerate() {
            let overflow = || MalformedInputError::OffsetOverflow { node: i as u64, edges: (edges.len() + list.len()) as u64 };
            let starting = u32::try_from(edges.len()).map_err(|_| overflow())?;
            let degree = u32::try_from(list.len()).map_err(|_| overflow())?;
            if starting.checked_add(degree).is_none() {
                return Err(overflow());
            }
            nodes.push(NodeSpan { starting, degree });
            edges.extend(list);
        }
        Self::new(nodes, edges)
    }

    /// Builds an undirected graph from `(u, v)` pairs, storing both
    /// directions with unit weight.
    pub fn from_undirected_edges(n: u32, pairs: &[(u32, u32)]) -> Result<Self, MalformedInputError> {
        let mut adjacency = vec![Vec::new(); n as usize];
        for (i, &(u, v)) in pairs.iter().enumerate() {
            if u >= n || v >= n {
                return Err(MalformedInputError::DestinationOutOfRange { edge: i as u64, dest: u.max(v), nodes: n as u64 });
            }
            adjacency[u as usize].push(Edge { dest: v, weight: 1 });
            adjacency[v as usize].push(Edge { dest: u, weight: 1 });
        }
        Self::from_adjacency(adjacency)
    }

    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[NodeSpan] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline(always)]
    pub fn span(&self, node: u32) -> NodeSpan {
        self.nodes[node as usize]
    }

    #[inline(always)]
    pub fn edges_of(&self, node: u32) -> &[Edge] {
        let span = self.nodes[node as usize];
        &self.edges[span.starting as usize..span.end() as usize]
    }

    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = u32> + '_ {
        self.edges_of(node).iter().map(|e| e.dest)
    }

    /// True when `starting[i] + degree[i] == starting[i+1]` for every node and
    /// the last span ends at the edge array's end.
    pub fn is_tightly_packed(&self) -> bool {
        let mut cursor = 0u64;
        for span in &self.nodes {
            if span.starting as u64 != cursor {
                return false;
            }
            cursor = span.end();
        }
        cursor == self.edges.len() as u64
    }

    pub fn memory_bytes(&self) -> usize {
        self.nodes.len() * std::mem::size_of::<NodeSpan>() + self.edges.len() * std::mem::size_of::<Edge>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(dest: u32) -> Edge {
        Edge { dest, weight: 1 }
    }

    #[test]
    fn adjacency_is_prefix_summed() {
        let g = CsrGraph::from_adjacency(vec![vec![e(1), e(2)], vec![], vec![e(0)]]).unwrap();
        assert_eq!(g.nodes(), &[NodeSpan { starting: 0, degree: 2 }, NodeSpan { starting: 2, degree: 0 }, NodeSpan { starting: 2, degree: 1 }]);
        assert_eq!(g.neighbors(0).collect::<Vec<_>>(), vec![1, 2]);
        assert!(g.edges_of(1).is_empty());
        assert!(g.is_tightly_packed());
    }

    #[test]
    fn undirected_pairs_store_both_directions() {
        let g = CsrGraph::from_undirected_edges(3, &[(0, 1), (1, 2)]).unwrap();
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.neighbors(1).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn self_loop_and_parallel_edges_kept() {
        let g = CsrGraph::from_undirected_edges(2, &[(0, 0), (0, 1), (0, 1)]).unwrap();
        assert_eq!(g.neighbors(0).collect::<Vec<_>>(), vec![0, 0, 1, 1]);
    }

    #[test]
    fn rejects_dangling_span() {
        let err = CsrGraph::new(vec![NodeSpan { starting: 0, degree: 3 }], vec![e(0)]).unwrap_err();
        assert!(matches!(err, MalformedInputError::SpanOutOfRange { node: 0, end: 3, .. }));
    }

    #[test]
    fn rejects_destination_out_of_range() {
        let err = CsrGraph::new(vec![NodeSpan { starting: 0, degree: 1 }], vec![e(7)]).unwrap_err();
        assert!(matches!(err, MalformedInputError::DestinationOutOfRange { dest: 7, nodes: 1, .. }));
    }

    #[test]
    fn rejects_decreasing_offsets() {
        let nodes = vec![NodeSpan { starting: 1, degree: 1 }, NodeSpan { starting: 0, degree: 1 }];
        let err = CsrGraph::new(nodes, vec![e(0), e(1)]).unwrap_err();
        assert!(matches!(err, MalformedInputError::NonMonotoneOffsets { node: 1, .. }));
    }

    #[test]
    fn gaps_are_accepted_but_not_tight() {
        let nodes = vec![NodeSpan { starting: 0, degree: 1 }, NodeSpan { starting: 2, degree: 1 }];
        let g = CsrGraph::new(nodes, vec![e(1), e(0), e(0)]).unwrap();
        assert!(!g.is_tightly_packed());
        assert_eq!(g.neighbors(1).collect::<Vec<_>>(), vec![0]);
    }
}
