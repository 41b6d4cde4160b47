//! Random undirected multigraph generator.
//!
//! Self-loops and parallel edges are kept and the result may be disconnected.

use rand::Rng;
use tracing::info;

use crate::config::BuilderConfig;
use crate::error::ConfigError;
use crate::format::BfsInstance;
use crate::graph::{CsrGraph, Edge};

#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    config: BuilderConfig,
}

impl GraphBuilder {
    pub fn new(config: BuilderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generates a tightly packed symmetric graph and a uniformly drawn source.
    ///
    /// For every node `i`, draws a degree `d` in `[min_degree, max_degree]` and
    /// adds `d` edges `i -> j` with random `j` and weight, each mirrored as
    /// `j -> i` with the same weight. The source is not re-drawn when it lands
    /// on an isolated node.
    pub fn generate<R: Rng>(&self, nodes: u64, rng: &mut R) -> Result<BfsInstance, ConfigError> {
        let c = &self.config;
        let max = c.max_nodes();
        if nodes < c.min_nodes || nodes > max {
            return Err(ConfigError::NodeCountOutOfRange { nodes, min: c.min_nodes, max });
        }
        let n = nodes as u32;
        let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); n as usize];
        for i in 0..n {
            let degree = rng.gen_range(c.min_degree..=c.max_degree);
            for _ in 0..degree {
                let j = rng.gen_range(0..n);
                let weight = rng.gen_range(c.min_weight..=c.max_weight);
                adjacency[i as usize].push(Edge { dest: j, weight });
                adjacency[j as usize].push(Edge { dest: i, weight });
            }
        }
        let graph = CsrGraph::from_adjacency(adjacency)
            .map_err(|e| ConfigError::invalid_value("nodes", format!("generated graph does not fit the compressed form: {e}")))?;
        let source = rng.gen_range(0..n);
        info!(nodes = n, edges = graph.edge_count(), source, "graph generated");
        Ok(BfsInstance { graph, source })
    }
}
