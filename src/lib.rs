//! Level-synchronous parallel breadth-first search over compressed adjacency
//! graphs, with a random graph generator and the text interchange format the
//! two share.
//!
//!  - [`engine::ParallelBfs`]: frontier-based traversal on a fixed worker pool
//!  - [`builder::GraphBuilder`]: random undirected multigraphs
//!  - [`format`]: graph files and `"<id>) cost:<c>"` result files
//!  - [`reference::sequential_bfs`]: single-threaded baseline for parity checks

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod graph;
pub mod logging;
pub mod reference;

pub use builder::GraphBuilder;
pub use config::{BuilderConfig, EngineConfig};
pub use engine::{ParallelBfs, Traversal, TraversalStats, UNREACHED};
pub use error::{BfsError, BfsResult, ConfigError, MalformedInputError};
pub use format::BfsInstance;
pub use graph::{CsrGraph, Edge, NodeSpan};
