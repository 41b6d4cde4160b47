//! Error types shared by the builder, the interchange codec and the engine.
//!
//! ```text
//! BfsError
//! ├── ConfigError          (bad arguments, counts, thread pool size, source)
//! └── MalformedInputError  (graph file unreadable or inconsistent)
//! ```
//!
//! An unreachable node is not an error: it shows up as [`crate::UNREACHED`]
//! in the cost array.

use std::path::PathBuf;
use thiserror::Error;

pub type BfsResult<T> = Result<T, BfsError>;

#[derive(Debug, Error)]
pub enum BfsError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("malformed input: {0}")]
    Malformed(#[from] MalformedInputError),

    /// Writing a result or graph file failed.
    #[error("cannot write `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OS refused a worker thread. No traversal work was done.
    #[error("cannot spawn a pool of {threads} worker threads: {source}")]
    Spawn {
        threads: usize,
        #[source]
        source: std::io::Error,
    },

    /// Parallel and sequential costs disagree (`--verify`).
    #[error("node {node}: parallel cost {actual} differs from sequential cost {expected}")]
    VerificationFailed { node: usize, expected: i32, actual: i32 },

    #[error("cannot serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Invalid arguments or settings. Always raised before any work starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("node count {nodes} outside permitted range [{min}, {max}]")]
    NodeCountOutOfRange { nodes: u64, min: u64, max: u64 },

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("worker thread count must be at least 1")]
    ZeroThreads,

    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("source node {node} is out of range for {nodes} nodes")]
    SourceOutOfRange { node: u64, nodes: u64 },

    #[error("cannot read config file `{path}`: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub fn invalid_value<S: Into<String>>(field: &'static str, reason: S) -> Self {
        ConfigError::InvalidValue { field, reason: reason.into() }
    }
}

/// A graph file (or in-memory table) that violates the compressed-form invariants.
#[derive(Debug, Error)]
pub enum MalformedInputError {
    #[error("cannot open graph file `{path}`: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected end of input while reading {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("line {line}: expected {expected}, found `{token}`")]
    InvalidNumber { line: usize, expected: &'static str, token: String },

    #[error("declared edge count {declared} does not match node table total {expected}")]
    EdgeCountMismatch { declared: u64, expected: u64 },

    #[error("node {node}: edge span [{start}, {end}) exceeds edge array of length {edges}")]
    SpanOutOfRange { node: u32, start: u64, end: u64, edges: u64 },

    #[error("node {node}: starting offset {starting} precedes previous offset {previous}")]
    NonMonotoneOffsets { node: u32, starting: u32, previous: u32 },

    #[error("edge {edge}: destination {dest} is outside [0, {nodes})")]
    DestinationOutOfRange { edge: u64, dest: u32, nodes: u64 },

    #[error("node {node}: edge array of {edges} records does not fit 32-bit offsets")]
    OffsetOverflow { node: u64, edges: u64 },

    #[error("line {line}: unexpected trailing data `{token}`")]
    TrailingData { line: usize, token: String },
}
