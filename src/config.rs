//! Engine and builder settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable consulted by [`EngineConfig::from_env`].
pub const THREADS_ENV: &str = "FRONTIER_BFS_THREADS";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Size of the worker pool. Capped at the node count at run time.
    pub threads: usize,
}

impl EngineConfig {
    pub fn with_threads(threads: usize) -> Self {
        Self { threads }
    }

    /// Thread count from `FRONTIER_BFS_THREADS`, else the available parallelism.
    pub fn from_env() -> Self {
        let threads = std::env::var(THREADS_ENV)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_threads);
        Self { threads }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { threads: default_threads() }
    }
}

fn default_threads() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Shape of the random graphs produced by [`crate::builder::GraphBuilder`].
///
/// Each node draws between `min_degree` and `max_degree` edges (inclusive),
/// each mirrored, so the average degree is roughly `min_degree + max_degree`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub min_nodes: u64,
    pub min_degree: u32,
    pub max_degree: u32,
    pub min_weight: u32,
    pub max_weight: u32,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self { min_nodes: 20, min_degree: 2, max_degree: 4, min_weight: 1, max_weight: 10 }
    }
}

impl BuilderConfig {
    pub fn from_json(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead { path: path.to_path_buf(), source })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    /// Largest node count whose worst-case edge array (`2 * max_degree`
    /// records per node) still fits 32-bit offsets.
    pub fn max_nodes(&self) -> u64 {
        let per_node = 2 * self.max_degree.max(1) as u64;
        u32::MAX as u64 / per_node
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_nodes == 0 {
            return Err(ConfigError::invalid_value("min_nodes", "must be at least 1"));
        }
        if self.min_nodes > self.max_nodes() {
            return Err(ConfigError::invalid_value("min_nodes", format!("must not exceed {} for max_degree {}", self.max_nodes(), self.max_degree)));
        }
        if self.min_degree > self.max_degree {
            return Err(ConfigError::invalid_value("min_degree", format!("{} exceeds max_degree {}", self.min_degree, self.max_degree)));
        }
        if self.min_weight > self.max_weight {
            return Err(ConfigError::invalid_value("min_weight", format!("{} exceeds max_weight {}", self.min_weight, self.max_weight)));
        }
        Ok(())
    }
}
