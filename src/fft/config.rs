//! Engine configuration, loadable from JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{check_size, FftError};
use super::executor::DEFAULT_GRAIN;
use super::options::{Direction, Normalization, OutputOrder, TransformOptions};

/// Errors raised while loading or validating an [`FftConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(#[from] FftError),
}

/// Configuration for a [`CpuFft`](super::CpuFft) or GPU engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FftConfig {
    /// Largest transform the engine's twiddle tables serve.
    pub max_size: usize,
    /// Worker threads for parallel passes. `0` uses one per core, `1` disables
    /// the pool.
    pub workers: usize,
    /// Transforms shorter than this run on the calling thread.
    pub parallel_threshold: usize,
    /// Minimum butterfly pairs per parallel task.
    pub grain: usize,
    /// Use the unrolled radix-8 kernel for the first three passes.
    pub radix8: bool,
    pub forward_normalization: Normalization,
    pub inverse_normalization: Normalization,
    pub inverse_order: OutputOrder,
}

impl Default for FftConfig {
    fn default() -> Self {
        Self {
            max_size: 4096,
            workers: 0,
            parallel_threshold: 8192,
            grain: DEFAULT_GRAIN,
            radix8: true,
            forward_normalization: Normalization::None,
            inverse_normalization: Normalization::ByLength,
            inverse_order: OutputOrder::Natural,
        }
    }
}

impl FftConfig {
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            max_size,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), FftError> {
        check_size(self.max_size)
    }

    /// Whether a transform of `len` points should use the worker pool.
    pub fn is_parallel(&self, len: usize) -> bool {
        self.workers != 1 && len >= self.parallel_threshold
    }

    /// The options a transform in `direction` runs with under this config.
    pub fn options(&self, direction: Direction) -> TransformOptions {
        match direction {
            Direction::Forward => TransformOptions {
                direction,
                normalization: self.forward_normalization,
                order: OutputOrder::Natural,
                radix8: self.radix8,
            },
            Direction::Inverse => TransformOptions {
                direction,
                normalization: self.inverse_normalization,
                order: self.inverse_order,
                radix8: self.radix8,
            },
        }
    }
}
