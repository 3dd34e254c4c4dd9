#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::GraphError, MAX_BLOCK_SIZE, MAX_NODES, SAMPLE_RATE};

/// Largest block a config may ask for. Every stream preallocates this many
/// samples.
pub const BLOCK_SIZE_LIMIT: usize = 1 << 16;
/// Largest node table a config may ask for.
pub const NODE_LIMIT: usize = 1 << 16;

/// Fixed-per-run engine settings.
///
/// Sample rate and block size are not renegotiable once a graph is built;
/// a new graph has to be constructed to change them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Samples per second (e.g., 44100.0)
    pub sample_rate: f64,
    /// Capacity of every stream; no block may be longer than this
    pub max_block_size: usize,
    /// Upper bound on registered nodes
    pub max_nodes: usize,
    /// Seed for the master noise generator
    pub seed: u64,
}

impl EngineConfig {
    pub fn new(sample_rate: f64, max_block_size: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), GraphError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(GraphError::InvalidConfig(
                "sample_rate must be a positive finite number",
            ));
        }
        if self.max_block_size == 0 {
            return Err(GraphError::InvalidConfig(
                "max_block_size must be at least one sample",
            ));
        }
        if self.max_block_size > BLOCK_SIZE_LIMIT {
            return Err(GraphError::InvalidConfig(
                "max_block_size must not exceed 65536 samples",
            ));
        }
        if self.max_nodes == 0 {
            return Err(GraphError::InvalidConfig("max_nodes must be at least one"));
        }
        if self.max_nodes > NODE_LIMIT {
            return Err(GraphError::InvalidConfig("max_nodes must not exceed 65536"));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            max_block_size: MAX_BLOCK_SIZE,
            max_nodes: MAX_NODES,
            seed: 0x5eed_0f_b10c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sample_rate, 44_100.0);
        assert_eq!(config.max_block_size, 512);
    }

    #[test]
    fn rejects_zero_block_size() {
        let config = EngineConfig::new(48_000.0, 0);
        assert!(matches!(
            config.validate(),
            Err(GraphError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_non_finite_sample_rate() {
        let config = EngineConfig::new(f64::NAN, 64);
        assert!(config.validate().is_err());

        let config = EngineConfig::new(-1.0, 64);
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_tables_fail_instead_of_allocating() {
        let huge_nodes = EngineConfig {
            max_nodes: usize::MAX,
            ..EngineConfig::default()
        };
        assert!(matches!(
            huge_nodes.validate(),
            Err(GraphError::InvalidConfig(_))
        ));
        assert!(matches!(
            crate::Graph::new(huge_nodes),
            Err(GraphError::InvalidConfig(_))
        ));

        let huge_blocks = EngineConfig::new(48_000.0, usize::MAX);
        assert!(matches!(
            crate::Graph::new(huge_blocks),
            Err(GraphError::InvalidConfig(_))
        ));

        let at_limits = EngineConfig {
            max_block_size: BLOCK_SIZE_LIMIT,
            max_nodes: NODE_LIMIT,
            ..EngineConfig::default()
        };
        assert!(at_limits.validate().is_ok());
    }
}
