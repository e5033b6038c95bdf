//! Configuration for the match engine.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Configuration parameters for a [`MatchEngine`](crate::engine::MatchEngine).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Path to the JSON corpus file.
    pub dataset_path: PathBuf,
    /// Maximum number of corpus items to keep (0 = unlimited).
    ///
    /// When the raw corpus is larger, only the first `max_corpus_size` records
    /// are kept. This trades answer coverage for a bounded memory footprint.
    pub max_corpus_size: usize,
    /// Number of questions encoded per batch while building the index.
    pub batch_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/processed_template_qa.json"),
            max_corpus_size: 0,
            batch_size: 50,
        }
    }
}

impl EngineConfig {
    /// Create a new builder for constructing an [`EngineConfig`].
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Set the path to the JSON corpus file.
    pub fn dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.dataset_path = path.into();
        self
    }

    /// Set the maximum corpus size (0 = unlimited).
    pub fn max_corpus_size(mut self, size: usize) -> Self {
        self.config.max_corpus_size = size;
        self
    }

    /// Set the encoding batch size.
    pub fn batch_size(mut self, size: usize) -> Self {
        self.config.batch_size = size;
        self
    }

    /// Build the [`EngineConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::ConfigError`] if `batch_size == 0`.
    pub fn build(self) -> Result<EngineConfig> {
        if self.config.batch_size == 0 {
            return Err(MatchError::ConfigError(
                "batch_size must be greater than zero".to_string(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_defaults() {
        let config = EngineConfig::builder().build().unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.max_corpus_size, 0);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let err = EngineConfig::builder().batch_size(0).build().unwrap_err();
        assert!(matches!(err, MatchError::ConfigError(_)));
    }

    #[test]
    fn builder_overrides_fields() {
        let config = EngineConfig::builder()
            .dataset_path("/tmp/qa.json")
            .max_corpus_size(100)
            .batch_size(8)
            .build()
            .unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("/tmp/qa.json"));
        assert_eq!(config.max_corpus_size, 100);
        assert_eq!(config.batch_size, 8);
    }
}
