//! Environment-driven server configuration.

use tracing::warn;
use vetqa_core::EngineConfig;

const DEFAULT_PORT: u16 = 5000;

/// Server settings read from the environment at startup.
///
/// - `PORT`: listen port (default 5000).
/// - `DATA_PATH`: corpus JSON file (default `data/processed_template_qa.json`).
/// - `MAX_DATASET_SIZE`: corpus cap, 0 = unlimited (default 0).
/// - `EMBED_BATCH_SIZE`: encode batch size (default 50).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub engine: EngineConfig,
}

impl ServerConfig {
    /// Read the configuration from the environment, falling back to defaults
    /// for unset or unparseable values.
    pub fn from_env() -> Self {
        let defaults = EngineConfig::default();
        let engine = EngineConfig {
            dataset_path: std::env::var("DATA_PATH")
                .map(Into::into)
                .unwrap_or(defaults.dataset_path),
            max_corpus_size: env_number("MAX_DATASET_SIZE", defaults.max_corpus_size),
            batch_size: env_number("EMBED_BATCH_SIZE", defaults.batch_size).max(1),
        };
        Self { port: env_number("PORT", DEFAULT_PORT), engine }
    }
}

fn env_number<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(var = name, value = %raw, "unparseable value, using default");
            default
        }),
        Err(_) => default,
    }
}
