//! In-memory semantic question matching over a fixed Q&A corpus.
//!
//! Given a free-text query, the engine returns the single most similar
//! precomputed question and its answer, scored by cosine similarity in the
//! embedding space of a pretrained sentence model. Three layers, leaves
//! first:
//!
//! - [`Corpus`]: question/answer/label triples held as parallel arrays,
//!   loaded once at startup and optionally truncated to a memory budget.
//! - [`EmbeddingMatrix`]: every corpus question encoded into one contiguous
//!   row-major matrix, built in bounded batches.
//! - [`MatchEngine`]: encodes a query with the same model, scans the matrix
//!   for the arg-max cosine similarity, and returns that row.
//!
//! The corpus is static for the process lifetime: there is no update API and
//! no reload. A `Ready` engine is read-only and safe to share behind an
//! `Arc`.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vetqa_core::{EngineConfig, FastEmbedder, MatchEngine};
//!
//! let config = EngineConfig::builder()
//!     .dataset_path("data/processed_template_qa.json")
//!     .build()?;
//! let mut engine = MatchEngine::new(config, Arc::new(FastEmbedder::new()?));
//! engine.ingest().await?;
//!
//! let result = engine.query("mastitis symptoms").await?;
//! println!("{} (score {:.3})", result.answer, result.score);
//! ```

pub mod config;
pub mod corpus;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod index;
#[cfg(feature = "local")]
pub mod local;
#[cfg(feature = "openai")]
pub mod openai;

pub use config::EngineConfig;
pub use corpus::{Corpus, CorpusItem, DEFAULT_LABEL};
pub use embedding::Embedder;
pub use engine::{MatchEngine, QueryResult, Readiness, cosine_similarity};
pub use error::{MatchError, Result};
pub use index::EmbeddingMatrix;
#[cfg(feature = "local")]
pub use local::FastEmbedder;
#[cfg(feature = "openai")]
pub use openai::OpenAiEmbedder;
