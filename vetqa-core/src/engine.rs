//! The match engine: corpus, embedding index, and readiness in one owned value.
//!
//! The engine is constructed once per process, ingests once, and is then
//! shared read-only with the request-handling layer. It replaces the ambient
//! module-level globals a quick script would use with a single value whose
//! readiness is explicit.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::EngineConfig;
use crate::corpus::Corpus;
use crate::embedding::Embedder;
use crate::error::{MatchError, Result};
use crate::index::EmbeddingMatrix;

/// Lifecycle state of the engine.
///
/// One-shot machine: `Uninitialized -> Loading -> Ready | Failed`. The
/// terminal states never transition again; a failed engine stays failed until
/// the process restarts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// Constructed, ingest not yet started.
    Uninitialized,
    /// Ingest in progress.
    Loading,
    /// Corpus loaded and index built; queries are served.
    Ready,
    /// Ingest failed; the reason is kept for the health surface.
    Failed(String),
}

/// Best-match result for one query. Ephemeral, produced per request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QueryResult {
    /// Row index of the matched corpus item.
    pub matched_index: usize,
    /// The matched corpus question.
    pub question: String,
    /// The answer associated with the matched question.
    pub answer: String,
    /// The disease label of the matched row.
    pub label: String,
    /// Cosine similarity between the query and the matched row, in [-1, 1].
    pub score: f32,
}

/// Cosine similarity between two vectors.
///
/// Magnitude-invariant; returns 0.0 if either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// The semantic question-matching engine.
///
/// Owns the corpus arrays and the embedding matrix exclusively; [`query`]
/// only reads them, so a `Ready` engine can serve concurrent callers behind
/// an `Arc` without locking. Whether `embed` calls themselves run
/// concurrently is up to the [`Embedder`] implementation.
///
/// [`query`]: MatchEngine::query
pub struct MatchEngine {
    config: EngineConfig,
    embedder: Arc<dyn Embedder>,
    corpus: Corpus,
    matrix: Option<EmbeddingMatrix>,
    state: Readiness,
}

impl MatchEngine {
    /// Create an engine in the `Uninitialized` state.
    pub fn new(config: EngineConfig, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            config,
            embedder,
            corpus: Corpus::default(),
            matrix: None,
            state: Readiness::Uninitialized,
        }
    }

    /// Load the corpus and build the embedding index.
    ///
    /// Runs once, before the engine serves any query. On success the engine
    /// becomes `Ready`; on any error it becomes `Failed` and the error is
    /// returned so the caller can decide whether to keep the process alive
    /// (the HTTP layer does, so health checks can report the failure).
    ///
    /// # Errors
    ///
    /// Any corpus or index error, or [`MatchError::ConfigError`] if ingest
    /// was already attempted; there is no reload path.
    pub async fn ingest(&mut self) -> Result<()> {
        if self.state != Readiness::Uninitialized {
            return Err(MatchError::ConfigError(
                "ingest may only run once per process".to_string(),
            ));
        }
        self.state = Readiness::Loading;

        match self.ingest_inner().await {
            Ok(()) => {
                self.state = Readiness::Ready;
                info!(dataset_size = self.corpus.len(), "engine ready");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "initialization failed; engine will answer NotReady");
                self.state = Readiness::Failed(e.to_string());
                Err(e)
            }
        }
    }

    async fn ingest_inner(&mut self) -> Result<()> {
        let corpus = Corpus::load(&self.config.dataset_path, self.config.max_corpus_size)?;
        let matrix =
            EmbeddingMatrix::build(&corpus, self.embedder.as_ref(), self.config.batch_size)
                .await?;
        // Corpus and matrix are installed together so their row indices can
        // never disagree, even after a failed build.
        self.corpus = corpus;
        self.matrix = Some(matrix);
        Ok(())
    }

    /// Return the best-matching corpus row for `text`.
    ///
    /// There is no similarity threshold: the least-bad match is always
    /// returned, and a low score is the caller's signal of low confidence.
    /// Ties resolve to the lowest row index.
    ///
    /// # Errors
    ///
    /// - [`MatchError::EmptyQuery`] when `text` is empty after trimming.
    /// - [`MatchError::NotReady`] unless the engine is `Ready`.
    /// - [`MatchError::EncodingError`] if encoding the query fails.
    pub async fn query(&self, text: &str) -> Result<QueryResult> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(MatchError::EmptyQuery);
        }
        if self.state != Readiness::Ready {
            return Err(MatchError::NotReady);
        }
        let Some(matrix) = self.matrix.as_ref() else {
            return Err(MatchError::NotReady);
        };

        let query_vector = self.embedder.embed(trimmed).await?;

        let mut best_index = 0usize;
        let mut best_score = f32::NEG_INFINITY;
        for row in 0..matrix.rows() {
            let score = cosine_similarity(&query_vector, matrix.row(row));
            // strict comparison keeps the lowest index on ties
            if score > best_score {
                best_index = row;
                best_score = score;
            }
        }

        debug!(matched_index = best_index, score = best_score, "query matched");

        let item = self.corpus.item(best_index);
        Ok(QueryResult {
            matched_index: best_index,
            question: item.question,
            answer: item.answer,
            label: item.label,
            score: best_score,
        })
    }

    /// Current lifecycle state.
    pub fn readiness(&self) -> &Readiness {
        &self.state
    }

    /// True when the engine can serve queries.
    pub fn is_ready(&self) -> bool {
        self.state == Readiness::Ready
    }

    /// Number of corpus items loaded (0 until ingest succeeds).
    pub fn dataset_size(&self) -> usize {
        self.corpus.len()
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
