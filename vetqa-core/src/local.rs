//! Local embedding backend wrapping fastembed's ONNX MiniLM model.
//!
//! This module is only available when the `local` feature is enabled.

use std::sync::Mutex;

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::info;

use crate::embedding::Embedder;
use crate::error::{MatchError, Result};

/// Name of the sentence embedding model, for operator-facing surfaces.
pub const MODEL_NAME: &str = "all-MiniLM-L6-v2";

/// Embedding width of `all-MiniLM-L6-v2`.
const MINILM_DIMENSIONS: usize = 384;

/// An [`Embedder`] backed by a locally loaded `all-MiniLM-L6-v2` model.
///
/// `TextEmbedding::embed` takes `&mut self`, so the model sits behind a
/// `Mutex` and concurrent queries serialize on it. The model weights are
/// fetched once on first load and cached on disk by fastembed.
pub struct FastEmbedder {
    model: Mutex<TextEmbedding>,
}

impl FastEmbedder {
    /// Load the model.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::ModelUnavailable`] if the ONNX weights cannot be
    /// fetched or initialized.
    pub fn new() -> Result<Self> {
        info!(model = MODEL_NAME, "loading sentence embedding model");
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false),
        )
        .map_err(|e| MatchError::ModelUnavailable(e.to_string()))?;
        info!(model = MODEL_NAME, "model loaded");
        Ok(Self { model: Mutex::new(model) })
    }
}

#[async_trait]
impl Embedder for FastEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text]).await?;
        vectors
            .pop()
            .ok_or_else(|| MatchError::EncodingError("model returned no vector".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let mut model = self
            .model
            .lock()
            .map_err(|_| MatchError::EncodingError("embedding model lock poisoned".to_string()))?;
        model
            .embed(texts.to_vec(), None)
            .map_err(|e| MatchError::EncodingError(e.to_string()))
    }

    fn dimensions(&self) -> usize {
        MINILM_DIMENSIONS
    }
}
