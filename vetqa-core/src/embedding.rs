//! Embedding capability trait for turning text into fixed-width vectors.

use async_trait::async_trait;

use crate::error::Result;

/// A pretrained sentence-embedding model driven by the engine.
///
/// Implementations wrap a specific backend (a local ONNX model, a remote
/// embeddings API, a test stub) behind a unified async interface. The engine
/// never trains or selects the model; it only calls `embed`/`embed_batch`.
/// The same implementation must encode both the corpus and incoming queries,
/// otherwise cosine scores compare vectors from different spaces and are
/// meaningless.
///
/// The default [`embed_batch`](Embedder::embed_batch) implementation calls
/// [`embed`](Embedder::embed) sequentially; backends with native batching
/// should override it.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Encode a single text into an embedding vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Encode a batch of texts into embedding vectors, one per input.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// The fixed width of vectors produced by this embedder.
    fn dimensions(&self) -> usize;
}
