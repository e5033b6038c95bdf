//! Embedding index: the corpus questions encoded into one dense matrix.

use tracing::{debug, info};

use crate::corpus::Corpus;
use crate::embedding::Embedder;
use crate::error::{MatchError, Result};

/// A dense, row-major matrix of question embeddings.
///
/// Row *i* is the vector for question *i* of the corpus the matrix was built
/// from. Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddingMatrix {
    data: Vec<f32>,
    rows: usize,
    dim: usize,
}

impl EmbeddingMatrix {
    /// Encode every corpus question and assemble the result matrix.
    ///
    /// Questions are encoded in fixed-size batches rather than one call over
    /// the whole corpus. Batch outputs accumulate in a list that is
    /// concatenated into the final matrix only after the last batch, then
    /// released, so peak working memory is the final matrix plus one batch
    /// rather than two full copies of the corpus vectors.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::EncodingError`] if any batch fails or returns
    /// vectors of the wrong shape. A single failed batch aborts the whole
    /// build; a partially built index is never returned.
    pub async fn build(
        corpus: &Corpus,
        embedder: &dyn Embedder,
        batch_size: usize,
    ) -> Result<Self> {
        debug_assert!(batch_size > 0, "batch_size is validated by EngineConfig");

        let questions = corpus.questions();
        let dim = embedder.dimensions();
        if questions.is_empty() {
            return Ok(Self { data: Vec::new(), rows: 0, dim });
        }

        info!(count = questions.len(), batch_size, "encoding corpus questions");

        let mut batches: Vec<Vec<Vec<f32>>> =
            Vec::with_capacity(questions.len().div_ceil(batch_size));
        let mut encoded = 0usize;
        for chunk in questions.chunks(batch_size) {
            let texts: Vec<&str> = chunk.iter().map(String::as_str).collect();
            let vectors = embedder.embed_batch(&texts).await?;
            if vectors.len() != chunk.len() {
                return Err(MatchError::EncodingError(format!(
                    "batch returned {} vectors for {} inputs",
                    vectors.len(),
                    chunk.len()
                )));
            }
            encoded += vectors.len();
            debug!(encoded, total = questions.len(), "encoded corpus batch");
            batches.push(vectors);
        }

        // Concatenate; consuming the batch list frees each batch as soon as
        // its rows are copied into the matrix.
        let mut data = Vec::with_capacity(questions.len() * dim);
        for batch in batches {
            for vector in batch {
                if vector.len() != dim {
                    return Err(MatchError::EncodingError(format!(
                        "vector width {} does not match model width {dim}",
                        vector.len()
                    )));
                }
                data.extend_from_slice(&vector);
            }
        }

        let matrix = Self { data, rows: questions.len(), dim };
        info!(rows = matrix.rows, dim = matrix.dim, "built embedding index");
        Ok(matrix)
    }

    /// Number of rows (one per corpus question).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Width of each embedding vector.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The embedding vector for row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= rows()`.
    pub fn row(&self, index: usize) -> &[f32] {
        let start = index * self.dim;
        &self.data[start..start + self.dim]
    }
}
