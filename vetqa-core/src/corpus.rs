//! Corpus store: question/answer/label triples loaded once at startup.
//!
//! The corpus is held as three parallel arrays so the embedding index can be
//! joined back to its source rows by index alone. Index *i* in each array
//! refers to the same logical item; the arrays always have equal length.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{MatchError, Result};

/// Label assigned to records whose source entry carries no `disease` field.
pub const DEFAULT_LABEL: &str = "Unknown";

/// A single question/answer/label record.
///
/// Immutable after load; its identity is its row index in the [`Corpus`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorpusItem {
    /// The canonical question text.
    pub question: String,
    /// The answer returned when this row is the best match.
    pub answer: String,
    /// The disease (or topic) label for this row.
    pub label: String,
}

/// Raw shape of one source record before validation.
#[derive(Deserialize)]
struct RawRecord {
    question: Option<String>,
    answer: Option<String>,
    #[serde(alias = "label")]
    disease: Option<String>,
}

/// The static, ordered collection of Q&A triples the engine matches against.
#[derive(Debug, Default)]
pub struct Corpus {
    questions: Vec<String>,
    answers: Vec<String>,
    labels: Vec<String>,
}

impl Corpus {
    /// Load the corpus from a JSON array of `{question, answer, disease?}`
    /// records, keeping at most `max_size` items (0 = unlimited).
    ///
    /// Truncation is a deterministic prefix cut in source-file order. It
    /// silently reduces answer coverage to keep memory bounded, so it is
    /// logged at `warn` level.
    ///
    /// # Errors
    ///
    /// - [`MatchError::DatasetNotFound`] when the file does not exist.
    /// - [`MatchError::DatasetMalformed`] when the file is not a JSON array,
    ///   a record is missing `question` or `answer`, or the array is empty.
    pub fn load(path: &Path, max_size: usize) -> Result<Self> {
        info!(path = %path.display(), "loading corpus");

        let raw = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MatchError::DatasetNotFound(path.to_path_buf())
            } else {
                MatchError::DatasetMalformed(format!("failed to read dataset: {e}"))
            }
        })?;

        let values: Vec<serde_json::Value> = serde_json::from_str(&raw)
            .map_err(|e| MatchError::DatasetMalformed(format!("expected a JSON array: {e}")))?;

        let raw_len = values.len();
        let keep = if max_size > 0 && raw_len > max_size {
            warn!(from = raw_len, to = max_size, "truncating corpus to fit memory budget");
            max_size
        } else {
            raw_len
        };

        let mut corpus = Corpus {
            questions: Vec::with_capacity(keep),
            answers: Vec::with_capacity(keep),
            labels: Vec::with_capacity(keep),
        };

        for (index, value) in values.into_iter().take(keep).enumerate() {
            let record: RawRecord = serde_json::from_value(value)
                .map_err(|e| MatchError::DatasetMalformed(format!("record {index}: {e}")))?;
            let question = record.question.ok_or_else(|| {
                MatchError::DatasetMalformed(format!("record {index}: missing field `question`"))
            })?;
            let answer = record.answer.ok_or_else(|| {
                MatchError::DatasetMalformed(format!("record {index}: missing field `answer`"))
            })?;
            corpus.questions.push(question);
            corpus.answers.push(answer);
            corpus.labels.push(record.disease.unwrap_or_else(|| DEFAULT_LABEL.to_string()));
        }

        if corpus.is_empty() {
            return Err(MatchError::DatasetMalformed("dataset contains no records".to_string()));
        }

        info!(count = corpus.len(), "loaded corpus");
        Ok(corpus)
    }

    /// Build a corpus directly from items, bypassing the file format.
    pub fn from_items(items: impl IntoIterator<Item = CorpusItem>) -> Self {
        let mut corpus = Corpus::default();
        for item in items {
            corpus.questions.push(item.question);
            corpus.answers.push(item.answer);
            corpus.labels.push(item.label);
        }
        corpus
    }

    /// Number of items in the corpus.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// True when the corpus holds no items.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The question texts, in row order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// The item at `index`, cloned out of the parallel arrays.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn item(&self, index: usize) -> CorpusItem {
        CorpusItem {
            question: self.questions[index].clone(),
            answer: self.answers[index].clone(),
            label: self.labels[index].clone(),
        }
    }
}
