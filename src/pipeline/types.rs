//! Core data types and error definitions for the normalization pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized metadata attached to every output record.
///
/// List fields are always materialized, even when empty, so downstream
/// consumers never have to branch on null. `url` and `publish_date` may be
/// absent when the raw document carried nothing salvageable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedMetadata {
    /// Source identifier of the article, trimmed and non-empty.
    pub external_id: String,
    /// Absolute http(s) URL of the article, when one could be built.
    pub url: Option<String>,
    /// Taxonomy tags, ordered and deduplicated.
    pub tags: Vec<String>,
    /// Taxonomy sections, ordered and deduplicated.
    pub sections: Vec<String>,
    /// Taxonomy categories, ordered and deduplicated.
    pub categories: Vec<String>,
    /// Canonical UTC publish date (`YYYY-MM-DDTHH:MM:SSZ`), or `None` when
    /// the raw value was missing or unparseable.
    pub publish_date: Option<String>,
}

/// Flat record ready for vector-store ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QdrantDocument {
    /// Concatenated article body, non-empty after sanitization.
    pub text: String,
    /// Normalized article metadata.
    pub metadata: NormalizedMetadata,
}

/// Output record with the embedding vector attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddedRecord {
    /// Sanitized article text, as embedded.
    pub text: String,
    /// Normalized article metadata.
    pub metadata: NormalizedMetadata,
    /// Embedding vector produced for the text.
    pub embedding: Vec<f32>,
}

/// Why a document was refused by the transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// `_id` was absent, null, or empty after trimming.
    MissingId,
    /// No textual content survived extraction and sanitization.
    MissingText,
}

impl RejectionReason {
    /// Stable diagnostic string surfaced in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingId => "Missing ID",
            Self::MissingText => "Missing Text",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic companion emitted alongside every processing attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingReport {
    /// Whether the document produced an output record.
    pub accepted: bool,
    /// Rejection reason when `accepted` is false.
    pub reason: Option<String>,
}

impl ProcessingReport {
    /// Report for a document that produced a record.
    pub fn accepted() -> Self {
        Self {
            accepted: true,
            reason: None,
        }
    }

    /// Report for a dropped document.
    pub fn rejected(reason: RejectionReason) -> Self {
        Self {
            accepted: false,
            reason: Some(reason.as_str().to_string()),
        }
    }
}

/// Errors emitted while orchestrating a batch through the embedding provider.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Embedding provider failed to produce vectors for the batch.
    #[error("Failed to generate embeddings: {0}")]
    Embedding(#[from] crate::embedding::EmbeddingClientError),
    /// Provider returned a different number of vectors than texts submitted.
    #[error("Embedding count mismatch: expected {expected}, got {actual}")]
    CountMismatch {
        /// Number of texts submitted in the batch.
        expected: usize,
        /// Number of vectors returned by the provider.
        actual: usize,
    },
    /// Returned embedding dimension does not match configuration.
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected embedding dimension configured for the pipeline.
        expected: usize,
        /// Actual embedding dimension produced by the provider.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_reasons_render_stable_strings() {
        assert_eq!(RejectionReason::MissingId.to_string(), "Missing ID");
        assert_eq!(RejectionReason::MissingText.to_string(), "Missing Text");
    }

    #[test]
    fn report_constructors_fill_fields() {
        let ok = ProcessingReport::accepted();
        assert!(ok.accepted);
        assert!(ok.reason.is_none());

        let nope = ProcessingReport::rejected(RejectionReason::MissingText);
        assert!(!nope.accepted);
        assert_eq!(nope.reason.as_deref(), Some("Missing Text"));
    }

    #[test]
    fn record_serializes_empty_lists_as_arrays() {
        let record = QdrantDocument {
            text: "body".into(),
            metadata: NormalizedMetadata {
                external_id: "abc".into(),
                url: None,
                tags: Vec::new(),
                sections: Vec::new(),
                categories: Vec::new(),
                publish_date: None,
            },
        };
        let value = serde_json::to_value(&record).expect("serializes");
        assert!(value["metadata"]["tags"].is_array());
        assert!(value["metadata"]["sections"].is_array());
        assert!(value["metadata"]["categories"].is_array());
        assert!(value["metadata"]["publish_date"].is_null());
    }
}
