//! Single-document normalization: the accept/reject decision and record
//! assembly.

use serde_json::Value;

use crate::pipeline::{
    extract, sanitize,
    schema::validate_record,
    types::{NormalizedMetadata, ProcessingReport, QdrantDocument, RejectionReason},
};

/// Stateless transformer turning one raw article into an output record.
///
/// Holds no per-document state, so a single instance is safe to reuse across
/// a whole batch (and across threads).
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentTransformer;

impl DocumentTransformer {
    /// Construct a transformer.
    pub fn new() -> Self {
        Self
    }

    /// Normalize one raw document.
    ///
    /// Mandatory checks run in strict order: identifier first, then text;
    /// the first violation rejects the document with its reason. URL, date,
    /// and taxonomy extraction can only degrade field values, never reject.
    /// The call is total: any JSON-compatible input produces a well-formed
    /// pair without panicking.
    pub fn process_document(&self, raw: &Value) -> (Option<QdrantDocument>, ProcessingReport) {
        let Some(external_id) = extract::extract_id(raw) else {
            tracing::debug!("Document rejected: missing identifier");
            return (None, ProcessingReport::rejected(RejectionReason::MissingId));
        };

        let text = sanitize::sanitize_text(&extract::extract_text(raw));
        if text.is_empty() {
            tracing::debug!(external_id = %external_id, "Document rejected: no textual content");
            return (
                None,
                ProcessingReport::rejected(RejectionReason::MissingText),
            );
        }

        let url = extract::extract_url(raw);
        let publish_date = extract::extract_date_candidates(raw)
            .into_iter()
            .find_map(sanitize::sanitize_date);

        let record = QdrantDocument {
            text,
            metadata: NormalizedMetadata {
                external_id,
                url,
                tags: sanitize::sanitize_list(extract::extract_tags(raw)),
                sections: sanitize::sanitize_list(extract::extract_sections(raw)),
                categories: sanitize::sanitize_list(extract::extract_categories(raw)),
                publish_date,
            },
        };

        debug_assert!(
            validate_record(&record).is_ok(),
            "transformer assembled an out-of-contract record"
        );

        (Some(record), ProcessingReport::accepted())
    }
}
