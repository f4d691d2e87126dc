//! Structural contract enforced on every assembled output record.
//!
//! The transformer satisfies this contract by construction; the validator
//! exists to catch constructor defects, not to filter records at runtime.

use crate::pipeline::types::QdrantDocument;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Canonical ISO-8601 UTC pattern for `publish_date`, fractional seconds
/// optional.
const PUBLISH_DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?Z$";

/// Violations of the output record contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaViolation {
    /// `text` was empty after trimming.
    #[error("record text must be a non-empty string")]
    EmptyText,
    /// `metadata.external_id` was empty after trimming.
    #[error("metadata external_id must be a non-empty string")]
    EmptyExternalId,
    /// `metadata.url` was present but not http(s)-absolute.
    #[error("metadata url must start with an http(s) scheme: {0}")]
    InvalidUrl(String),
    /// `metadata.publish_date` was present but not canonical ISO-8601 UTC.
    #[error("metadata publish_date must match canonical ISO-8601 UTC: {0}")]
    InvalidPublishDate(String),
}

fn publish_date_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(PUBLISH_DATE_PATTERN).expect("valid date pattern"))
}

/// Validate a record against the output contract.
pub fn validate_record(record: &QdrantDocument) -> Result<(), SchemaViolation> {
    if record.text.trim().is_empty() {
        return Err(SchemaViolation::EmptyText);
    }
    if record.metadata.external_id.trim().is_empty() {
        return Err(SchemaViolation::EmptyExternalId);
    }
    if let Some(url) = &record.metadata.url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SchemaViolation::InvalidUrl(url.clone()));
        }
    }
    if let Some(date) = &record.metadata.publish_date {
        if !publish_date_regex().is_match(date) {
            return Err(SchemaViolation::InvalidPublishDate(date.clone()));
        }
    }
    Ok(())
}
