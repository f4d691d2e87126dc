//! Document normalization pipeline: extraction, sanitization, transformation,
//! and batch orchestration.

pub mod extract;
pub mod sanitize;
pub mod schema;
mod service;
mod transform;
pub mod types;

pub use schema::{SchemaViolation, validate_record};
pub use service::{BatchOutcome, PipelineService};
pub use transform::DocumentTransformer;
pub use types::{
    EmbeddedRecord, NormalizedMetadata, PipelineError, ProcessingReport, QdrantDocument,
    RejectionReason,
};
