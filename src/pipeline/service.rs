//! Batch orchestration: transform, embed, and zip records with their vectors.

use std::sync::Arc;

use serde_json::Value;

use crate::{
    embedding::EmbeddingClient,
    metrics::{MetricsSnapshot, PipelineMetrics},
    pipeline::{
        transform::DocumentTransformer,
        types::{EmbeddedRecord, PipelineError, ProcessingReport, QdrantDocument},
    },
};

/// Coordinates the full ingestion pipeline: per-document normalization
/// followed by one batched embedding call.
///
/// The service owns the embedding client and the metrics registry; construct
/// it once near process start and share it where needed.
pub struct PipelineService {
    embedding_client: Box<dyn EmbeddingClient + Send + Sync>,
    embedding_dimension: usize,
    transformer: DocumentTransformer,
    metrics: Arc<PipelineMetrics>,
}

impl PipelineService {
    /// Build a pipeline service around an embedding client producing vectors
    /// of `embedding_dimension`.
    pub fn new(
        embedding_client: Box<dyn EmbeddingClient + Send + Sync>,
        embedding_dimension: usize,
    ) -> Self {
        Self {
            embedding_client,
            embedding_dimension,
            transformer: DocumentTransformer::new(),
            metrics: Arc::new(PipelineMetrics::new()),
        }
    }

    /// Transform every raw document, preserving input order.
    ///
    /// Rejections are recorded in metrics and logged; they never interrupt
    /// the rest of the batch.
    pub fn transform_all(&self, docs: &[Value]) -> Vec<(Option<QdrantDocument>, ProcessingReport)> {
        docs.iter()
            .map(|doc| {
                let (record, report) = self.transformer.process_document(doc);
                self.metrics.record_document(report.accepted);
                if let Some(reason) = &report.reason {
                    tracing::info!(reason = %reason, "Document dropped");
                }
                (record, report)
            })
            .collect()
    }

    /// Transform a batch and attach embeddings to every surviving record.
    ///
    /// The embedding call is atomic: a provider failure discards the whole
    /// batch. Accepted records come back in the same relative order as their
    /// source documents.
    pub async fn process_batch(&self, docs: &[Value]) -> Result<BatchOutcome, PipelineError> {
        let outcomes = self.transform_all(docs);

        let reports: Vec<ProcessingReport> =
            outcomes.iter().map(|(_, report)| report.clone()).collect();
        let accepted: Vec<QdrantDocument> = outcomes
            .into_iter()
            .filter_map(|(record, _)| record)
            .collect();

        tracing::info!(
            total = docs.len(),
            accepted = accepted.len(),
            rejected = docs.len() - accepted.len(),
            "Batch transformed"
        );

        let records = if accepted.is_empty() {
            Vec::new()
        } else {
            let texts: Vec<String> = accepted
                .iter()
                .map(|record| record.text.clone())
                .collect();
            let embeddings = self.embedding_client.generate_embeddings(texts).await?;

            if embeddings.len() != accepted.len() {
                return Err(PipelineError::CountMismatch {
                    expected: accepted.len(),
                    actual: embeddings.len(),
                });
            }
            if let Some(vector) = embeddings.first() {
                if vector.len() != self.embedding_dimension {
                    return Err(PipelineError::DimensionMismatch {
                        expected: self.embedding_dimension,
                        actual: vector.len(),
                    });
                }
            }

            accepted
                .into_iter()
                .zip(embeddings)
                .map(|(record, embedding)| EmbeddedRecord {
                    text: record.text,
                    metadata: record.metadata,
                    embedding,
                })
                .collect()
        };

        Ok(BatchOutcome { records, reports })
    }

    /// Return the current metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// Result of one batch run.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Embedded records for accepted documents, in source order.
    pub records: Vec<EmbeddedRecord>,
    /// One report per input document, in source order.
    pub reports: Vec<ProcessingReport>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::EmbeddingClientError;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedClient {
        dimension: usize,
    }

    #[async_trait]
    impl EmbeddingClient for FixedClient {
        async fn generate_embeddings(
            &self,
            texts: Vec<String>,
        ) -> Result<Vec<Vec<f32>>, EmbeddingClientError> {
            Ok(texts.iter().map(|_| vec![0.5; self.dimension]).collect())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl EmbeddingClient for FailingClient {
        async fn generate_embeddings(
            &self,
            _texts: Vec<String>,
        ) -> Result<Vec<Vec<f32>>, EmbeddingClientError> {
            Err(EmbeddingClientError::UnexpectedStatus {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: "boom".into(),
            })
        }
    }

    fn doc(id: &str, body: &str) -> Value {
        json!({
            "_id": id,
            "content_elements": [{"type": "text", "content": body}],
        })
    }

    #[tokio::test]
    async fn batch_preserves_order_and_zips_vectors() {
        let service = PipelineService::new(Box::new(FixedClient { dimension: 4 }), 4);
        let docs = vec![
            doc("a", "Alpha body."),
            json!({"_id": null}),
            doc("c", "Charlie body."),
        ];

        let outcome = service.process_batch(&docs).await.expect("batch");
        assert_eq!(outcome.reports.len(), 3);
        assert!(outcome.reports[0].accepted);
        assert_eq!(outcome.reports[1].reason.as_deref(), Some("Missing ID"));
        assert!(outcome.reports[2].accepted);

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].metadata.external_id, "a");
        assert_eq!(outcome.records[1].metadata.external_id, "c");
        assert_eq!(outcome.records[0].embedding.len(), 4);

        let snapshot = service.metrics_snapshot();
        assert_eq!(snapshot.documents_processed, 3);
        assert_eq!(snapshot.documents_accepted, 2);
        assert_eq!(snapshot.documents_rejected, 1);
    }

    #[tokio::test]
    async fn embedding_failure_discards_whole_batch() {
        let service = PipelineService::new(Box::new(FailingClient), 4);
        let docs = vec![doc("a", "Alpha body.")];
        let error = service.process_batch(&docs).await.expect_err("failure");
        assert!(matches!(error, PipelineError::Embedding(_)));
    }

    #[tokio::test]
    async fn dimension_mismatch_is_reported() {
        let service = PipelineService::new(Box::new(FixedClient { dimension: 3 }), 1536);
        let docs = vec![doc("a", "Alpha body.")];
        let error = service.process_batch(&docs).await.expect_err("mismatch");
        assert!(matches!(
            error,
            PipelineError::DimensionMismatch {
                expected: 1536,
                actual: 3
            }
        ));
    }

    #[tokio::test]
    async fn all_rejected_batch_skips_embedding_call() {
        // FailingClient would error if the provider were contacted.
        let service = PipelineService::new(Box::new(FailingClient), 4);
        let docs = vec![json!({"_id": null}), json!({"_id": "x"})];
        let outcome = service.process_batch(&docs).await.expect("no call made");
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.reports.len(), 2);
    }
}
