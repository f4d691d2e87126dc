use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing pipeline activity.
#[derive(Default)]
pub struct PipelineMetrics {
    documents_processed: AtomicU64,
    documents_accepted: AtomicU64,
    documents_rejected: AtomicU64,
}

impl PipelineMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a single document transformation.
    pub fn record_document(&self, accepted: bool) {
        self.documents_processed.fetch_add(1, Ordering::Relaxed);
        if accepted {
            self.documents_accepted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.documents_rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_processed: self.documents_processed.load(Ordering::Relaxed),
            documents_accepted: self.documents_accepted.load(Ordering::Relaxed),
            documents_rejected: self.documents_rejected.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of pipeline counters used for reporting.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of raw documents seen since startup.
    pub documents_processed: u64,
    /// Documents that produced an output record.
    pub documents_accepted: u64,
    /// Documents dropped with a rejection reason.
    pub documents_rejected: u64,
}
