use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing one ingestion run.
#[derive(Default)]
pub struct IngestMetrics {
    sources_discovered: AtomicU64,
    sources_skipped: AtomicU64,
    fragments_merged: AtomicU64,
    documents_written: AtomicU64,
    write_failures: AtomicU64,
}

impl IngestMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the number of raw sources the classifier produced.
    pub fn record_discovered(&self, count: u64) {
        self.sources_discovered.fetch_add(count, Ordering::Relaxed);
    }

    /// Record a source or folder that was skipped after a soft failure.
    pub fn record_skipped(&self) {
        self.sources_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a fragment absorbed by the merge engine.
    pub fn record_merged(&self) {
        self.fragments_merged.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of the store writer.
    pub fn record_writes(&self, written: u64, failed: u64) {
        self.documents_written.fetch_add(written, Ordering::Relaxed);
        self.write_failures.fetch_add(failed, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sources_discovered: self.sources_discovered.load(Ordering::Relaxed),
            sources_skipped: self.sources_skipped.load(Ordering::Relaxed),
            fragments_merged: self.fragments_merged.load(Ordering::Relaxed),
            documents_written: self.documents_written.load(Ordering::Relaxed),
            write_failures: self.write_failures.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of ingestion counters used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Raw sources found by the classifier.
    pub sources_discovered: u64,
    /// Sources or folders skipped after a soft failure.
    pub sources_skipped: u64,
    /// Fragments merged into the aggregate.
    pub fragments_merged: u64,
    /// Documents persisted to the output directory.
    pub documents_written: u64,
    /// Documents whose write failed.
    pub write_failures: u64,
}
