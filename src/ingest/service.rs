//! Ingestion service coordinating discovery, extraction, merging, and persistence.

use std::path::{Path, PathBuf};

use crate::metrics::{IngestMetrics, MetricsSnapshot};

use super::{
    classify::{SourceLayout, discover_sources},
    extract::{PdfTextExtractor, TextExtractor, extract_source},
    merge::AccentAggregate,
    types::{ExtractionResult, IngestError},
    writer::{WriteReport, write_store},
};

/// Summary of one completed ingestion run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Output directory the run wrote into.
    pub data_dir: PathBuf,
    /// Distinct accents produced by the merge step.
    pub accents: usize,
    /// Per-output write results.
    pub report: WriteReport,
    /// Counters collected during the run.
    pub metrics: MetricsSnapshot,
}

impl RunSummary {
    /// Number of accent documents that made it to disk.
    pub fn documents_written(&self) -> usize {
        self.report.written.len()
    }
}

/// Runs the full ingestion pipeline as one sequential pass.
///
/// Sources are processed one at a time; extraction is awaited before its fragment is merged, so
/// the aggregate never needs synchronization. Every run recomputes the whole output set.
pub struct IngestService {
    extractor: Box<dyn TextExtractor>,
}

impl Default for IngestService {
    fn default() -> Self {
        Self::new()
    }
}

impl IngestService {
    /// Build a service that extracts PDFs with `pdf-extract`.
    pub fn new() -> Self {
        Self::with_extractor(Box::new(PdfTextExtractor))
    }

    /// Build a service around a custom text extractor.
    pub fn with_extractor(extractor: Box<dyn TextExtractor>) -> Self {
        Self { extractor }
    }

    /// Discover, extract, and merge every source without writing anything.
    pub async fn collect(&self, layout: &SourceLayout, metrics: &IngestMetrics) -> AccentAggregate {
        let sources = discover_sources(layout);
        metrics.record_discovered(sources.len() as u64);
        tracing::info!(
            knowledge_dir = %layout.knowledge_dir.display(),
            sources = sources.len(),
            "Discovered raw sources"
        );

        let mut aggregate = AccentAggregate::new();
        for source in &sources {
            match extract_source(self.extractor.as_ref(), source).await {
                ExtractionResult::Extracted(fragment) => {
                    aggregate.absorb(fragment);
                    metrics.record_merged();
                }
                ExtractionResult::Failed { reason } => {
                    tracing::warn!(
                        source = %source.path.display(),
                        kind = ?source.kind,
                        reason = %reason,
                        "Skipping source"
                    );
                    metrics.record_skipped();
                }
            }
        }
        aggregate
    }

    /// Run the pipeline end to end, replacing the contents of `data_dir`.
    pub async fn run(
        &self,
        layout: &SourceLayout,
        data_dir: &Path,
    ) -> Result<RunSummary, IngestError> {
        let metrics = IngestMetrics::new();
        let aggregate = self.collect(layout, &metrics).await;

        tracing::info!(
            accents = aggregate.len(),
            data_dir = %data_dir.display(),
            "Writing accent documents"
        );
        let report = write_store(data_dir, &aggregate).await?;
        metrics.record_writes(report.written.len() as u64, report.failed.len() as u64);

        let snapshot = metrics.snapshot();
        tracing::info!(
            documents = snapshot.documents_written,
            skipped_sources = snapshot.sources_skipped,
            failed_writes = snapshot.write_failures,
            registry_written = report.registry_written,
            pruned = report.pruned.len(),
            "Ingestion complete"
        );

        Ok(RunSummary {
            data_dir: data_dir.to_path_buf(),
            accents: aggregate.len(),
            report,
            metrics: snapshot,
        })
    }
}
