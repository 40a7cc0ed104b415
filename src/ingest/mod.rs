//! Ingestion pipeline: source discovery, text extraction, identifier normalization, merging,
//! and persistence of the accent knowledge base.

pub mod classify;
pub mod dialects;
pub mod extract;
pub mod merge;
pub mod normalize;
mod service;
pub mod types;
pub mod writer;

pub use classify::{SourceLayout, discover_sources};
pub use extract::{PdfTextExtractor, TextExtractor, extract_source};
pub use merge::{AccentAggregate, AccentEntry};
pub use normalize::{display_name, normalize};
pub use service::{IngestService, RunSummary};
pub use types::{
    AccentId, AccentMetadata, DIVIDER, ExtractionError, ExtractionResult, FragmentBody,
    IngestError, MetadataError, RawSource, Registry, SourceFragment, SourceKind,
};
pub use writer::{WriteReport, write_store};
