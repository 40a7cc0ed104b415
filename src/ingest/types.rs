//! Core data types and error definitions for the ingestion pipeline.

use std::{collections::BTreeMap, fmt, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::normalize::normalize;

/// Separator placed between fragments that share an accent document.
pub const DIVIDER: &str = "\n\n---\n\n";
/// Name of the folder under the knowledge root that holds contribution folders.
pub const CONTRIBUTIONS_DIR: &str = "contributions";
/// Mandatory metadata file inside a contribution folder.
pub const ACCENT_METADATA_FILE: &str = "accent.json";
/// Authored document that takes precedence over PDFs inside a contribution folder.
pub const AUTHORED_CONTENT_FILE: &str = "content.md";
/// File name of the persisted registry.
pub const REGISTRY_FILE: &str = "accents.json";

/// Aggregated registry persisted as `accents.json`.
pub type Registry = BTreeMap<AccentId, AccentMetadata>;

/// Kind of raw input discovered on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Loose PDF directly under the knowledge root.
    PdfFile,
    /// Curated vocabulary JSON file.
    DialectFile,
    /// Folder under `contributions/` carrying `accent.json` plus content.
    ContributionFolder,
}

/// Descriptor of one discovered filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSource {
    /// Classification of the entry.
    pub kind: SourceKind,
    /// Absolute or root-relative path of the entry.
    pub path: PathBuf,
    /// File stem or folder name used to derive the accent identifier.
    pub raw_name: String,
}

/// Canonical accent identifier: a non-empty slug matching `[a-z0-9-]+`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccentId(String);

impl AccentId {
    /// Normalize a raw name into an identifier; `None` when nothing survives normalization.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let slug = normalize(raw);
        if slug.is_empty() { None } else { Some(Self(slug)) }
    }

    /// Borrow the slug.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the persisted document for this identifier.
    pub fn document_file_name(&self) -> String {
        format!("{}.md", self.0)
    }
}

impl fmt::Display for AccentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Display metadata recorded in the registry for one accent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccentMetadata {
    /// Human readable accent name.
    pub name: String,
    /// Short description of the accent or its source material.
    #[serde(default)]
    pub description: String,
}

impl AccentMetadata {
    /// Construct metadata from its parts.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Read-side fallback for identifiers missing from the registry.
    pub fn fallback(id: &str) -> Self {
        let mut chars = id.chars();
        let name = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Self::new(name, "")
    }
}

/// Body of a fragment before it is merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentBody {
    /// Markdown written as-is (authored `content.md`, rendered vocabulary).
    Verbatim(String),
    /// Raw extracted text wrapped under a heading built from the fragment metadata.
    Extracted(String),
}

/// Successfully extracted content destined for one accent document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFragment {
    /// Target accent identifier.
    pub id: AccentId,
    /// Explicit or defaulted metadata supplied by the source.
    pub metadata: AccentMetadata,
    /// Fragment content.
    pub body: FragmentBody,
    /// Path of the source the fragment came from.
    pub origin: PathBuf,
}

impl SourceFragment {
    /// Render the fragment as the markdown block appended to its accent document.
    pub fn render(&self) -> String {
        match &self.body {
            FragmentBody::Verbatim(text) => text.clone(),
            FragmentBody::Extracted(text) => format!(
                "# {name}\n\n{description}{DIVIDER}{text}",
                name = self.metadata.name,
                description = self.metadata.description,
            ),
        }
    }
}

/// Outcome of extracting one raw source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    /// The source produced a usable fragment.
    Extracted(SourceFragment),
    /// The source was skipped; the run continues.
    Failed {
        /// Human readable reason logged for the skip.
        reason: String,
    },
}

impl ExtractionResult {
    /// Build a failed result from any displayable reason.
    pub fn failed(reason: impl fmt::Display) -> Self {
        Self::Failed {
            reason: reason.to_string(),
        }
    }

    /// Whether extraction produced a fragment.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Extracted(_))
    }
}

/// Errors raised while pulling text out of a single file.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The PDF parser rejected the document.
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// Document that failed to parse.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },
    /// The document parsed but yielded no text.
    #[error("no extractable text in {0}")]
    Empty(PathBuf),
    /// The blocking extraction task panicked or was cancelled.
    #[error("extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Errors raised while reading per-source metadata files.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The mandatory metadata file is absent.
    #[error("no {ACCENT_METADATA_FILE}")]
    Missing,
    /// The metadata file could not be read.
    #[error("failed to read {ACCENT_METADATA_FILE}: {0}")]
    Read(#[from] std::io::Error),
    /// The metadata file is not valid JSON of the expected shape.
    #[error("malformed {ACCENT_METADATA_FILE}: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Fatal pipeline errors that abort a run.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The output root could not be created.
    #[error("failed to create output directory {path}: {source}")]
    OutputRoot {
        /// Output directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
