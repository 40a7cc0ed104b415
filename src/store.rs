//! Read-side knowledge store over the ingestion output.
//!
//! The store is loaded once at startup and never mutated afterwards, so a single value can be
//! shared behind an `Arc` by every concurrent lookup.

use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::ingest::{AccentMetadata, normalize, types::REGISTRY_FILE};

/// Errors raised while loading the persisted knowledge base.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data directory exists but could not be scanned.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result of looking up an accent document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The document exists.
    Found {
        /// Sanitized identifier that matched.
        id: String,
        /// Markdown body.
        body: String,
    },
    /// No document matched; `known_ids` lists every valid identifier.
    NotFound {
        /// Sanitized identifier that was requested.
        requested: String,
        /// Identifiers available in the store.
        known_ids: Vec<String>,
    },
}

/// Read contract exposed to serving façades.
pub trait KnowledgeBase: Send + Sync {
    /// Identifiers of every document present at load time, sorted.
    fn list(&self) -> Vec<String>;

    /// Sanitize `id` with the identifier normalizer and look up its document.
    fn get(&self, id: &str) -> Lookup;

    /// Registry metadata for `id`, or a fallback derived from the identifier.
    fn metadata(&self, id: &str) -> AccentMetadata;
}

/// Immutable snapshot of accent documents and registry metadata.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    documents: BTreeMap<String, String>,
    registry: BTreeMap<String, AccentMetadata>,
}

impl KnowledgeStore {
    /// Load every `<id>.md` document and the `accents.json` registry from `data_dir`.
    ///
    /// A missing directory yields an empty store. A document that cannot be read is logged and
    /// left out of `list()`. A missing or malformed registry is logged and treated as empty;
    /// documents are still served.
    pub async fn load(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref();
        let documents = load_documents(data_dir).await?;
        let registry = load_registry(&data_dir.join(REGISTRY_FILE)).await;
        tracing::info!(
            data_dir = %data_dir.display(),
            documents = documents.len(),
            registry_entries = registry.len(),
            "Loaded knowledge store"
        );
        Ok(Self {
            documents,
            registry,
        })
    }

    /// Build a store from in-memory parts.
    pub fn from_parts(
        documents: BTreeMap<String, String>,
        registry: BTreeMap<String, AccentMetadata>,
    ) -> Self {
        Self {
            documents,
            registry,
        }
    }

    /// Number of documents available.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Registry entry recorded for `id`, without any fallback.
    pub fn registry_entry(&self, id: &str) -> Option<&AccentMetadata> {
        self.registry.get(id)
    }
}

impl KnowledgeBase for KnowledgeStore {
    fn list(&self) -> Vec<String> {
        self.documents.keys().cloned().collect()
    }

    fn get(&self, id: &str) -> Lookup {
        let requested = normalize(id);
        match self.documents.get(&requested) {
            Some(body) => Lookup::Found {
                id: requested,
                body: body.clone(),
            },
            None => Lookup::NotFound {
                requested,
                known_ids: self.list(),
            },
        }
    }

    fn metadata(&self, id: &str) -> AccentMetadata {
        self.registry
            .get(id)
            .cloned()
            .unwrap_or_else(|| AccentMetadata::fallback(id))
    }
}

async fn load_documents(data_dir: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    let read_error = |path: &Path, source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut documents = BTreeMap::new();
    let mut entries = match tokio::fs::read_dir(data_dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::warn!(data_dir = %data_dir.display(), "Data directory missing; store is empty");
            return Ok(documents);
        }
        Err(err) => return Err(read_error(data_dir, err)),
    };

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|err| read_error(data_dir, err))?
    {
        let path = entry.path();
        let Some(id) = document_id(&path) else {
            continue;
        };
        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => {
                documents.insert(id, body);
            }
            Err(error) => {
                tracing::warn!(file = %path.display(), %error, "Skipping unreadable accent document");
            }
        }
    }

    Ok(documents)
}

/// Identifier for a `<id>.md` path whose stem is already a canonical slug.
fn document_id(path: &Path) -> Option<String> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() || normalize(stem) != stem {
        tracing::debug!(file = %path.display(), "Ignoring non-canonical document name");
        return None;
    }
    Some(stem.to_string())
}

async fn load_registry(path: &Path) -> BTreeMap<String, AccentMetadata> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return BTreeMap::new(),
        Err(error) => {
            tracing::warn!(file = %path.display(), %error, "Failed to read registry");
            return BTreeMap::new();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|error| {
        tracing::warn!(file = %path.display(), %error, "Malformed registry ignored");
        BTreeMap::new()
    })
}
