//! Aggregation of fragments into one document and one registry entry per accent.

use indexmap::IndexMap;

use super::types::{AccentId, AccentMetadata, DIVIDER, Registry, SourceFragment};

/// Accumulated document body and the metadata registered for one accent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccentEntry {
    /// Metadata from the first fragment seen for the accent.
    pub metadata: AccentMetadata,
    /// Merged markdown body.
    pub body: String,
    /// Number of fragments merged into the body.
    pub fragments: usize,
}

/// Insertion-ordered aggregate for a single ingestion run.
///
/// Metadata is first-writer-wins; content from every fragment accumulates in arrival order.
#[derive(Debug, Default)]
pub struct AccentAggregate {
    entries: IndexMap<AccentId, AccentEntry>,
}

impl AccentAggregate {
    /// Create an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a fragment; returns `true` when it seeded a new accent.
    pub fn absorb(&mut self, fragment: SourceFragment) -> bool {
        let rendered = fragment.render();
        match self.entries.get_mut(&fragment.id) {
            Some(entry) => {
                entry.body.push_str(DIVIDER);
                entry.body.push_str(&rendered);
                entry.fragments += 1;
                tracing::debug!(
                    accent = %fragment.id,
                    origin = %fragment.origin.display(),
                    fragments = entry.fragments,
                    "Appended fragment to existing accent"
                );
                false
            }
            None => {
                tracing::debug!(
                    accent = %fragment.id,
                    origin = %fragment.origin.display(),
                    "Seeded new accent"
                );
                self.entries.insert(
                    fragment.id,
                    AccentEntry {
                        metadata: fragment.metadata,
                        body: rendered,
                        fragments: 1,
                    },
                );
                true
            }
        }
    }

    /// Look up the merged entry for an accent.
    pub fn get(&self, id: &AccentId) -> Option<&AccentEntry> {
        self.entries.get(id)
    }

    /// Number of distinct accents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no fragment has been absorbed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merged documents in first-seen order.
    pub fn documents(&self) -> impl Iterator<Item = (&AccentId, &str)> {
        self.entries
            .iter()
            .map(|(id, entry)| (id, entry.body.as_str()))
    }

    /// Registry built from the first metadata recorded for each accent.
    pub fn registry(&self) -> Registry {
        self.entries
            .iter()
            .map(|(id, entry)| (id.clone(), entry.metadata.clone()))
            .collect()
    }
}
