//! Persistence of merged documents and the registry.

use std::{
    collections::{BTreeSet, HashSet},
    io::ErrorKind,
    path::Path,
};

use super::{
    merge::AccentAggregate,
    types::{AccentId, IngestError, REGISTRY_FILE, Registry},
};

/// Outcome of persisting one aggregate.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Accents whose document was written.
    pub written: Vec<AccentId>,
    /// Accents whose document failed to write, with the error message.
    pub failed: Vec<(AccentId, String)>,
    /// Whether `accents.json` was written.
    pub registry_written: bool,
    /// Documents from the previous registry that this run removed.
    pub pruned: Vec<String>,
}

/// Write every merged document plus the registry into `out_dir`.
///
/// Creating `out_dir` is the only fatal step. Individual write failures are logged and recorded
/// while the remaining outputs are still attempted. Documents listed in the previous
/// `accents.json` but not written by this run are removed; files the pipeline never recorded
/// are left alone.
pub async fn write_store(
    out_dir: &Path,
    aggregate: &AccentAggregate,
) -> Result<WriteReport, IngestError> {
    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|source| IngestError::OutputRoot {
            path: out_dir.to_path_buf(),
            source,
        })?;

    let registry_path = out_dir.join(REGISTRY_FILE);
    let previous_ids = previous_registry_ids(&registry_path).await;
    let mut report = WriteReport::default();

    for (id, body) in aggregate.documents() {
        let path = out_dir.join(id.document_file_name());
        match tokio::fs::write(&path, body).await {
            Ok(()) => {
                tracing::info!(file = %path.display(), "Wrote accent document");
                report.written.push(id.clone());
            }
            Err(error) => {
                tracing::error!(accent = %id, file = %path.display(), %error, "Failed to write accent document");
                report.failed.push((id.clone(), error.to_string()));
            }
        }
    }

    match serde_json::to_string_pretty(&aggregate.registry()) {
        Ok(json) => match tokio::fs::write(&registry_path, json).await {
            Ok(()) => {
                tracing::info!(file = %registry_path.display(), "Wrote registry");
                report.registry_written = true;
            }
            Err(error) => {
                tracing::error!(file = %registry_path.display(), %error, "Failed to write registry");
            }
        },
        Err(error) => tracing::error!(%error, "Failed to serialize registry"),
    }

    report.pruned = prune_stale_documents(out_dir, previous_ids, &report.written).await;
    Ok(report)
}

/// Identifiers recorded by the previous run's registry, if one exists and parses.
async fn previous_registry_ids(path: &Path) -> BTreeSet<AccentId> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return BTreeSet::new(),
        Err(error) => {
            tracing::warn!(file = %path.display(), %error, "Unable to read previous registry; nothing will be pruned");
            return BTreeSet::new();
        }
    };
    match serde_json::from_str::<Registry>(&raw) {
        Ok(registry) => registry.into_keys().collect(),
        Err(error) => {
            tracing::warn!(file = %path.display(), %error, "Previous registry is malformed; nothing will be pruned");
            BTreeSet::new()
        }
    }
}

async fn prune_stale_documents(
    out_dir: &Path,
    previous: BTreeSet<AccentId>,
    written: &[AccentId],
) -> Vec<String> {
    let keep: HashSet<&AccentId> = written.iter().collect();
    let mut pruned = Vec::new();

    for id in previous.iter().filter(|id| !keep.contains(id)) {
        // Registry keys are read back from disk; only canonical slugs map to a document name.
        if AccentId::from_raw(id.as_str()).as_ref() != Some(id) {
            continue;
        }
        let name = id.document_file_name();
        let path = out_dir.join(&name);
        let is_file = tokio::fs::symlink_metadata(&path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(file = %name, "Removed stale accent document");
                pruned.push(name);
            }
            Err(error) => tracing::warn!(file = %name, %error, "Failed to remove stale document"),
        }
    }

    pruned
}
