//! Discovery of raw sources under the knowledge root.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::types::{CONTRIBUTIONS_DIR, RawSource, SourceKind};

/// Input directories scanned by one ingestion run.
#[derive(Debug, Clone)]
pub struct SourceLayout {
    /// Root holding loose PDFs and the `contributions` folder.
    pub knowledge_dir: PathBuf,
    /// Optional directory of curated dialect vocabulary JSON files.
    pub dialects_dir: Option<PathBuf>,
}

impl SourceLayout {
    /// Layout without a dialects directory.
    pub fn new(knowledge_dir: impl Into<PathBuf>) -> Self {
        Self {
            knowledge_dir: knowledge_dir.into(),
            dialects_dir: None,
        }
    }

    /// Attach a dialects directory.
    pub fn with_dialects_dir(mut self, dialects_dir: impl Into<PathBuf>) -> Self {
        self.dialects_dir = Some(dialects_dir.into());
        self
    }

    /// Folder holding contribution sub-folders.
    pub fn contributions_dir(&self) -> PathBuf {
        self.knowledge_dir.join(CONTRIBUTIONS_DIR)
    }
}

/// Classify every raw source reachable from the layout.
///
/// Ordering is explicit: loose PDFs, then dialect files, then contribution folders, each branch
/// sorted by file name. Missing directories contribute nothing.
pub fn discover_sources(layout: &SourceLayout) -> Vec<RawSource> {
    let mut sources = Vec::new();

    for entry in list_children(&layout.knowledge_dir) {
        if entry.file_type().is_file() && has_extension(entry.path(), "pdf") {
            sources.push(raw_source(SourceKind::PdfFile, &entry, file_stem(entry.path())));
        }
    }

    if let Some(dialects_dir) = layout.dialects_dir.as_deref() {
        for entry in list_children(dialects_dir) {
            if entry.file_type().is_file() && has_extension(entry.path(), "json") {
                sources.push(raw_source(
                    SourceKind::DialectFile,
                    &entry,
                    file_stem(entry.path()),
                ));
            }
        }
    }

    for entry in list_children(&layout.contributions_dir()) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            tracing::debug!(folder = %name, "Skipping hidden contribution entry");
            continue;
        }
        if !entry.file_type().is_dir() {
            tracing::debug!(entry = %entry.path().display(), "Skipping non-directory contribution entry");
            continue;
        }
        sources.push(raw_source(SourceKind::ContributionFolder, &entry, name));
    }

    tracing::debug!(count = sources.len(), "Classified raw sources");
    sources
}

/// List PDFs directly inside a folder, sorted by file name.
pub(crate) fn list_pdfs(dir: &Path) -> Vec<PathBuf> {
    list_children(dir)
        .into_iter()
        .filter(|entry| entry.file_type().is_file() && has_extension(entry.path(), "pdf"))
        .map(DirEntry::into_path)
        .collect()
}

/// Immediate children of `dir`, sorted by file name, following symlinks.
///
/// A missing directory yields nothing; unreadable entries are logged and skipped.
fn list_children(dir: &Path) -> Vec<DirEntry> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "Directory absent; nothing to scan");
        return Vec::new();
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::warn!(dir = %dir.display(), %error, "Skipping unreadable entry");
                None
            }
        })
        .collect()
}

fn raw_source(kind: SourceKind, entry: &DirEntry, raw_name: String) -> RawSource {
    RawSource {
        kind,
        path: entry.path().to_path_buf(),
        raw_name,
    }
}

fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
