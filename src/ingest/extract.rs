//! Text extraction for each kind of raw source.
//!
//! Every failure here is soft: it is folded into [`ExtractionResult::Failed`] so one bad source
//! never halts the run.

use std::{io::ErrorKind, path::Path};

use async_trait::async_trait;
use serde::Deserialize;

use super::{
    classify::list_pdfs,
    dialects::{DialectVocabulary, render_vocabulary},
    normalize::display_name,
    types::{
        ACCENT_METADATA_FILE, AUTHORED_CONTENT_FILE, AccentId, AccentMetadata, DIVIDER,
        ExtractionError, ExtractionResult, FragmentBody, MetadataError, RawSource, SourceFragment,
        SourceKind,
    },
};

/// Capability that turns a document on disk into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the text layer of the document at `path`.
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// PDF text extraction backed by `pdf-extract`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ExtractionError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        // The parser is CPU bound and may panic on hostile input; a panic surfaces as JoinError.
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await?
            .map_err(|err| ExtractionError::Parse {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ExtractionError::Empty(path.to_path_buf()));
        }
        Ok(trimmed.to_string())
    }
}

/// Optional fields of a contribution's `accent.json`.
#[derive(Debug, Default, Deserialize)]
struct ContributionMetadata {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Extract one raw source into a fragment or a logged skip reason.
pub async fn extract_source(extractor: &dyn TextExtractor, source: &RawSource) -> ExtractionResult {
    match source.kind {
        SourceKind::PdfFile => extract_pdf_file(extractor, source).await,
        SourceKind::DialectFile => extract_dialect_file(source).await,
        SourceKind::ContributionFolder => extract_contribution(extractor, source).await,
    }
}

async fn extract_pdf_file(extractor: &dyn TextExtractor, source: &RawSource) -> ExtractionResult {
    let Some(id) = AccentId::from_raw(&source.raw_name) else {
        return ExtractionResult::failed(format!(
            "name '{}' yields an empty identifier",
            source.raw_name
        ));
    };

    tracing::info!(file = %source.path.display(), "Extracting PDF");
    let text = match extractor.extract(&source.path).await {
        Ok(text) => text,
        Err(err) => return ExtractionResult::failed(err),
    };

    let origin_name = file_name(&source.path);
    ExtractionResult::Extracted(SourceFragment {
        id,
        metadata: AccentMetadata::new(
            display_name(&source.raw_name),
            format!("Content extracted from {origin_name}"),
        ),
        body: FragmentBody::Extracted(text),
        origin: source.path.clone(),
    })
}

async fn extract_dialect_file(source: &RawSource) -> ExtractionResult {
    let raw = match tokio::fs::read_to_string(&source.path).await {
        Ok(raw) => raw,
        Err(err) => return ExtractionResult::failed(format!("failed to read: {err}")),
    };
    let vocabulary: DialectVocabulary = match serde_json::from_str(&raw) {
        Ok(vocabulary) => vocabulary,
        Err(err) => return ExtractionResult::failed(format!("malformed vocabulary: {err}")),
    };

    let dialect = vocabulary
        .dialect
        .as_deref()
        .map(str::trim)
        .filter(|dialect| !dialect.is_empty())
        .unwrap_or(&source.raw_name)
        .to_string();
    let Some(id) = AccentId::from_raw(&dialect) else {
        return ExtractionResult::failed(format!("dialect '{dialect}' yields an empty identifier"));
    };

    ExtractionResult::Extracted(SourceFragment {
        id,
        metadata: AccentMetadata::new(
            format!("{dialect} Arabic"),
            format!("Vocabulary for {dialect} dialect"),
        ),
        body: FragmentBody::Verbatim(render_vocabulary(&dialect, &vocabulary)),
        origin: source.path.clone(),
    })
}

async fn extract_contribution(
    extractor: &dyn TextExtractor,
    source: &RawSource,
) -> ExtractionResult {
    let dir = &source.path;
    let Some(id) = AccentId::from_raw(&source.raw_name) else {
        return ExtractionResult::failed(format!(
            "folder '{}' yields an empty identifier",
            source.raw_name
        ));
    };

    let declared = match read_contribution_metadata(dir).await {
        Ok(declared) => declared,
        Err(err) => return ExtractionResult::failed(err),
    };
    let metadata = AccentMetadata::new(
        non_empty(declared.name).unwrap_or_else(|| display_name(&source.raw_name)),
        non_empty(declared.description).unwrap_or_default(),
    );

    let authored_path = dir.join(AUTHORED_CONTENT_FILE);
    match tokio::fs::read_to_string(&authored_path).await {
        Ok(content) => {
            tracing::debug!(folder = %source.raw_name, "Using authored content");
            return ExtractionResult::Extracted(SourceFragment {
                id,
                metadata,
                body: FragmentBody::Verbatim(content),
                origin: authored_path,
            });
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            return ExtractionResult::failed(format!(
                "failed to read {AUTHORED_CONTENT_FILE}: {err}"
            ));
        }
    }

    let mut parts = Vec::new();
    for pdf in list_pdfs(dir) {
        tracing::info!(file = %pdf.display(), "Extracting contribution PDF");
        match extractor.extract(&pdf).await {
            Ok(text) => parts.push(text),
            Err(error) => tracing::warn!(%error, "Skipping contribution PDF"),
        }
    }

    if parts.is_empty() {
        return ExtractionResult::failed(format!(
            "no {AUTHORED_CONTENT_FILE} or extractable PDFs"
        ));
    }

    ExtractionResult::Extracted(SourceFragment {
        id,
        metadata,
        body: FragmentBody::Extracted(parts.join(DIVIDER)),
        origin: dir.clone(),
    })
}

async fn read_contribution_metadata(dir: &Path) -> Result<ContributionMetadata, MetadataError> {
    let raw = match tokio::fs::read_to_string(dir.join(ACCENT_METADATA_FILE)).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Err(MetadataError::Missing),
        Err(err) => return Err(err.into()),
    };
    Ok(serde_json::from_str(&raw)?)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|input| {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Reads fixture files as UTF-8 so PDF code paths run without real PDFs.
    pub(crate) struct PlainTextExtractor;

    #[async_trait]
    impl TextExtractor for PlainTextExtractor {
        async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ExtractionError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
            if text.trim().is_empty() {
                return Err(ExtractionError::Empty(path.to_path_buf()));
            }
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::PlainTextExtractor;
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn contribution(dir: &Path, name: &str) -> RawSource {
        RawSource {
            kind: SourceKind::ContributionFolder,
            path: dir.join(name),
            raw_name: name.to_string(),
        }
    }

    fn expect_fragment(result: ExtractionResult) -> SourceFragment {
        match result {
            ExtractionResult::Extracted(fragment) => fragment,
            ExtractionResult::Failed { reason } => panic!("expected fragment, got: {reason}"),
        }
    }

    #[tokio::test]
    async fn authored_content_wins_over_pdfs() {
        let dir = TempDir::new().expect("tempdir");
        let folder = dir.path().join("emirati");
        fs::create_dir_all(&folder).expect("folder");
        fs::write(
            folder.join("accent.json"),
            r#"{"name":"Emirati","description":"Gulf dialect"}"#,
        )
        .expect("meta");
        fs::write(folder.join("content.md"), "Marhaba").expect("content");
        fs::write(folder.join("extra.pdf"), "ignored pdf text").expect("pdf");

        let source = contribution(dir.path(), "emirati");
        let fragment = expect_fragment(extract_source(&PlainTextExtractor, &source).await);
        assert_eq!(fragment.id.as_str(), "emirati");
        assert_eq!(fragment.metadata, AccentMetadata::new("Emirati", "Gulf dialect"));
        assert_eq!(fragment.body, FragmentBody::Verbatim("Marhaba".into()));
    }

    #[tokio::test]
    async fn missing_metadata_skips_folder_even_with_pdfs() {
        let dir = TempDir::new().expect("tempdir");
        let folder = dir.path().join("iraqi");
        fs::create_dir_all(&folder).expect("folder");
        fs::write(folder.join("notes.pdf"), "Shlonak").expect("pdf");

        let result = extract_source(&PlainTextExtractor, &contribution(dir.path(), "iraqi")).await;
        match result {
            ExtractionResult::Failed { reason } => assert!(reason.contains("accent.json")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_metadata_is_a_soft_failure() {
        let dir = TempDir::new().expect("tempdir");
        let folder = dir.path().join("sudanese");
        fs::create_dir_all(&folder).expect("folder");
        fs::write(folder.join("accent.json"), "{ not json").expect("meta");
        fs::write(folder.join("content.md"), "text").expect("content");

        let source = contribution(dir.path(), "sudanese");
        let result = extract_source(&PlainTextExtractor, &source).await;
        assert!(!result.is_ok());
    }

    #[tokio::test]
    async fn contribution_pdfs_are_joined_under_one_heading() {
        let dir = TempDir::new().expect("tempdir");
        let folder = dir.path().join("najdi");
        fs::create_dir_all(&folder).expect("folder");
        fs::write(folder.join("accent.json"), r#"{"description":"Central Arabia"}"#).expect("meta");
        fs::write(folder.join("b.pdf"), "second").expect("b");
        fs::write(folder.join("a.pdf"), "first").expect("a");
        fs::write(folder.join("c.pdf"), "   ").expect("empty");

        let source = contribution(dir.path(), "najdi");
        let fragment = expect_fragment(extract_source(&PlainTextExtractor, &source).await);
        assert_eq!(fragment.metadata, AccentMetadata::new("Najdi", "Central Arabia"));
        assert_eq!(
            fragment.render(),
            "# Najdi\n\nCentral Arabia\n\n---\n\nfirst\n\n---\n\nsecond"
        );
    }

    #[tokio::test]
    async fn folder_without_any_text_is_skipped() {
        let dir = TempDir::new().expect("tempdir");
        let folder = dir.path().join("empty");
        fs::create_dir_all(&folder).expect("folder");
        fs::write(folder.join("accent.json"), r#"{"name":"Empty"}"#).expect("meta");

        let result = extract_source(&PlainTextExtractor, &contribution(dir.path(), "empty")).await;
        assert!(!result.is_ok());
    }

    #[tokio::test]
    async fn bare_pdf_gets_default_metadata() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("levantine-arabic.pdf");
        fs::write(&path, "Hello").expect("pdf");
        let source = RawSource {
            kind: SourceKind::PdfFile,
            path,
            raw_name: "levantine-arabic".into(),
        };

        let fragment = expect_fragment(extract_source(&PlainTextExtractor, &source).await);
        assert_eq!(fragment.id.as_str(), "levantine-arabic");
        assert_eq!(fragment.metadata.name, "Levantine Arabic");
        assert_eq!(
            fragment.metadata.description,
            "Content extracted from levantine-arabic.pdf"
        );
        assert!(fragment.render().starts_with("# Levantine Arabic\n"));
        assert!(fragment.render().ends_with("Hello"));
    }

    #[tokio::test]
    async fn unreadable_pdf_is_reported_not_raised() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"definitely not a pdf").expect("pdf");
        let source = RawSource {
            kind: SourceKind::PdfFile,
            path,
            raw_name: "broken".into(),
        };

        let result = extract_source(&PdfTextExtractor, &source).await;
        assert!(!result.is_ok());
    }

    #[tokio::test]
    async fn dialect_file_renders_vocabulary() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("khaleeji.json");
        fs::write(
            &path,
            r#"{"dialect":"Gulf","terms":[{"word":"zain","meaning":"good"}]}"#,
        )
        .expect("json");
        let source = RawSource {
            kind: SourceKind::DialectFile,
            path,
            raw_name: "khaleeji".into(),
        };

        let fragment = expect_fragment(extract_source(&PlainTextExtractor, &source).await);
        assert_eq!(fragment.id.as_str(), "gulf");
        assert_eq!(fragment.metadata.name, "Gulf Arabic");
        assert!(fragment.render().contains("### zain"));
    }
}
