//! Formatting helpers shared across MCP handlers and resources.

use rmcp::model::ResourceContents;
use schemars::JsonSchema;
use serde::Serialize;

use crate::store::KnowledgeBase;

pub(crate) const TEXT_MARKDOWN: &str = "text/markdown";

/// One accent as advertised to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub(crate) struct AccentSummary {
    /// Canonical accent identifier.
    pub(crate) id: String,
    /// Display name from the registry (or derived from the identifier).
    pub(crate) name: String,
    /// Registry description; empty when none was recorded.
    pub(crate) description: String,
}

/// Catalog returned by the `list_available_accents` tool.
#[derive(Debug, Serialize, JsonSchema)]
pub(crate) struct AccentCatalog {
    /// Accents in identifier order.
    pub(crate) accents: Vec<AccentSummary>,
    /// Number of accents.
    pub(crate) total: usize,
}

/// Summaries for every listed accent, sorted by identifier.
pub(crate) fn accent_summaries(store: &dyn KnowledgeBase) -> Vec<AccentSummary> {
    store
        .list()
        .into_iter()
        .map(|id| {
            let metadata = store.metadata(&id);
            AccentSummary {
                id,
                name: metadata.name,
                description: metadata.description,
            }
        })
        .collect()
}

/// Markdown catalog served by the `list` resource.
pub(crate) fn accent_catalog_markdown(summaries: &[AccentSummary], uri_prefix: &str) -> String {
    if summaries.is_empty() {
        return "No accents available. Run `accents-ingest` to generate accent data.".into();
    }

    let mut lines = vec!["# Available Arabic Accents\n".to_string()];
    for summary in summaries {
        lines.push(format!("- **{}** (`{}`)", summary.name, summary.id));
        if !summary.description.is_empty() {
            lines.push(format!("  {}", summary.description));
        }
    }
    lines.push(format!("\nTotal: {} accent(s)", summaries.len()));
    lines.push(format!(
        "\nUse `{uri_prefix}<accent_id>` to get the full content for an accent."
    ));
    lines.join("\n")
}

/// Human readable message for a lookup miss.
pub(crate) fn not_found_message(requested: &str, known_ids: &[String]) -> String {
    let available = if known_ids.is_empty() {
        "none".to_string()
    } else {
        known_ids.join(", ")
    };
    format!("Accent '{requested}' not found. Available accents: {available}")
}

/// Instruction text for the `translate_to_accent` prompt.
pub(crate) fn translation_prompt(accent_name: &str, content: Option<&str>) -> String {
    let mut lines = vec![
        format!("You are a translator specializing in {accent_name}."),
        format!("Use the vocabulary, phrases, and style from the {accent_name} accent library."),
        "Translate the following content naturally, preserving meaning while using authentic dialect expressions.".to_string(),
        String::new(),
    ];

    match content.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => {
            lines.push("Content to translate:".into());
            lines.push(text.to_string());
        }
        None => lines.push("Please provide the content you want translated.".into()),
    }

    lines.join("\n")
}

/// Build markdown resource contents for MCP resource responses.
pub(crate) fn markdown_resource_contents(uri: &str, text: String) -> ResourceContents {
    ResourceContents::TextResourceContents {
        uri: uri.to_string(),
        mime_type: Some(TEXT_MARKDOWN.into()),
        text,
        meta: None,
    }
}
