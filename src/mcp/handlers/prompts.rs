//! Handler for the `translate_to_accent` prompt.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError,
    model::{GetPromptResult, JsonObject, PromptMessage, PromptMessageRole},
};
use serde::Deserialize;

use crate::{
    ingest::{display_name, normalize},
    mcp::format::translation_prompt,
    store::KnowledgeStore,
};

use super::parse_arguments;

/// Arguments accepted by the `translate_to_accent` prompt.
#[derive(Debug, Deserialize)]
pub(crate) struct TranslatePromptArgs {
    /// Accent identifier or name.
    pub(crate) accent: String,
    /// Optional text to translate.
    #[serde(default)]
    pub(crate) content: Option<String>,
}

/// Render the translation prompt for the requested accent.
pub(crate) async fn handle_translate_prompt(
    store: &Arc<KnowledgeStore>,
    arguments: Option<JsonObject>,
) -> Result<GetPromptResult, McpError> {
    let args: TranslatePromptArgs = parse_arguments(arguments)?;
    let accent_id = normalize(&args.accent);
    if accent_id.is_empty() {
        return Err(McpError::invalid_params("`accent` must not be empty", None));
    }

    let accent_name = store
        .registry_entry(&accent_id)
        .map(|metadata| metadata.name.clone())
        .unwrap_or_else(|| format!("{} Arabic", display_name(&args.accent)));

    Ok(GetPromptResult {
        description: Some(format!("Translate content into {accent_name}")),
        messages: vec![PromptMessage::new_text(
            PromptMessageRole::User,
            translation_prompt(&accent_name, args.content.as_deref()),
        )],
    })
}
