//! Handlers for the accent lookup tools.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, JsonObject},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    mcp::format::{AccentCatalog, accent_summaries, not_found_message},
    store::{KnowledgeBase, KnowledgeStore, Lookup},
};

use super::parse_arguments;

/// Request payload for the `get_accent_content` tool.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct GetAccentRequest {
    /// Accent identifier; sanitized before lookup.
    pub(crate) accent_id: String,
}

/// Handle the `get_accent_content` tool, returning the markdown body of one accent.
///
/// A missing accent is reported in the structured payload rather than as a protocol error so
/// clients can recover using `knownIds`.
pub(crate) async fn handle_get_accent(
    store: &Arc<KnowledgeStore>,
    arguments: Option<JsonObject>,
) -> Result<CallToolResult, McpError> {
    let args: GetAccentRequest = parse_arguments(arguments)?;
    if args.accent_id.trim().is_empty() {
        return Err(McpError::invalid_params(
            "`accent_id` must not be empty",
            None,
        ));
    }

    match store.get(&args.accent_id) {
        Lookup::Found { id, body } => {
            let name = store.metadata(&id).name;
            Ok(CallToolResult::structured(json!({
                "found": true,
                "accentId": id,
                "name": name,
                "content": body,
            })))
        }
        Lookup::NotFound {
            requested,
            known_ids,
        } => {
            tracing::debug!(accent_id = %requested, "Accent lookup missed");
            let message = not_found_message(&requested, &known_ids);
            Ok(CallToolResult::structured(json!({
                "found": false,
                "accentId": requested,
                "knownIds": known_ids,
                "message": message,
            })))
        }
    }
}

/// Handle the `list_available_accents` tool.
pub(crate) async fn handle_list_accents(
    store: &Arc<KnowledgeStore>,
) -> Result<CallToolResult, McpError> {
    let accents = accent_summaries(store.as_ref());
    let catalog = AccentCatalog {
        total: accents.len(),
        accents,
    };
    let payload = serde_json::to_value(&catalog)
        .map_err(|err| McpError::internal_error(err.to_string(), None))?;
    Ok(CallToolResult::structured(payload))
}
