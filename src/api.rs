//! HTTP surface for the Arabic accents knowledge base.
//!
//! This module exposes a compact Axum router with a handful of endpoints:
//!
//! - `GET /accents` – List every accent with its registry name and description.
//! - `GET /accents/:id` – Return the markdown document for one accent, or a 404 JSON body that
//!   lists the known identifiers.
//! - `GET /commands` – Machine-readable command catalog for quick discovery by tools/hosts.
//!
//! The HTTP surface reads the same store as the MCP server, so lookups behave identically across
//! interfaces.

use crate::store::{KnowledgeBase, Lookup};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;

/// Build the HTTP router exposing the read-only accent API.
pub fn create_router<S>(store: Arc<S>) -> Router
where
    S: KnowledgeBase + 'static,
{
    Router::new()
        .route("/accents", get(list_accents::<S>))
        .route("/accents/:id", get(get_accent::<S>))
        .route("/commands", get(get_commands))
        .with_state(store)
}

/// One entry of the `GET /accents` response.
#[derive(Serialize)]
struct AccentEntry {
    id: String,
    name: String,
    description: String,
}

/// Response body for `GET /accents`.
#[derive(Serialize)]
struct AccentsResponse {
    accents: Vec<AccentEntry>,
}

/// List accents present in the store, sorted by identifier.
async fn list_accents<S>(State(store): State<Arc<S>>) -> Json<AccentsResponse>
where
    S: KnowledgeBase,
{
    let accents = store
        .list()
        .into_iter()
        .map(|id| {
            let metadata = store.metadata(&id);
            AccentEntry {
                id,
                name: metadata.name,
                description: metadata.description,
            }
        })
        .collect();
    Json(AccentsResponse { accents })
}

/// Response body for a lookup miss.
#[derive(Serialize)]
struct NotFoundResponse {
    error: String,
    known_ids: Vec<String>,
}

/// Return the markdown document for one accent.
async fn get_accent<S>(State(store): State<Arc<S>>, Path(id): Path<String>) -> Response
where
    S: KnowledgeBase,
{
    match store.get(&id) {
        Lookup::Found { body, .. } => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            body,
        )
            .into_response(),
        Lookup::NotFound {
            requested,
            known_ids,
        } => {
            tracing::debug!(accent_id = %requested, "Accent lookup missed");
            (
                StatusCode::NOT_FOUND,
                Json(NotFoundResponse {
                    error: format!("Accent '{requested}' not found"),
                    known_ids,
                }),
            )
                .into_response()
        }
    }
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery/UX in hosts and tools.
async fn get_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "list_accents",
                method: "GET",
                path: "/accents",
                description: "Return { \"accents\": [{ \"id\", \"name\", \"description\" }] } for every accent in the knowledge base.",
            },
            CommandDescriptor {
                name: "get_accent",
                method: "GET",
                path: "/accents/:id",
                description: "Return the markdown document for one accent; 404 with the known ids when it does not exist.",
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::{create_router, get_commands};
    use crate::ingest::AccentMetadata;
    use crate::store::KnowledgeStore;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn store() -> Arc<KnowledgeStore> {
        let documents = BTreeMap::from([
            ("emirati".to_string(), "# Emirati\n\nMarhaba".to_string()),
            ("levantine-arabic".to_string(), "# Levantine".to_string()),
        ]);
        let registry = BTreeMap::from([(
            "emirati".to_string(),
            AccentMetadata::new("Emirati Arabic", "Gulf dialect"),
        )]);
        Arc::new(KnowledgeStore::from_parts(documents, registry))
    }

    async fn send(uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = create_router(store())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router response");
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, content_type, body.to_vec())
    }

    #[tokio::test]
    async fn commands_catalog_exposes_accent_endpoints() {
        let commands = get_commands().await.0.commands;
        let get_accent = commands
            .iter()
            .find(|cmd| cmd.name == "get_accent")
            .expect("get_accent command present");
        assert_eq!(get_accent.method, "GET");
        assert_eq!(get_accent.path, "/accents/:id");
        assert_eq!(commands.len(), 2);
    }

    #[tokio::test]
    async fn list_route_returns_registry_metadata() {
        let (status, _, body) = send("/accents").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(json["accents"][0]["id"], "emirati");
        assert_eq!(json["accents"][0]["name"], "Emirati Arabic");
        assert_eq!(json["accents"][1]["id"], "levantine-arabic");
        assert_eq!(json["accents"][1]["name"], "Levantine-arabic");
        assert_eq!(json["accents"][1]["description"], "");
    }

    #[tokio::test]
    async fn get_route_serves_markdown() {
        let (status, content_type, body) = send("/accents/Emirati").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/markdown; charset=utf-8"));
        assert_eq!(String::from_utf8(body).expect("utf8"), "# Emirati\n\nMarhaba");
    }

    #[tokio::test]
    async fn get_route_returns_known_ids_on_miss() {
        let (status, _, body) = send("/accents/does-not-exist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(json["error"], "Accent 'does-not-exist' not found");
        assert_eq!(
            json["known_ids"],
            serde_json::json!(["emirati", "levantine-arabic"])
        );
    }
}
