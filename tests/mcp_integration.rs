use std::{collections::BTreeMap, sync::Arc};

use arabic_accents::{ingest::AccentMetadata, mcp::ArabicAccentsMcpServer, store::KnowledgeStore};
use rmcp::{
    handler::client::ClientHandler,
    model::{
        self, CallToolRequestParam, ClientInfo, GetPromptRequestParam, PaginatedRequestParam,
        PromptMessageContent, ReadResourceRequestParam, ResourceContents,
    },
    service::{RoleClient, RoleServer, RunningService, Service, serve_directly},
    transport::async_rw::AsyncRwTransport,
};
use serde_json::json;
use tokio::io::split;

#[derive(Clone, Default)]
struct DummyClientHandler;

impl ClientHandler for DummyClientHandler {
    fn get_info(&self) -> ClientInfo {
        ClientInfo::default()
    }
}

struct TestHarness {
    service: RunningService<RoleClient, DummyClientHandler>,
    server: RunningService<RoleServer, ArabicAccentsMcpServer>,
}

impl TestHarness {
    async fn new() -> Self {
        let documents = BTreeMap::from([
            ("emirati".to_string(), "Marhaba".to_string()),
            (
                "levantine-arabic".to_string(),
                "# Levantine Arabic\n\nHello".to_string(),
            ),
        ]);
        let registry = BTreeMap::from([(
            "emirati".to_string(),
            AccentMetadata::new("Emirati", "Gulf dialect"),
        )]);
        let store = Arc::new(KnowledgeStore::from_parts(documents, registry));
        let server = ArabicAccentsMcpServer::new(store);

        let (client_stream, server_stream) = tokio::io::duplex(16 * 1024);
        let (client_read, client_write) = split(client_stream);
        let (server_read, server_write) = split(server_stream);

        let client_transport = AsyncRwTransport::new_client(client_read, client_write);
        let server_transport = AsyncRwTransport::new_server(server_read, server_write);

        let server_info = server.get_info();
        let client_handler = DummyClientHandler;
        let client_info = ClientHandler::get_info(&client_handler);

        let server =
            serve_directly::<RoleServer, _, _, _, _>(server, server_transport, Some(client_info));
        let service = serve_directly::<RoleClient, _, _, _, _>(
            client_handler,
            client_transport,
            Some(server_info),
        );

        Self { service, server }
    }

    async fn shutdown(self) {
        let Self { service, server } = self;
        let _ = service.cancel().await;
        let _ = server.cancel().await;
    }
}

fn resource_text(contents: &ResourceContents) -> &str {
    match contents {
        ResourceContents::TextResourceContents { text, .. } => text,
        other => panic!("expected text contents, got {other:?}"),
    }
}

#[tokio::test]
async fn initialize_and_list_capabilities() {
    let harness = TestHarness::new().await;
    let service = &harness.service;

    let info = service
        .peer_info()
        .expect("server info should be initialized");
    assert_eq!(info.server_info.name, "arabic-accents");
    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.resources.is_some());
    assert!(info.capabilities.prompts.is_some());

    let tools = service
        .list_tools(Some(PaginatedRequestParam { cursor: None }))
        .await
        .expect("list_tools");
    let names: Vec<_> = tools.tools.iter().map(|tool| tool.name.as_ref()).collect();
    assert!(names.contains(&"get_accent_content"));
    assert!(names.contains(&"list_available_accents"));

    let resources = service
        .list_resources(Some(PaginatedRequestParam { cursor: None }))
        .await
        .expect("list_resources");
    let uris: Vec<_> = resources
        .resources
        .iter()
        .map(|resource| resource.uri.as_str())
        .collect();
    assert_eq!(
        uris,
        vec![
            "arabic-accents://list",
            "arabic-accents://emirati",
            "arabic-accents://levantine-arabic",
        ]
    );

    let templates = service
        .list_resource_templates(Some(PaginatedRequestParam { cursor: None }))
        .await
        .expect("list_resource_templates");
    assert_eq!(
        templates.resource_templates[0].uri_template,
        "arabic-accents://{accent_id}"
    );

    let prompts = service
        .list_prompts(Some(PaginatedRequestParam { cursor: None }))
        .await
        .expect("list_prompts");
    assert_eq!(prompts.prompts[0].name, "translate_to_accent");

    harness.shutdown().await;
}

#[tokio::test]
async fn read_list_and_accent_resources() {
    let harness = TestHarness::new().await;
    let service = &harness.service;

    let catalog = service
        .read_resource(ReadResourceRequestParam {
            uri: "arabic-accents://list".into(),
        })
        .await
        .expect("read list");
    let text = resource_text(&catalog.contents[0]);
    assert!(text.contains("- **Emirati** (`emirati`)"));
    assert!(text.contains("Total: 2 accent(s)"));

    let accent = service
        .read_resource(ReadResourceRequestParam {
            uri: "arabic-accents://levantine-arabic".into(),
        })
        .await
        .expect("read accent");
    assert_eq!(
        resource_text(&accent.contents[0]),
        "# Levantine Arabic\n\nHello"
    );

    let err = service
        .read_resource(ReadResourceRequestParam {
            uri: "arabic-accents://masri".into(),
        })
        .await
        .expect_err("unknown accent should fail");
    match err {
        rmcp::service::ServiceError::McpError(data) => {
            assert_eq!(data.code, model::ErrorCode::INVALID_PARAMS);
            assert!(data.message.contains("emirati, levantine-arabic"));
        }
        other => panic!("expected MCP error, got {other:?}"),
    }

    harness.shutdown().await;
}

#[tokio::test]
async fn accent_tools_return_structured_payloads() {
    let harness = TestHarness::new().await;
    let service = &harness.service;

    let found = service
        .call_tool(CallToolRequestParam {
            name: "get_accent_content".into(),
            arguments: json!({ "accent_id": "Emirati" }).as_object().cloned(),
        })
        .await
        .expect("get_accent_content");
    assert_eq!(found.is_error, Some(false));
    let payload = found.structured_content.expect("structured payload");
    assert_eq!(payload["found"], true);
    assert_eq!(payload["content"], "Marhaba");

    let missing = service
        .call_tool(CallToolRequestParam {
            name: "get_accent_content".into(),
            arguments: json!({ "accent_id": "does-not-exist" }).as_object().cloned(),
        })
        .await
        .expect("get_accent_content miss");
    let payload = missing.structured_content.expect("structured payload");
    assert_eq!(payload["found"], false);
    assert_eq!(payload["knownIds"], json!(["emirati", "levantine-arabic"]));

    let listed = service
        .call_tool(CallToolRequestParam {
            name: "list_available_accents".into(),
            arguments: json!({}).as_object().cloned(),
        })
        .await
        .expect("list_available_accents");
    let payload = listed.structured_content.expect("structured payload");
    assert_eq!(payload["total"], 2);
    assert_eq!(payload["accents"][1]["name"], "Levantine-arabic");

    harness.shutdown().await;
}

#[tokio::test]
async fn invalid_tool_arguments_return_error() {
    let harness = TestHarness::new().await;
    let service = &harness.service;

    let err = service
        .call_tool(CallToolRequestParam {
            name: "get_accent_content".into(),
            arguments: json!({ "accent_id": "" }).as_object().cloned(),
        })
        .await
        .expect_err("empty accent_id should fail");

    match err {
        rmcp::service::ServiceError::McpError(data) => {
            assert_eq!(data.code, model::ErrorCode::INVALID_PARAMS);
        }
        other => panic!("expected MCP error, got {other:?}"),
    }

    harness.shutdown().await;
}

#[tokio::test]
async fn translate_prompt_renders_one_user_message() {
    let harness = TestHarness::new().await;
    let service = &harness.service;

    let prompt = service
        .get_prompt(GetPromptRequestParam {
            name: "translate_to_accent".into(),
            arguments: json!({ "accent": "emirati", "content": "Good morning" })
                .as_object()
                .cloned(),
        })
        .await
        .expect("get_prompt");
    assert_eq!(prompt.messages.len(), 1);
    assert_eq!(prompt.messages[0].role, model::PromptMessageRole::User);
    match &prompt.messages[0].content {
        PromptMessageContent::Text { text } => {
            assert!(text.contains("specializing in Emirati."));
            assert!(text.ends_with("Good morning"));
        }
        other => panic!("unexpected prompt content {other:?}"),
    }

    harness.shutdown().await;
}
