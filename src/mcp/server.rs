//! MCP server bootstrap and request dispatch.

use std::{borrow::Cow, sync::Arc};

use crate::{
    mcp::{
        format::{
            TEXT_MARKDOWN, accent_catalog_markdown, accent_summaries, markdown_resource_contents,
            not_found_message,
        },
        handlers::{
            accents::{handle_get_accent, handle_list_accents},
            prompts::handle_translate_prompt,
        },
        registry, schemas,
    },
    store::{KnowledgeBase, KnowledgeStore, Lookup},
};
use rmcp::{
    ErrorData as McpError,
    handler::server::ServerHandler,
    model::{
        AnnotateAble, CallToolRequestParam, CallToolResult, GetPromptRequestParam,
        GetPromptResult, ListPromptsResult, ListResourceTemplatesResult, ListResourcesResult,
        ListToolsResult, Prompt, PromptArgument, RawResource, RawResourceTemplate,
        ReadResourceRequestParam, ReadResourceResult, Resource, ResourceTemplate,
        ServerCapabilities, ServerInfo, Tool, ToolAnnotations,
    },
};

/// URI scheme shared by every accent resource.
const ACCENT_URI_PREFIX: &str = "arabic-accents://";
const LIST_URI: &str = "arabic-accents://list";
const ACCENT_TEMPLATE_URI: &str = "arabic-accents://{accent_id}";

const GET_ACCENT_TOOL: &str = "get_accent_content";
const LIST_ACCENTS_TOOL: &str = "list_available_accents";
const TRANSLATE_PROMPT: &str = "translate_to_accent";

/// MCP server exposing the Arabic accents knowledge base.
#[derive(Clone)]
pub struct ArabicAccentsMcpServer {
    store: Arc<KnowledgeStore>,
    registry: Arc<registry::Registry>,
}

impl ArabicAccentsMcpServer {
    /// Create a new MCP server over a loaded knowledge store.
    pub fn new(store: Arc<KnowledgeStore>) -> Self {
        let mut registry = registry::Registry::new();
        registry.register_resource(LIST_URI, resource_list);

        registry.register_tool(GET_ACCENT_TOOL, tool_get_accent);
        registry.register_tool(LIST_ACCENTS_TOOL, tool_list_accents);

        registry.register_prompt(TRANSLATE_PROMPT, prompt_translate);

        Self {
            store,
            registry: Arc::new(registry),
        }
    }

    fn describe_tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: Cow::Borrowed(GET_ACCENT_TOOL),
                title: Some("Get Accent Content".to_string()),
                description: Some(Cow::Borrowed(
                    "Fetch the full vocabulary and phrase document for one Arabic accent.",
                )),
                input_schema: Arc::new(schemas::get_accent_input_schema()),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title("Get Accent Content")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(false),
                ),
                icons: None,
            },
            Tool {
                name: Cow::Borrowed(LIST_ACCENTS_TOOL),
                title: Some("List Accents".to_string()),
                description: Some(Cow::Borrowed(
                    "List every accent in the knowledge base with its name and description.",
                )),
                input_schema: Arc::new(schemas::empty_object_schema()),
                output_schema: Some(Arc::new(schemas::accent_catalog_output_schema())),
                annotations: Some(
                    ToolAnnotations::with_title("List Accents")
                        .read_only(true)
                        .idempotent(true)
                        .open_world(false),
                ),
                icons: None,
            },
        ]
    }

    fn describe_resources(&self) -> Vec<Resource> {
        let mut list = RawResource::new(LIST_URI, "Available Accents");
        list.description = Some("Catalog of every Arabic accent in the knowledge base".into());
        list.mime_type = Some(TEXT_MARKDOWN.into());

        let mut resources = vec![list.no_annotation()];
        for summary in accent_summaries(self.store.as_ref()) {
            let mut accent = RawResource::new(
                format!("{ACCENT_URI_PREFIX}{}", summary.id),
                summary.name,
            );
            accent.description = Some(summary.description).filter(|text| !text.is_empty());
            accent.mime_type = Some(TEXT_MARKDOWN.into());
            resources.push(accent.no_annotation());
        }
        resources
    }

    fn describe_resource_templates(&self) -> Vec<ResourceTemplate> {
        let accent_template = RawResourceTemplate {
            uri_template: ACCENT_TEMPLATE_URI.into(),
            name: "accent".into(),
            title: Some("Accent Document".into()),
            description: Some(
                "Markdown document for one accent: replace {accent_id} and call readResource"
                    .into(),
            ),
            mime_type: Some(TEXT_MARKDOWN.into()),
        };

        vec![accent_template.no_annotation()]
    }

    fn describe_prompts(&self) -> Vec<Prompt> {
        vec![Prompt::new(
            TRANSLATE_PROMPT,
            Some("Translate content into a specific Arabic accent"),
            Some(vec![
                PromptArgument {
                    name: "accent".into(),
                    title: None,
                    description: Some("Accent identifier (e.g. 'emirati')".into()),
                    required: Some(true),
                },
                PromptArgument {
                    name: "content".into(),
                    title: None,
                    description: Some("Content to translate".into()),
                    required: Some(false),
                },
            ]),
        )]
    }

    async fn read_accent(&self, uri: &str, raw_id: &str) -> Result<ReadResourceResult, McpError> {
        match self.store.get(raw_id) {
            Lookup::Found { body, .. } => Ok(ReadResourceResult {
                contents: vec![markdown_resource_contents(uri, body)],
            }),
            Lookup::NotFound {
                requested,
                known_ids,
            } => Err(McpError::invalid_params(
                not_found_message(&requested, &known_ids),
                None,
            )),
        }
    }
}

fn resource_list(
    server: &ArabicAccentsMcpServer,
    _request: ReadResourceRequestParam,
) -> registry::ResourceFuture {
    let store = server.store.clone();
    Box::pin(async move {
        let summaries = accent_summaries(store.as_ref());
        Ok(ReadResourceResult {
            contents: vec![markdown_resource_contents(
                LIST_URI,
                accent_catalog_markdown(&summaries, ACCENT_URI_PREFIX),
            )],
        })
    })
}

fn tool_get_accent(
    server: &ArabicAccentsMcpServer,
    request: CallToolRequestParam,
) -> registry::ToolFuture {
    let store = server.store.clone();
    Box::pin(async move { handle_get_accent(&store, request.arguments).await })
}

fn tool_list_accents(
    server: &ArabicAccentsMcpServer,
    _request: CallToolRequestParam,
) -> registry::ToolFuture {
    let store = server.store.clone();
    Box::pin(async move { handle_list_accents(&store).await })
}

fn prompt_translate(
    server: &ArabicAccentsMcpServer,
    request: GetPromptRequestParam,
) -> registry::PromptFuture {
    let store = server.store.clone();
    Box::pin(async move { handle_translate_prompt(&store, request.arguments).await })
}

impl ServerHandler for ArabicAccentsMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mut implementation = rmcp::model::Implementation::from_build_env();
        implementation.name = "arabic-accents".to_string();
        implementation.title = Some("Arabic Accents MCP".to_string());
        implementation.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: implementation,
            instructions: Some(
                "Use this server to look up vocabulary and phrasing for Arabic accents. Read arabic-accents://list or call list_available_accents to see what exists, then fetch one accent before translating into it.".into(),
            ),
            ..ServerInfo::default()
        }
    }

    fn list_resources(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        let resources = self.describe_resources();
        std::future::ready(Ok(ListResourcesResult::with_all_items(resources)))
    }

    fn list_resource_templates(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourceTemplatesResult, McpError>> + Send + '_
    {
        let templates = self.describe_resource_templates();
        std::future::ready(Ok(ListResourceTemplatesResult::with_all_items(templates)))
    }

    fn list_tools(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let tools = self.describe_tools();
        std::future::ready(Ok(ListToolsResult::with_all_items(tools)))
    }

    fn list_prompts(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListPromptsResult, McpError>> + Send + '_ {
        let prompts = self.describe_prompts();
        std::future::ready(Ok(ListPromptsResult::with_all_items(prompts)))
    }

    fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        async move {
            let uri = request.uri.clone();
            if let Some(handler) = self.registry.resources.get(uri.as_str()) {
                return handler(self, request).await;
            }

            if let Some(accent_segment) = uri.strip_prefix(ACCENT_URI_PREFIX) {
                if accent_segment.trim().is_empty() {
                    return Err(McpError::invalid_params(
                        "Accent identifier missing in resource URI",
                        None,
                    ));
                }
                return self.read_accent(&uri, accent_segment).await;
            }

            Err(McpError::invalid_params(
                format!("Unknown resource URI: {uri}"),
                None,
            ))
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            if let Some(handler) = self.registry.tools.get(request.name.as_ref()) {
                return handler(self, request).await;
            }

            Err(McpError::invalid_params(
                format!("Unknown tool: {}", request.name),
                None,
            ))
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<GetPromptResult, McpError>> + Send + '_ {
        async move {
            if let Some(handler) = self.registry.prompts.get(request.name.as_str()) {
                return handler(self, request).await;
            }

            Err(McpError::invalid_params(
                format!("Unknown prompt: {}", request.name),
                None,
            ))
        }
    }
}
