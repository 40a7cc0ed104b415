//! MCP server entrypoint (stdio transport).
//!
//! Loads the accent documents written by `accents-ingest` and exposes them over stdio for
//! editor and agent integrations. Shares all runtime configuration with the HTTP binary.
use anyhow::{Context, Result};
use arabic_accents::{config, logging, mcp::ArabicAccentsMcpServer, store::KnowledgeStore};
use rmcp::{service::ServiceExt, transport::stdio};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing();
    let config = config::init_config();

    let store = KnowledgeStore::load(&config.data_dir)
        .await
        .context("failed to load knowledge store")?;
    tracing::info!(accents = store.len(), "Starting MCP server over stdio");
    let server = ArabicAccentsMcpServer::new(Arc::new(store));

    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server over stdio")?;

    service
        .waiting()
        .await
        .context("MCP server terminated unexpectedly")?;

    Ok(())
}
