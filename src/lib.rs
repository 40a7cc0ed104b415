#![deny(missing_docs)]

//! Core library for the Arabic accents knowledge base and its MCP server.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Source discovery, extraction, merging, and persistence of accent documents.
pub mod ingest;
/// Structured logging and tracing setup.
pub mod logging;
/// Model Context Protocol server implementation.
pub mod mcp;
/// Ingestion metrics helpers.
pub mod metrics;
/// Read-side store over the ingestion output.
pub mod store;
