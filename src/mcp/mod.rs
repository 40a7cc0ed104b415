//! Model Context Protocol (MCP) integration for the Arabic accents knowledge base.
//!
//! This module serves a loaded [`crate::store::KnowledgeStore`] to editors and agent hosts over
//! stdio. The surface area consists of:
//!
//! - Resources: `arabic-accents://list`, one `arabic-accents://{id}` document per accent, and a
//!   templated `arabic-accents://{accent_id}`.
//! - Tools: `get_accent_content` and `list_available_accents`.
//! - Prompts: `translate_to_accent`.

mod format;
pub mod handlers;
mod registry;
mod schemas;
mod server;

pub use server::ArabicAccentsMcpServer;
