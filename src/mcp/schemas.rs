//! JSON schema builders for MCP tools.

use serde_json::{Map, Value};

use super::format::AccentCatalog;

/// Build the schema describing the `get_accent_content` tool input.
pub(crate) fn get_accent_input_schema() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "accent_id".into(),
        string_schema("The accent identifier (e.g. 'emirati', 'levantine')"),
    );
    finalize_object_schema(properties, &["accent_id"])
}

/// Schema for tools that take no arguments.
pub(crate) fn empty_object_schema() -> Map<String, Value> {
    finalize_object_schema(Map::new(), &[])
}

/// Output schema of the `list_available_accents` tool, derived from [`AccentCatalog`].
pub(crate) fn accent_catalog_output_schema() -> Map<String, Value> {
    match serde_json::to_value(schemars::schema_for!(AccentCatalog)) {
        Ok(Value::Object(schema)) => schema,
        _ => {
            let mut fallback = Map::new();
            fallback.insert("type".into(), Value::String("object".into()));
            fallback
        }
    }
}

fn string_schema(description: &str) -> Value {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("string".into()));
    schema.insert("description".into(), Value::String(description.into()));
    Value::Object(schema)
}

fn finalize_object_schema(properties: Map<String, Value>, required: &[&str]) -> Map<String, Value> {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("object".into()));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert(
            "required".into(),
            Value::Array(
                required
                    .iter()
                    .map(|&key| Value::String(key.into()))
                    .collect(),
            ),
        );
    }
    schema.insert("additionalProperties".into(), Value::Bool(false));
    schema
}
