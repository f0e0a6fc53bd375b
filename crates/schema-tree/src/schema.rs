// Minimal view over a parsed JSON Schema document.
//
// Only `type` and `properties` are interpreted; every other keyword is
// carried along untouched.

use serde_json::{Map, Value};

/// A parsed schema document. Property order follows the source text
/// (serde_json is built with `preserve_order`).
pub type Schema = Value;

pub const OBJECT_TYPE: &str = "object";

/// Parse raw schema text.
pub fn parse_schema(text: &str) -> Result<Schema, SchemaError> {
    serde_json::from_str(text).map_err(SchemaError::InvalidSchema)
}

/// The `type` keyword, when it is a plain string.
pub fn schema_type(schema: &Schema) -> Option<&str> {
    schema.get("type").and_then(Value::as_str)
}

pub fn is_object(schema: &Schema) -> bool {
    schema_type(schema) == Some(OBJECT_TYPE)
}

/// Declared properties in document order. Missing or malformed
/// `properties` yields nothing.
pub fn properties(
    schema: &Schema,
) -> impl Iterator<Item = (&String, &Schema)> {
    schema
        .get("properties")
        .and_then(Value::as_object)
        .map(Map::iter)
        .into_iter()
        .flatten()
}

#[derive(thiserror::Error, Debug)]
pub enum SchemaError {
    #[error("invalid schema: {0}")]
    InvalidSchema(#[source] serde_json::Error),
}
