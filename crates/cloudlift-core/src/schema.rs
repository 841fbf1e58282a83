//! Provider options schema parsing.
//!
//! Providers describe their source and destination options as a JSON Schema
//! document, usually a `oneOf` envelope whose first branch holds the object
//! schema, with shared definitions alongside. This module turns such a
//! document into flat [`Field`] descriptors.
//!
//! Parsing is permissive: only a structurally unusable document is an error.
//! Odd individual properties (non-object schemas, unresolved references) are
//! skipped or taken as-is, with a debug record of what was ignored.

use std::borrow::Cow;

use serde_json::Value;
use tracing::debug;

use crate::error::SchemaError;
use crate::field::{EnumItem, Field, FieldType};
use crate::value_utils::scalar_to_string;

/// Parse a full options schema document into field descriptors.
///
/// The schema root is the document itself or, for `oneOf` envelopes, the
/// envelope's first branch. Definitions are looked up at the document level
/// under `definitions` or `$defs`.
///
/// # Errors
///
/// Returns [`SchemaError::InvalidDocument`] when the resolved root is not a
/// JSON object.
pub fn fields_from_document(document: &Value) -> Result<Vec<Field>, SchemaError> {
    let root = match document.get("oneOf").and_then(Value::as_array) {
        Some(branches) => branches.first().ok_or_else(|| SchemaError::InvalidDocument {
            path: "#/oneOf".to_string(),
            message: "envelope has no branches".to_string(),
        })?,
        None => document,
    };
    if !root.is_object() {
        return Err(SchemaError::InvalidDocument {
            path: "#".to_string(),
            message: "schema root is not an object".to_string(),
        });
    }
    let definitions = document.get("definitions").or_else(|| document.get("$defs"));
    Ok(schema_to_fields(root, definitions))
}

/// Parse an options schema document from raw JSON text.
///
/// # Errors
///
/// Returns [`SchemaError::Json`] when the text is not valid JSON, otherwise
/// behaves like [`fields_from_document`].
pub fn fields_from_json(schema_json: &str) -> Result<Vec<Field>, SchemaError> {
    let document: Value = serde_json::from_str(schema_json)?;
    fields_from_document(&document)
}

/// Convert an object schema into field descriptors.
///
/// Local `$ref`s are resolved by their last pointer segment against
/// `definitions`; an unresolved reference falls back to the referencing node
/// itself. Properties typed `object` with their own `properties` flatten one
/// level into `parent/child` sub-field names, the same names the destination
/// environment assembler later splits back apart.
pub fn schema_to_fields(schema: &Value, definitions: Option<&Value>) -> Vec<Field> {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };
    let required = required_names(schema);
    let mut fields = Vec::with_capacity(properties.len());
    for (name, property) in properties {
        let property = resolve_ref(property, definitions);
        let Some(object) = property.as_object() else {
            debug!(property = %name, "skipping non-object property schema");
            continue;
        };
        let mut field = build_field(name, object, required.contains(&name.as_str()));
        if field.field_type == FieldType::Object {
            if let Some(children) = sub_fields(name, property, definitions) {
                field.properties = Some(children);
            }
        }
        fields.push(field);
    }
    fields
}

fn sub_fields(parent: &str, schema: &Value, definitions: Option<&Value>) -> Option<Vec<Field>> {
    let properties = schema.get("properties").and_then(Value::as_object)?;
    let required = required_names(schema);
    let mut children = Vec::with_capacity(properties.len());
    for (name, property) in properties {
        let property = resolve_ref(property, definitions);
        let Some(object) = property.as_object() else {
            debug!(property = %name, "skipping non-object sub-property schema");
            continue;
        };
        children.push(build_field(
            &format!("{parent}/{name}"),
            object,
            required.contains(&name.as_str()),
        ));
    }
    Some(children)
}

fn build_field(name: &str, schema: &serde_json::Map<String, Value>, required: bool) -> Field {
    let field_type = schema
        .get("type")
        .and_then(Value::as_str)
        .map(FieldType::from_schema)
        .unwrap_or_default();
    let mut field = Field::new(name, field_type);
    field.required = required;
    if let Some(values) = schema.get("enum").and_then(Value::as_array) {
        field.enum_values = enum_items(values);
    }
    if let Some(default) = schema.get("default") {
        field.default = Some(default.clone());
    }
    field.minimum = schema.get("minimum").and_then(Value::as_i64);
    field.maximum = schema.get("maximum").and_then(Value::as_i64);
    field.password = schema
        .get("password")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    field
}

fn enum_items(values: &[Value]) -> Vec<EnumItem> {
    values
        .iter()
        .filter_map(|value| match value {
            Value::Object(_) => serde_json::from_value(value.clone()).ok(),
            Value::Null => None,
            scalar => Some(EnumItem::Plain(scalar_to_string(scalar))),
        })
        .collect()
}

fn required_names(schema: &Value) -> Vec<&str> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Resolve a `$ref` property by the last segment of its pointer. Schemas
/// here only reference their own definitions table, so a plain name lookup
/// is enough.
fn resolve_ref<'a>(property: &'a Value, definitions: Option<&'a Value>) -> &'a Value {
    let Some(reference) = property.get("$ref").and_then(Value::as_str) else {
        return property;
    };
    let key = unescape_segment(reference.rsplit('/').next().unwrap_or(reference));
    match definitions.and_then(|definitions| definitions.get(key.as_ref())) {
        Some(resolved) => resolved,
        None => {
            debug!(reference, "unresolved schema reference, using the node as-is");
            property
        }
    }
}

/// Unescape a JSON Pointer segment (`~1` then `~0`, per RFC 6901).
fn unescape_segment(segment: &str) -> Cow<'_, str> {
    if !segment.contains('~') {
        return Cow::Borrowed(segment);
    }
    Cow::Owned(segment.replace("~1", "/").replace("~0", "~"))
}
