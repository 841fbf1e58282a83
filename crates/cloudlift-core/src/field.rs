//! Field descriptors.
//!
//! A [`Field`] is the parsed form of one property in a provider options
//! schema: what the option is called, how it renders (its type), which
//! values it can take and which default applies. Descriptors start out
//! skeletal after schema parsing and are completed later from reported
//! option values (see [`crate::fill`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::option_values::{OptionItem, OptionObject};

/// Rendering type of a field, as declared by the schema's `type` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    String,
    Boolean,
    StrictBoolean,
    Integer,
    Number,
    Array,
    Object,
    Radio,
    InputChoice,
    /// Anything the schema declared that has no rendering rules.
    #[default]
    #[serde(other)]
    Unknown,
}

impl FieldType {
    /// Parse a schema `type` string; unrecognized values map to
    /// [`FieldType::Unknown`].
    pub fn from_schema(value: &str) -> FieldType {
        match value {
            "string" => FieldType::String,
            "boolean" => FieldType::Boolean,
            "strict-boolean" => FieldType::StrictBoolean,
            "integer" => FieldType::Integer,
            "number" => FieldType::Number,
            "array" => FieldType::Array,
            "object" => FieldType::Object,
            "radio" => FieldType::Radio,
            "input-choice" => FieldType::InputChoice,
            _ => FieldType::Unknown,
        }
    }
}

/// Marker object rendered as a divider between enum entry groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparatorMarker {
    pub separator: bool,
}

/// One entry in a field's value enumeration.
///
/// Mirrors the loose shapes option dropdowns accept: a divider marker, an
/// explicit label/value pair, a provider-reported object, or a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumItem {
    Separator(SeparatorMarker),
    Labeled { label: String, value: String },
    Item(OptionObject),
    Plain(String),
}

impl EnumItem {
    /// A divider entry, placed between OS-specific and fallback images.
    pub fn separator() -> EnumItem {
        EnumItem::Separator(SeparatorMarker { separator: true })
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, EnumItem::Separator(marker) if marker.separator)
    }

    /// Display label, resolved the way dropdowns resolve it: the explicit
    /// label, then the object's name, then its id, then the raw string.
    /// Separators have no label.
    pub fn label(&self) -> Option<&str> {
        match self {
            EnumItem::Separator(_) => None,
            EnumItem::Labeled { label, .. } => Some(label),
            EnumItem::Item(object) => Some(object.name.as_deref().unwrap_or(&object.id)),
            EnumItem::Plain(value) => Some(value),
        }
    }

    /// Submission value: the explicit value, then the object's id, then the
    /// raw string. Separators have no value.
    pub fn value(&self) -> Option<&str> {
        match self {
            EnumItem::Separator(_) => None,
            EnumItem::Labeled { value, .. } => Some(value),
            EnumItem::Item(object) => Some(&object.id),
            EnumItem::Plain(value) => Some(value),
        }
    }
}

impl From<OptionItem> for EnumItem {
    fn from(item: OptionItem) -> EnumItem {
        match item {
            OptionItem::Object(object) => EnumItem::Item(object),
            OptionItem::Plain(value) => EnumItem::Plain(value),
        }
    }
}

/// Parsed form of one schema property.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<EnumItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Sub-fields, set for object-shaped fields and the migration image map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Field>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub password: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Field {
        Field {
            name: name.into(),
            field_type,
            ..Field::default()
        }
    }
}
