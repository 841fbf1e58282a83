//! Field value filling.
//!
//! Schemas say which fields exist; the live values those fields can take
//! arrive separately as [`OptionValue`]s. Filling copies the reported values
//! and configured defaults into parsed [`Field`] descriptors.
//!
//! All fillers are pure: they return a new descriptor and leave their inputs
//! untouched. Fields with no matching reported option come back unchanged.

use std::cmp::Ordering;

use serde_json::Value;
use tracing::debug;

use crate::constants::MIGRATION_IMAGE_OS_TYPES;
use crate::field::{EnumItem, Field, FieldType};
use crate::option_values::{ConfigDefault, OptionValue};

/// Fill a field descriptor from the matching reported option.
///
/// The option is matched by `custom_field_name` when given, by the field's
/// own name otherwise. The migration image map field (identified by
/// `image_map_field`) gets its per-OS sub-fields built instead of the
/// generic enum filling.
pub fn fill_field_values(
    field: &Field,
    options: &[OptionValue],
    custom_field_name: Option<&str>,
    image_map_field: &str,
) -> Field {
    let wanted = custom_field_name.unwrap_or(field.name.as_str());
    let Some(option) = options.iter().find(|option| option.name == wanted) else {
        debug!(field = %field.name, "no reported values for field");
        return field.clone();
    };
    if let Some(filled) = fill_migration_image_map(field, option, image_map_field) {
        return filled;
    }
    fill_option_values(field, option)
}

/// Fill enum values and the configured default according to the field's
/// declared type.
///
/// `string` fields take the reported values as their enum and the configured
/// default as-is (a primitive default is taken verbatim, an object default
/// contributes its `id`). `array` fields take the enum only. `boolean`
/// fields take the default, accepting the string `"true"` alongside real
/// booleans. Other types pass through unchanged.
pub fn fill_option_values(field: &Field, option: &OptionValue) -> Field {
    let mut filled = field.clone();
    match filled.field_type {
        FieldType::String => {
            filled.enum_values = option.values.iter().cloned().map(EnumItem::from).collect();
            if let Some(config_default) = &option.config_default {
                filled.default = Some(string_default(config_default));
            }
        }
        FieldType::Array => {
            filled.enum_values = option.values.iter().cloned().map(EnumItem::from).collect();
        }
        FieldType::Boolean => {
            if let Some(config_default) = &option.config_default {
                filled.default = Some(Value::Bool(boolean_default(config_default)));
            }
        }
        _ => {}
    }
    filled
}

/// Build the per-OS image sub-fields for the migration image map field.
///
/// Returns `None` when `field` is not the image map field. Otherwise the
/// result carries one `{os}_os_image` sub-field per supported OS, listing
/// the values tagged for that OS followed by the `unknown`-tagged fallbacks,
/// with a separator marker between the two groups when both are present.
pub fn fill_migration_image_map(
    field: &Field,
    option: &OptionValue,
    image_map_field: &str,
) -> Option<Field> {
    if field.name != image_map_field {
        return None;
    }
    let mut filled = field.clone();
    let sub_fields = MIGRATION_IMAGE_OS_TYPES
        .iter()
        .copied()
        .map(|os| {
            let mut sub_field = Field::new(format!("{os}_os_image"), FieldType::String);
            sub_field.enum_values = os_image_entries(option, os);
            sub_field
        })
        .collect();
    filled.properties = Some(sub_fields);
    Some(filled)
}

fn os_image_entries(option: &OptionValue, os: &str) -> Vec<EnumItem> {
    let mut entries: Vec<EnumItem> = option
        .values
        .iter()
        .filter(|item| matches!(item.os_type(), Some(tag) if tag == os || tag == "unknown"))
        .cloned()
        .map(EnumItem::from)
        .collect();
    // Stable: OS-specific entries keep their reported order, unknowns sink
    // to the back.
    entries.sort_by(|a, b| match (is_unknown(a), is_unknown(b)) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => Ordering::Equal,
    });
    if let Some(first_unknown) = entries.iter().position(is_unknown) {
        if first_unknown > 0 {
            entries.insert(first_unknown, EnumItem::separator());
        }
    }
    entries
}

fn is_unknown(item: &EnumItem) -> bool {
    matches!(item, EnumItem::Item(object) if object.os_type.as_deref() == Some("unknown"))
}

fn string_default(config_default: &ConfigDefault) -> Value {
    match config_default {
        ConfigDefault::Plain(value) => Value::String(value.clone()),
        ConfigDefault::Object(object) => Value::String(object.id.clone()),
        ConfigDefault::Bool(value) => Value::Bool(*value),
    }
}

fn boolean_default(config_default: &ConfigDefault) -> bool {
    match config_default {
        ConfigDefault::Bool(value) => *value,
        ConfigDefault::Plain(value) => value == "true",
        ConfigDefault::Object(_) => false,
    }
}
