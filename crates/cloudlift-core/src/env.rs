//! Destination environment assembly.
//!
//! The wizard submits a flat map of option values keyed by field name. The
//! assemblers here filter out reserved names and empty values, rebuild one
//! level of nesting from `parent/child` names, and route the per-OS image
//! selections into the migration image map entry.

use serde_json::{Map, Value};
use tracing::debug;

use crate::constants::{is_reserved_option, MIGRATION_IMAGE_OS_TYPES};
use crate::value_utils::{is_truthy, trim_option_value};

/// Assemble the generic destination environment from submitted options.
///
/// Reserved option names, `null`s and empty strings never reach the output.
/// A name containing `/` past its first character nests: `a/b/c` writes key
/// `c` inside the object at key `a/b`, seeded from `old_options` when an
/// object is present there. A plain option already holding the parent key
/// wins over its nested siblings. String values are normalized through
/// [`trim_option_value`].
pub fn destination_env(
    options: Option<&Map<String, Value>>,
    old_options: Option<&Map<String, Value>>,
) -> Map<String, Value> {
    let mut env = Map::new();
    let Some(options) = options else {
        return env;
    };
    for (name, value) in options {
        if is_reserved_option(name) {
            continue;
        }
        if value.is_null() || matches!(value, Value::String(text) if text.is_empty()) {
            debug!(option = %name, "dropping empty option value");
            continue;
        }
        match nested_split(name) {
            Some((parent, child)) => {
                let entry = env
                    .entry(parent.to_string())
                    .or_insert_with(|| seed_parent(old_options, parent));
                if let Value::Object(parent_map) = entry {
                    parent_map.insert(child.to_string(), trim_option_value(name, value));
                }
            }
            None => {
                env.insert(name.clone(), trim_option_value(name, value));
            }
        }
    }
    env
}

/// Assemble the migration image map entry from submitted options.
///
/// Each OS whose `{os}_os_image` selection is truthy lands under
/// `image_map_field`; with no truthy selection the result stays empty.
pub fn migration_image_map(
    options: Option<&Map<String, Value>>,
    image_map_field: &str,
) -> Map<String, Value> {
    let mut env = Map::new();
    let Some(options) = options else {
        return env;
    };
    for os in MIGRATION_IMAGE_OS_TYPES {
        let key = format!("{os}_os_image");
        let Some(value) = options.get(&key) else {
            continue;
        };
        if !is_truthy(value) {
            debug!(option = %key, "dropping empty image selection");
            continue;
        }
        let entry = env
            .entry(image_map_field.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = entry {
            map.insert((*os).to_string(), value.clone());
        }
    }
    env
}

/// Split `a/b/c` into `("a/b", "c")`. Names without a `/` and names starting
/// with one are plain keys.
fn nested_split(name: &str) -> Option<(&str, &str)> {
    match name.find('/') {
        Some(first) if first > 0 => name.rsplit_once('/'),
        _ => None,
    }
}

fn seed_parent(old_options: Option<&Map<String, Value>>, parent: &str) -> Value {
    old_options
        .and_then(|options| options.get(parent))
        .filter(|value| value.is_object())
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()))
}
