//! Provider plugin seam.
//!
//! Transformation rules are shared across providers, but a few historically
//! diverge in small ways (a different image map field name, custom field
//! filling). The trait keeps those override points open without committing
//! callers to a concrete type; every method has a default implementing the
//! shared rules.

use serde_json::{Map, Value};
use tracing::trace;

use crate::constants::MIGRATION_IMAGE_MAP_FIELD;
use crate::env;
use crate::field::Field;
use crate::fill;
use crate::network::{self, NetworkMapping};
use crate::option_values::OptionValue;
use crate::schema;
use crate::scripts::{self, InstanceScript};
use crate::storage::{self, StorageMapping};

/// Transformation rules for one provider's option schemas and payloads.
pub trait OptionsSchemaPlugin {
    /// Schema field (and payload key) carrying the per-OS image choices.
    fn migration_image_map_field_name(&self) -> &'static str {
        MIGRATION_IMAGE_MAP_FIELD
    }

    /// Parse an object schema into field descriptors.
    fn schema_to_fields(&self, schema: &Value, definitions: Option<&Value>) -> Vec<Field> {
        schema::schema_to_fields(schema, definitions)
    }

    /// Fill a field descriptor from reported option values.
    fn fill_field_values(
        &self,
        field: &Field,
        options: &[OptionValue],
        custom_field_name: Option<&str>,
    ) -> Field {
        fill::fill_field_values(
            field,
            options,
            custom_field_name,
            self.migration_image_map_field_name(),
        )
    }

    /// Assemble the destination environment, migration image map included.
    /// Image map entries win over plain options on key collision.
    fn destination_env(
        &self,
        options: Option<&Map<String, Value>>,
        old_options: Option<&Map<String, Value>>,
    ) -> Map<String, Value> {
        let mut env = env::destination_env(options, old_options);
        env.extend(env::migration_image_map(
            options,
            self.migration_image_map_field_name(),
        ));
        env
    }

    /// Assemble the network map payload.
    fn network_map(&self, mappings: Option<&[NetworkMapping]>) -> Map<String, Value> {
        network::network_map(mappings)
    }

    /// Assemble the storage mappings payload.
    fn storage_map(
        &self,
        default_storage: Option<&str>,
        mappings: Option<&[StorageMapping]>,
        config_default: Option<&str>,
    ) -> Option<Map<String, Value>> {
        storage::storage_map(default_storage, mappings, config_default)
    }

    /// Assemble the user scripts payload.
    fn user_scripts(&self, scripts: &[InstanceScript]) -> Map<String, Value> {
        scripts::user_scripts(scripts)
    }
}

/// The shared rules, used by every provider without a specialized plugin.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOptionsSchemaPlugin;

impl OptionsSchemaPlugin for DefaultOptionsSchemaPlugin {}

/// Look up the plugin for a provider by name.
///
/// Every supported provider currently shares [`DefaultOptionsSchemaPlugin`];
/// provider-specific plugins slot in here when their rules diverge.
pub fn for_provider(provider: &str) -> &'static dyn OptionsSchemaPlugin {
    trace!(provider, "resolving options schema plugin");
    &DefaultOptionsSchemaPlugin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn options(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn destination_env_merges_the_image_map_on_top() {
        let plugin = DefaultOptionsSchemaPlugin;
        let env = plugin.destination_env(
            Some(&options(json!({
                "region": "us-east",
                "windows_os_image": "img1",
                "migr_image_map": "stale"
            }))),
            None,
        );
        assert_eq!(
            Value::Object(env),
            json!({
                "region": "us-east",
                "migr_image_map": { "windows": "img1" }
            })
        );
    }

    #[test]
    fn plugins_can_relocate_the_image_map_field() {
        struct CustomPlugin;
        impl OptionsSchemaPlugin for CustomPlugin {
            fn migration_image_map_field_name(&self) -> &'static str {
                "image_map"
            }
        }

        let field = Field::new("image_map", FieldType::Object);
        let option: OptionValue = serde_json::from_value(json!({
            "name": "image_map",
            "values": [{ "id": "l1", "os_type": "linux" }]
        }))
        .unwrap();
        let filled = CustomPlugin.fill_field_values(&field, &[option], None);
        assert!(filled.properties.is_some());

        let env = CustomPlugin.destination_env(
            Some(&options(json!({ "linux_os_image": "l1" }))),
            None,
        );
        assert_eq!(Value::Object(env), json!({ "image_map": { "linux": "l1" } }));
    }

    #[test]
    fn provider_lookup_always_resolves() {
        let plugin = for_provider("openstack");
        let env = plugin.destination_env(Some(&options(json!({ "a": 1 }))), None);
        assert_eq!(Value::Object(env), json!({ "a": 1 }));
    }
}
