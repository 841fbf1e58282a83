//! Transform cloud provider option schemas and wizard-collected values into
//! migration API payloads.
//!
//! A provider describes its source and destination options as a JSON Schema
//! document and separately reports the live values each option can take.
//! This crate parses those documents into [`Field`] descriptors
//! ([`fields_from_document`]), fills the descriptors from reported
//! [`OptionValue`]s ([`fill_field_values`]), and assembles the payloads the
//! migration API consumes: the destination environment with its migration
//! image map ([`destination_env`], [`migration_image_map`]), the network map
//! ([`network_map`]), storage mappings ([`storage_map`]) and user scripts
//! ([`user_scripts`]).
//!
//! Assembly is permissive end to end: missing or malformed inputs yield
//! empty or partial payloads rather than errors, mirroring how the wizard
//! treats incomplete state. Only schema document parsing returns a
//! [`SchemaError`]. Providers with diverging rules hook in through
//! [`OptionsSchemaPlugin`]; everything else uses the shared defaults.
//!
//! # Example
//!
//! ```
//! use cloudlift_core::{fields_from_document, OptionValue, OptionsSchemaPlugin,
//!     DefaultOptionsSchemaPlugin};
//! use serde_json::json;
//!
//! let document = json!({
//!     "oneOf": [{
//!         "type": "object",
//!         "properties": {
//!             "region": { "type": "string" }
//!         }
//!     }]
//! });
//! let fields = fields_from_document(&document)?;
//!
//! let options: Vec<OptionValue> = serde_json::from_value(json!([
//!     { "name": "region", "values": ["us-east", "us-west"], "config_default": "us-east" }
//! ]))?;
//! let plugin = DefaultOptionsSchemaPlugin;
//! let filled = plugin.fill_field_values(&fields[0], &options, None);
//! assert_eq!(filled.default, Some(json!("us-east")));
//!
//! let env = plugin.destination_env(
//!     Some(json!({ "region": "us-west", "description": "ignored" }).as_object().unwrap()),
//!     None,
//! );
//! assert_eq!(serde_json::Value::Object(env), json!({ "region": "us-west" }));
//! # Ok::<(), cloudlift_core::SchemaError>(())
//! ```

pub mod constants;
pub mod env;
pub mod error;
pub mod field;
pub mod fill;
pub mod network;
pub mod option_values;
pub mod plugin;
pub mod schema;
pub mod scripts;
pub mod storage;
mod value_utils;

pub use constants::{MIGRATION_IMAGE_MAP_FIELD, MIGRATION_IMAGE_OS_TYPES};
pub use env::{destination_env, migration_image_map};
pub use error::SchemaError;
pub use field::{EnumItem, Field, FieldType, SeparatorMarker};
pub use fill::{fill_field_values, fill_migration_image_map, fill_option_values};
pub use network::{network_map, NetworkMapping, SecurityGroupRef, SourceNic, TargetNetwork};
pub use option_values::{ConfigDefault, OptionItem, OptionObject, OptionValue};
pub use plugin::{for_provider, DefaultOptionsSchemaPlugin, OptionsSchemaPlugin};
pub use schema::{fields_from_document, fields_from_json, schema_to_fields};
pub use scripts::{user_scripts, InstanceScript};
pub use storage::{storage_map, StorageKind, StorageMapping, StorageSource, StorageTarget};
pub use value_utils::trim_option_value;
