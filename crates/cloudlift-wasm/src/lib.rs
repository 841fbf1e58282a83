//! WASM bindings for cloudlift.
//!
//! Exposes the schema-to-fields conversion and the payload assemblers via
//! `wasm-bindgen` for use from JavaScript / TypeScript. Uses
//! `serde-wasm-bindgen` for JS / `serde_json::Value` marshalling.

use cloudlift_core::{
    fields_from_document, for_provider, Field, InstanceScript, NetworkMapping,
    OptionValue, OptionsSchemaPlugin, StorageMapping,
};
use serde::Serialize;
use serde_json::{Map, Value};
use wasm_bindgen::prelude::*;

/// Initialize the WASM module: installs the panic hook for readable errors.
///
/// Called automatically when the WASM module loads (`#[wasm_bindgen(start)]`).
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn plugin_for(provider: Option<&str>) -> &'static dyn OptionsSchemaPlugin {
    for_provider(provider.unwrap_or("default"))
}

// JS callers expect plain objects, not Maps, so serialize json-compatible.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}

/// Parse a provider options schema document into field descriptors.
///
/// Accepts a JS object (the schema document, `oneOf` envelope or bare
/// object schema). Returns a JS array of field descriptors.
#[wasm_bindgen(js_name = schemaToFields)]
pub fn schema_to_fields(document: JsValue) -> Result<JsValue, JsError> {
    let document: Value = serde_wasm_bindgen::from_value(document)?;
    let fields = fields_from_document(&document).map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&fields)
}

/// Fill field descriptors from provider-reported option values.
///
/// Accepts a JS array of fields and a JS array of option values; returns a
/// new JS array with enums and defaults populated. Fields without a matching
/// option value come back unchanged.
#[wasm_bindgen(js_name = fillFieldValues)]
pub fn fill_field_values(
    fields: JsValue,
    options: JsValue,
    provider: Option<String>,
) -> Result<JsValue, JsError> {
    let fields: Vec<Field> = serde_wasm_bindgen::from_value(fields)?;
    let options: Vec<OptionValue> = serde_wasm_bindgen::from_value(options)?;
    let plugin = plugin_for(provider.as_deref());

    let filled: Vec<Field> = fields
        .iter()
        .map(|field| plugin.fill_field_values(field, &options, None))
        .collect();
    to_js(&filled)
}

/// Assemble the destination environment from wizard option maps.
///
/// Both maps may be `null`/`undefined`. Returns a JS object.
#[wasm_bindgen(js_name = destinationEnv)]
pub fn destination_env(
    options: JsValue,
    old_options: JsValue,
    provider: Option<String>,
) -> Result<JsValue, JsError> {
    let options: Option<Map<String, Value>> = serde_wasm_bindgen::from_value(options)?;
    let old_options: Option<Map<String, Value>> = serde_wasm_bindgen::from_value(old_options)?;
    let plugin = plugin_for(provider.as_deref());
    to_js(&plugin.destination_env(options.as_ref(), old_options.as_ref()))
}

/// Assemble the network map payload from wizard network mappings.
#[wasm_bindgen(js_name = networkMap)]
pub fn network_map(mappings: JsValue, provider: Option<String>) -> Result<JsValue, JsError> {
    let mappings: Option<Vec<NetworkMapping>> = serde_wasm_bindgen::from_value(mappings)?;
    let plugin = plugin_for(provider.as_deref());
    to_js(&plugin.network_map(mappings.as_deref()))
}

/// Assemble the storage mappings payload. Returns `null` when neither a
/// default storage nor any mappings were supplied.
#[wasm_bindgen(js_name = storageMap)]
pub fn storage_map(
    default_storage: Option<String>,
    mappings: JsValue,
    config_default: Option<String>,
    provider: Option<String>,
) -> Result<JsValue, JsError> {
    let mappings: Option<Vec<StorageMapping>> = serde_wasm_bindgen::from_value(mappings)?;
    let plugin = plugin_for(provider.as_deref());
    to_js(&plugin.storage_map(
        default_storage.as_deref(),
        mappings.as_deref(),
        config_default.as_deref(),
    ))
}

/// Bucket user scripts by OS (`global`) and instance name (`instances`).
#[wasm_bindgen(js_name = userScripts)]
pub fn user_scripts(scripts: JsValue, provider: Option<String>) -> Result<JsValue, JsError> {
    let scripts: Option<Vec<InstanceScript>> = serde_wasm_bindgen::from_value(scripts)?;
    let plugin = plugin_for(provider.as_deref());
    to_js(&plugin.user_scripts(&scripts.unwrap_or_default()))
}
