//! User script payloads.
//!
//! Users attach scripts to a transfer either globally per guest OS or for a
//! single instance by name. The payload buckets them accordingly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user-provided script and what it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceScript {
    /// Guest OS this script applies to, for global scripts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<String>,
    /// Instance this script applies to, for per-instance scripts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
    pub script_content: String,
}

/// Bucket user scripts into the `global`/`instances` payload shape.
///
/// Scripts with a non-empty `global` land under `global` keyed by OS,
/// scripts with a non-empty `instance_name` under `instances` keyed by
/// instance. Either bucket appears only when it has entries; a later script
/// for the same key wins.
pub fn user_scripts(scripts: &[InstanceScript]) -> Map<String, Value> {
    let mut payload = Map::new();
    let global: Map<String, Value> = scripts
        .iter()
        .filter_map(|script| {
            script
                .global
                .as_deref()
                .filter(|os| !os.is_empty())
                .map(|os| (os.to_string(), Value::String(script.script_content.clone())))
        })
        .collect();
    if !global.is_empty() {
        payload.insert("global".to_string(), Value::Object(global));
    }
    let instances: Map<String, Value> = scripts
        .iter()
        .filter_map(|script| {
            script
                .instance_name
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(|name| (name.to_string(), Value::String(script.script_content.clone())))
        })
        .collect();
    if !instances.is_empty() {
        payload.insert("instances".to_string(), Value::Object(instances));
    }
    payload
}
