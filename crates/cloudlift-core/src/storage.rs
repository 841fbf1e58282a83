//! Storage mapping payloads.
//!
//! Storage is mapped either per backend (every disk on a source backend
//! lands on one target) or per disk. Entries whose target is left `null`
//! fall back to the provider's configured default target, or are dropped
//! when none is configured.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::value_utils::scalar_to_string;

/// How a storage mapping was made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Backend,
    /// Any tag other than `backend`, including tags this library does not
    /// know, maps per disk.
    #[default]
    #[serde(other)]
    Disk,
}

/// Source side of a storage mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSource {
    /// Backend name, set for backend mappings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_backend_identifier: Option<String>,
    /// Disk identifier, set for disk mappings. Providers report strings and
    /// numbers here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

/// Target side of a storage mapping. A `null` id means "use the fallback".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageTarget {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One storage mapping selected in the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageMapping {
    #[serde(rename = "type", default)]
    pub kind: StorageKind,
    pub source: StorageSource,
    pub target: StorageTarget,
}

/// Assemble the storage mappings payload.
///
/// Returns `None` when there is nothing to send: no default storage and no
/// mapping list (empty strings count as absent). Backend mappings land in
/// `backend_mappings` keyed by backend name, disk mappings in
/// `disk_mappings` keyed by stringified disk id; either list appears only
/// when non-empty. A mapping with a `null` target takes `config_default` as
/// its destination, or is dropped when no default is configured.
pub fn storage_map(
    default_storage: Option<&str>,
    mappings: Option<&[StorageMapping]>,
    config_default: Option<&str>,
) -> Option<Map<String, Value>> {
    let default_storage = default_storage.filter(|id| !id.is_empty());
    let config_default = config_default.filter(|name| !name.is_empty());
    if default_storage.is_none() && mappings.is_none() {
        return None;
    }
    let mut payload = Map::new();
    if let Some(default) = default_storage {
        payload.insert("default".to_string(), Value::String(default.to_string()));
    }
    let Some(mappings) = mappings else {
        return Some(payload);
    };
    let mut backend_mappings = Vec::new();
    let mut disk_mappings = Vec::new();
    for mapping in mappings {
        let destination = match (&mapping.target.id, config_default) {
            (Some(_), _) => mapping.target.name.clone().unwrap_or_default(),
            (None, Some(fallback)) => fallback.to_string(),
            (None, None) => {
                debug!("dropping unmapped storage entry without a configured default");
                continue;
            }
        };
        match mapping.kind {
            StorageKind::Backend => match &mapping.source.storage_backend_identifier {
                Some(source) => backend_mappings.push(json!({
                    "source": source,
                    "destination": destination,
                })),
                None => warn!("backend mapping missing its storage backend identifier"),
            },
            StorageKind::Disk => match &mapping.source.id {
                Some(id) => disk_mappings.push(json!({
                    "disk_id": scalar_to_string(id),
                    "destination": destination,
                })),
                None => warn!("disk mapping missing its disk id"),
            },
        }
    }
    if !backend_mappings.is_empty() {
        payload.insert("backend_mappings".to_string(), Value::Array(backend_mappings));
    }
    if !disk_mappings.is_empty() {
        payload.insert("disk_mappings".to_string(), Value::Array(disk_mappings));
    }
    Some(payload)
}
