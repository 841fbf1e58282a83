//! Network mapping payloads.
//!
//! The wizard maps each source NIC's network onto a target network, with
//! optional security groups on the target side. The payload keys entries by
//! source network name and takes one of two forms, chosen for the whole map
//! at once: bare target ids, or `{id, security_groups}` objects as soon as
//! any target network reports a security group list.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::value_utils::is_truthy;

/// Source NIC side of a network mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceNic {
    pub network_name: String,
}

/// Target network side of a network mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetNetwork {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Security groups available on the network. Presence of the list, even
    /// an empty one, switches the whole payload to the object form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<SecurityGroupRef>>,
}

/// A security group reference: a bare string id or an object carrying one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SecurityGroupRef {
    Plain(String),
    Object(Map<String, Value>),
}

impl SecurityGroupRef {
    /// Value submitted for this group: the object's truthy `id` when there
    /// is one, the raw reference otherwise.
    pub fn submission_value(&self) -> Value {
        match self {
            SecurityGroupRef::Plain(id) => Value::String(id.clone()),
            SecurityGroupRef::Object(object) => match object.get("id") {
                Some(id) if is_truthy(id) => id.clone(),
                _ => Value::Object(object.clone()),
            },
        }
    }
}

/// One NIC-to-network mapping selected in the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMapping {
    pub source_nic: SourceNic,
    pub target_network: TargetNetwork,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_security_groups: Option<Vec<SecurityGroupRef>>,
}

/// Assemble the network map payload, keyed by source NIC network name.
///
/// When any target network reports a `security_groups` list, every entry
/// uses the object form `{id, security_groups}` (the selected groups, empty
/// when none were picked); otherwise every entry is the bare target network
/// id.
pub fn network_map(mappings: Option<&[NetworkMapping]>) -> Map<String, Value> {
    let mut payload = Map::new();
    let Some(mappings) = mappings else {
        return payload;
    };
    let has_security_groups = mappings
        .iter()
        .any(|mapping| mapping.target_network.security_groups.is_some());
    if has_security_groups {
        debug!("network payload uses the security-group form");
    }
    for mapping in mappings {
        let target = if has_security_groups {
            let groups: Vec<Value> = mapping
                .target_security_groups
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(SecurityGroupRef::submission_value)
                .collect();
            json!({
                "id": mapping.target_network.id,
                "security_groups": groups,
            })
        } else {
            Value::String(mapping.target_network.id.clone())
        };
        payload.insert(mapping.source_nic.network_name.clone(), target);
    }
    payload
}
