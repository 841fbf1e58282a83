//! Dynamic option values reported by a provider.
//!
//! Schemas describe which fields exist; the values those fields can take
//! (available regions, images, flavors) arrive separately, per endpoint, as
//! a list of [`OptionValue`]s. Providers are loose about shapes: values are
//! either bare strings or objects, and the configured default can be a
//! string, a boolean or an object.

use serde::{Deserialize, Serialize};

/// One value a provider reports for an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionItem {
    /// An object value carrying an identifier.
    Object(OptionObject),
    /// A bare string value.
    Plain(String),
}

/// Object form of a reported value.
///
/// Image listings additionally tag each entry with the guest OS it targets
/// via `os_type`; `unknown` marks an image usable as a fallback for any OS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionObject {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_type: Option<String>,
}

impl OptionItem {
    /// OS tag carried by object values; bare strings have none.
    pub fn os_type(&self) -> Option<&str> {
        match self {
            OptionItem::Object(object) => object.os_type.as_deref(),
            OptionItem::Plain(_) => None,
        }
    }
}

/// Default value a provider configures for an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigDefault {
    Bool(bool),
    Plain(String),
    Object(OptionObject),
}

/// Values and configured default reported for one named option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<OptionItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_default: Option<ConfigDefault>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn deserializes_plain_string_values() {
        let option: OptionValue = serde_json::from_value(json!({
            "name": "region",
            "values": ["us-east", "us-west"],
            "config_default": "us-west"
        }))
        .unwrap();
        assert_eq!(option.name, "region");
        assert_eq!(
            option.values,
            vec![
                OptionItem::Plain("us-east".to_string()),
                OptionItem::Plain("us-west".to_string()),
            ]
        );
        assert_eq!(
            option.config_default,
            Some(ConfigDefault::Plain("us-west".to_string()))
        );
    }

    #[test]
    fn deserializes_object_values_with_os_tags() {
        let option: OptionValue = serde_json::from_value(json!({
            "name": "migr_image_map",
            "values": [
                { "id": "img-1", "name": "Ubuntu", "os_type": "linux" },
                { "id": "img-2", "os_type": "unknown" }
            ]
        }))
        .unwrap();
        assert_eq!(option.values[0].os_type(), Some("linux"));
        assert_eq!(option.values[1].os_type(), Some("unknown"));
        assert_eq!(option.config_default, None);
    }

    #[test]
    fn deserializes_boolean_and_object_defaults() {
        let boolean: OptionValue = serde_json::from_value(json!({
            "name": "keep_mac",
            "config_default": true
        }))
        .unwrap();
        assert_eq!(boolean.config_default, Some(ConfigDefault::Bool(true)));

        let object: OptionValue = serde_json::from_value(json!({
            "name": "flavor",
            "config_default": { "id": "m1.small", "name": "Small" }
        }))
        .unwrap();
        assert_eq!(
            object.config_default,
            Some(ConfigDefault::Object(OptionObject {
                id: "m1.small".to_string(),
                name: Some("Small".to_string()),
                os_type: None,
            }))
        );
    }

    #[test]
    fn missing_values_default_to_empty() {
        let option: OptionValue = serde_json::from_value(json!({ "name": "region" })).unwrap();
        assert!(option.values.is_empty());
    }
}
