//! Property-based tests for payload assembly.
//!
//! Assembly must stay total and permissive: arbitrary wizard state never
//! panics, reserved and empty values never leak into a destination
//! environment, nesting reconstruction matches the name-splitting rules, and
//! the network payload keeps its all-or-nothing shape.

use cloudlift_core::constants::is_reserved_option;
use cloudlift_core::{
    destination_env, fill_field_values, network_map, storage_map, trim_option_value,
    user_scripts, Field, FieldType, InstanceScript, NetworkMapping, OptionValue,
    MIGRATION_IMAGE_MAP_FIELD,
};
use proptest::prelude::*;
use serde_json::{Map, Value};

// ── Strategies ───────────────────────────────────────────────────────────────

/// Option names: plain, nested, rooted and reserved ones all mixed in.
fn arb_option_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}",
        "[a-z]{1,6}/[a-z]{1,6}",
        "[a-z]{1,4}/[a-z]{1,4}/[a-z]{1,4}",
        "/[a-z]{1,6}",
        Just("description".to_string()),
        Just("execute_now".to_string()),
        Just("windows_os_image".to_string()),
    ]
}

fn arb_option_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| Value::from(n)),
        "[ a-z]{0,10}".prop_map(Value::String),
        Just(Value::String(String::new())),
    ]
}

fn arb_options() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(arb_option_name(), arb_option_value(), 0..12)
        .prop_map(|entries| entries.into_iter().collect())
}

fn arb_field_type() -> impl Strategy<Value = FieldType> {
    prop_oneof![
        Just(FieldType::String),
        Just(FieldType::Boolean),
        Just(FieldType::Array),
        Just(FieldType::Integer),
        Just(FieldType::Object),
        Just(FieldType::Unknown),
    ]
}

fn arb_option_values() -> impl Strategy<Value = Vec<OptionValue>> {
    let item = prop_oneof![
        "[a-z]{1,8}".prop_map(Value::String),
        ("[a-z]{1,8}", prop::option::of("windows|linux|unknown|other"))
            .prop_map(|(id, os_type)| {
                let mut object = Map::new();
                object.insert("id".to_string(), Value::String(id));
                if let Some(os_type) = os_type {
                    object.insert("os_type".to_string(), Value::String(os_type));
                }
                Value::Object(object)
            }),
    ];
    let config_default = prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        "[a-z]{1,8}".prop_map(Value::String),
    ];
    prop::collection::vec(
        (
            "[a-z]{1,8}",
            prop::collection::vec(item, 0..6),
            prop::option::of(config_default),
        ),
        0..4,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(name, values, config_default)| {
                let mut object = Map::new();
                object.insert("name".to_string(), Value::String(name));
                object.insert("values".to_string(), Value::Array(values));
                if let Some(config_default) = config_default {
                    object.insert("config_default".to_string(), config_default);
                }
                serde_json::from_value(Value::Object(object)).unwrap()
            })
            .collect()
    })
}

fn empty_value(value: &Value) -> bool {
    value.is_null() || matches!(value, Value::String(text) if text.is_empty())
}

// ── Properties ───────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn env_never_leaks_reserved_or_empty_entries(options in arb_options()) {
        let env = destination_env(Some(&options), None);
        for (key, value) in &env {
            prop_assert!(!is_reserved_option(key), "reserved key {key} leaked");
            prop_assert!(!empty_value(value), "empty value leaked at {key}");
        }
    }

    #[test]
    fn env_reconstructs_nesting_from_names(options in arb_options()) {
        let env = destination_env(Some(&options), None);
        for (name, value) in &options {
            if is_reserved_option(name) || empty_value(value) {
                continue;
            }
            let expected = trim_option_value(name, value);
            match name.find('/') {
                Some(first) if first > 0 => {
                    let (parent, child) = name.rsplit_once('/').unwrap();
                    // A plain option of the parent's exact name may occupy
                    // the slot; nested writes only land in objects.
                    if let Some(Value::Object(nested)) = env.get(parent) {
                        if let Some(found) = nested.get(child) {
                            prop_assert_eq!(found, &expected);
                        }
                    }
                }
                _ => {
                    prop_assert_eq!(env.get(name.as_str()), Some(&expected));
                }
            }
        }
    }

    #[test]
    fn env_assembly_is_idempotent_over_inputs(options in arb_options()) {
        let first = destination_env(Some(&options), None);
        let second = destination_env(Some(&options), None);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn filling_never_panics_and_never_mutates(
        field_type in arb_field_type(),
        options in arb_option_values(),
        name in "[a-z]{1,8}",
    ) {
        let field = Field::new(name, field_type);
        let before = field.clone();
        let _ = fill_field_values(&field, &options, None, MIGRATION_IMAGE_MAP_FIELD);
        prop_assert_eq!(field, before);
    }

    #[test]
    fn network_payload_is_all_or_nothing(raw in prop::collection::vec(
        ("[a-z]{1,6}", "[a-z]{1,6}", any::<bool>()),
        0..6,
    )) {
        let mappings: Vec<NetworkMapping> = raw
            .iter()
            .map(|(network_name, target_id, with_groups)| {
                let mut target = Map::new();
                target.insert("id".to_string(), Value::String(target_id.clone()));
                if *with_groups {
                    target.insert("security_groups".to_string(), Value::Array(vec![]));
                }
                serde_json::from_value(serde_json::json!({
                    "sourceNic": { "network_name": network_name },
                    "targetNetwork": Value::Object(target),
                }))
                .unwrap()
            })
            .collect();
        let payload = network_map(Some(&mappings));
        let any_groups = raw.iter().any(|(_, _, with_groups)| *with_groups);
        for value in payload.values() {
            if any_groups {
                prop_assert!(value.is_object());
            } else {
                prop_assert!(value.is_string());
            }
        }
    }

    #[test]
    fn storage_payload_exists_iff_there_is_input(
        default_storage in prop::option::of("[a-z]{0,6}"),
        has_mappings in any::<bool>(),
    ) {
        let payload = storage_map(
            default_storage.as_deref(),
            if has_mappings { Some(&[]) } else { None },
            None,
        );
        let default_present = default_storage.as_deref().is_some_and(|id| !id.is_empty());
        if !default_present && !has_mappings {
            prop_assert_eq!(payload, None);
        } else {
            let payload = payload.unwrap();
            prop_assert_eq!(payload.get("default").is_some(), default_present);
        }
    }

    #[test]
    fn script_buckets_cover_exactly_the_tagged_scripts(raw in prop::collection::vec(
        (prop::option::of("[a-z]{1,6}"), prop::option::of("[a-z]{1,6}"), "[a-z]{1,6}"),
        0..8,
    )) {
        let scripts: Vec<InstanceScript> = raw
            .iter()
            .map(|(global, instance_name, content)| InstanceScript {
                global: global.clone(),
                instance_name: instance_name.clone(),
                script_content: content.clone(),
            })
            .collect();
        let payload = user_scripts(&scripts);
        let global_tags = scripts.iter().filter(|script| script.global.is_some()).count();
        let instance_tags = scripts
            .iter()
            .filter(|script| script.instance_name.is_some())
            .count();
        let bucket_len = |key: &str| {
            payload
                .get(key)
                .and_then(Value::as_object)
                .map(|bucket| bucket.len())
                .unwrap_or(0)
        };
        prop_assert!(bucket_len("global") <= global_tags);
        prop_assert!(bucket_len("instances") <= instance_tags);
        prop_assert_eq!(payload.get("global").is_some(), global_tags > 0);
        prop_assert_eq!(payload.get("instances").is_some(), instance_tags > 0);
    }
}
