//! Value-level helpers shared by the payload assemblers.

use serde_json::Value;

/// JavaScript-style truthiness for JSON values.
///
/// `null`, `false`, zero and the empty string are falsy; everything else,
/// empty arrays and objects included, is truthy. The assemblers use this
/// wherever the wire contract was defined in terms of truthiness rather
/// than presence.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar as the string the wire contract expects: strings as-is,
/// other scalars through their JSON representation (`5` becomes `"5"`).
pub(crate) fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Normalize one option value before it enters a payload.
///
/// String values are whitespace-trimmed, except when the owning field looks
/// like a password field (trimming those would corrupt deliberate leading or
/// trailing characters). Non-string values pass through untouched.
pub fn trim_option_value(field_name: &str, value: &Value) -> Value {
    match value {
        Value::String(text) if !is_password_field(field_name) => {
            Value::String(text.trim().to_string())
        }
        other => other.clone(),
    }
}

fn is_password_field(field_name: &str) -> bool {
    field_name.to_ascii_lowercase().contains("password")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn truthiness_follows_javascript_rules() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn scalars_render_like_tostring() {
        assert_eq!(scalar_to_string(&json!("disk-1")), "disk-1");
        assert_eq!(scalar_to_string(&json!(5)), "5");
        assert_eq!(scalar_to_string(&json!(true)), "true");
    }

    #[test]
    fn string_values_are_trimmed() {
        assert_eq!(trim_option_value("region", &json!("  us-east  ")), json!("us-east"));
        assert_eq!(trim_option_value("count", &json!(3)), json!(3));
    }

    #[test]
    fn password_fields_keep_their_whitespace() {
        assert_eq!(
            trim_option_value("admin_password", &json!(" secret ")),
            json!(" secret ")
        );
        assert_eq!(
            trim_option_value("Password", &json!(" secret ")),
            json!(" secret ")
        );
    }
}
