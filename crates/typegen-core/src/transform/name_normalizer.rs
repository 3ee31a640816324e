use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};

use crate::model::NormalizedName;

/// Create a `NormalizedName` from an arbitrary string, computing all casing variants.
pub fn normalize_name(name: &str) -> NormalizedName {
    let sanitized = sanitize_identifier(name);

    NormalizedName {
        original: name.to_string(),
        pascal_case: sanitized.to_pascal_case(),
        camel_case: sanitized.to_lower_camel_case(),
        snake_case: sanitized.to_snake_case(),
    }
}

/// PascalCase type name for a declared schema key or a naming context.
///
/// Identifiers cannot start with a digit, so such names gain a `T` prefix.
pub fn type_name(name: &str) -> String {
    let pascal = normalize_name(name).pascal_case;
    if pascal.starts_with(|c: char| c.is_ascii_digit()) {
        format!("T{pascal}")
    } else {
        pascal
    }
}

/// Sanitize a string to be a valid identifier.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}
