use std::collections::HashSet;

use typegen_core::model::{Literal, Primitive, TypeRef};

/// Words that cannot be used as bare record labels.
const RESERVED: [&str; 27] = [
    "ado", "as", "case", "class", "data", "derive", "do", "else", "false", "forall", "foreign",
    "hiding", "if", "import", "in", "infix", "infixl", "infixr", "instance", "let", "module",
    "newtype", "of", "then", "true", "type", "where",
];

/// Map a `Primitive` to its PureScript type.
pub fn primitive_to_purs(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::String | Primitive::DateTime => "String",
        Primitive::Number => "Number",
        Primitive::Integer => "Int",
        Primitive::Boolean => "Boolean",
        Primitive::Binary => "Blob",
    }
}

/// Map a `TypeRef` to its PureScript type expression.
pub fn type_ref_to_purs(type_ref: &TypeRef) -> String {
    match type_ref {
        TypeRef::Primitive(p) => primitive_to_purs(*p).to_string(),
        TypeRef::Named(name) => name.to_string(),
        TypeRef::Array(inner) => format!("Array {}", parenthesize(type_ref_to_purs(inner))),
        TypeRef::Map(Some(values)) => {
            format!("Object {}", parenthesize(type_ref_to_purs(values)))
        }
        TypeRef::Map(None) => "Object Foreign".to_string(),
        TypeRef::Nullable(inner) => format!("Nullable {}", parenthesize(type_ref_to_purs(inner))),
    }
}

/// Wrap a type application in parentheses so it can be used as an argument.
pub fn parenthesize(ty: String) -> String {
    if ty.contains(' ') {
        format!("({ty})")
    } else {
        ty
    }
}

/// Record label for a property: camelCase, with reserved words suffixed by `_`.
/// Names that cannot become an identifier are kept as quoted labels.
pub fn record_label(name: &str) -> String {
    let label = typegen_core::transform::name_normalizer::normalize_name(name).camel_case;
    if !label.starts_with(|c: char| c.is_ascii_lowercase() || c == '_') {
        return Literal::String(name.to_string()).to_string();
    }
    if RESERVED.contains(&label.as_str()) {
        format!("{label}_")
    } else {
        label
    }
}

/// Labels for the properties of one record, in order.
///
/// A property whose label is already taken falls back to its quoted original
/// name, then to a numeric suffix.
pub fn record_labels<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut used = HashSet::new();
    names
        .into_iter()
        .map(|name| {
            let label = record_label(name);
            let quoted = label.starts_with('"');
            let key = if quoted { name.to_string() } else { label.clone() };
            if used.insert(key.clone()) {
                return label;
            }
            if used.insert(name.to_string()) {
                return Literal::String(name.to_string()).to_string();
            }
            let mut suffix = 2;
            loop {
                let candidate = format!("{key}{suffix}");
                if used.insert(candidate.clone()) {
                    return if quoted {
                        Literal::String(candidate).to_string()
                    } else {
                        candidate
                    };
                }
                suffix += 1;
            }
        })
        .collect()
}
