use typegen_core::model::{Literal, Primitive, TypeRef};

/// Map a `Primitive` to its TypeScript scalar type.
pub fn primitive_to_ts(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::String | Primitive::DateTime => "string",
        Primitive::Number | Primitive::Integer => "number",
        Primitive::Boolean => "boolean",
        Primitive::Binary => "Blob",
    }
}

/// Map a `TypeRef` to its TypeScript type string representation.
pub fn type_ref_to_ts(type_ref: &TypeRef) -> String {
    match type_ref {
        TypeRef::Primitive(p) => primitive_to_ts(*p).to_string(),
        TypeRef::Named(name) => name.to_string(),
        TypeRef::Array(inner) => {
            let inner_ts = type_ref_to_ts(inner);
            if inner_ts.contains('|') {
                format!("({inner_ts})[]")
            } else {
                format!("{inner_ts}[]")
            }
        }
        TypeRef::Map(Some(values)) => format!("Record<string, {}>", type_ref_to_ts(values)),
        TypeRef::Map(None) => "Record<string, unknown>".to_string(),
        TypeRef::Nullable(inner) => format!("{} | null", type_ref_to_ts(inner)),
    }
}

/// A literal as a TypeScript literal type. JSON spelling is valid TypeScript.
pub fn literal_to_ts(literal: &Literal) -> String {
    literal.to_string()
}

/// Whether `name` can be used as a bare property name.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Property name as written in an interface body, quoted when needed.
pub fn property_name(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        Literal::String(name.to_string()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typegen_core::model::TypeName;

    #[test]
    fn test_primitives() {
        assert_eq!(type_ref_to_ts(&TypeRef::Primitive(Primitive::String)), "string");
        assert_eq!(type_ref_to_ts(&TypeRef::Primitive(Primitive::DateTime)), "string");
        assert_eq!(type_ref_to_ts(&TypeRef::Primitive(Primitive::Integer)), "number");
        assert_eq!(type_ref_to_ts(&TypeRef::Primitive(Primitive::Boolean)), "boolean");
        assert_eq!(type_ref_to_ts(&TypeRef::Primitive(Primitive::Binary)), "Blob");
    }

    #[test]
    fn test_array() {
        assert_eq!(
            type_ref_to_ts(&TypeRef::Array(Box::new(TypeRef::Named(TypeName::new("Pet"))))),
            "Pet[]"
        );
        assert_eq!(
            type_ref_to_ts(&TypeRef::Array(Box::new(TypeRef::Array(Box::new(
                TypeRef::Primitive(Primitive::Number)
            ))))),
            "number[][]"
        );
    }

    #[test]
    fn test_map() {
        assert_eq!(type_ref_to_ts(&TypeRef::Map(None)), "Record<string, unknown>");
        assert_eq!(
            type_ref_to_ts(&TypeRef::Map(Some(Box::new(TypeRef::Primitive(
                Primitive::Integer
            ))))),
            "Record<string, number>"
        );
    }

    #[test]
    fn test_nullable() {
        let maybe_int = TypeRef::Nullable(Box::new(TypeRef::Primitive(Primitive::Integer)));
        assert_eq!(type_ref_to_ts(&maybe_int), "number | null");
        assert_eq!(
            type_ref_to_ts(&TypeRef::Array(Box::new(maybe_int.clone()))),
            "(number | null)[]"
        );
        assert_eq!(
            type_ref_to_ts(&TypeRef::Map(Some(Box::new(maybe_int)))),
            "Record<string, number | null>"
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(literal_to_ts(&Literal::String("One".into())), "\"One\"");
        assert_eq!(literal_to_ts(&Literal::Number(0.into())), "0");
        assert_eq!(literal_to_ts(&Literal::Boolean(true)), "true");
        assert_eq!(literal_to_ts(&Literal::Null), "null");
    }

    #[test]
    fn test_property_names() {
        assert_eq!(property_name("createdAt"), "createdAt");
        assert_eq!(property_name("$ref"), "$ref");
        assert_eq!(property_name("content-type"), "\"content-type\"");
        assert_eq!(property_name("2fa"), "\"2fa\"");
    }
}
