use indexmap::IndexMap;

use super::node::{PropertyNode, SchemaForest, SchemaKind, SchemaNode};
use crate::error::CompileError;
use crate::model::{Docs, Literal, Primitive};
use crate::parse::{Location, Node, NodeValue, Scalar};

/// Reference prefixes that point at a declared schema, by document flavour.
const REF_PREFIXES: [&str; 3] = ["#/components/schemas/", "#/$defs/", "#/definitions/"];

/// Walk a loaded document and classify every declared schema.
pub fn build_forest(document: &Node) -> Result<SchemaForest, CompileError> {
    if document.as_mapping().is_none() {
        return Err(CompileError::schema(
            &document.location,
            "document root must be a mapping",
        ));
    }

    let Some(section) = locate_schemas(document) else {
        log::debug!("document declares no schemas");
        return Ok(SchemaForest::default());
    };
    let entries = section.as_mapping().ok_or_else(|| {
        CompileError::schema(&section.location, "schema section must be a mapping")
    })?;

    let mut roots = IndexMap::with_capacity(entries.len());
    for (name, node) in entries {
        roots.insert(name.clone(), build_schema(node)?);
    }
    log::debug!("built {} top-level schemas", roots.len());
    Ok(SchemaForest { roots })
}

fn locate_schemas(document: &Node) -> Option<&Node> {
    document
        .get("components")
        .and_then(|c| c.get("schemas"))
        .or_else(|| document.get("$defs"))
        .or_else(|| document.get("definitions"))
}

/// Classify one schema node.
///
/// Precedence: `$ref`, then alternation (`oneOf`/`anyOf`), then `allOf`,
/// then `enum`/`const`, then the declared or implied `type`.
pub fn build_schema(node: &Node) -> Result<SchemaNode, CompileError> {
    let location = &node.location;
    if node.as_mapping().is_none() {
        return Err(CompileError::schema(location, "expected a schema mapping"));
    }

    let docs = read_docs(node);
    let mut nullable = match node.get("nullable") {
        None => false,
        Some(flag) => flag
            .as_bool()
            .ok_or_else(|| CompileError::schema(&flag.location, "`nullable` must be a boolean"))?,
    };

    if let Some(reference) = node.get("$ref") {
        let path = reference
            .as_str()
            .ok_or_else(|| CompileError::schema(&reference.location, "`$ref` must be a string"))?;
        return Ok(SchemaNode {
            kind: SchemaKind::Reference {
                target: parse_ref(path, &reference.location)?,
            },
            nullable,
            docs,
            location: location.clone(),
        });
    }

    let (type_names, null_type) = read_types(node)?;
    nullable |= null_type;

    if let Some((keyword, members)) = alternation(node) {
        let mut variants = Vec::new();
        for member in sequence_of(members, keyword)? {
            if is_null_schema(member) {
                nullable = true;
                continue;
            }
            variants.push(build_schema(member)?);
        }
        if variants.is_empty() {
            return Err(CompileError::schema(
                &members.location,
                format!("`{keyword}` must list at least one non-null schema"),
            ));
        }
        if variants.len() == 1 {
            let only = variants.remove(0);
            return Ok(unwrap_single(only, docs, nullable));
        }
        return Ok(SchemaNode {
            kind: SchemaKind::Union(variants),
            nullable,
            docs,
            location: location.clone(),
        });
    }

    if let Some(members) = node.get("allOf") {
        let items = sequence_of(members, "allOf")?;
        if items.len() != 1 {
            return Err(CompileError::schema(
                &members.location,
                "`allOf` composition of several schemas is not supported",
            ));
        }
        let only = build_schema(&items[0])?;
        return Ok(unwrap_single(only, docs, nullable));
    }

    let kind = if let Some(values) = node.get("enum") {
        SchemaKind::Enum(read_enum(values)?)
    } else if let Some(value) = node.get("const") {
        SchemaKind::Enum(vec![literal(value)?])
    } else {
        classify_type(node, &type_names, null_type)?
    };

    Ok(SchemaNode {
        kind,
        nullable,
        docs,
        location: location.clone(),
    })
}

fn classify_type(
    node: &Node,
    type_names: &[String],
    null_type: bool,
) -> Result<SchemaKind, CompileError> {
    let location = &node.location;
    match type_names {
        [] if null_type => Err(CompileError::schema(
            location,
            "a standalone `null` type has no shape",
        )),
        [] => {
            if node.get("properties").is_some() || node.get("additionalProperties").is_some() {
                object_kind(node)
            } else if node.get("items").is_some() {
                array_kind(node)
            } else {
                Err(CompileError::schema(location, "schema declares no type"))
            }
        }
        [single] => match single.as_str() {
            "object" => object_kind(node),
            "array" => array_kind(node),
            other => Ok(SchemaKind::Primitive(primitive(other, node))),
        },
        several => {
            if several.iter().any(|t| t == "object" || t == "array") {
                return Err(CompileError::schema(
                    location,
                    "a `type` list may only combine primitive types",
                ));
            }
            let variants = several
                .iter()
                .map(|t| SchemaNode {
                    kind: SchemaKind::Primitive(primitive(t, node)),
                    nullable: false,
                    docs: Docs::default(),
                    location: location.child("type"),
                })
                .collect();
            Ok(SchemaKind::Union(variants))
        }
    }
}

fn primitive(type_name: &str, node: &Node) -> Primitive {
    match type_name {
        "number" => Primitive::Number,
        "integer" => Primitive::Integer,
        "boolean" => Primitive::Boolean,
        _ => match node.get("format").and_then(Node::as_str) {
            Some("binary" | "byte") => Primitive::Binary,
            Some("date-time" | "date") => Primitive::DateTime,
            _ => Primitive::String,
        },
    }
}

fn object_kind(node: &Node) -> Result<SchemaKind, CompileError> {
    let required = read_required(node)?;

    if let Some(props) = node.get("properties") {
        let entries = props.as_mapping().ok_or_else(|| {
            CompileError::schema(&props.location, "`properties` must be a mapping")
        })?;
        if !entries.is_empty() {
            let properties = entries
                .iter()
                .map(|(name, prop)| {
                    Ok(PropertyNode {
                        name: name.clone(),
                        schema: build_schema(prop)?,
                        required: required.contains(name),
                    })
                })
                .collect::<Result<Vec<_>, CompileError>>()?;
            return Ok(SchemaKind::Object(properties));
        }
    }

    // An explicit, empty `properties` declares an object with no fields.
    let declares_properties = node.get("properties").is_some();
    let Some(additional) = node.get("additionalProperties") else {
        if declares_properties {
            return Ok(SchemaKind::Object(Vec::new()));
        }
        return Err(CompileError::schema(
            &node.location,
            "object schema has no properties and no additional properties",
        ));
    };
    match &additional.value {
        NodeValue::Scalar(Scalar::Bool(true)) => Ok(SchemaKind::Map(None)),
        NodeValue::Scalar(Scalar::Bool(false)) if declares_properties => {
            Ok(SchemaKind::Object(Vec::new()))
        }
        NodeValue::Scalar(Scalar::Bool(false)) => Err(CompileError::schema(
            &node.location,
            "object schema has no properties and forbids additional properties",
        )),
        NodeValue::Mapping(m) if m.is_empty() => Ok(SchemaKind::Map(None)),
        NodeValue::Mapping(_) => Ok(SchemaKind::Map(Some(Box::new(build_schema(additional)?)))),
        _ => Err(CompileError::schema(
            &additional.location,
            "`additionalProperties` must be a boolean or a schema",
        )),
    }
}

fn array_kind(node: &Node) -> Result<SchemaKind, CompileError> {
    let items = node
        .get("items")
        .ok_or_else(|| CompileError::schema(&node.location, "array declared without an item type"))?;
    if items.as_mapping().is_none() {
        return Err(CompileError::schema(
            &items.location,
            "`items` must be a single schema",
        ));
    }
    Ok(SchemaKind::Array(Box::new(build_schema(items)?)))
}

/// Collapse a one-member wrapper (`oneOf`, `anyOf`, `allOf`) into its member,
/// keeping the wrapper's documentation and nullability.
fn unwrap_single(mut inner: SchemaNode, outer: Docs, nullable: bool) -> SchemaNode {
    inner.nullable |= nullable;
    inner.docs = Docs {
        description: outer.description.or(inner.docs.description),
        example: outer.example.or(inner.docs.example),
        format: outer.format.or(inner.docs.format),
    };
    inner
}

fn alternation(node: &Node) -> Option<(&'static str, &Node)> {
    node.get("oneOf")
        .map(|n| ("oneOf", n))
        .or_else(|| node.get("anyOf").map(|n| ("anyOf", n)))
}

fn is_null_schema(node: &Node) -> bool {
    node.get("type").and_then(Node::as_str) == Some("null")
}

fn sequence_of<'a>(node: &'a Node, keyword: &str) -> Result<&'a [Node], CompileError> {
    match node.as_sequence() {
        Some(items) if !items.is_empty() => Ok(items),
        Some(_) => Err(CompileError::schema(
            &node.location,
            format!("`{keyword}` must not be empty"),
        )),
        None => Err(CompileError::schema(
            &node.location,
            format!("`{keyword}` must be a sequence of schemas"),
        )),
    }
}

fn read_types(node: &Node) -> Result<(Vec<String>, bool), CompileError> {
    let Some(declared) = node.get("type") else {
        return Ok((Vec::new(), false));
    };
    let entries: Vec<&Node> = match &declared.value {
        NodeValue::Scalar(Scalar::String(_)) => vec![declared],
        NodeValue::Sequence(items) => items.iter().collect(),
        _ => {
            return Err(CompileError::schema(
                &declared.location,
                "`type` must be a string or a sequence of strings",
            ));
        }
    };

    let mut names = Vec::new();
    let mut null = false;
    for entry in entries {
        match entry.as_str() {
            Some("null") => null = true,
            Some(t @ ("string" | "number" | "integer" | "boolean" | "object" | "array")) => {
                if !names.iter().any(|n| n == t) {
                    names.push(t.to_string());
                }
            }
            Some(other) => {
                return Err(CompileError::schema(
                    &entry.location,
                    format!("unknown type `{other}`"),
                ));
            }
            None => {
                return Err(CompileError::schema(
                    &entry.location,
                    "`type` entries must be strings",
                ));
            }
        }
    }
    Ok((names, null))
}

fn read_required(node: &Node) -> Result<Vec<String>, CompileError> {
    let Some(required) = node.get("required") else {
        return Ok(Vec::new());
    };
    let invalid =
        || CompileError::schema(&required.location, "`required` must be a sequence of property names");
    required
        .as_sequence()
        .ok_or_else(invalid)?
        .iter()
        .map(|n| n.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}

fn read_enum(values: &Node) -> Result<Vec<Literal>, CompileError> {
    let items = values.as_sequence().ok_or_else(|| {
        CompileError::schema(&values.location, "`enum` must be a sequence of values")
    })?;
    if items.is_empty() {
        return Err(CompileError::schema(&values.location, "`enum` must not be empty"));
    }

    let mut literals: Vec<Literal> = Vec::with_capacity(items.len());
    for item in items {
        let value = literal(item)?;
        if literals.contains(&value) {
            return Err(CompileError::DuplicateEnumValue {
                value: value.to_string(),
                location: item.location.clone(),
            });
        }
        literals.push(value);
    }
    Ok(literals)
}

fn literal(node: &Node) -> Result<Literal, CompileError> {
    match node.as_scalar() {
        Some(Scalar::String(s)) => Ok(Literal::String(s.clone())),
        Some(Scalar::Number(n)) => Ok(Literal::Number(n.clone())),
        Some(Scalar::Bool(b)) => Ok(Literal::Boolean(*b)),
        Some(Scalar::Null) => Ok(Literal::Null),
        None => Err(CompileError::schema(
            &node.location,
            "enum values must be scalar literals",
        )),
    }
}

fn read_docs(node: &Node) -> Docs {
    let example = node.get("example").map(Node::to_json).or_else(|| {
        node.get("examples")
            .and_then(Node::as_sequence)
            .and_then(|items| items.first())
            .map(Node::to_json)
    });
    Docs {
        description: node
            .get("description")
            .and_then(Node::as_str)
            .map(str::to_string),
        example,
        format: node.get("format").and_then(Node::as_str).map(str::to_string),
    }
}

/// Extract the declared name from a local schema reference.
pub fn parse_ref(path: &str, location: &Location) -> Result<String, CompileError> {
    REF_PREFIXES
        .iter()
        .filter_map(|prefix| path.strip_prefix(prefix))
        .find(|name| !name.is_empty() && !name.contains('/'))
        .map(|name| name.replace("~1", "/").replace("~0", "~"))
        .ok_or_else(|| CompileError::schema(location, format!("unsupported reference `{path}`")))
}
