use serde::Serialize;

use super::types::{Literal, LiteralKind, Primitive, TypeName, TypeRef};
use crate::parse::Location;

/// A named entry of the canonical model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDecl {
    pub name: TypeName,
    pub def: TypeDef,
    /// The declared value may also be null.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
    pub docs: Docs,
    /// Where the shape was declared in the source document.
    pub location: Location,
}

/// Documentation carried from the schema into emitted comments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Docs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Docs {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.example.is_none() && self.format.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeDef {
    Primitive { primitive: Primitive },
    Enum(EnumDef),
    Object(ObjectDef),
    Array(ArrayDef),
    Map(MapDef),
    Union(UnionDef),
    /// A declared name that only points at another type.
    Reference { target: TypeRef },
}

impl TypeDef {
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeDef::Primitive { .. } => "primitive",
            TypeDef::Enum(_) => "enum",
            TypeDef::Object(_) => "object",
            TypeDef::Array(_) => "array",
            TypeDef::Map(_) => "map",
            TypeDef::Union(_) => "union",
            TypeDef::Reference { .. } => "reference",
        }
    }

    /// Every type expression directly held by this definition.
    pub fn type_refs(&self) -> Vec<&TypeRef> {
        match self {
            TypeDef::Primitive { .. } | TypeDef::Enum(_) => Vec::new(),
            TypeDef::Object(obj) => obj.fields.iter().map(|f| &f.type_ref).collect(),
            TypeDef::Array(arr) => vec![&arr.element],
            TypeDef::Map(map) => map.values.iter().collect(),
            TypeDef::Union(union) => union.variants.iter().collect(),
            TypeDef::Reference { target } => vec![target],
        }
    }
}

/// An enumeration of literal values, in declaration order, without duplicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDef {
    values: Vec<Literal>,
}

impl EnumDef {
    /// Build from already de-duplicated values; the builder rejects duplicates.
    pub(crate) fn new(values: Vec<Literal>) -> Self {
        EnumDef { values }
    }

    pub fn values(&self) -> &[Literal] {
        &self.values
    }

    /// The distinct literal kinds present, in first-seen order.
    pub fn kinds(&self) -> Vec<LiteralKind> {
        let mut kinds = Vec::new();
        for value in &self.values {
            let kind = value.kind();
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }

    /// True when the values span more than one literal kind.
    pub fn is_mixed(&self) -> bool {
        self.kinds().len() > 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectDef {
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    /// The property name exactly as declared.
    pub name: String,
    pub type_ref: TypeRef,
    pub required: bool,
    pub nullable: bool,
    pub docs: Docs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayDef {
    pub element: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDef {
    pub values: Option<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionDef {
    pub variants: Vec<TypeRef>,
}
