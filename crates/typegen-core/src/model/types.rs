use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

/// A unique, stable identifier for a type in the canonical model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        TypeName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TypeName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TypeName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A name with multiple casing variants pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName {
    pub original: String,
    pub pascal_case: String,
    pub camel_case: String,
    pub snake_case: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// Scalar types every target maps to a native type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Primitive {
    String,
    Number,
    Integer,
    Boolean,
    /// A string carrying a date or date-time.
    DateTime,
    /// A string carrying raw or base64-encoded bytes.
    Binary,
}

/// A literal value permitted by an enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Number(serde_json::Number),
    Boolean(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralKind {
    String,
    Number,
    Boolean,
    Null,
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::String(_) => LiteralKind::String,
            Literal::Number(_) => LiteralKind::Number,
            Literal::Boolean(_) => LiteralKind::Boolean,
            Literal::Null => LiteralKind::Null,
        }
    }
}

/// Renders the literal the way JSON spells it.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{}", serde_json::Value::String(s.clone())),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::Null => f.write_str("null"),
        }
    }
}

/// A resolved type expression.
///
/// Only `Named` points into the registry, and it never owns the pointee, so
/// self- and mutually-recursive types are plain names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "lowercase")]
pub enum TypeRef {
    Primitive(Primitive),
    Named(TypeName),
    Array(Box<TypeRef>),
    /// String-keyed dictionary; `None` means the values are unconstrained.
    Map(Option<Box<TypeRef>>),
    /// The inner type, or null.
    Nullable(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: &TypeName) -> Self {
        TypeRef::Named(name.clone())
    }

    /// Call `f` on every registry name this expression mentions.
    pub fn visit_names<'a>(&'a self, f: &mut impl FnMut(&'a TypeName)) {
        match self {
            TypeRef::Primitive(_) => {}
            TypeRef::Named(name) => f(name),
            TypeRef::Array(inner) => inner.visit_names(f),
            TypeRef::Map(Some(inner)) => inner.visit_names(f),
            TypeRef::Map(None) => {}
            TypeRef::Nullable(inner) => inner.visit_names(f),
        }
    }
}
