use indexmap::IndexMap;

use crate::model::{Docs, Literal, Primitive};
use crate::parse::Location;

/// All declared top-level schemas of one document, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaForest {
    pub roots: IndexMap<String, SchemaNode>,
}

/// A classified schema node, not yet resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub kind: SchemaKind,
    pub nullable: bool,
    pub docs: Docs,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// A lazy placeholder for a declared schema, expanded by the resolver.
    Reference { target: String },
    Primitive(Primitive),
    Enum(Vec<Literal>),
    Object(Vec<PropertyNode>),
    Array(Box<SchemaNode>),
    Map(Option<Box<SchemaNode>>),
    Union(Vec<SchemaNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyNode {
    pub name: String,
    pub schema: SchemaNode,
    pub required: bool,
}

impl SchemaKind {
    /// Shapes that need their own registry entry when they appear inline.
    pub fn needs_name(&self) -> bool {
        matches!(
            self,
            SchemaKind::Object(_) | SchemaKind::Enum(_) | SchemaKind::Union(_)
        )
    }
}
