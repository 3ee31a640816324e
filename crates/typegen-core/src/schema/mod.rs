pub mod builder;
pub mod node;

pub use builder::{build_forest, build_schema};
pub use node::{PropertyNode, SchemaForest, SchemaKind, SchemaNode};
