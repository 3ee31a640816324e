pub mod location;
pub mod node;

use crate::error::ParseError;

pub use location::Location;
pub use node::{Node, NodeValue, Scalar};

/// Parse a schema document from YAML.
pub fn from_yaml(input: &str) -> Result<Node, ParseError> {
    let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(input)?;
    let document = Node::from_yaml(value, Location::root())?;
    validate_version(&document)?;
    Ok(document)
}

/// Parse a schema document from JSON.
pub fn from_json(input: &str) -> Result<Node, ParseError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    let document = Node::from_json(value, Location::root())?;
    validate_version(&document)?;
    Ok(document)
}

/// Plain JSON-Schema documents carry no `openapi` key and are accepted as-is.
fn validate_version(document: &Node) -> Result<(), ParseError> {
    let Some(version) = document.get("openapi") else {
        return Ok(());
    };
    match version.as_str() {
        Some(v) if v.starts_with("3.") => Ok(()),
        Some(v) => Err(ParseError::UnsupportedVersion(v.to_string())),
        None => Err(ParseError::UnsupportedVersion(version.to_string())),
    }
}
