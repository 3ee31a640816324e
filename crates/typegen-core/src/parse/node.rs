use std::fmt;

use indexmap::IndexMap;

use super::location::Location;
use crate::error::ParseError;

/// A node of the generic document tree, annotated with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub value: NodeValue,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    Mapping(IndexMap<String, Node>),
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl Node {
    pub fn from_yaml(mut value: serde_yaml_ng::Value, location: Location) -> Result<Self, ParseError> {
        value.apply_merge()?;
        Self::convert_yaml(value, location)
    }

    fn convert_yaml(value: serde_yaml_ng::Value, location: Location) -> Result<Self, ParseError> {
        use serde_yaml_ng::Value;

        let value = match value {
            Value::Null => NodeValue::Scalar(Scalar::Null),
            Value::Bool(b) => NodeValue::Scalar(Scalar::Bool(b)),
            Value::String(s) => NodeValue::Scalar(Scalar::String(s)),
            Value::Number(n) => NodeValue::Scalar(Scalar::Number(yaml_number(&n, &location)?)),
            Value::Sequence(items) => NodeValue::Sequence(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| Self::convert_yaml(item, location.child(i)))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Mapping(mapping) => {
                let mut entries = IndexMap::with_capacity(mapping.len());
                for (key, item) in mapping {
                    let key = match key {
                        Value::String(s) => s,
                        Value::Bool(b) => b.to_string(),
                        Value::Number(n) => n.to_string(),
                        Value::Null => "null".to_string(),
                        _ => return Err(ParseError::InvalidKey(location)),
                    };
                    let child = Self::convert_yaml(item, location.child(&key))?;
                    entries.insert(key, child);
                }
                NodeValue::Mapping(entries)
            }
            Value::Tagged(tagged) => return Self::convert_yaml(tagged.value, location),
        };
        Ok(Node { value, location })
    }

    pub fn from_json(value: serde_json::Value, location: Location) -> Result<Self, ParseError> {
        use serde_json::Value;

        let value = match value {
            Value::Null => NodeValue::Scalar(Scalar::Null),
            Value::Bool(b) => NodeValue::Scalar(Scalar::Bool(b)),
            Value::Number(n) => NodeValue::Scalar(Scalar::Number(n)),
            Value::String(s) => NodeValue::Scalar(Scalar::String(s)),
            Value::Array(items) => NodeValue::Sequence(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| Self::from_json(item, location.child(i)))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(object) => {
                let mut entries = IndexMap::with_capacity(object.len());
                for (key, item) in object {
                    let child = Self::from_json(item, location.child(&key))?;
                    entries.insert(key, child);
                }
                NodeValue::Mapping(entries)
            }
        };
        Ok(Node { value, location })
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Node>> {
        match &self.value {
            NodeValue::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match &self.value {
            NodeValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match &self.value {
            NodeValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            NodeValue::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match &self.value {
            NodeValue::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Look up a key when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// Convert back into a JSON value, e.g. to render schema examples.
    pub fn to_json(&self) -> serde_json::Value {
        match &self.value {
            NodeValue::Scalar(Scalar::Null) => serde_json::Value::Null,
            NodeValue::Scalar(Scalar::Bool(b)) => serde_json::Value::Bool(*b),
            NodeValue::Scalar(Scalar::Number(n)) => serde_json::Value::Number(n.clone()),
            NodeValue::Scalar(Scalar::String(s)) => serde_json::Value::String(s.clone()),
            NodeValue::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Node::to_json).collect())
            }
            NodeValue::Mapping(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

fn yaml_number(n: &serde_yaml_ng::Number, location: &Location) -> Result<serde_json::Number, ParseError> {
    if let Some(i) = n.as_i64() {
        return Ok(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.into());
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .ok_or_else(|| ParseError::InvalidNumber(location.clone()))
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            NodeValue::Scalar(s) => write!(f, "{s}"),
            NodeValue::Sequence(_) => f.write_str("<sequence>"),
            NodeValue::Mapping(_) => f.write_str("<mapping>"),
        }
    }
}
