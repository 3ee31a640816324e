use std::fmt;

use thiserror::Error;

use crate::parse::Location;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),

    #[error("{0}: mapping keys must be scalars")]
    InvalidKey(Location),

    #[error("{0}: number is not finite")]
    InvalidNumber(Location),
}

/// A terminal failure of one compilation run.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{location}: malformed schema: {message}")]
    Schema { location: Location, message: String },

    #[error("{location}: unresolved reference to `{name}`")]
    UnresolvedReference { name: String, location: Location },

    #[error("{location}: type name `{name}` is already assigned to the type declared at {existing}")]
    NameCollision {
        name: String,
        location: Location,
        existing: Location,
    },

    #[error("{location}: enum value {value} is declared more than once")]
    DuplicateEnumValue { value: String, location: Location },
}

/// The kind of a [`CompileError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Schema,
    UnresolvedReference,
    NameCollision,
    DuplicateEnumValue,
}

impl CompileError {
    pub fn schema(location: &Location, message: impl Into<String>) -> Self {
        CompileError::Schema {
            location: location.clone(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::Parse(_) => ErrorKind::Parse,
            CompileError::Schema { .. } => ErrorKind::Schema,
            CompileError::UnresolvedReference { .. } => ErrorKind::UnresolvedReference,
            CompileError::NameCollision { .. } => ErrorKind::NameCollision,
            CompileError::DuplicateEnumValue { .. } => ErrorKind::DuplicateEnumValue,
        }
    }

    /// The document location the error points at, if it has one.
    pub fn location(&self) -> Option<&Location> {
        match self {
            CompileError::Parse(ParseError::InvalidKey(location))
            | CompileError::Parse(ParseError::InvalidNumber(location)) => Some(location),
            CompileError::Parse(_) => None,
            CompileError::Schema { location, .. }
            | CompileError::UnresolvedReference { location, .. }
            | CompileError::NameCollision { location, .. }
            | CompileError::DuplicateEnumValue { location, .. } => Some(location),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Parse => "ParseError",
            ErrorKind::Schema => "SchemaError",
            ErrorKind::UnresolvedReference => "UnresolvedReferenceError",
            ErrorKind::NameCollision => "NameCollisionError",
            ErrorKind::DuplicateEnumValue => "DuplicateEnumValueError",
        };
        f.write_str(name)
    }
}
