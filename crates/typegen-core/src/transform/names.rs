use std::collections::HashMap;

use crate::error::CompileError;
use crate::model::TypeName;
use crate::parse::Location;

/// Highest numeric suffix tried before a synthesized name counts as exhausted.
pub const MAX_NAME_SUFFIX: usize = 999;

/// Every type name assigned during one compilation run, with the location
/// of the shape that owns it. Created per run and dropped with it.
#[derive(Debug, Default)]
pub struct NameRegistry {
    assigned: HashMap<String, Location>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a declared name exactly as given; declared names are never suffixed.
    pub fn claim(&mut self, name: &str, location: &Location) -> Result<TypeName, CompileError> {
        if let Some(existing) = self.assigned.get(name) {
            return Err(CompileError::NameCollision {
                name: name.to_string(),
                location: location.clone(),
                existing: existing.clone(),
            });
        }
        self.assigned.insert(name.to_string(), location.clone());
        Ok(TypeName::new(name))
    }

    /// Assign a name for an anonymous shape, appending `2`, `3`, ... when the
    /// base is already taken.
    pub fn synthesize(&mut self, base: &str, location: &Location) -> Result<TypeName, CompileError> {
        if !self.assigned.contains_key(base) {
            return self.claim(base, location);
        }
        for i in 2..=MAX_NAME_SUFFIX {
            let candidate = format!("{base}{i}");
            if !self.assigned.contains_key(&candidate) {
                log::trace!("{location}: `{base}` is taken, using `{candidate}`");
                return self.claim(&candidate, location);
            }
        }
        Err(CompileError::NameCollision {
            name: base.to_string(),
            location: location.clone(),
            existing: self.assigned[base].clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
