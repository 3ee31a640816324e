pub mod defs;
pub mod types;

use indexmap::IndexMap;
use serde::Serialize;

pub use defs::*;
pub use types::{Literal, LiteralKind, NormalizedName, Primitive, TypeName, TypeRef};

/// The resolved, language-neutral set of type definitions produced by one
/// compilation run. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CanonicalModel {
    types: IndexMap<TypeName, TypeDecl>,
}

impl CanonicalModel {
    /// Build a registry from declarations in emission order.
    ///
    /// Names must be unique; the resolver guarantees it.
    pub(crate) fn from_decls(decls: impl IntoIterator<Item = TypeDecl>) -> Self {
        let mut types = IndexMap::new();
        for decl in decls {
            let previous = types.insert(decl.name.clone(), decl);
            debug_assert!(previous.is_none(), "type names must be unique");
        }
        CanonicalModel { types }
    }

    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &TypeName) -> bool {
        self.types.contains_key(name)
    }

    /// Declarations in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &TypeName> {
        self.types.keys()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Names referenced somewhere in the model that have no declaration.
    /// Always empty for a model produced by the resolver.
    pub fn dangling_refs(&self) -> Vec<&TypeName> {
        let mut dangling = Vec::new();
        for decl in self.iter() {
            for type_ref in decl.def.type_refs() {
                type_ref.visit_names(&mut |name| {
                    if !self.contains(name) && !dangling.contains(&name) {
                        dangling.push(name);
                    }
                });
            }
        }
        dangling
    }
}
