use std::collections::HashSet;

use typegen_core::model::{CanonicalModel, Literal, TypeDef, TypeRef};
use typegen_core::transform::name_normalizer::type_name;

use crate::type_mapper::primitive_to_purs;

/// Data constructor names share one namespace per module.
#[derive(Debug, Default)]
pub struct Constructors {
    used: HashSet<String>,
}

impl Constructors {
    /// Seed with the newtype constructor of every object in the model.
    pub fn for_model(model: &CanonicalModel) -> Self {
        let mut constructors = Self::default();
        for decl in model.iter() {
            if matches!(decl.def, TypeDef::Object(_)) {
                constructors.used.insert(decl.name.to_string());
            }
        }
        constructors
    }

    /// Claim `preferred`, else `qualified`, else `qualified` with the first
    /// free numeric suffix.
    pub fn claim(&mut self, preferred: String, qualified: String) -> String {
        if self.used.insert(preferred.clone()) {
            return preferred;
        }
        if self.used.insert(qualified.clone()) {
            return qualified;
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{qualified}{suffix}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            suffix += 1;
        }
    }
}

/// Constructor name for an enum value.
pub fn literal_constructor(value: &Literal) -> String {
    match value {
        Literal::String(s) => type_name(s),
        Literal::Boolean(true) => "ValueTrue".to_string(),
        Literal::Boolean(false) => "ValueFalse".to_string(),
        Literal::Null => "ValueNull".to_string(),
        Literal::Number(n) => {
            let spelled = n.to_string().replace('-', "Minus").replace('.', "_");
            format!("Value{spelled}")
        }
    }
}

/// Label a union variant by the type it carries.
pub fn variant_label(type_ref: &TypeRef) -> String {
    match type_ref {
        TypeRef::Primitive(p) => primitive_to_purs(*p).to_string(),
        TypeRef::Named(name) => name.to_string(),
        TypeRef::Array(inner) => format!("Array{}", variant_label(inner)),
        TypeRef::Map(_) => "Object".to_string(),
        TypeRef::Nullable(inner) => format!("Nullable{}", variant_label(inner)),
    }
}
