use typegen_core::config::{EmitOptions, NullableRepresentation};
use typegen_core::model::{CanonicalModel, Primitive, TypeDef, TypeRef};

/// Foreign types the rendered declarations mention.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Usage {
    maybe: bool,
    nullable: bool,
    foreign: bool,
    object: bool,
    blob: bool,
}

impl Usage {
    fn visit(&mut self, type_ref: &TypeRef) {
        match type_ref {
            TypeRef::Primitive(Primitive::Binary) => self.blob = true,
            TypeRef::Primitive(_) | TypeRef::Named(_) => {}
            TypeRef::Array(inner) => self.visit(inner),
            TypeRef::Map(values) => {
                self.object = true;
                match values {
                    Some(inner) => self.visit(inner),
                    None => self.foreign = true,
                }
            }
            TypeRef::Nullable(inner) => {
                self.nullable = true;
                self.visit(inner);
            }
        }
    }
}

/// Import lines needed by the declarations of `model`, in module order.
pub fn collect_imports(model: &CanonicalModel, options: &EmitOptions) -> Vec<&'static str> {
    let mut usage = Usage::default();
    for decl in model.iter() {
        // Enums and unions spell null as a constructor.
        if decl.nullable && !matches!(decl.def, TypeDef::Enum(_) | TypeDef::Union(_)) {
            usage.nullable = true;
        }
        match &decl.def {
            TypeDef::Primitive { primitive } => {
                usage.visit(&TypeRef::Primitive(*primitive));
            }
            TypeDef::Map(map) => {
                usage.object = true;
                match &map.values {
                    Some(values) => usage.visit(values),
                    None => usage.foreign = true,
                }
            }
            TypeDef::Object(obj) => {
                for field in &obj.fields {
                    usage.visit(&field.type_ref);
                    match options.nullable_representation {
                        NullableRepresentation::OptionalField => {
                            usage.maybe |= !field.required || field.nullable;
                        }
                        NullableRepresentation::UnionWithNull => {
                            usage.maybe |= !field.required;
                            usage.nullable |= field.nullable;
                        }
                    }
                }
            }
            def => {
                for type_ref in def.type_refs() {
                    usage.visit(type_ref);
                }
            }
        }
    }

    let mut imports = Vec::new();
    if usage.maybe {
        imports.push("import Data.Maybe (Maybe)");
    }
    if usage.nullable {
        imports.push("import Data.Nullable (Nullable)");
    }
    if usage.foreign {
        imports.push("import Foreign (Foreign)");
    }
    if usage.object {
        imports.push("import Foreign.Object (Object)");
    }
    if usage.blob {
        imports.push("import Web.File.Blob (Blob)");
    }
    imports
}
