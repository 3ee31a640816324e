use minijinja::{Environment, context};
use typegen_core::Declaration;
use typegen_core::config::{EmitOptions, NullableRepresentation};
use typegen_core::model::{CanonicalModel, Docs, FieldDef, Literal, TypeDecl, TypeDef, TypeRef};

use super::constructors::{Constructors, literal_constructor, variant_label};
use super::imports::collect_imports;
use crate::type_mapper::{parenthesize, primitive_to_purs, record_labels, type_ref_to_purs};

pub(crate) fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template(
        "declaration.purs.j2",
        include_str!("../../templates/declaration.purs.j2"),
    )?;
    env.add_template("module.purs.j2", include_str!("../../templates/module.purs.j2"))?;
    Ok(env)
}

/// Render one declaration per registry entry, in registry order.
pub fn emit_declarations(
    model: &CanonicalModel,
    options: &EmitOptions,
) -> Result<Vec<Declaration>, minijinja::Error> {
    let env = environment()?;
    let tmpl = env.get_template("declaration.purs.j2")?;
    let mut constructors = Constructors::for_model(model);

    let mut declarations = Vec::with_capacity(model.len());
    for decl in model.iter() {
        let text = tmpl.render(decl_to_ctx(decl, options, &mut constructors))?;
        declarations.push(Declaration {
            name: decl.name.clone(),
            text: text.trim_end().to_string(),
        });
    }
    log::debug!("rendered {} PureScript declarations", declarations.len());
    Ok(declarations)
}

/// Emit the module source from already rendered declarations.
pub fn emit_module(
    module_name: &str,
    model: &CanonicalModel,
    options: &EmitOptions,
    declarations: &[Declaration],
) -> Result<String, minijinja::Error> {
    let env = environment()?;
    let texts: Vec<&str> = declarations.iter().map(|d| d.text.as_str()).collect();
    env.get_template("module.purs.j2")?.render(context! {
        module_name => module_name,
        imports => collect_imports(model, options),
        declarations => texts,
    })
}

fn decl_to_ctx(
    decl: &TypeDecl,
    options: &EmitOptions,
    constructors: &mut Constructors,
) -> minijinja::Value {
    let name = decl.name.to_string();
    let docs = doc_lines(&decl.docs);
    let target = match &decl.def {
        TypeDef::Object(obj) => {
            let labels = record_labels(obj.fields.iter().map(|f| f.name.as_str()));
            let fields: Vec<minijinja::Value> = obj
                .fields
                .iter()
                .zip(labels)
                .map(|(f, label)| {
                    context! {
                        label => label,
                        type => field_type(f, options),
                    }
                })
                .collect();
            return context! {
                kind => "object",
                name => name,
                docs => docs,
                nullable => decl.nullable,
                fields => fields,
            };
        }
        TypeDef::Enum(e) => {
            let mut names: Vec<String> = e
                .values()
                .iter()
                .map(|value| {
                    let base = literal_constructor(value);
                    constructors.claim(base.clone(), format!("{name}{base}"))
                })
                .collect();
            if decl.nullable && !e.values().contains(&Literal::Null) {
                names.push(null_constructor(&name, constructors));
            }
            return data_ctx(&name, docs, names);
        }
        TypeDef::Union(u) => {
            let mut names: Vec<String> = u
                .variants
                .iter()
                .map(|variant| {
                    let ctor = format!("{name}{}", variant_label(variant));
                    let ctor = constructors.claim(ctor.clone(), ctor);
                    format!("{ctor} {}", parenthesize(type_ref_to_purs(variant)))
                })
                .collect();
            if decl.nullable {
                names.push(null_constructor(&name, constructors));
            }
            return data_ctx(&name, docs, names);
        }
        TypeDef::Primitive { primitive } => primitive_to_purs(*primitive).to_string(),
        TypeDef::Array(arr) => type_ref_to_purs(&TypeRef::Array(Box::new(arr.element.clone()))),
        TypeDef::Map(map) => type_ref_to_purs(&TypeRef::Map(map.values.clone().map(Box::new))),
        TypeDef::Reference { target } => type_ref_to_purs(target),
    };
    let target = if decl.nullable {
        format!("Nullable {}", parenthesize(target))
    } else {
        target
    };
    context! {
        kind => "alias",
        name => name,
        docs => docs,
        target => target,
    }
}

fn null_constructor(name: &str, constructors: &mut Constructors) -> String {
    let null = format!("{name}Null");
    constructors.claim(null.clone(), null)
}

fn data_ctx(name: &str, docs: Vec<String>, constructors: Vec<String>) -> minijinja::Value {
    context! {
        kind => "data",
        name => name,
        docs => docs,
        constructors => constructors,
    }
}

/// Record field type; absent values become `Maybe`, nulls `Nullable`.
fn field_type(field: &FieldDef, options: &EmitOptions) -> String {
    let ty = type_ref_to_purs(&field.type_ref);
    match options.nullable_representation {
        NullableRepresentation::OptionalField if !field.required || field.nullable => {
            format!("Maybe {}", parenthesize(ty))
        }
        NullableRepresentation::OptionalField => ty,
        NullableRepresentation::UnionWithNull => {
            let ty = if field.nullable {
                format!("Nullable {}", parenthesize(ty))
            } else {
                ty
            };
            if field.required {
                ty
            } else {
                format!("Maybe {}", parenthesize(ty))
            }
        }
    }
}

fn doc_lines(docs: &Docs) -> Vec<String> {
    let mut lines: Vec<String> = docs
        .description
        .iter()
        .flat_map(|d| d.trim().lines())
        .map(|l| l.trim_end().to_string())
        .collect();
    if let Some(example) = &docs.example {
        lines.push(format!("Example - {example}"));
    }
    if let Some(format) = &docs.format {
        lines.push(format!("Format - {format}"));
    }
    lines
}
