use std::collections::HashSet;

use minijinja::{Environment, context};
use typegen_core::Declaration;
use typegen_core::config::{EmitOptions, EnumStyle, NullableRepresentation};
use typegen_core::model::{
    CanonicalModel, Docs, EnumDef, FieldDef, Literal, LiteralKind, ObjectDef, TypeDecl, TypeDef,
    TypeRef,
};
use typegen_core::transform::name_normalizer::type_name;

use crate::type_mapper::{literal_to_ts, primitive_to_ts, property_name, type_ref_to_ts};

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
fn escape_jsdoc(value: &str) -> String {
    value.replace("*/", "*\\/")
}

pub(crate) fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template(
        "declaration.ts.j2",
        include_str!("../../templates/declaration.ts.j2"),
    )?;
    env.add_template("types.ts.j2", include_str!("../../templates/types.ts.j2"))?;
    Ok(env)
}

/// Render one declaration per registry entry, in registry order.
pub fn emit_declarations(
    model: &CanonicalModel,
    options: &EmitOptions,
) -> Result<Vec<Declaration>, minijinja::Error> {
    let env = environment()?;
    let tmpl = env.get_template("declaration.ts.j2")?;

    let mut declarations = Vec::with_capacity(model.len());
    for decl in model.iter() {
        let text = tmpl.render(decl_to_ctx(decl, options))?;
        declarations.push(Declaration {
            name: decl.name.clone(),
            text: text.trim_end().to_string(),
        });
    }
    log::debug!("rendered {} TypeScript declarations", declarations.len());
    Ok(declarations)
}

/// Emit `types.ts` from already rendered declarations.
pub fn emit_types(declarations: &[Declaration]) -> Result<String, minijinja::Error> {
    let env = environment()?;
    let texts: Vec<&str> = declarations.iter().map(|d| d.text.as_str()).collect();
    env.get_template("types.ts.j2")?
        .render(context! { declarations => texts })
}

fn decl_to_ctx(decl: &TypeDecl, options: &EmitOptions) -> minijinja::Value {
    let name = decl.name.to_string();
    let docs = doc_lines(&decl.docs);
    // A null literal already makes the enum nullable.
    let nullable = decl.nullable
        && !matches!(&decl.def, TypeDef::Enum(e) if e.values().contains(&Literal::Null));

    let target = match &decl.def {
        TypeDef::Object(obj) => return object_to_ctx(&name, docs, obj, nullable, options),
        TypeDef::Enum(e) => match named_enum_members(e, options) {
            Some(members) if !nullable => {
                return context! {
                    kind => "enum",
                    name => name,
                    docs => docs,
                    members => members,
                };
            }
            _ => literal_union(e),
        },
        TypeDef::Union(u) => u
            .variants
            .iter()
            .map(type_ref_to_ts)
            .collect::<Vec<_>>()
            .join(" | "),
        TypeDef::Primitive { primitive } => primitive_to_ts(*primitive).to_string(),
        TypeDef::Array(arr) => type_ref_to_ts(&TypeRef::Array(Box::new(arr.element.clone()))),
        TypeDef::Map(map) => type_ref_to_ts(&TypeRef::Map(map.values.clone().map(Box::new))),
        TypeDef::Reference { target } => type_ref_to_ts(target),
    };
    let target = if nullable {
        format!("{target} | null")
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

fn object_to_ctx(
    name: &str,
    mut docs: Vec<String>,
    obj: &ObjectDef,
    nullable: bool,
    options: &EmitOptions,
) -> minijinja::Value {
    let mut fields = Vec::with_capacity(obj.fields.len());
    for field in &obj.fields {
        let (optional, ts_type) = field_signature(field, options);
        docs.push(property_line(field, &ts_type));
        fields.push(context! {
            name => property_name(&field.name),
            type => ts_type,
            optional => optional,
            docs => doc_lines(&field.docs),
        });
    }

    context! {
        kind => "object",
        name => name,
        docs => docs,
        nullable => nullable,
        fields => fields,
    }
}

/// Summary of one field for the object's JSDoc block.
fn property_line(field: &FieldDef, ts_type: &str) -> String {
    let summary = field
        .docs
        .description
        .as_deref()
        .and_then(|d| d.trim().lines().next())
        .unwrap_or_default();
    let line = if summary.is_empty() {
        format!("@property ({ts_type}) {}", field.name)
    } else {
        format!("@property ({ts_type}) {} - {}", field.name, summary.trim_end())
    };
    escape_jsdoc(&line)
}

/// Whether the property is marked `?`, and its rendered type.
fn field_signature(field: &FieldDef, options: &EmitOptions) -> (bool, String) {
    let ts_type = type_ref_to_ts(&field.type_ref);
    if !field.nullable {
        return (!field.required, ts_type);
    }
    match options.nullable_representation {
        NullableRepresentation::OptionalField => (true, ts_type),
        NullableRepresentation::UnionWithNull => (!field.required, format!("{ts_type} | null")),
    }
}

fn literal_union(e: &EnumDef) -> String {
    e.values()
        .iter()
        .map(literal_to_ts)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Members of a TypeScript `enum`, when the style asks for one and every
/// value is a string or every value is a number.
fn named_enum_members(e: &EnumDef, options: &EmitOptions) -> Option<Vec<minijinja::Value>> {
    if options.enum_style != EnumStyle::NamedEnum {
        return None;
    }
    if !matches!(e.kinds().as_slice(), [LiteralKind::String] | [LiteralKind::Number]) {
        return None;
    }

    let mut used = HashSet::new();
    let members = e
        .values()
        .iter()
        .map(|value| {
            let base = member_name(value);
            let mut member = base.clone();
            let mut suffix = 2;
            while !used.insert(member.clone()) {
                member = format!("{base}{suffix}");
                suffix += 1;
            }
            context! {
                name => member,
                value => literal_to_ts(value),
            }
        })
        .collect();
    Some(members)
}

fn member_name(value: &Literal) -> String {
    match value {
        Literal::String(s) => type_name(s),
        other => {
            let spelled = other.to_string().replace('-', "Minus").replace('.', "_");
            format!("Value{spelled}")
        }
    }
}

/// JSDoc body lines: the description, then example and format notes.
fn doc_lines(docs: &Docs) -> Vec<String> {
    let mut lines: Vec<String> = docs
        .description
        .iter()
        .flat_map(|d| d.trim().lines())
        .map(|l| escape_jsdoc(l.trim_end()))
        .collect();
    if let Some(example) = &docs.example {
        lines.push(format!("Example - {}", escape_jsdoc(&example.to_string())));
    }
    if let Some(format) = &docs.format {
        lines.push(format!("Format - {}", escape_jsdoc(format)));
    }
    lines
}
