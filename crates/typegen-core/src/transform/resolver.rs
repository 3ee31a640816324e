use std::collections::HashSet;

use crate::error::CompileError;
use crate::model::{
    ArrayDef, CanonicalModel, Docs, EnumDef, FieldDef, MapDef, ObjectDef, TypeDecl, TypeDef, TypeName,
    TypeRef, UnionDef,
};
use crate::parse::Location;
use crate::schema::{SchemaForest, SchemaKind, SchemaNode};

use super::name_normalizer::{normalize_name, type_name};
use super::names::NameRegistry;

/// Resolve every declared schema in `forest` into a canonical model.
pub fn resolve(forest: &SchemaForest) -> Result<CanonicalModel, CompileError> {
    Resolver::new(forest)?.resolve()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    InProgress,
    Done,
}

/// Turns a schema forest into the canonical model.
///
/// Declared schemas are walked depth-first in declaration order. A reference
/// to a declaration that is still in progress is a back-edge and becomes a
/// plain `TypeRef`, so cycles never recurse. Each declaration's output lands
/// in its own slot, which keeps registry order independent of walk order.
pub struct Resolver<'a> {
    forest: &'a SchemaForest,
    names: NameRegistry,
    root_names: Vec<TypeName>,
    states: Vec<Visit>,
    slots: Vec<Vec<TypeDecl>>,
}

impl<'a> Resolver<'a> {
    /// Claims every declared name up front, so synthesized names never
    /// displace one.
    pub fn new(forest: &'a SchemaForest) -> Result<Self, CompileError> {
        let mut names = NameRegistry::new();
        let mut root_names = Vec::with_capacity(forest.roots.len());
        for (key, node) in &forest.roots {
            root_names.push(names.claim(&type_name(key), &node.location)?);
        }
        let count = root_names.len();
        Ok(Self {
            forest,
            names,
            root_names,
            states: vec![Visit::Pending; count],
            slots: vec![Vec::new(); count],
        })
    }

    pub fn resolve(mut self) -> Result<CanonicalModel, CompileError> {
        for index in 0..self.root_names.len() {
            self.visit_root(index)?;
        }
        let model = CanonicalModel::from_decls(self.slots.into_iter().flatten());
        log::debug!(
            "resolved {} types ({} declared)",
            model.len(),
            self.root_names.len()
        );
        Ok(model)
    }

    fn visit_root(&mut self, index: usize) -> Result<(), CompileError> {
        if self.states[index] != Visit::Pending {
            return Ok(());
        }
        self.states[index] = Visit::InProgress;

        let forest = self.forest;
        let Some((_, node)) = forest.roots.get_index(index) else {
            return Ok(());
        };
        let name = self.root_names[index].clone();

        let mut decls = Vec::new();
        let def = match &node.kind {
            SchemaKind::Reference { target } => {
                self.check_alias_chain(index, &node.location)?;
                TypeDef::Reference {
                    target: self.resolve_reference(target, &node.location)?,
                }
            }
            _ => self.resolve_def(node, &name, &mut decls)?,
        };
        decls.push(TypeDecl {
            name,
            def,
            nullable: node.nullable,
            docs: node.docs.clone(),
            location: node.location.clone(),
        });

        self.slots[index] = decls;
        self.states[index] = Visit::Done;
        Ok(())
    }

    /// Build the definition of a named shape. Synthesized types it needs are
    /// pushed to `decls` ahead of it.
    fn resolve_def(
        &mut self,
        node: &SchemaNode,
        name: &TypeName,
        decls: &mut Vec<TypeDecl>,
    ) -> Result<TypeDef, CompileError> {
        let def = match &node.kind {
            SchemaKind::Primitive(primitive) => TypeDef::Primitive {
                primitive: *primitive,
            },
            SchemaKind::Enum(values) => TypeDef::Enum(EnumDef::new(values.clone())),
            SchemaKind::Object(properties) => {
                let mut fields = Vec::with_capacity(properties.len());
                for prop in properties {
                    let context = format!("{name}{}", normalize_name(&prop.name).pascal_case);
                    fields.push(FieldDef {
                        name: prop.name.clone(),
                        type_ref: self.resolve_inline(&prop.schema, &context, decls)?,
                        required: prop.required,
                        nullable: prop.schema.nullable,
                        docs: prop.schema.docs.clone(),
                    });
                }
                TypeDef::Object(ObjectDef { fields })
            }
            SchemaKind::Array(items) => TypeDef::Array(ArrayDef {
                element: self.resolve_element(items, &format!("{name}Item"), decls)?,
            }),
            SchemaKind::Map(values) => TypeDef::Map(MapDef {
                values: values
                    .as_deref()
                    .map(|v| self.resolve_element(v, &format!("{name}Value"), decls))
                    .transpose()?,
            }),
            SchemaKind::Union(members) => {
                let mut variants = Vec::with_capacity(members.len());
                for (i, member) in members.iter().enumerate() {
                    let context = format!("{name}Variant{}", i + 1);
                    variants.push(self.resolve_element(member, &context, decls)?);
                }
                TypeDef::Union(UnionDef { variants })
            }
            SchemaKind::Reference { target } => TypeDef::Reference {
                target: self.resolve_reference(target, &node.location)?,
            },
        };
        Ok(def)
    }

    /// Resolve an array item, map value, or union member. Unlike a field, these
    /// have no flag of their own, so a nullable schema is wrapped.
    fn resolve_element(
        &mut self,
        node: &SchemaNode,
        context: &str,
        decls: &mut Vec<TypeDecl>,
    ) -> Result<TypeRef, CompileError> {
        let type_ref = self.resolve_inline(node, context, decls)?;
        if node.nullable {
            Ok(TypeRef::Nullable(Box::new(type_ref)))
        } else {
            Ok(type_ref)
        }
    }

    /// Resolve a schema in type position, promoting anonymous objects, enums,
    /// and unions to named entries derived from `context`. Nullability stays
    /// with the caller.
    fn resolve_inline(
        &mut self,
        node: &SchemaNode,
        context: &str,
        decls: &mut Vec<TypeDecl>,
    ) -> Result<TypeRef, CompileError> {
        match &node.kind {
            SchemaKind::Reference { target } => self.resolve_reference(target, &node.location),
            SchemaKind::Primitive(primitive) => Ok(TypeRef::Primitive(*primitive)),
            SchemaKind::Array(items) => {
                let element = self.resolve_element(items, &format!("{context}Item"), decls)?;
                Ok(TypeRef::Array(Box::new(element)))
            }
            SchemaKind::Map(values) => {
                let values = values
                    .as_deref()
                    .map(|v| self.resolve_element(v, &format!("{context}Value"), decls))
                    .transpose()?;
                Ok(TypeRef::Map(values.map(Box::new)))
            }
            kind => {
                debug_assert!(kind.needs_name());
                let name = self.names.synthesize(&type_name(context), &node.location)?;
                log::trace!("{}: synthesized `{name}`", node.location);
                let def = self.resolve_def(node, &name, decls)?;
                // Examples and formats describe the field, not the promoted type.
                let docs = Docs {
                    description: node.docs.description.clone(),
                    ..Docs::default()
                };
                decls.push(TypeDecl {
                    name: name.clone(),
                    def,
                    nullable: false,
                    docs,
                    location: node.location.clone(),
                });
                Ok(TypeRef::Named(name))
            }
        }
    }

    fn resolve_reference(
        &mut self,
        target: &str,
        location: &Location,
    ) -> Result<TypeRef, CompileError> {
        let index = self
            .forest
            .roots
            .get_index_of(target)
            .ok_or_else(|| CompileError::UnresolvedReference {
                name: target.to_string(),
                location: location.clone(),
            })?;
        match self.states[index] {
            Visit::Pending => self.visit_root(index)?,
            Visit::InProgress => {
                log::trace!("{location}: back-edge to `{}`", self.root_names[index]);
            }
            Visit::Done => {}
        }
        Ok(TypeRef::Named(self.root_names[index].clone()))
    }

    /// A declared alias must eventually reach a concrete shape.
    fn check_alias_chain(&self, start: usize, location: &Location) -> Result<(), CompileError> {
        let mut seen = HashSet::new();
        let mut index = start;
        while let Some((_, node)) = self.forest.roots.get_index(index) {
            let SchemaKind::Reference { target } = &node.kind else {
                return Ok(());
            };
            if !seen.insert(index) {
                return Err(CompileError::schema(
                    location,
                    format!("reference cycle through `{target}` never reaches a concrete schema"),
                ));
            }
            match self.forest.roots.get_index_of(target.as_str()) {
                Some(next) => index = next,
                // Reported with its location by `resolve_reference`.
                None => return Ok(()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Literal, Primitive};
    use crate::parse::from_yaml;
    use crate::schema::build_forest;

    fn resolve_yaml(input: &str) -> Result<CanonicalModel, CompileError> {
        let document = from_yaml(input).unwrap();
        resolve(&build_forest(&document)?)
    }

    fn names(model: &CanonicalModel) -> Vec<&str> {
        model.names().map(|n| n.as_str()).collect()
    }

    #[test]
    fn inline_types_precede_their_parent() {
        let model = resolve_yaml(
            r#"
components:
  schemas:
    Pet:
      type: object
      properties:
        owner:
          type: object
          properties:
            name: { type: string }
        kind:
          enum: [cat, dog]
"#,
        )
        .unwrap();
        assert_eq!(names(&model), ["PetOwner", "PetKind", "Pet"]);

        let TypeDef::Object(pet) = &model.get("Pet").unwrap().def else {
            panic!("Pet should be an object");
        };
        assert_eq!(pet.fields[0].type_ref, TypeRef::Named(TypeName::new("PetOwner")));
        assert_eq!(pet.fields[1].type_ref, TypeRef::Named(TypeName::new("PetKind")));
    }

    #[test]
    fn self_reference_terminates() {
        let model = resolve_yaml(
            r#"
components:
  schemas:
    Node:
      type: object
      properties:
        children:
          type: array
          items: { $ref: '#/components/schemas/Node' }
"#,
        )
        .unwrap();
        assert_eq!(names(&model), ["Node"]);
        let TypeDef::Object(node) = &model.get("Node").unwrap().def else {
            panic!("Node should be an object");
        };
        assert_eq!(
            node.fields[0].type_ref,
            TypeRef::Array(Box::new(TypeRef::Named(TypeName::new("Node"))))
        );
    }

    #[test]
    fn forward_reference_keeps_declaration_order() {
        let model = resolve_yaml(
            r#"
components:
  schemas:
    A:
      type: object
      properties:
        b: { $ref: '#/components/schemas/B' }
    B:
      type: object
      properties:
        inner:
          type: object
          properties:
            a: { $ref: '#/components/schemas/A' }
"#,
        )
        .unwrap();
        assert_eq!(names(&model), ["A", "BInner", "B"]);
        assert!(model.dangling_refs().is_empty());
    }

    #[test]
    fn unresolved_reference_reports_location() {
        let err = resolve_yaml(
            r#"
components:
  schemas:
    A:
      type: object
      properties:
        b: { $ref: '#/components/schemas/Foo' }
"#,
        )
        .unwrap_err();
        match err {
            CompileError::UnresolvedReference { name, location } => {
                assert_eq!(name, "Foo");
                assert_eq!(location.as_str(), "#/components/schemas/A/properties/b");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn synthesized_name_gets_suffix_after_declared_name() {
        let model = resolve_yaml(
            r#"
components:
  schemas:
    Pet:
      type: object
      properties:
        owner:
          type: object
          properties:
            id: { type: integer }
    PetOwner:
      type: object
      properties:
        name: { type: string }
"#,
        )
        .unwrap();
        assert_eq!(names(&model), ["PetOwner2", "Pet", "PetOwner"]);
    }

    #[test]
    fn declared_names_collide_after_normalization() {
        let err = resolve_yaml(
            r#"
components:
  schemas:
    pet_owner: { type: string }
    PetOwner: { type: string }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::NameCollision { name, .. } if name == "PetOwner"));
    }

    #[test]
    fn top_level_reference_becomes_alias() {
        let model = resolve_yaml(
            r#"
components:
  schemas:
    Id: { type: string }
    PetId: { $ref: '#/components/schemas/Id' }
"#,
        )
        .unwrap();
        assert_eq!(
            model.get("PetId").unwrap().def,
            TypeDef::Reference {
                target: TypeRef::Named(TypeName::new("Id"))
            }
        );
        assert_eq!(
            model.get("Id").unwrap().def,
            TypeDef::Primitive {
                primitive: Primitive::String
            }
        );
    }

    #[test]
    fn alias_cycle_is_a_schema_error() {
        let err = resolve_yaml(
            r#"
components:
  schemas:
    A: { $ref: '#/components/schemas/B' }
    B: { $ref: '#/components/schemas/A' }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::Schema { .. }));
    }

    #[test]
    fn union_variants_get_indexed_names() {
        let model = resolve_yaml(
            r#"
components:
  schemas:
    Shape:
      oneOf:
        - type: object
          properties:
            radius: { type: number }
        - type: string
        - enum: [1, 2]
"#,
        )
        .unwrap();
        assert_eq!(names(&model), ["ShapeVariant1", "ShapeVariant3", "Shape"]);
        let TypeDef::Enum(e) = &model.get("ShapeVariant3").unwrap().def else {
            panic!("variant 3 should be an enum");
        };
        assert_eq!(e.values(), [Literal::Number(1.into()), Literal::Number(2.into())]);
    }

    #[test]
    fn nullable_declaration_keeps_flag() {
        let model = resolve_yaml(
            r#"
components:
  schemas:
    MaybeName:
      type: [string, 'null']
    Name:
      type: string
"#,
        )
        .unwrap();
        let maybe = model.get("MaybeName").unwrap();
        assert!(maybe.nullable);
        assert_eq!(
            maybe.def,
            TypeDef::Primitive {
                primitive: Primitive::String
            }
        );
        assert!(!model.get("Name").unwrap().nullable);
    }

    #[test]
    fn nullable_items_and_values_are_wrapped() {
        let model = resolve_yaml(
            r#"
components:
  schemas:
    Readings:
      type: object
      properties:
        vals:
          type: array
          items: { type: [integer, 'null'] }
        byKey:
          type: object
          additionalProperties:
            $ref: '#/components/schemas/Label'
            nullable: true
    Label: { type: string }
    Labels:
      type: array
      items: { type: string, nullable: true }
"#,
        )
        .unwrap();
        let TypeDef::Object(readings) = &model.get("Readings").unwrap().def else {
            panic!("Readings should be an object");
        };
        assert_eq!(
            readings.fields[0].type_ref,
            TypeRef::Array(Box::new(TypeRef::Nullable(Box::new(TypeRef::Primitive(
                Primitive::Integer
            )))))
        );
        assert_eq!(
            readings.fields[1].type_ref,
            TypeRef::Map(Some(Box::new(TypeRef::Nullable(Box::new(TypeRef::Named(
                TypeName::new("Label")
            ))))))
        );
        assert_eq!(
            model.get("Labels").unwrap().def,
            TypeDef::Array(ArrayDef {
                element: TypeRef::Nullable(Box::new(TypeRef::Primitive(Primitive::String)))
            })
        );
    }

    #[test]
    fn inline_nullable_union_marks_only_the_field() {
        let model = resolve_yaml(
            r#"
components:
  schemas:
    Pet:
      type: object
      properties:
        owner:
          oneOf:
            - type: string
            - type: integer
            - type: 'null'
"#,
        )
        .unwrap();
        assert_eq!(names(&model), ["PetOwner", "Pet"]);
        assert!(!model.get("PetOwner").unwrap().nullable);
        let TypeDef::Object(pet) = &model.get("Pet").unwrap().def else {
            panic!("Pet should be an object");
        };
        assert!(pet.fields[0].nullable);
        assert_eq!(pet.fields[0].type_ref, TypeRef::Named(TypeName::new("PetOwner")));
    }

    #[test]
    fn resolving_twice_is_identical() {
        let input = r#"
components:
  schemas:
    B:
      type: object
      properties:
        a: { $ref: '#/components/schemas/A' }
        tags:
          type: array
          items:
            type: object
            properties:
              label: { type: string }
    A:
      type: object
      properties:
        b: { $ref: '#/components/schemas/B' }
"#;
        let first = resolve_yaml(input).unwrap();
        let second = resolve_yaml(input).unwrap();
        assert_eq!(first, second);
        assert_eq!(names(&first), ["BTagsItem", "B", "A"]);
    }
}
