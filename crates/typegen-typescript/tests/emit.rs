use typegen_core::config::{EmitOptions, EnumStyle, NullableRepresentation};
use typegen_core::{CodeGenerator, Declaration, compile_yaml};
use typegen_typescript::{TypeScriptConfig, TypeScriptGenerator};

const SIMPLE: &str = include_str!("../../typegen-core/tests/fixtures/simple.yaml");

const PET: &str = r#"
components:
  schemas:
    Pet:
      type: object
      description: A pet.
      required: [id]
      properties:
        id:
          type: integer
          example: 7
        nickname:
          type: string
          nullable: true
        kind:
          enum: [cat, dog]
        tags:
          type: array
          items:
            type: string
"#;

fn emit(input: &str, options: EmitOptions) -> Vec<Declaration> {
    let model = compile_yaml(input).unwrap();
    TypeScriptGenerator.emit(&model, &options).unwrap()
}

fn text<'a>(declarations: &'a [Declaration], name: &str) -> &'a str {
    &declarations
        .iter()
        .find(|d| d.name == name)
        .unwrap_or_else(|| panic!("no declaration named {name}"))
        .text
}

#[test]
fn object_with_optional_nullable_field() {
    let declarations = emit(PET, EmitOptions::default());
    let names: Vec<&str> = declarations.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["PetKind", "Pet"]);

    insta::assert_snapshot!(text(&declarations, "PetKind"), @r#"export type PetKind = "cat" | "dog";"#);
    insta::assert_snapshot!(text(&declarations, "Pet"), @r"
    /**
     * A pet.
     * @property (number) id
     * @property (string) nickname
     * @property (PetKind) kind
     * @property (string[]) tags
     */
    export interface Pet {
      /**
       * Example - 7
       */
      id: number;
      nickname?: string;
      kind?: PetKind;
      tags?: string[];
    }
    ");
}

#[test]
fn union_with_null_representation() {
    let options = EmitOptions {
        nullable_representation: NullableRepresentation::UnionWithNull,
        ..EmitOptions::default()
    };
    let declarations = emit(PET, options);
    assert!(text(&declarations, "Pet").contains("  nickname?: string | null;\n"));

    let required = emit(
        r#"
components:
  schemas:
    Box:
      type: object
      required: [label]
      properties:
        label:
          type: [string, "null"]
"#,
        options,
    );
    assert!(text(&required, "Box").contains("  label: string | null;\n"));
    let optional = emit(
        r#"
components:
  schemas:
    Box:
      type: object
      required: [label]
      properties:
        label:
          type: [string, "null"]
"#,
        EmitOptions::default(),
    );
    assert!(text(&optional, "Box").contains("  label?: string;\n"));
}

#[test]
fn named_enum_style() {
    let options = EmitOptions {
        enum_style: EnumStyle::NamedEnum,
        ..EmitOptions::default()
    };
    let declarations = emit(SIMPLE, options);

    insta::assert_snapshot!(text(&declarations, "StatusEnum"), @r#"
    /**
     * Enumeration of possible status values.
     */
    export enum StatusEnum {
      Active = "active",
      Inactive = "inactive",
      Pending = "pending",
    }
    "#);
    insta::assert_snapshot!(text(&declarations, "SimpleObjectStatusCode"), @r"
    /**
     * Status code of the object.
     */
    export enum SimpleObjectStatusCode {
      Value0 = 0,
      Value1 = 1,
      Value2 = 2,
    }
    ");
    // Mixed enums have no enum form.
    assert!(
        text(&declarations, "SimpleObjectStatusMixed")
            .ends_with(r#"export type SimpleObjectStatusMixed = 0 | "One" | true;"#)
    );
}

#[test]
fn simple_fixture_literal_unions() {
    let declarations = emit(SIMPLE, EmitOptions::default());
    let names: Vec<&str> = declarations.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "StatusEnum",
            "SimpleObjectStatus",
            "SimpleObjectStatusCode",
            "SimpleObjectStatusMixed",
            "SimpleObjectNested",
            "SimpleObject",
        ]
    );
    insta::assert_snapshot!(text(&declarations, "SimpleObjectStatusMixed"), @r#"
    /**
     * Some people just want to see the world burn.
     */
    export type SimpleObjectStatusMixed = 0 | "One" | true;
    "#);
    insta::assert_snapshot!(text(&declarations, "SimpleObjectNested"), @r#"
    /**
     * Nested object containing additional properties.
     * @property (string) nestedId - Unique identifier for the nested object.
     * @property (string) nestedData - Data associated with the nested object.
     */
    export interface SimpleObjectNested {
      /**
       * Unique identifier for the nested object.
       * Example - "nested123"
       */
      nestedId: string;
      /**
       * Data associated with the nested object.
       * Example - "Nested data"
       */
      nestedData?: string;
    }
    "#);
}

#[test]
fn simple_fixture_field_order_and_types() {
    let declarations = emit(SIMPLE, EmitOptions::default());
    let object = text(&declarations, "SimpleObject");
    let signatures: Vec<&str> = object
        .lines()
        .filter(|l| l.starts_with("  ") && !l.trim_start().starts_with(['/', '*']))
        .map(str::trim)
        .collect();
    assert_eq!(
        signatures,
        [
            "id: string;",
            "active: boolean;",
            "age: number;",
            "createdAt: string;",
            "metadata: Record<string, unknown>;",
            "data: Blob;",
            "tags?: string[];",
            "parent?: SimpleObject;",
            "children?: SimpleObject[];",
            "relatedObjects?: SimpleObject[];",
            "status?: SimpleObjectStatus;",
            "statusCode?: SimpleObjectStatusCode;",
            "statusMixed?: SimpleObjectStatusMixed;",
            "statusRef?: StatusEnum;",
            "nested?: SimpleObjectNested;",
        ]
    );
    assert!(object.contains("   * Example - {\"alt\":\"Profile picture\",\"category\":\"avatar\"}\n"));
    assert!(object.contains("   * Format - date-time\n"));
}

#[test]
fn generate_writes_types_file() {
    let model = compile_yaml(PET).unwrap();
    let files = TypeScriptGenerator
        .generate(&model, &EmitOptions::default(), &TypeScriptConfig::default())
        .unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "types.ts");
    insta::assert_snapshot!(files[0].content.trim_end(), @r#"
    /**
     * This file is auto-generated. Do not edit manually.
     */

    export type PetKind = "cat" | "dog";

    /**
     * A pet.
     * @property (number) id
     * @property (string) nickname
     * @property (PetKind) kind
     * @property (string[]) tags
     */
    export interface Pet {
      /**
       * Example - 7
       */
      id: number;
      nickname?: string;
      kind?: PetKind;
      tags?: string[];
    }
    "#);
}

#[test]
fn aliases_and_quoted_properties() {
    let declarations = emit(
        r#"
$defs:
  Id:
    type: string
    format: uuid
  OwnerId:
    $ref: '#/$defs/Id'
  Scores:
    type: object
    additionalProperties:
      type: number
  Headers:
    type: object
    properties:
      content-type:
        type: string
  Shape:
    oneOf:
      - $ref: '#/$defs/Id'
      - type: integer
      - type: "null"
"#,
        EmitOptions::default(),
    );
    insta::assert_snapshot!(text(&declarations, "Id"), @r"
    /**
     * Format - uuid
     */
    export type Id = string;
    ");
    assert_eq!(text(&declarations, "OwnerId"), "export type OwnerId = Id;");
    assert_eq!(
        text(&declarations, "Scores"),
        "export type Scores = Record<string, number>;"
    );
    assert!(text(&declarations, "Headers").contains("  \"content-type\"?: string;"));
    assert_eq!(
        text(&declarations, "Shape"),
        "export type Shape = Id | number | null;"
    );
}

#[test]
fn nullable_declarations_and_elements() {
    let declarations = emit(
        r#"
components:
  schemas:
    MaybeName:
      type: [string, 'null']
    Readings:
      type: object
      required: [vals]
      properties:
        vals:
          type: array
          items: { type: [integer, 'null'] }
        labels:
          type: object
          additionalProperties: { type: string, nullable: true }
    Owner:
      type: object
      nullable: true
      properties:
        name: { type: string }
    Level:
      enum: [low, high]
      nullable: true
    Code:
      enum: [1, 2, null]
      nullable: true
"#,
        EmitOptions {
            enum_style: EnumStyle::NamedEnum,
            ..EmitOptions::default()
        },
    );
    assert_eq!(text(&declarations, "MaybeName"), "export type MaybeName = string | null;");
    let readings = text(&declarations, "Readings");
    assert!(readings.contains("  vals: (number | null)[];\n"), "{readings}");
    assert!(readings.contains("  labels?: Record<string, string | null>;\n"), "{readings}");
    insta::assert_snapshot!(text(&declarations, "Owner"), @r"
    /**
     * @property (string) name
     */
    export type Owner = {
      name?: string;
    } | null;
    ");
    // Enum members cannot be null, so a nullable enum stays a literal union.
    assert_eq!(
        text(&declarations, "Level"),
        r#"export type Level = "low" | "high" | null;"#
    );
    assert_eq!(text(&declarations, "Code"), "export type Code = 1 | 2 | null;");
}

#[test]
fn inline_nullable_union_adds_null_once() {
    let input = r#"
components:
  schemas:
    Pet:
      type: object
      required: [owner]
      properties:
        owner:
          oneOf:
            - type: string
            - type: integer
            - type: 'null'
"#;
    let declarations = emit(
        input,
        EmitOptions {
            nullable_representation: NullableRepresentation::UnionWithNull,
            ..EmitOptions::default()
        },
    );
    assert_eq!(text(&declarations, "PetOwner"), "export type PetOwner = string | number;");
    assert!(text(&declarations, "Pet").contains("  owner: PetOwner | null;\n"));
}

#[test]
fn empty_object() {
    let declarations = emit(
        r#"
components:
  schemas:
    Empty:
      type: object
      description: Nothing to see.
      properties: {}
"#,
        EmitOptions::default(),
    );
    insta::assert_snapshot!(text(&declarations, "Empty"), @r"
    /**
     * Nothing to see.
     */
    export interface Empty {}
    ");
}

#[test]
fn emission_is_deterministic() {
    let first = emit(SIMPLE, EmitOptions::default());
    let second = emit(SIMPLE, EmitOptions::default());
    assert_eq!(first, second);
}
