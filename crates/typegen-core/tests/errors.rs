use typegen_core::compile_yaml;
use typegen_core::error::{CompileError, ErrorKind};

fn compile_err(input: &str) -> CompileError {
    compile_yaml(input).unwrap_err()
}

#[test]
fn undefined_reference_names_target() {
    let err = compile_err(
        r#"
components:
  schemas:
    Order:
      type: object
      properties:
        items:
          type: array
          items:
            $ref: '#/components/schemas/Foo'
"#,
    );
    assert_eq!(err.kind(), ErrorKind::UnresolvedReference);
    assert_eq!(
        err.location().unwrap().as_str(),
        "#/components/schemas/Order/properties/items/items"
    );
    assert!(err.to_string().contains("Foo"));
}

#[test]
fn array_without_items_is_schema_error() {
    let err = compile_err(
        r#"
components:
  schemas:
    Tags:
      type: array
"#,
    );
    assert_eq!(err.kind(), ErrorKind::Schema);
    assert_eq!(err.location().unwrap().as_str(), "#/components/schemas/Tags");
}

#[test]
fn duplicate_enum_value_points_at_second_occurrence() {
    let err = compile_err(
        r#"
components:
  schemas:
    Color:
      enum: [red, green, red]
"#,
    );
    assert_eq!(err.kind(), ErrorKind::DuplicateEnumValue);
    assert_eq!(
        err.location().unwrap().as_str(),
        "#/components/schemas/Color/enum/2"
    );
}

#[test]
fn number_and_string_zero_are_distinct() {
    let model = compile_yaml(
        r#"
components:
  schemas:
    Code:
      enum: [0, "0"]
"#,
    )
    .unwrap();
    assert_eq!(model.len(), 1);
}

#[test]
fn declared_name_collision() {
    let err = compile_err(
        r#"
components:
  schemas:
    user-profile:
      type: string
    UserProfile:
      type: integer
"#,
    );
    assert_eq!(err.kind(), ErrorKind::NameCollision);
}

#[test]
fn unsupported_openapi_version() {
    let err = compile_err("openapi: 2.0\ncomponents: {}\n");
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn error_display_leads_with_location() {
    let err = compile_err(
        r#"
components:
  schemas:
    Empty:
      type: object
"#,
    );
    assert!(
        err.to_string().starts_with("#/components/schemas/Empty: "),
        "{err}"
    );
}
