use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level project configuration loaded from `.typegen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TypegenConfig {
    pub input: String,
    pub output: String,
    pub target: TargetKind,
    pub emit: EmitOptions,
    pub purescript: PureScriptOptions,
}

impl Default for TypegenConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: "src/generated".to_string(),
            target: TargetKind::Typescript,
            emit: EmitOptions::default(),
            purescript: PureScriptOptions::default(),
        }
    }
}

/// Which emitters to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Typescript,
    Purescript,
    All,
}

/// Rendering choices shared by every target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    #[serde(alias = "enumStyle")]
    pub enum_style: EnumStyle,
    #[serde(alias = "nullableRepresentation")]
    pub nullable_representation: NullableRepresentation,
}

/// How a homogeneous enum is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumStyle {
    #[default]
    LiteralUnion,
    NamedEnum,
}

/// How a nullable field is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullableRepresentation {
    /// The field becomes optional.
    #[default]
    OptionalField,
    /// The field's type gains an explicit null alternative.
    UnionWithNull,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PureScriptOptions {
    #[serde(alias = "moduleName")]
    pub module_name: String,
}

impl Default for PureScriptOptions {
    fn default() -> Self {
        Self {
            module_name: "Api.Types".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".typegen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<TypegenConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: TypegenConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# typegen configuration
input: openapi.yaml
output: src/generated
target: typescript    # typescript | purescript | all

emit:
  enum_style: literal-union                # literal-union | named-enum
  nullable_representation: optional-field  # optional-field | union-with-null

purescript:
  module_name: Api.Types
"#
}
