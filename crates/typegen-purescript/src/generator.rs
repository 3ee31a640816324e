use thiserror::Error;
use typegen_core::config::EmitOptions;
use typegen_core::model::CanonicalModel;
use typegen_core::{CodeGenerator, Declaration, GeneratedFile};

use crate::emitters;

#[derive(Debug, Error)]
pub enum PureScriptError {
    #[error("template render failed: {0}")]
    Render(#[from] minijinja::Error),

    #[error("invalid module name `{0}`")]
    InvalidModuleName(String),
}

/// Configuration for the PureScript generator.
#[derive(Debug, Clone)]
pub struct PureScriptConfig {
    pub module_name: String,
}

impl Default for PureScriptConfig {
    fn default() -> Self {
        Self {
            module_name: "Api.Types".to_string(),
        }
    }
}

impl PureScriptConfig {
    /// Source path of the module: `Api.Types` lives in `Api/Types.purs`.
    pub fn module_path(&self) -> Result<String, PureScriptError> {
        let segments: Vec<&str> = self.module_name.split('.').collect();
        let valid = segments.iter().all(|s| {
            s.starts_with(|c: char| c.is_ascii_uppercase())
                && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
        if !valid {
            return Err(PureScriptError::InvalidModuleName(self.module_name.clone()));
        }
        Ok(format!("{}.purs", segments.join("/")))
    }
}

/// PureScript type declaration generator.
pub struct PureScriptGenerator;

impl CodeGenerator for PureScriptGenerator {
    type Config = PureScriptConfig;
    type Error = PureScriptError;

    fn emit(
        &self,
        model: &CanonicalModel,
        options: &EmitOptions,
    ) -> Result<Vec<Declaration>, Self::Error> {
        Ok(emitters::types::emit_declarations(model, options)?)
    }

    fn generate(
        &self,
        model: &CanonicalModel,
        options: &EmitOptions,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error> {
        let path = config.module_path()?;
        let declarations = self.emit(model, options)?;
        let content =
            emitters::types::emit_module(&config.module_name, model, options, &declarations)?;
        Ok(vec![GeneratedFile { path, content }])
    }
}
