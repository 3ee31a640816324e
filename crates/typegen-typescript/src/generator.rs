use thiserror::Error;
use typegen_core::config::EmitOptions;
use typegen_core::model::CanonicalModel;
use typegen_core::{CodeGenerator, Declaration, GeneratedFile};

use crate::emitters;

#[derive(Debug, Error)]
pub enum TypeScriptError {
    #[error("template render failed: {0}")]
    Render(#[from] minijinja::Error),
}

/// Configuration for the TypeScript generator.
#[derive(Debug, Clone)]
pub struct TypeScriptConfig {
    /// Path of the generated file, relative to the output directory.
    pub file_name: String,
}

impl Default for TypeScriptConfig {
    fn default() -> Self {
        Self {
            file_name: "types.ts".to_string(),
        }
    }
}

/// TypeScript type declaration generator.
pub struct TypeScriptGenerator;

impl CodeGenerator for TypeScriptGenerator {
    type Config = TypeScriptConfig;
    type Error = TypeScriptError;

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
        let declarations = self.emit(model, options)?;
        Ok(vec![GeneratedFile {
            path: config.file_name.clone(),
            content: emitters::types::emit_types(&declarations)?,
        }])
    }
}
