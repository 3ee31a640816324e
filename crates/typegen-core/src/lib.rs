pub mod config;
pub mod error;
pub mod model;
pub mod parse;
pub mod schema;
pub mod transform;

use config::EmitOptions;
use error::CompileError;
use model::{CanonicalModel, TypeName};
use parse::Node;

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// One rendered type declaration, as handed to the code writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: TypeName,
    pub text: String,
}

/// Trait for target emitters that render a canonical model.
///
/// `emit` returns one declaration per registry entry, in registry order.
/// `generate` assembles those declarations into the files of the target.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error + Send + Sync + 'static;

    fn emit(
        &self,
        model: &CanonicalModel,
        options: &EmitOptions,
    ) -> Result<Vec<Declaration>, Self::Error>;

    fn generate(
        &self,
        model: &CanonicalModel,
        options: &EmitOptions,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}

/// Compile a loaded document into the canonical type model.
pub fn compile(document: &Node) -> Result<CanonicalModel, CompileError> {
    let forest = schema::build_forest(document)?;
    let model = transform::resolve(&forest)?;
    Ok(model)
}

/// Parse YAML text and compile it.
pub fn compile_yaml(input: &str) -> Result<CanonicalModel, CompileError> {
    let document = parse::from_yaml(input)?;
    compile(&document)
}

/// Parse JSON text and compile it.
pub fn compile_json(input: &str) -> Result<CanonicalModel, CompileError> {
    let document = parse::from_json(input)?;
    compile(&document)
}
