use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use typegen_core::config::{self, CONFIG_FILE_NAME, TargetKind, TypegenConfig};
use typegen_core::model::{CanonicalModel, TypeDef};
use typegen_core::{CodeGenerator, GeneratedFile};
use typegen_purescript::{PureScriptConfig, PureScriptGenerator};
use typegen_typescript::{TypeScriptConfig, TypeScriptGenerator};

#[derive(Parser)]
#[command(
    name = "typegen",
    about = "Compile OpenAPI / JSON Schema documents into type declarations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate type declarations from a schema document
    Generate {
        /// Path to the schema document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target language
        #[arg(short, long)]
        target: Option<TargetArg>,
    },

    /// Validate a schema document
    Validate {
        /// Path to the schema document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the canonical type model of a schema document
    Inspect {
        /// Path to the schema document
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new typegen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    Typescript,
    Purescript,
    All,
}

impl From<TargetArg> for TargetKind {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Typescript => TargetKind::Typescript,
            TargetArg::Purescript => TargetKind::Purescript,
            TargetArg::All => TargetKind::All,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            target,
        } => cmd_generate(input, output, target),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(Path::new(CONFIG_FILE_NAME), force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "typegen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<TypegenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Read and compile a schema document; `.json` files are parsed as JSON.
fn compile_file(path: &Path) -> Result<CanonicalModel> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let compiled = match ext {
        "json" => typegen_core::compile_json(&content),
        _ => typegen_core::compile_yaml(&content),
    };
    compiled.map_err(|e| {
        let kind = e.kind();
        anyhow::Error::new(e).context(format!("{kind} in {}", path.display()))
    })
}

/// Run the emitters selected by `target` over `model`.
fn render(
    model: &CanonicalModel,
    target: TargetKind,
    cfg: &TypegenConfig,
) -> Result<Vec<GeneratedFile>> {
    let mut files = Vec::new();
    if matches!(target, TargetKind::Typescript | TargetKind::All) {
        files.extend(TypeScriptGenerator.generate(
            model,
            &cfg.emit,
            &TypeScriptConfig::default(),
        )?);
    }
    if matches!(target, TargetKind::Purescript | TargetKind::All) {
        let ps_config = PureScriptConfig {
            module_name: cfg.purescript.module_name.clone(),
        };
        files.extend(PureScriptGenerator.generate(model, &cfg.emit, &ps_config)?);
    }
    Ok(files)
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn cmd_generate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    target: Option<TargetArg>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    let target = target.map(TargetKind::from).unwrap_or(cfg.target);

    let model = compile_file(&input)?;
    log::debug!("compiled {} into {} types", input.display(), model.len());

    let files = render(&model, target, &cfg)?;
    eprintln!("Generating {:?} → {}", target, output_dir.display());
    fs::create_dir_all(&output_dir).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;
    write_files(&output_dir, &files)?;

    eprintln!(
        "Generated {} files ({} types) in {}",
        files.len(),
        model.len(),
        output_dir.display()
    );
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let model = compile_file(&input)?;

    eprintln!("Valid schema document: {}", input.display());
    eprintln!("  Types: {}", model.len());
    for (kind, count) in count_kinds(&model) {
        eprintln!("    {kind}: {count}");
    }
    eprintln!("Validation successful.");
    Ok(())
}

/// Number of declarations per definition kind, in first-seen order.
fn count_kinds(model: &CanonicalModel) -> Vec<(&'static str, usize)> {
    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for decl in model.iter() {
        let kind = decl.def.kind_name();
        match counts.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, count)) => *count += 1,
            None => counts.push((kind, 1)),
        }
    }
    counts
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let model = compile_file(&input)?;
    let summary = build_inspect_summary(&model);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(model: &CanonicalModel) -> serde_json::Value {
    let types: Vec<serde_json::Value> = model
        .iter()
        .map(|decl| {
            let mut references = Vec::new();
            for type_ref in decl.def.type_refs() {
                type_ref.visit_names(&mut |name| {
                    if !references.contains(&name.as_str()) {
                        references.push(name.as_str());
                    }
                });
            }
            let mut entry = serde_json::json!({
                "name": decl.name,
                "kind": decl.def.kind_name(),
                "location": decl.location,
                "references": references,
            });
            match &decl.def {
                TypeDef::Object(obj) => {
                    entry["fields"] = obj.fields.iter().map(|f| f.name.as_str()).collect();
                }
                TypeDef::Enum(e) => {
                    entry["values"] = e.values().iter().map(|v| v.to_string()).collect();
                }
                _ => {}
            }
            entry
        })
        .collect();

    serde_json::json!({
        "count": model.len(),
        "types": types,
    })
}

fn cmd_init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
