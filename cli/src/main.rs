use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use param_descriptor_manifest::{BuiltParam, Manifest, build_reports, object_schema};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Output format for inspection results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "param-describe")]
#[command(about = "Inspect and validate parameter descriptor manifests")]
struct Cli {
    /// Log reconciliation details to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the CLI data and schema field of every descriptor in a manifest.
    Inspect(InspectArgs),
    /// Build one or more manifests and report construction errors.
    Validate(ValidateArgs),
    /// Emit the combined JSON schema of a manifest.
    Schema(SchemaArgs),
}

#[derive(Debug, Args)]
struct InspectArgs {
    /// Manifest file (.yaml, .yml or .json).
    manifest: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Manifest files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct SchemaArgs {
    /// Manifest file (.yaml, .yml or .json).
    manifest: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Inspect(args) => run_inspect(args),
        Command::Validate(args) => run_validate(args),
        Command::Schema(args) => run_schema(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_and_build(path: &PathBuf) -> Result<(Manifest, Vec<BuiltParam>), String> {
    let manifest = Manifest::load(path)
        .map_err(|err| format!("Failed to load '{}': {err}", path.display()))?;
    let params = manifest
        .build()
        .map_err(|err| format!("Failed to build '{}': {err}", path.display()))?;
    debug!(path = %path.display(), params = params.len(), "built manifest");
    Ok((manifest, params))
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}

fn run_inspect(args: InspectArgs) -> Result<(), String> {
    let (_, params) = load_and_build(&args.manifest)?;
    let reports = build_reports(&params);
    println!("{}", render(&reports, args.format)?);
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut failures = 0usize;

    for path in &args.inputs {
        match load_and_build(path) {
            Ok((_, params)) => {
                println!("ok: {} ({} param(s))", path.display(), params.len());
            }
            Err(err) => {
                eprintln!("{err}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format!(
            "{failures} of {} manifest(s) failed validation",
            args.inputs.len()
        ));
    }
    Ok(())
}

fn run_schema(args: SchemaArgs) -> Result<(), String> {
    let (manifest, params) = load_and_build(&args.manifest)?;
    let schema = object_schema(manifest.name.as_deref(), &params);
    println!("{}", render(&schema, args.format)?);
    Ok(())
}
