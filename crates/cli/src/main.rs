mod help;
mod manifest;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use crate::manifest::{DEFAULT_MANIFEST_NAME, Manifest};

/// Exit code for tokens the manifest rejects.
const EXIT_PARSE_ERROR: i32 = 2;

#[derive(Parser)]
#[command(name = "argscan")]
#[command(version, about = "Parse command-line tokens against a JSON argument manifest", long_about = None)]
#[command(disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter argscan.json manifest
    Init(InitArgs),

    /// Parse tokens given after `--` and print the result as JSON
    Parse(ParseArgs),

    /// Print help text generated from the manifest
    Help(HelpArgs),

    /// Report duplicate names and abbreviations in the manifest
    Check(CheckArgs),
}

#[derive(Parser)]
struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Registry name (default: directory name)
    #[arg(short, long)]
    name: Option<String>,

    /// Overwrite an existing manifest
    #[arg(long)]
    force: bool,
}

#[derive(Parser)]
struct ParseArgs {
    /// Path to the manifest
    #[arg(short, long, default_value = DEFAULT_MANIFEST_NAME, value_name = "FILE")]
    manifest: PathBuf,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,

    /// Tokens to parse
    #[arg(last = true, allow_hyphen_values = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

#[derive(Parser)]
struct HelpArgs {
    /// Path to the manifest
    #[arg(short, long, default_value = DEFAULT_MANIFEST_NAME, value_name = "FILE")]
    manifest: PathBuf,

    /// When to emit color escape codes (only if the manifest enables colors)
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

#[derive(Parser)]
struct CheckArgs {
    /// Path to the manifest
    #[arg(short, long, default_value = DEFAULT_MANIFEST_NAME, value_name = "FILE")]
    manifest: PathBuf,

    /// Only output JSON (no human-readable output)
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    manifest: String,
    flags: usize,
    options: usize,
    commands: usize,
    problems: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => init(args),
        Commands::Parse(args) => parse_command(args),
        Commands::Help(args) => help_command(args),
        Commands::Check(args) => check_command(args),
    }
}

fn init(args: InitArgs) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;

    let name = args
        .name
        .or_else(|| manifest::guess_project_name(&dir))
        .unwrap_or_else(|| "my-cli".to_string());
    let path = manifest::write_default_manifest(&dir, &name, args.force)?;

    eprintln!("Created: {}", path.display());
    eprintln!("\nNext steps:");
    eprintln!("  1. Edit {DEFAULT_MANIFEST_NAME} to declare your flags, options and commands");
    eprintln!("  2. Run: argscan check");
    eprintln!("  3. Run: argscan parse -- <tokens>");

    Ok(())
}

fn parse_command(args: ParseArgs) -> Result<()> {
    tracing::debug!("executing parse command");

    let manifest = Manifest::from_file(&args.manifest)?;
    let registry = manifest.strict_registry()?;

    let result = match registry.parse(&args.tokens) {
        Ok(result) => result,
        Err(e) => {
            tracing::debug!(error = ?e, "tokens rejected");
            eprintln!("error: {e}");
            std::process::exit(EXIT_PARSE_ERROR);
        }
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");
    Ok(())
}

fn help_command(args: HelpArgs) -> Result<()> {
    tracing::debug!("executing help command");

    match args.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {}
    }

    let manifest = Manifest::from_file(&args.manifest)?;
    let registry = manifest.strict_registry()?;
    print!("{}", help::render(&registry));
    Ok(())
}

fn check_command(args: CheckArgs) -> Result<()> {
    tracing::debug!("executing check command");

    let manifest = Manifest::from_file(&args.manifest)?;
    let built = manifest.build_registry()?;
    let report = CheckReport {
        manifest: args.manifest.display().to_string(),
        flags: built.registry.flags().len(),
        options: built.registry.options().len(),
        commands: built.registry.commands().len(),
        problems: built.problems.iter().map(ToString::to_string).collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        if !report.problems.is_empty() {
            std::process::exit(1);
        }
        return Ok(());
    }

    eprintln!("Manifest: {}", report.manifest);
    eprintln!(
        "Declared: {} flag(s), {} option(s), {} command(s)",
        report.flags, report.options, report.commands
    );
    if report.problems.is_empty() {
        eprintln!("OK: no registration problems");
        return Ok(());
    }

    eprintln!();
    eprintln!("Found {} registration problem(s):", report.problems.len());
    for problem in &report.problems {
        eprintln!("  - {problem}");
    }
    bail!("manifest has registration problems");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
