//! # uapf CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use uapf_cli::inspect::{run_inspect, InspectArgs};
use uapf_cli::validate::{run_validate, ValidateArgs};
use uapf_cli::{build_loader, resolve_schema_dir};

/// Load, validate, and inspect UAPF agent packages.
#[derive(Parser, Debug)]
#[command(name = "uapf", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding the uapf-*.schema.json files.
    #[arg(long, global = true, env = "UAPF_SCHEMA_DIR", value_name = "DIR")]
    schema_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a .uapf package against all schemas.
    Validate(ValidateArgs),

    /// Print the manifest of a .uapf package without validating it.
    Inspect(InspectArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let schema_dir = resolve_schema_dir(cli.schema_dir.as_deref());
    let loader = build_loader(&schema_dir);

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &loader),
        Commands::Inspect(args) => run_inspect(&args, &loader),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
