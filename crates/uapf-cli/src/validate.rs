//! # Validate Subcommand
//!
//! Loads a `.uapf` archive with every schema check enabled.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use uapf_pack::PackageLoader;

/// Arguments for the `uapf validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the .uapf archive.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Execute the validate subcommand.
///
/// Returns exit code 0 on success; any load or validation failure is
/// returned as an error for the caller to report.
pub fn run_validate(args: &ValidateArgs, loader: &PackageLoader) -> Result<u8> {
    loader
        .validate_only(&args.path)
        .with_context(|| format!("{} is not a valid UAPF package", args.path.display()))?;

    println!("UAPF file is valid.");
    Ok(0)
}
