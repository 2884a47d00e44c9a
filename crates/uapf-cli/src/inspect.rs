//! # Inspect Subcommand
//!
//! Loads a `.uapf` archive without schema checks and prints its manifest,
//! a short summary, or the member listing.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use uapf_pack::{Package, PackageLoader};

/// Arguments for the `uapf inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the .uapf archive.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Print a short summary instead of the full manifest.
    #[arg(long)]
    pub summary: bool,

    /// Also list every archive member with its size and SHA-256 digest.
    #[arg(long)]
    pub members: bool,
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs, loader: &PackageLoader) -> Result<u8> {
    let package = loader
        .load(&args.path, false)
        .with_context(|| format!("cannot inspect {}", args.path.display()))?;

    print!("{}", render(&package, args)?);
    Ok(0)
}

/// Build the inspect output for a loaded package.
pub fn render(package: &Package, args: &InspectArgs) -> Result<String> {
    let mut out = String::new();
    if args.summary {
        writeln!(out, "{}", package.summary())?;
    } else {
        let manifest = serde_json::to_string_pretty(package.manifest())
            .context("failed to render manifest")?;
        writeln!(out, "{manifest}")?;
    }

    if args.members {
        writeln!(out)?;
        writeln!(out, "Members ({}):", package.member_count())?;
        for (path, bytes) in package.raw_files().iter() {
            let digest = package.member_digest(path).unwrap_or_default();
            writeln!(out, "  {digest}  {:>10}  {path}", bytes.len())?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_package;

    fn loader() -> PackageLoader {
        PackageLoader::from_schema_dir(uapf_schema::DEFAULT_SCHEMA_DIR)
    }

    fn args(path: PathBuf, summary: bool, members: bool) -> InspectArgs {
        InspectArgs {
            path,
            summary,
            members,
        }
    }

    #[test]
    fn inspect_prints_manifest_without_validating() {
        let dir = tempfile::tempdir().unwrap();
        // Bindings violate the schema, which inspect does not check.
        let path = write_package(dir.path(), r#"{"bindings": [{}]}"#);
        let package = loader().load(&path, false).unwrap();

        let out = render(&package, &args(path.clone(), false, false)).unwrap();
        let manifest: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(manifest["name"], "sample");
        assert_eq!(run_inspect(&args(path, false, false), &loader()).unwrap(), 0);
    }

    #[test]
    fn inspect_summary_and_members() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_package(dir.path(), crate::test_support::VALID_BINDINGS);
        let package = loader().load(&path, false).unwrap();

        let out = render(&package, &args(path, true, true)).unwrap();
        assert!(out.contains("Name:        sample"));
        assert!(out.contains("Members (6):"));
        assert!(out.contains("agents/bindings.json"));
        let member_lines = out.lines().filter(|l| l.ends_with(".json") && l.starts_with("  ")).count();
        assert_eq!(member_lines, 6);
    }

    #[test]
    fn inspect_missing_archive() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_inspect(&args(dir.path().join("gone.uapf"), false, false), &loader()).unwrap_err();
        assert!(format!("{err:#}").contains("UAPF archive not found"));
    }
}
