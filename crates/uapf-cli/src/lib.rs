//! # uapf-cli: CLI Tool for UAPF Packages
//!
//! Provides the `uapf` command-line interface over `uapf-pack`.
//!
//! ## Subcommands
//!
//! - `uapf validate <PATH>`: load with full schema validation.
//! - `uapf inspect <PATH>`: load without validation and print the manifest.
//!
//! ## Crate Policy
//!
//! - Handlers only map core results to output and exit codes; they perform
//!   no recovery and no business logic.

pub mod inspect;
pub mod validate;

use std::path::{Path, PathBuf};

use uapf_pack::PackageLoader;
use uapf_schema::{SchemaKind, DEFAULT_SCHEMA_DIR};

/// Pick the schema directory.
///
/// An explicit directory (from `--schema-dir` or `UAPF_SCHEMA_DIR`) wins.
/// Otherwise walk up from the current directory looking for a `schemas/`
/// directory holding the manifest schema, and finally fall back to the
/// directory the binary was built with.
pub fn resolve_schema_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    std::env::current_dir()
        .ok()
        .and_then(|cwd| find_schema_dir(&cwd))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEMA_DIR))
}

/// Walk up from `start` to the first ancestor with a usable `schemas/`.
pub fn find_schema_dir(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        let candidate = dir.join("schemas");
        candidate
            .join(SchemaKind::Manifest.schema_filename())
            .is_file()
            .then_some(candidate)
    })
}

/// Build the loader every subcommand shares.
pub fn build_loader(schema_dir: &Path) -> PackageLoader {
    tracing::debug!(schema_dir = %schema_dir.display(), "using schema directory");
    PackageLoader::from_schema_dir(schema_dir)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Write a minimal valid package, optionally overriding the bindings.
    pub fn write_package(dir: &Path, bindings: &str) -> PathBuf {
        let path = dir.join("sample.uapf");
        let mut writer = ZipWriter::new(std::fs::File::create(&path).unwrap());
        let entries = [
            (
                "manifest.json",
                r#"{"name": "sample", "version": "1.0.0", "components": {
                    "agents": ["agents/roles.json", "agents/capabilities.json", "agents/bindings.json"],
                    "integration": ["integration/mcp-tools.json", "integration/a2a-schemas.json"]}}"#,
            ),
            ("agents/roles.json", r#"{"roles": [{"id": "reviewer"}]}"#),
            ("agents/capabilities.json", r#"{"capabilities": []}"#),
            ("agents/bindings.json", bindings),
            ("integration/mcp-tools.json", r#"{"tools": []}"#),
            ("integration/a2a-schemas.json", r#"{"schemas": []}"#),
        ];
        for (name, content) in entries {
            writer.start_file(name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    pub const VALID_BINDINGS: &str =
        r#"{"bindings": [{"taskId": "review", "agent": "reviewer", "mode": "assist"}]}"#;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_schema_dir_wins() {
        let dir = Path::new("/etc/uapf/schemas");
        assert_eq!(resolve_schema_dir(Some(dir)), PathBuf::from("/etc/uapf/schemas"));
    }

    #[test]
    fn find_schema_dir_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let schemas = root.path().join("schemas");
        std::fs::create_dir_all(&schemas).unwrap();
        std::fs::write(schemas.join("uapf-manifest.schema.json"), b"{}").unwrap();
        let nested = root.path().join("packages").join("review");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_schema_dir(&nested), Some(schemas));
    }

    #[test]
    fn find_schema_dir_ignores_unrelated_schemas_dir() {
        let root = tempfile::tempdir().unwrap();
        // A schemas/ directory without the manifest schema does not count.
        std::fs::create_dir_all(root.path().join("schemas")).unwrap();
        let found = find_schema_dir(root.path());
        assert!(found.map_or(true, |dir| dir != root.path().join("schemas")));
    }

    #[test]
    fn default_schema_dir_is_usable() {
        let loader = build_loader(Path::new(DEFAULT_SCHEMA_DIR));
        loader.validator().registry().precompile_all().unwrap();
    }
}
