//! # Package Loader
//!
//! Orchestrates a load:
//!
//! 1. Reject a path that is not an existing file.
//! 2. Open it as a zip archive.
//! 3. Read `manifest.json`; validate it when validation is on.
//! 4. Read the `components` groups (missing groups are empty).
//! 5. Resolve the five component paths.
//! 6. Read each resolved member.
//! 7. When validation is on, validate roles → capabilities → bindings →
//!    mcp_tools → a2a_schemas, stopping at the first failure.
//! 8. Snapshot every archive member.
//! 9. Return the immutable [`Package`].
//!
//! The archive handle is owned by the load call and dropped on every exit
//! path, early validation failures included.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use uapf_schema::{SchemaKind, SchemaRegistry, SchemaValidator};
use zip::ZipArchive;

use crate::error::{PackageError, PackageResult};
use crate::package::Package;
use crate::reader::{read_json, snapshot_members};
use crate::resolver::ComponentGroups;

/// Fixed archive path of the manifest.
pub const MANIFEST_MEMBER: &str = "manifest.json";

/// Loads UAPF archives against an injected schema registry.
///
/// Cloning is cheap; clones share the compiled-schema cache.
#[derive(Debug, Clone)]
pub struct PackageLoader {
    validator: SchemaValidator,
}

impl PackageLoader {
    /// A loader validating through `validator`.
    pub fn new(validator: SchemaValidator) -> Self {
        Self { validator }
    }

    /// A loader sharing `registry`'s compiled validators.
    pub fn with_registry(registry: Arc<SchemaRegistry>) -> Self {
        Self::new(SchemaValidator::new(registry))
    }

    /// A loader reading schemas from `dir`.
    pub fn from_schema_dir(dir: impl Into<PathBuf>) -> Self {
        Self::with_registry(Arc::new(SchemaRegistry::from_dir(dir)))
    }

    /// The validator used when a load asks for schema checks.
    pub fn validator(&self) -> &SchemaValidator {
        &self.validator
    }

    /// Load the archive at `path`, checking every document against its
    /// schema when `validate` is true.
    ///
    /// # Errors
    ///
    /// Any [`PackageError`]; no partial package is ever returned.
    pub fn load(&self, path: impl AsRef<Path>, validate: bool) -> PackageResult<Package> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PackageError::ArchiveNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|e| PackageError::ArchiveUnreadable {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|source| {
            PackageError::ArchiveUnreadable {
                path: path.to_path_buf(),
                source,
            }
        })?;

        tracing::debug!(archive = %path.display(), members = archive.len(), "opened UAPF archive");

        let manifest = read_json(&mut archive, MANIFEST_MEMBER)?;
        if validate {
            self.validator.validate_manifest(&manifest)?;
        }

        let groups = ComponentGroups::from_manifest(&manifest);
        let roles_path = groups.resolve(SchemaKind::Roles)?;
        let capabilities_path = groups.resolve(SchemaKind::Capabilities)?;
        let bindings_path = groups.resolve(SchemaKind::Bindings)?;
        let mcp_tools_path = groups.resolve(SchemaKind::McpTools)?;
        let a2a_schemas_path = groups.resolve(SchemaKind::A2aSchemas)?;

        let roles = read_json(&mut archive, roles_path)?;
        let capabilities = read_json(&mut archive, capabilities_path)?;
        let bindings = read_json(&mut archive, bindings_path)?;
        let mcp_tools = read_json(&mut archive, mcp_tools_path)?;
        let a2a_schemas = read_json(&mut archive, a2a_schemas_path)?;

        if validate {
            self.validator.validate_roles(&roles)?;
            self.validator.validate_capabilities(&capabilities)?;
            self.validator.validate_bindings(&bindings)?;
            self.validator.validate_mcp_tools(&mcp_tools)?;
            self.validator.validate_a2a_schemas(&a2a_schemas)?;
        }

        let raw_files = snapshot_members(&mut archive)?;

        tracing::info!(
            archive = %path.display(),
            members = raw_files.len(),
            validated = validate,
            "loaded UAPF package"
        );

        Ok(Package {
            manifest,
            roles,
            capabilities,
            bindings,
            mcp_tools,
            a2a_schemas,
            raw_files,
        })
    }

    /// Load with validation and discard the result.
    pub fn validate_only(&self, path: impl AsRef<Path>) -> PackageResult<()> {
        self.load(path, true).map(|_| ())
    }
}

/// Loader over the workspace `schemas/` directory, shared process-wide so
/// repeated calls reuse compiled validators.
fn default_loader() -> &'static PackageLoader {
    static DEFAULT: OnceLock<PackageLoader> = OnceLock::new();
    DEFAULT.get_or_init(|| PackageLoader::from_schema_dir(uapf_schema::DEFAULT_SCHEMA_DIR))
}

/// Load a `.uapf` archive using the default schema directory.
pub fn load_uapf(path: impl AsRef<Path>, validate: bool) -> PackageResult<Package> {
    default_loader().load(path, validate)
}

/// Validate a `.uapf` archive against all schemas using the default schema
/// directory.
pub fn validate_uapf(path: impl AsRef<Path>) -> PackageResult<()> {
    default_loader().validate_only(path)
}
