//! # Schema Registry
//!
//! Resolves a [`SchemaKind`] to its schema document and compiles it into a
//! reusable `jsonschema::Validator` under the Draft 2020-12 dialect.
//!
//! ## Caching
//!
//! Schema documents are static configuration, so a compiled validator is
//! cached per kind for the lifetime of the registry. The cache is
//! write-once-per-kind: two threads may race to compile the same kind, and
//! whichever inserts first wins. Both compilations produce equivalent
//! validators, so the loser's result is simply dropped.
//!
//! The registry is an explicit value rather than process-global state. Pass
//! it (usually behind an `Arc`) to every loader that should share the cache.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use jsonschema::{Draft, Retrieve, Uri, Validator};
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};
use crate::kind::SchemaKind;
use crate::source::{DirectorySchemaSource, SchemaSource};

/// Refuses every external `$ref`.
///
/// UAPF schemas are self-contained; only fragment references into the same
/// document are allowed. Without this the compiler could reach for the
/// network while building a validator.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external schema references are not supported: {}", uri.as_str()).into())
    }
}

/// Compiles and caches validators for the six UAPF document kinds.
pub struct SchemaRegistry {
    source: Box<dyn SchemaSource>,
    compiled: RwLock<HashMap<SchemaKind, Arc<Validator>>>,
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("source", &self.source)
            .field("cached", &self.cached_count())
            .finish()
    }
}

impl SchemaRegistry {
    /// Create a registry over an arbitrary schema source.
    pub fn new(source: impl SchemaSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            compiled: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry reading `*.schema.json` files from `dir`.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(DirectorySchemaSource::new(dir))
    }

    /// Create a registry over the workspace `schemas/` directory.
    pub fn from_default_dir() -> Self {
        Self::from_dir(crate::DEFAULT_SCHEMA_DIR)
    }

    /// Load the raw schema document for `kind`.
    ///
    /// # Errors
    ///
    /// Propagates [`SchemaError::SchemaFileMissing`] and
    /// [`SchemaError::SchemaLoad`] from the source.
    pub fn load_schema(&self, kind: SchemaKind) -> SchemaResult<Value> {
        self.source.load(kind)
    }

    /// Load a schema by its friendly name (`"roles"`, `"mcp_tools"`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownSchemaName`] if `name` is not one of
    /// the six document kinds.
    pub fn load_schema_by_name(&self, name: &str) -> SchemaResult<Value> {
        let kind: SchemaKind = name.parse()?;
        self.load_schema(kind)
    }

    /// Return the compiled validator for `kind`, compiling it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaCompilationFailure`] if the schema is
    /// not a valid Draft 2020-12 schema, plus any source error.
    pub fn compile_validator(&self, kind: SchemaKind) -> SchemaResult<Arc<Validator>> {
        if let Some(validator) = self.compiled.read().get(&kind) {
            return Ok(Arc::clone(validator));
        }

        let schema = self.load_schema(kind)?;
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .with_retriever(OfflineRetriever)
            .build(&schema)
            .map_err(|e| SchemaError::SchemaCompilationFailure {
                kind,
                reason: e.to_string(),
            })?;

        tracing::debug!(%kind, "compiled schema validator");

        let mut compiled = self.compiled.write();
        let entry = compiled.entry(kind).or_insert_with(|| Arc::new(validator));
        Ok(Arc::clone(entry))
    }

    /// Compile all six validators up front.
    ///
    /// Hosts that prefer to fail at start-up rather than on the first load
    /// call this once after construction.
    pub fn precompile_all(&self) -> SchemaResult<()> {
        for kind in SchemaKind::all() {
            self.compile_validator(kind)?;
        }
        Ok(())
    }

    /// Number of kinds with a cached validator.
    pub fn cached_count(&self) -> usize {
        self.compiled.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSchemaSource;
    use serde_json::json;

    #[test]
    fn test_precompile_all_repo_schemas() {
        let registry = SchemaRegistry::from_default_dir();
        registry.precompile_all().unwrap();
        assert_eq!(registry.cached_count(), SchemaKind::all().len());
    }

    #[test]
    fn test_compile_is_cached() {
        let registry = SchemaRegistry::from_default_dir();
        assert_eq!(registry.cached_count(), 0);
        let first = registry.compile_validator(SchemaKind::Roles).unwrap();
        let second = registry.compile_validator(SchemaKind::Roles).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.cached_count(), 1);
    }

    #[test]
    fn test_load_schema_by_name() {
        let registry = SchemaRegistry::from_default_dir();
        let schema = registry.load_schema_by_name("a2a_schemas").unwrap();
        assert_eq!(schema["required"], json!(["schemas"]));
    }

    #[test]
    fn test_load_schema_by_unknown_name() {
        let registry = SchemaRegistry::from_default_dir();
        let err = registry.load_schema_by_name("workflows").unwrap_err();
        assert!(
            matches!(err, SchemaError::UnknownSchemaName(_)),
            "Expected UnknownSchemaName, got: {err}"
        );
    }

    #[test]
    fn test_missing_schema_dir() {
        let dir = tempfile::tempdir().unwrap();
        let registry = SchemaRegistry::from_dir(dir.path().join("nope"));
        let err = registry.compile_validator(SchemaKind::Manifest).unwrap_err();
        assert!(matches!(err, SchemaError::SchemaFileMissing { .. }));
        assert_eq!(registry.cached_count(), 0);
    }

    #[test]
    fn test_malformed_schema_fails_compilation() {
        let source = StaticSchemaSource::new()
            .with_schema(SchemaKind::Roles, json!({"type": "no-such-type"}));
        let registry = SchemaRegistry::new(source);
        let err = registry.compile_validator(SchemaKind::Roles).unwrap_err();
        match &err {
            SchemaError::SchemaCompilationFailure { kind, .. } => {
                assert_eq!(*kind, SchemaKind::Roles);
            }
            other => panic!("Expected SchemaCompilationFailure, got: {other}"),
        }
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_external_ref_is_not_fetched() {
        let source = StaticSchemaSource::new().with_schema(
            SchemaKind::Manifest,
            json!({
                "$schema": "https://json-schema.org/draft/2020-12/schema",
                "$ref": "https://example.invalid/remote.schema.json"
            }),
        );
        let registry = SchemaRegistry::new(source);
        assert!(matches!(
            registry.compile_validator(SchemaKind::Manifest),
            Err(SchemaError::SchemaCompilationFailure { .. })
        ));
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        let registry = Arc::new(SchemaRegistry::from_default_dir());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.compile_validator(SchemaKind::Bindings).is_ok())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(registry.cached_count(), 1);
    }
}
