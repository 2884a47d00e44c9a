//! # Schema Sources
//!
//! Where schema documents come from. The registry only needs a parsed
//! `serde_json::Value` per [`SchemaKind`]; storage and packaging of the
//! schema files stay behind the [`SchemaSource`] trait.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};
use crate::kind::SchemaKind;

/// Supplies raw schema documents by kind.
pub trait SchemaSource: Send + Sync + fmt::Debug {
    /// Load the schema document for `kind`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::SchemaFileMissing`] if the source has no schema for
    /// `kind`, [`SchemaError::SchemaLoad`] if it exists but is unusable.
    fn load(&self, kind: SchemaKind) -> SchemaResult<Value>;
}

/// Reads `<dir>/<kind.schema_filename()>` from disk on every call.
#[derive(Debug, Clone)]
pub struct DirectorySchemaSource {
    dir: PathBuf,
}

impl DirectorySchemaSource {
    /// Create a source rooted at `dir`. The directory is not touched until
    /// a schema is loaded.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The schema directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the schema file for `kind`.
    pub fn schema_path(&self, kind: SchemaKind) -> PathBuf {
        self.dir.join(kind.schema_filename())
    }
}

impl SchemaSource for DirectorySchemaSource {
    fn load(&self, kind: SchemaKind) -> SchemaResult<Value> {
        let path = self.schema_path(kind);
        if !path.is_file() {
            return Err(SchemaError::SchemaFileMissing { kind, path });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| SchemaError::SchemaLoad {
            kind,
            reason: format!("cannot read {}: {e}", path.display()),
        })?;

        tracing::debug!(%kind, path = %path.display(), "loaded schema file");

        serde_json::from_str(&content).map_err(|e| SchemaError::SchemaLoad {
            kind,
            reason: format!("invalid JSON in {}: {e}", path.display()),
        })
    }
}

/// Schemas held in memory, for hosts that embed their schema set.
#[derive(Debug, Clone, Default)]
pub struct StaticSchemaSource {
    schemas: HashMap<SchemaKind, Value>,
}

impl StaticSchemaSource {
    /// An empty source. Every lookup fails until schemas are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the schema for `kind`.
    pub fn with_schema(mut self, kind: SchemaKind, schema: Value) -> Self {
        self.schemas.insert(kind, schema);
        self
    }

    /// Snapshot every schema another source provides.
    ///
    /// # Errors
    ///
    /// Fails on the first kind `source` cannot load.
    pub fn snapshot(source: &dyn SchemaSource) -> SchemaResult<Self> {
        let mut schemas = HashMap::new();
        for kind in SchemaKind::all() {
            schemas.insert(kind, source.load(kind)?);
        }
        Ok(Self { schemas })
    }
}

impl SchemaSource for StaticSchemaSource {
    fn load(&self, kind: SchemaKind) -> SchemaResult<Value> {
        self.schemas
            .get(&kind)
            .cloned()
            .ok_or_else(|| SchemaError::SchemaFileMissing {
                kind,
                path: PathBuf::from(kind.schema_filename()),
            })
    }
}
