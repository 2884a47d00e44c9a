//! # Validation Engine
//!
//! One validate operation per document kind, each delegating to the cached
//! validator from the [`SchemaRegistry`].
//!
//! Only the first violation is reported. The loader aborts on the first
//! failure anyway, so collecting every violation would buy nothing.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};
use crate::kind::SchemaKind;
use crate::registry::SchemaRegistry;

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating value within the document.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Validates decoded documents against the UAPF schema set.
///
/// Cloning is cheap and clones share the registry's validator cache.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    registry: Arc<SchemaRegistry>,
}

impl SchemaValidator {
    /// Wrap a shared registry.
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self { registry }
    }

    /// The registry backing this validator.
    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    /// Validate `document` as a `kind` document.
    ///
    /// # Errors
    ///
    /// [`SchemaError::SchemaViolation`] carrying the first violation, or a
    /// configuration error if the validator cannot be built.
    pub fn validate(&self, kind: SchemaKind, document: &Value) -> SchemaResult<()> {
        let validator = self.registry.compile_validator(kind)?;
        let first = validator.iter_errors(document).next().map(|err| Violation {
            instance_path: err.instance_path.to_string(),
            schema_path: err.schema_path.to_string(),
            message: err.to_string(),
        });

        match first {
            None => Ok(()),
            Some(violation) => {
                tracing::debug!(%kind, %violation, "schema violation");
                Err(SchemaError::SchemaViolation { kind, violation })
            }
        }
    }

    /// Validate a `manifest.json` document.
    pub fn validate_manifest(&self, document: &Value) -> SchemaResult<()> {
        self.validate(SchemaKind::Manifest, document)
    }

    /// Validate a roles document.
    pub fn validate_roles(&self, document: &Value) -> SchemaResult<()> {
        self.validate(SchemaKind::Roles, document)
    }

    /// Validate a capabilities document.
    pub fn validate_capabilities(&self, document: &Value) -> SchemaResult<()> {
        self.validate(SchemaKind::Capabilities, document)
    }

    /// Validate a bindings document.
    pub fn validate_bindings(&self, document: &Value) -> SchemaResult<()> {
        self.validate(SchemaKind::Bindings, document)
    }

    /// Validate an MCP tools document.
    pub fn validate_mcp_tools(&self, document: &Value) -> SchemaResult<()> {
        self.validate(SchemaKind::McpTools, document)
    }

    /// Validate an agent-to-agent schemas document.
    pub fn validate_a2a_schemas(&self, document: &Value) -> SchemaResult<()> {
        self.validate(SchemaKind::A2aSchemas, document)
    }
}
