//! Schema-layer error types.
//!
//! Configuration faults in the schema set and document violations share one
//! enum so callers can propagate with `?`, but
//! [`SchemaError::is_configuration_error`] keeps them apart.

use std::path::PathBuf;

use thiserror::Error;

use crate::kind::SchemaKind;
use crate::validate::Violation;

/// Errors raised by the schema registry and validation engine.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A friendly schema name that is not one of the six document kinds.
    #[error("unknown schema: {0:?}")]
    UnknownSchemaName(String),

    /// The backing schema file is absent from the schema source.
    #[error("schema file not found for '{kind}': {path}")]
    SchemaFileMissing {
        /// Kind whose schema was requested.
        kind: SchemaKind,
        /// Where the schema was expected.
        path: PathBuf,
    },

    /// The schema file exists but could not be read or parsed as JSON.
    #[error("failed to load schema '{kind}': {reason}")]
    SchemaLoad {
        /// Kind whose schema was requested.
        kind: SchemaKind,
        /// Human-readable reason.
        reason: String,
    },

    /// The schema document is not a valid Draft 2020-12 schema.
    #[error("failed to compile schema '{kind}': {reason}")]
    SchemaCompilationFailure {
        /// Kind whose schema failed to compile.
        kind: SchemaKind,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A decoded document does not conform to its schema.
    #[error("{kind} document failed schema validation: {violation}")]
    SchemaViolation {
        /// Kind of the offending document.
        kind: SchemaKind,
        /// The first violation found.
        violation: Violation,
    },
}

impl SchemaError {
    /// True for faults in the schema set itself rather than in user data.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::SchemaViolation { .. })
    }

    /// The document kind involved, when one is known.
    pub fn kind(&self) -> Option<SchemaKind> {
        match self {
            Self::UnknownSchemaName(_) => None,
            Self::SchemaFileMissing { kind, .. }
            | Self::SchemaLoad { kind, .. }
            | Self::SchemaCompilationFailure { kind, .. }
            | Self::SchemaViolation { kind, .. } => Some(*kind),
        }
    }
}

/// Result alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
