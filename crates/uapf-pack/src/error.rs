//! Package-loading error types.
//!
//! Every error is terminal to the load that raised it. Each variant carries
//! the archive path or member name involved so the CLI can print a useful
//! message without extra context.

use std::path::PathBuf;

use thiserror::Error;
use uapf_schema::SchemaError;

/// Errors that can occur while loading a UAPF package.
#[derive(Debug, Error)]
pub enum PackageError {
    /// The archive path does not reference an existing file.
    #[error("UAPF archive not found: {}", .path.display())]
    ArchiveNotFound { path: PathBuf },

    /// The file exists but is not a readable zip container.
    #[error("cannot open UAPF archive {}: {source}", .path.display())]
    ArchiveUnreadable {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    /// A required member is absent from the archive.
    #[error("missing required file in archive: {member}")]
    MemberNotFound { member: String },

    /// A member is listed but its bytes could not be extracted.
    #[error("cannot read archive member {member}: {source}")]
    MemberUnreadable {
        member: String,
        source: zip::result::ZipError,
    },

    /// A member is present but is not valid JSON.
    #[error("malformed JSON in {member}: {source}")]
    MalformedJson {
        member: String,
        source: serde_json::Error,
    },

    /// No path in a manifest component group ends with the required suffix.
    #[error("manifest.json components.{group} must include {suffix}")]
    ComponentNotDeclared { group: String, suffix: String },

    /// A schema configuration fault or document violation.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A validated document does not fit its typed view.
    #[error("{document} does not match its typed view: {source}")]
    Typed {
        document: &'static str,
        source: serde_json::Error,
    },
}

impl PackageError {
    /// True for faults in the schema set rather than in the archive.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Schema(e) if e.is_configuration_error())
    }

    /// One-based line of a JSON parse failure.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedJson { source, .. } => Some(source.line()),
            _ => None,
        }
    }

    /// One-based column of a JSON parse failure.
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::MalformedJson { source, .. } => Some(source.column()),
            _ => None,
        }
    }
}

/// Result alias for package operations.
pub type PackageResult<T> = Result<T, PackageError>;
