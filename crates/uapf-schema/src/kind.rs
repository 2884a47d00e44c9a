//! # Document Kinds
//!
//! The six JSON payload types a UAPF package carries. Each kind maps to
//! exactly one schema file and, except for the manifest, to one manifest
//! component group and member filename suffix.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// A recognized UAPF document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    /// The root `manifest.json`.
    Manifest,
    /// Agent role declarations.
    Roles,
    /// Per-agent capability sets.
    Capabilities,
    /// Task-to-agent bindings.
    Bindings,
    /// MCP tool interface descriptions.
    McpTools,
    /// Agent-to-agent interface schemas.
    A2aSchemas,
}

/// Number of document kinds.
pub const SCHEMA_KIND_COUNT: usize = 6;

impl SchemaKind {
    /// The component kinds, in the order the loader resolves, reads and
    /// validates them.
    pub const COMPONENTS: [SchemaKind; 5] = [
        Self::Roles,
        Self::Capabilities,
        Self::Bindings,
        Self::McpTools,
        Self::A2aSchemas,
    ];

    /// All kinds, manifest first.
    pub fn all() -> [SchemaKind; SCHEMA_KIND_COUNT] {
        [
            Self::Manifest,
            Self::Roles,
            Self::Capabilities,
            Self::Bindings,
            Self::McpTools,
            Self::A2aSchemas,
        ]
    }

    /// Friendly name used in messages and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => "manifest",
            Self::Roles => "roles",
            Self::Capabilities => "capabilities",
            Self::Bindings => "bindings",
            Self::McpTools => "mcp_tools",
            Self::A2aSchemas => "a2a_schemas",
        }
    }

    /// Filename of the backing schema inside the schema directory.
    pub fn schema_filename(&self) -> &'static str {
        match self {
            Self::Manifest => "uapf-manifest.schema.json",
            Self::Roles => "uapf-roles.schema.json",
            Self::Capabilities => "uapf-capabilities.schema.json",
            Self::Bindings => "uapf-bindings.schema.json",
            Self::McpTools => "uapf-mcp-tools.schema.json",
            Self::A2aSchemas => "uapf-a2a-schemas.schema.json",
        }
    }

    /// The manifest component group and member filename suffix that locate
    /// this document inside an archive.
    ///
    /// Returns `None` for the manifest, which lives at a fixed path.
    pub fn component(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Manifest => None,
            Self::Roles => Some(("agents", "roles.json")),
            Self::Capabilities => Some(("agents", "capabilities.json")),
            Self::Bindings => Some(("agents", "bindings.json")),
            Self::McpTools => Some(("integration", "mcp-tools.json")),
            Self::A2aSchemas => Some(("integration", "a2a-schemas.json")),
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manifest" => Ok(Self::Manifest),
            "roles" => Ok(Self::Roles),
            "capabilities" => Ok(Self::Capabilities),
            "bindings" => Ok(Self::Bindings),
            "mcp_tools" => Ok(Self::McpTools),
            "a2a_schemas" => Ok(Self::A2aSchemas),
            other => Err(SchemaError::UnknownSchemaName(other.to_string())),
        }
    }
}
