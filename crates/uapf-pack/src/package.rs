//! # Package
//!
//! The assembled result of a load: six decoded documents plus a snapshot of
//! every raw archive member. A `Package` is never mutated after the loader
//! builds it; all access is through shared-reference getters.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use uapf_schema::SchemaKind;

use crate::error::{PackageError, PackageResult};
use crate::models::{BindingsDocument, CapabilitiesDocument, RolesDocument};
use crate::resolver::ComponentGroups;

/// Archive member path → raw bytes, in archive enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMembers {
    entries: Vec<(String, Vec<u8>)>,
    index: HashMap<String, usize>,
}

impl RawMembers {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert a member. A repeated path keeps its first position and takes
    /// the new content.
    pub(crate) fn insert(&mut self, path: String, bytes: Vec<u8>) {
        match self.index.get(&path) {
            Some(&position) => self.entries[position].1 = bytes,
            None => {
                self.index.insert(path.clone(), self.entries.len());
                self.entries.push((path, bytes));
            }
        }
    }

    /// Raw content of `path`.
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.index
            .get(path)
            .map(|&position| self.entries[position].1.as_slice())
    }

    /// Whether the archive holds a member at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Number of distinct member paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for an archive with no members.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Member paths in archive order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    /// `(path, bytes)` pairs in archive order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries
            .iter()
            .map(|(path, bytes)| (path.as_str(), bytes.as_slice()))
    }
}

/// A fully loaded UAPF package.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub(crate) manifest: Value,
    pub(crate) roles: Value,
    pub(crate) capabilities: Value,
    pub(crate) bindings: Value,
    pub(crate) mcp_tools: Value,
    pub(crate) a2a_schemas: Value,
    pub(crate) raw_files: RawMembers,
}

impl Package {
    /// The decoded `manifest.json`.
    pub fn manifest(&self) -> &Value {
        &self.manifest
    }

    /// The decoded roles document.
    pub fn roles(&self) -> &Value {
        &self.roles
    }

    /// The decoded capabilities document.
    pub fn capabilities(&self) -> &Value {
        &self.capabilities
    }

    /// The decoded bindings document.
    pub fn bindings(&self) -> &Value {
        &self.bindings
    }

    /// The decoded MCP tools document.
    pub fn mcp_tools(&self) -> &Value {
        &self.mcp_tools
    }

    /// The decoded agent-to-agent schemas document.
    pub fn a2a_schemas(&self) -> &Value {
        &self.a2a_schemas
    }

    /// Every archive member, including those the loader did not decode.
    pub fn raw_files(&self) -> &RawMembers {
        &self.raw_files
    }

    /// The decoded document of the given kind.
    pub fn document(&self, kind: SchemaKind) -> &Value {
        match kind {
            SchemaKind::Manifest => &self.manifest,
            SchemaKind::Roles => &self.roles,
            SchemaKind::Capabilities => &self.capabilities,
            SchemaKind::Bindings => &self.bindings,
            SchemaKind::McpTools => &self.mcp_tools,
            SchemaKind::A2aSchemas => &self.a2a_schemas,
        }
    }

    /// Raw content of one archive member.
    pub fn member(&self, path: &str) -> Option<&[u8]> {
        self.raw_files.get(path)
    }

    /// Member paths in archive order.
    pub fn member_paths(&self) -> impl Iterator<Item = &str> {
        self.raw_files.paths()
    }

    /// Number of archive members, directory entries included.
    pub fn member_count(&self) -> usize {
        self.raw_files.len()
    }

    /// Lowercase hex SHA-256 of a member's raw bytes.
    pub fn member_digest(&self, path: &str) -> Option<String> {
        self.member(path).map(sha256_hex)
    }

    /// The manifest's declared component groups.
    pub fn component_groups(&self) -> ComponentGroups {
        ComponentGroups::from_manifest(&self.manifest)
    }

    /// A short description of the package for display.
    pub fn summary(&self) -> PackageSummary {
        let text = |key: &str| self.manifest.get(key).and_then(Value::as_str).map(str::to_string);
        PackageSummary {
            name: text("name"),
            version: text("version"),
            description: text("description"),
            components: self.component_groups().group_sizes(),
            member_count: self.member_count(),
        }
    }

    /// The roles document as typed records.
    pub fn roles_typed(&self) -> PackageResult<RolesDocument> {
        typed("roles", &self.roles)
    }

    /// The capabilities document as typed records.
    pub fn capabilities_typed(&self) -> PackageResult<CapabilitiesDocument> {
        typed("capabilities", &self.capabilities)
    }

    /// The bindings document as typed records.
    pub fn bindings_typed(&self) -> PackageResult<BindingsDocument> {
        typed("bindings", &self.bindings)
    }
}

fn typed<T: DeserializeOwned>(document: &'static str, value: &Value) -> PackageResult<T> {
    T::deserialize(value).map_err(|source| PackageError::Typed { document, source })
}

fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Headline facts about a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSummary {
    /// Manifest `name`, if it is a string.
    pub name: Option<String>,
    /// Manifest `version`, if it is a string.
    pub version: Option<String>,
    /// Manifest `description`, if it is a string.
    pub description: Option<String>,
    /// Declared path count per manifest component group.
    pub components: BTreeMap<String, usize>,
    /// Number of archive members.
    pub member_count: usize,
}

impl fmt::Display for PackageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name:        {}", self.name.as_deref().unwrap_or("(unnamed)"))?;
        writeln!(f, "Version:     {}", self.version.as_deref().unwrap_or("(none)"))?;
        if let Some(description) = &self.description {
            writeln!(f, "Description: {description}")?;
        }
        writeln!(f, "Members:     {}", self.member_count)?;
        write!(f, "Components:")?;
        if self.components.is_empty() {
            write!(f, " (none)")?;
        }
        for (group, count) in &self.components {
            write!(f, "\n  {group}: {count}")?;
        }
        Ok(())
    }
}
