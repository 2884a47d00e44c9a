//! # uapf-pack: UAPF Package Loader
//!
//! Loads `.uapf` packages: zip archives holding a root `manifest.json` plus
//! five documents the manifest points at through its component groups.
//!
//! ## Pipeline
//!
//! [`PackageLoader::load`] opens the archive, reads and (optionally)
//! validates the manifest, resolves the five component paths with
//! [`resolver`], reads each one with [`reader`], validates them in the fixed
//! order roles → capabilities → bindings → mcp_tools → a2a_schemas, snapshots
//! every raw member, and returns an immutable [`Package`].
//!
//! The load is all-or-nothing: any failure aborts with a [`PackageError`]
//! and no partial package.
//!
//! ## Crate Policy
//!
//! - Archives are only read, never written.
//! - Schema checks are delegated to `uapf-schema`; the registry is injected,
//!   never reached through global state except by the `load_uapf` and
//!   `validate_uapf` convenience functions.

pub mod error;
pub mod loader;
pub mod models;
pub mod package;
pub mod reader;
pub mod resolver;

pub use error::{PackageError, PackageResult};
pub use loader::{load_uapf, validate_uapf, PackageLoader, MANIFEST_MEMBER};
pub use models::{
    BindingsDocument, CapabilitiesDocument, CapabilityBinding, CapabilitySet, Role, RolesDocument,
};
pub use package::{Package, PackageSummary, RawMembers};
pub use resolver::ComponentGroups;
