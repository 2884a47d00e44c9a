//! # uapf-schema: Schema Registry & Validation Engine
//!
//! Validates the six JSON document kinds carried by a UAPF package against
//! their JSON Schema (Draft 2020-12) definitions.
//!
//! - [`SchemaKind`] is the closed set of document kinds. Every lookup that
//!   used to be keyed by a friendly string goes through this enum, so adding
//!   a kind forces every `match` to handle it.
//! - [`SchemaSource`] abstracts where schema documents come from. The
//!   on-disk [`DirectorySchemaSource`] reads the repository `schemas/`
//!   directory; [`StaticSchemaSource`] holds schemas in memory.
//! - [`SchemaRegistry`] compiles schemas into validators on first use and
//!   caches them for the lifetime of the registry.
//! - [`SchemaValidator`] exposes one validate operation per document kind and
//!   reports the first violation found.
//!
//! ## Crate Policy
//!
//! - No archive knowledge lives here; `uapf-pack` decodes documents and
//!   hands them over as `serde_json::Value`.
//! - Schema-set faults (unknown name, missing file, uncompilable schema) are
//!   configuration errors and stay distinguishable from document violations.

pub mod error;
pub mod kind;
pub mod registry;
pub mod source;
pub mod validate;

pub use error::{SchemaError, SchemaResult};
pub use kind::SchemaKind;
pub use registry::SchemaRegistry;
pub use source::{DirectorySchemaSource, SchemaSource, StaticSchemaSource};
pub use validate::{SchemaValidator, Violation};

/// The `schemas/` directory of this workspace, fixed at compile time.
///
/// Used as the last fallback when no schema directory is configured.
pub const DEFAULT_SCHEMA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../schemas");
