//! Validated application configuration sourced from environment variables.
//!
//! This crate owns the environment schema, the per-environment derivation
//! rules, batch validation and the single process-wide config instance.

mod error;
pub mod keys;
mod loader;
mod model;

/// Error types returned by loading and validation.
pub use error::{ConfigError, Constraint, EnvironmentError, REDACTED, Violation};
/// Pipeline stages and process-wide publication.
pub use loader::{
    ConfigSchema, FieldDescription, FieldSpec, FieldType, RawSnapshot, TEST_ENTITIES_GLOB,
    database_name, derive_defaults, get, init, init_from, resolve_environment,
};
/// Typed configuration model.
pub use model::*;
