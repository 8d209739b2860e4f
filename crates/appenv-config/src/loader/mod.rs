//! Environment loading pipeline and process-wide publication.
//!
//! Reads the recognised variables once, derives environment-dependent
//! values, validates the result against the schema, decodes it into an
//! `AppConfig` and publishes a single shared instance.

mod derivation;
mod schema;
mod snapshot;


pub use derivation::{TEST_ENTITIES_GLOB, database_name, derive_defaults, resolve_environment};
pub use schema::{ConfigSchema, FieldDescription, FieldSpec, FieldType};
pub use snapshot::RawSnapshot;

use crate::error::{Constraint, EnvironmentError, Violation};
use crate::{AppConfig, ConfigError, keys};
use globset::Glob;
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// The published configuration; set at most once per process.
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// The process environment as first read; never re-read afterwards.
static PROCESS_SNAPSHOT: OnceLock<RawSnapshot> = OnceLock::new();

impl AppConfig {
    /// Build a config from the process environment without publishing it.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_snapshot(process_snapshot())
    }

    /// Build a config from an explicit snapshot (no publication).
    pub fn from_snapshot(snapshot: &RawSnapshot) -> Result<Self, ConfigError> {
        build(&ConfigSchema::application(), snapshot)
    }
}

/// Snapshot of the process environment, read on first use.
fn process_snapshot() -> &'static RawSnapshot {
    PROCESS_SNAPSHOT.get_or_init(RawSnapshot::from_process)
}

fn build(schema: &ConfigSchema, snapshot: &RawSnapshot) -> Result<AppConfig, ConfigError> {
    let active = resolve_environment(snapshot);
    debug!("deriving config (environment={active}, set={})", snapshot.len());
    let derived = derive_defaults(snapshot, active);
    let validated = validate_snapshot(schema, snapshot, &derived)?;
    warn_on_unusable_entities(&validated);
    let config: AppConfig = serde_json::from_value(Value::Object(validated))?;
    Ok(config)
}

/// Validate a derived snapshot, folding in unicode failures from the raw read.
///
/// Violations on coerced fields report the raw string, not the parsed value.
fn validate_snapshot(
    schema: &ConfigSchema,
    snapshot: &RawSnapshot,
    derived: &Map<String, Value>,
) -> Result<Map<String, Value>, EnvironmentError> {
    let mut violations: Vec<Violation> = snapshot
        .non_unicode_keys()
        .map(|key| Violation::new(key, Constraint::InvalidUnicode, snapshot.get(key).map(str::to_string)))
        .collect();

    let validated = match schema.validate(derived) {
        Ok(validated) => Some(validated),
        Err(err) => {
            violations.extend(err.violations);
            None
        }
    };

    match validated {
        Some(validated) if violations.is_empty() => Ok(validated),
        _ => {
            let mut violations: Vec<Violation> = violations
                .into_iter()
                .map(|mut violation| {
                    if violation.received.is_some() && keys::PORTS.contains(&violation.key.as_str()) {
                        violation.received = snapshot.get(&violation.key).map(str::to_string);
                    }
                    match schema.field(&violation.key) {
                        Some(field) if field.secret => violation.redacted(),
                        _ => violation,
                    }
                })
                .collect();
            violations.sort_by_key(|violation| schema.position(&violation.key));
            Err(EnvironmentError::new(violations))
        }
    }
}

/// The entity path is passed through as-is; flag patterns a glob matcher rejects.
fn warn_on_unusable_entities(validated: &Map<String, Value>) {
    let Some(entities) = validated.get(keys::DB_ENTITIES).and_then(Value::as_str) else {
        return;
    };
    if let Err(err) = Glob::new(entities) {
        warn!("{} is not a valid glob pattern: {}", keys::DB_ENTITIES, err.kind());
    }
}

/// Build the config from the process environment and publish it.
///
/// The environment is read once per process; a retry after a failed
/// validation reuses the first snapshot, so it fails the same way.
pub fn init() -> Result<&'static AppConfig, ConfigError> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    init_from(process_snapshot())
}

/// Publish a config built from `snapshot` unless one is already published.
pub fn init_from(snapshot: &RawSnapshot) -> Result<&'static AppConfig, ConfigError> {
    if let Some(config) = CONFIG.get() {
        debug!("config already published; ignoring snapshot");
        return Ok(config);
    }
    let config = AppConfig::from_snapshot(snapshot)?;
    let published = CONFIG.get_or_init(|| config);
    info!(
        "config published (environment={}, ssl={})",
        published.environment, published.ssl
    );
    Ok(published)
}

/// The published config, if `init` has succeeded.
pub fn get() -> Option<&'static AppConfig> {
    CONFIG.get()
}
