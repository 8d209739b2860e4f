//! Environment-dependent derivation of the raw snapshot.
//!
//! Turns the string snapshot into the JSON object the schema validates:
//! ports are parsed, the database name and entity glob are adjusted for the
//! active environment, and the per-environment flags are filled in.

use super::snapshot::RawSnapshot;
use crate::keys;
use crate::model::Environment;
use serde_json::{Map, Value};

/// Entity glob used in the test environment, rooted at this crate's sources.
pub const TEST_ENTITIES_GLOB: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/src/**/*.entity.rs");

/// Name of the active environment; absent `NODE_ENV` means development.
///
/// Unrecognised names are returned as-is so derivation reflects them and the
/// schema reports them.
pub fn resolve_environment(snapshot: &RawSnapshot) -> &str {
    snapshot
        .get(keys::NODE_ENV)
        .unwrap_or(Environment::Development.as_str())
}

/// Build the derived snapshot for `active`.
pub fn derive_defaults(snapshot: &RawSnapshot, active: &str) -> Map<String, Value> {
    let mut derived = Map::new();

    for key in keys::INPUTS {
        let Some(raw) = snapshot.get(key) else {
            continue;
        };
        let value = match key {
            key if keys::PORTS.contains(&key) => coerce_integer(raw),
            keys::DB_DATABASE => Value::String(database_name(raw, active)),
            _ => Value::String(raw.to_string()),
        };
        derived.insert(key.to_string(), value);
    }

    if active == Environment::Test.as_str() {
        derived.insert(
            keys::DB_ENTITIES.to_string(),
            Value::String(TEST_ENTITIES_GLOB.to_string()),
        );
    }

    derived.insert(
        keys::DB_SYNCHRONIZE.to_string(),
        Value::Bool(active == Environment::Development.as_str()),
    );
    derived.insert(
        keys::DB_LOGGING.to_string(),
        Value::Bool(active != Environment::Test.as_str()),
    );
    derived.insert(
        keys::SSL.to_string(),
        Value::Bool(active == Environment::Production.as_str()),
    );

    derived
}

/// Production uses the name verbatim; other environments get `_<env>` appended.
pub fn database_name(raw: &str, active: &str) -> String {
    if active == Environment::Production.as_str() {
        raw.to_string()
    } else {
        format!("{raw}_{active}")
    }
}

/// Parse an integer, keeping the original string when it is not numeric.
fn coerce_integer(raw: &str) -> Value {
    match raw.trim().parse::<i64>() {
        Ok(number) => Value::from(number),
        Err(_) => Value::String(raw.to_string()),
    }
}
