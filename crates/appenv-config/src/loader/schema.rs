//! Declarative schema for the application environment and its validation pass.

use crate::error::{Constraint, EnvironmentError, Violation};
use crate::keys;
use crate::model::Environment;
use serde_json::{Map, Value};

/// Primitive type a field must hold after coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Boolean,
    /// String restricted to a fixed set of values.
    Enum(&'static [&'static str]),
}

impl FieldType {
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Enum(_) => "enum",
        }
    }
}

/// Descriptor for a single configuration key.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub ty: FieldType,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    /// Inclusive bounds for integer fields.
    pub range: Option<(i64, i64)>,
    /// Rejected values are redacted in violations.
    pub secret: bool,
    /// Applied when the key is absent; fields without one are mandatory.
    pub default: Option<Value>,
}

impl FieldSpec {
    fn new(key: &'static str, ty: FieldType) -> Self {
        Self {
            key,
            ty,
            min_len: None,
            max_len: None,
            range: None,
            secret: false,
            default: None,
        }
    }

    pub fn string(key: &'static str) -> Self {
        Self::new(key, FieldType::String)
    }

    /// Mandatory, non-empty string.
    pub fn non_empty(key: &'static str) -> Self {
        Self::string(key).min_len(1)
    }

    pub fn integer(key: &'static str) -> Self {
        Self::new(key, FieldType::Integer)
    }

    pub fn boolean(key: &'static str) -> Self {
        Self::new(key, FieldType::Boolean)
    }

    pub fn enumeration(key: &'static str, allowed: &'static [&'static str]) -> Self {
        Self::new(key, FieldType::Enum(allowed))
    }

    pub fn min_len(mut self, min: usize) -> Self {
        self.min_len = Some(min);
        self
    }

    pub fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.range = Some((min, max));
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Check a present value, returning every violated constraint.
    fn check(&self, value: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut reject = |constraint: Constraint| {
            violations.push(Violation::new(self.key, constraint, Some(render(value))));
        };

        match self.ty {
            FieldType::String => {
                let Some(text) = value.as_str() else {
                    reject(Constraint::ExpectedString);
                    return self.finish(violations);
                };
                let len = text.chars().count();
                if let Some(min) = self.min_len.filter(|min| len < *min) {
                    reject(Constraint::TooShort { min });
                }
                if let Some(max) = self.max_len.filter(|max| len > *max) {
                    reject(Constraint::TooLong { max });
                }
            }
            FieldType::Integer => match value.as_i64() {
                Some(number) => {
                    if let Some((min, max)) = self.range {
                        if number < min || number > max {
                            reject(Constraint::OutOfRange { min, max });
                        }
                    }
                }
                None => reject(Constraint::ExpectedInteger),
            },
            FieldType::Boolean => {
                if !value.is_boolean() {
                    reject(Constraint::ExpectedBoolean);
                }
            }
            FieldType::Enum(allowed) => {
                let known = value.as_str().is_some_and(|text| allowed.contains(&text));
                if !known {
                    reject(Constraint::NotAllowed {
                        allowed: allowed.iter().map(|name| name.to_string()).collect(),
                    });
                }
            }
        }

        self.finish(violations)
    }

    fn finish(&self, violations: Vec<Violation>) -> Vec<Violation> {
        if self.secret {
            violations.into_iter().map(Violation::redacted).collect()
        } else {
            violations
        }
    }
}

/// One row of the operator-facing schema description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescription {
    pub key: &'static str,
    pub ty: String,
    pub required: bool,
    pub default: Option<String>,
}

/// Ordered set of field descriptors for every recognised key.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSchema {
    fields: Vec<FieldSpec>,
}

impl ConfigSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Schema for the application environment.
    pub fn application() -> Self {
        Self::new(vec![
            FieldSpec::non_empty(keys::FRONTEND_URL),
            FieldSpec::non_empty(keys::DB_ENGINE).max_len(12),
            FieldSpec::non_empty(keys::DB_HOST),
            port(keys::DB_PORT),
            FieldSpec::non_empty(keys::DB_USER),
            FieldSpec::non_empty(keys::DB_PASSWORD).secret(),
            FieldSpec::non_empty(keys::DB_DATABASE),
            FieldSpec::non_empty(keys::DB_ENTITIES),
            FieldSpec::boolean(keys::DB_SYNCHRONIZE),
            FieldSpec::boolean(keys::DB_LOGGING),
            FieldSpec::non_empty(keys::API_URL),
            FieldSpec::non_empty(keys::JWT_KEY).secret(),
            port(keys::API_PORT),
            FieldSpec::enumeration(keys::NODE_ENV, Environment::NAMES)
                .default_value(Value::from(Environment::Development.as_str())),
            FieldSpec::boolean(keys::SSL).default_value(Value::Bool(false)),
            FieldSpec::non_empty(keys::CAPTCHA_SECRET).secret(),
            FieldSpec::non_empty(keys::CRYPTO_SECRET).secret(),
            FieldSpec::non_empty(keys::CRYPTO_IV).secret(),
            FieldSpec::non_empty(keys::APP_SECRET).secret(),
            FieldSpec::non_empty(keys::REDIS_HOST),
            port(keys::REDIS_PORT),
        ])
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Declaration index of a key, used to order violations.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.key == key)
    }

    pub fn describe(&self) -> Vec<FieldDescription> {
        self.fields
            .iter()
            .map(|field| FieldDescription {
                key: field.key,
                ty: match field.ty {
                    FieldType::Enum(allowed) => allowed.join("|"),
                    other => other.name().to_string(),
                },
                required: field.is_required(),
                default: field.default.as_ref().map(render),
            })
            .collect()
    }

    /// Validate a derived snapshot, applying defaults for absent optional keys.
    ///
    /// All fields are checked; the error carries every violation found.
    /// Keys the schema does not declare are dropped from the result.
    pub fn validate(&self, raw: &Map<String, Value>) -> Result<Map<String, Value>, EnvironmentError> {
        let mut validated = Map::new();
        let mut violations = Vec::new();

        for field in &self.fields {
            match raw.get(field.key).filter(|value| !value.is_null()) {
                Some(value) => {
                    let found = field.check(value);
                    if found.is_empty() {
                        validated.insert(field.key.to_string(), value.clone());
                    }
                    violations.extend(found);
                }
                None => match &field.default {
                    Some(default) => {
                        validated.insert(field.key.to_string(), default.clone());
                    }
                    None => violations.push(Violation::new(field.key, Constraint::Required, None)),
                },
            }
        }

        if violations.is_empty() {
            Ok(validated)
        } else {
            Err(EnvironmentError::new(violations))
        }
    }
}

fn port(key: &'static str) -> FieldSpec {
    FieldSpec::integer(key).range(0, i64::from(u16::MAX))
}

/// Render a JSON value the way it appeared in the environment.
fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn schema_declares_every_key_once() {
        let schema = ConfigSchema::application();
        let mut expected: Vec<&str> = keys::INPUTS.iter().chain(keys::DERIVED.iter()).copied().collect();
        expected.sort_unstable();
        let mut declared: Vec<&str> = schema.fields().iter().map(|field| field.key).collect();
        declared.sort_unstable();
        assert_eq!(declared, expected);
    }

    #[test]
    fn only_node_env_and_ssl_have_defaults() {
        let schema = ConfigSchema::application();
        let optional: Vec<&str> = schema
            .fields()
            .iter()
            .filter(|field| !field.is_required())
            .map(|field| field.key)
            .collect();
        assert_eq!(optional, vec![keys::NODE_ENV, keys::SSL]);
    }

    #[test]
    fn string_length_bounds() {
        let field = FieldSpec::non_empty("DB_ENGINE").max_len(12);
        assert!(field.check(&json!("postgres")).is_empty());

        let empty = field.check(&json!(""));
        assert_eq!(empty[0].constraint, Constraint::TooShort { min: 1 });

        let long = field.check(&json!("a-very-long-engine"));
        assert_eq!(long[0].constraint, Constraint::TooLong { max: 12 });
        assert_eq!(long[0].received.as_deref(), Some("a-very-long-engine"));
    }

    #[test]
    fn integer_rejects_strings_and_out_of_range() {
        let field = port("API_PORT");
        assert!(field.check(&json!(8080)).is_empty());
        assert_eq!(field.check(&json!("abc"))[0].constraint, Constraint::ExpectedInteger);
        assert_eq!(
            field.check(&json!(70000))[0].constraint,
            Constraint::OutOfRange { min: 0, max: 65535 }
        );
    }

    #[test]
    fn enumeration_lists_allowed_values() {
        let field = FieldSpec::enumeration("NODE_ENV", Environment::NAMES);
        let violations = field.check(&json!("staging"));
        assert_eq!(violations.len(), 1);
        let message = violations[0].to_string();
        assert!(message.contains("development, production, test, local"));
        assert!(message.contains("staging"));
    }

    #[test]
    fn entity_path_accepts_any_non_empty_string() {
        let field = ConfigSchema::application()
            .field(keys::DB_ENTITIES)
            .cloned()
            .expect("field");
        assert!(field.check(&json!("dist/**/*.entity.js")).is_empty());
        assert!(field.check(&json!("dist/[entities/*.js")).is_empty());
        assert_eq!(field.check(&json!(""))[0].constraint, Constraint::TooShort { min: 1 });
    }

    #[test]
    fn secret_values_are_redacted() {
        let field = FieldSpec::non_empty("JWT_KEY").secret();
        let violations = field.check(&json!(42));
        assert_eq!(violations[0].received.as_deref(), Some(crate::REDACTED));
    }

    #[test]
    fn validate_applies_defaults_and_drops_unknown_keys() {
        let schema = ConfigSchema::new(vec![
            FieldSpec::non_empty("NAME"),
            FieldSpec::boolean("FLAG").default_value(json!(false)),
        ]);
        let validated = schema
            .validate(&object(json!({ "NAME": "svc", "EXTRA": "x" })))
            .expect("valid");
        assert_eq!(Value::Object(validated), json!({ "NAME": "svc", "FLAG": false }));
    }

    #[test]
    fn validate_collects_all_violations() {
        let schema = ConfigSchema::new(vec![
            FieldSpec::non_empty("A"),
            FieldSpec::integer("B"),
            FieldSpec::non_empty("C"),
        ]);
        let err = schema
            .validate(&object(json!({ "B": "nope", "C": "ok" })))
            .unwrap_err();
        assert_eq!(err.keys(), vec!["A", "B"]);
        assert_eq!(err.violations[0].constraint, Constraint::Required);
        assert_eq!(err.violations[0].received, None);
    }

    #[test]
    fn describe_reports_defaults() {
        let rows = ConfigSchema::application().describe();
        let node_env = rows.iter().find(|row| row.key == keys::NODE_ENV).expect("row");
        assert_eq!(node_env.ty, "development|production|test|local");
        assert!(!node_env.required);
        assert_eq!(node_env.default.as_deref(), Some("development"));
    }
}
