//! Error types for environment loading and validation.

use std::fmt;
use thiserror::Error;

/// Placeholder shown instead of values held by secret fields.
pub const REDACTED: &str = "[REDACTED]";

/// Errors returned while building the application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more environment variables failed validation.
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
    /// The validated snapshot could not be decoded into the typed model.
    #[error("failed to decode validated config: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ConfigError {
    /// Violations carried by an environment error, empty for other kinds.
    pub fn violations(&self) -> &[Violation] {
        match self {
            ConfigError::Environment(err) => &err.violations,
            ConfigError::Decode(_) => &[],
        }
    }
}

/// Every constraint violated by one validation pass over the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentError {
    pub violations: Vec<Violation>,
}

impl EnvironmentError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Whether any violation names the given key.
    pub fn mentions(&self, key: &str) -> bool {
        self.violations.iter().any(|violation| violation.key == key)
    }

    /// Keys with at least one violation, in the order they were reported.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for violation in &self.violations {
            if !keys.contains(&violation.key.as_str()) {
                keys.push(&violation.key);
            }
        }
        keys
    }
}

impl fmt::Display for EnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.keys().len();
        let noun = if count == 1 { "variable" } else { "variables" };
        write!(f, "invalid environment configuration ({count} {noun})")?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EnvironmentError {}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Environment variable name.
    pub key: String,
    /// The constraint that was not satisfied.
    pub constraint: Constraint,
    /// Rejected raw value; `None` when the variable was absent.
    pub received: Option<String>,
}

impl Violation {
    pub fn new(key: impl Into<String>, constraint: Constraint, received: Option<String>) -> Self {
        Self {
            key: key.into(),
            constraint,
            received,
        }
    }

    /// Replace the received value with the redaction marker.
    pub(crate) fn redacted(mut self) -> Self {
        if self.received.is_some() {
            self.received = Some(REDACTED.to_string());
        }
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.constraint)?;
        if let Some(received) = &self.received {
            write!(f, " (received {received:?})")?;
        }
        Ok(())
    }
}

/// Constraint kinds a field can violate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// The variable is mandatory and was not set.
    Required,
    ExpectedString,
    ExpectedInteger,
    ExpectedBoolean,
    /// String shorter than the minimum length.
    TooShort { min: usize },
    /// String longer than the maximum length.
    TooLong { max: usize },
    /// Integer outside the inclusive range.
    OutOfRange { min: i64, max: i64 },
    /// Value not in the enumeration.
    NotAllowed { allowed: Vec<String> },
    /// The raw value was not valid unicode.
    InvalidUnicode,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Required => f.write_str("missing required variable"),
            Constraint::ExpectedString => f.write_str("expected string"),
            Constraint::ExpectedInteger => f.write_str("expected integer"),
            Constraint::ExpectedBoolean => f.write_str("expected bool"),
            Constraint::TooShort { min } if *min == 1 => f.write_str("must not be empty"),
            Constraint::TooShort { min } => write!(f, "must be at least {min} characters"),
            Constraint::TooLong { max } => write!(f, "must be at most {max} characters"),
            Constraint::OutOfRange { min, max } => write!(f, "must be between {min} and {max}"),
            Constraint::NotAllowed { allowed } => {
                write!(f, "must be one of: {}", allowed.join(", "))
            }
            Constraint::InvalidUnicode => f.write_str("value is not valid unicode"),
        }
    }
}
