//! Typed application configuration produced from a validated environment.

use crate::error::REDACTED;
use serde::Deserialize;
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

/// Deployment environment the process runs in (`NODE_ENV`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
    Local,
}

impl Environment {
    /// All recognised environments, in declaration order.
    pub const ALL: [Environment; 4] = [
        Environment::Development,
        Environment::Production,
        Environment::Test,
        Environment::Local,
    ];

    /// Names accepted for `NODE_ENV`.
    pub const NAMES: &'static [&'static str] = &["development", "production", "test", "local"];

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
            Environment::Local => "local",
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str() == value)
            .ok_or_else(|| format!("unknown environment: {value}"))
    }
}

/// String value that must not appear in logs or debug output.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the underlying secret value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// Validated configuration shared by every component for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Origin of the browser frontend.
    #[serde(rename = "FRONTEND_URL")]
    pub frontend_url: String,
    /// Active deployment environment.
    #[serde(rename = "NODE_ENV")]
    pub environment: Environment,
    /// Whether TLS is enforced.
    #[serde(rename = "SSL")]
    pub ssl: bool,
    #[serde(flatten)]
    pub database: DatabaseConfig,
    #[serde(flatten)]
    pub api: ApiConfig,
    #[serde(flatten)]
    pub cache: CacheConfig,
    #[serde(flatten)]
    pub secrets: SecretsConfig,
}

/// Connection parameters for the relational database client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    #[serde(rename = "DB_ENGINE")]
    pub engine: String,
    #[serde(rename = "DB_HOST")]
    pub host: String,
    #[serde(rename = "DB_PORT")]
    pub port: u16,
    #[serde(rename = "DB_USER")]
    pub user: String,
    #[serde(rename = "DB_PASSWORD")]
    pub password: Secret,
    /// Database name, suffixed with the environment outside production.
    #[serde(rename = "DB_DATABASE")]
    pub database: String,
    /// Glob locating entity definitions.
    #[serde(rename = "DB_ENTITIES")]
    pub entities: String,
    /// Auto-synchronise the schema on connect.
    #[serde(rename = "DB_SYNCHRONIZE")]
    pub synchronize: bool,
    /// Log executed queries.
    #[serde(rename = "DB_LOGGING")]
    pub logging: bool,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    #[serde(rename = "API_URL")]
    pub url: String,
    #[serde(rename = "API_PORT")]
    pub port: u16,
    /// Key used to sign access tokens.
    #[serde(rename = "JWT_KEY")]
    pub jwt_key: Secret,
}

/// Cache (redis) connection parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    #[serde(rename = "REDIS_HOST")]
    pub host: String,
    #[serde(rename = "REDIS_PORT")]
    pub port: u16,
}

/// Secrets consumed by the cryptography and verification utilities.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SecretsConfig {
    #[serde(rename = "CAPTCHA_SECRET")]
    pub captcha_secret: Secret,
    #[serde(rename = "CRYPTO_SECRET")]
    pub crypto_secret: Secret,
    /// Initialization vector for symmetric encryption.
    #[serde(rename = "CRYPTO_IV")]
    pub crypto_iv: Secret,
    #[serde(rename = "APP_SECRET")]
    pub app_secret: Secret,
}

impl AppConfig {
    /// Operator-facing view of the config with secrets redacted.
    pub fn summary(&self) -> Value {
        json!({
            "environment": self.environment.as_str(),
            "ssl": self.ssl,
            "frontend_url": self.frontend_url,
            "database": {
                "engine": self.database.engine,
                "host": self.database.host,
                "port": self.database.port,
                "user": self.database.user,
                "password": REDACTED,
                "database": self.database.database,
                "entities": self.database.entities,
                "synchronize": self.database.synchronize,
                "logging": self.database.logging,
            },
            "api": {
                "url": self.api.url,
                "port": self.api.port,
                "jwt_key": REDACTED,
            },
            "cache": {
                "host": self.cache.host,
                "port": self.cache.port,
            },
            "secrets": {
                "captcha_secret": REDACTED,
                "crypto_secret": REDACTED,
                "crypto_iv": REDACTED,
                "app_secret": REDACTED,
            },
        })
    }
}
