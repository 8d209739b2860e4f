//! Environment variable names recognised by the application.

/// Env var: origin URL of the browser frontend.
pub const FRONTEND_URL: &str = "FRONTEND_URL";
/// Env var: database engine identifier.
pub const DB_ENGINE: &str = "DB_ENGINE";
/// Env var: database host.
pub const DB_HOST: &str = "DB_HOST";
/// Env var: database port.
pub const DB_PORT: &str = "DB_PORT";
/// Env var: database user.
pub const DB_USER: &str = "DB_USER";
/// Env var: database password (secret).
pub const DB_PASSWORD: &str = "DB_PASSWORD";
/// Env var: database name.
pub const DB_DATABASE: &str = "DB_DATABASE";
/// Env var: entity discovery glob.
pub const DB_ENTITIES: &str = "DB_ENTITIES";
/// Derived: schema auto-synchronisation flag.
pub const DB_SYNCHRONIZE: &str = "DB_SYNCHRONIZE";
/// Derived: query logging flag.
pub const DB_LOGGING: &str = "DB_LOGGING";
/// Env var: public API base URL.
pub const API_URL: &str = "API_URL";
/// Env var: token signing key (secret).
pub const JWT_KEY: &str = "JWT_KEY";
/// Env var: HTTP server port.
pub const API_PORT: &str = "API_PORT";
/// Env var: active environment name.
pub const NODE_ENV: &str = "NODE_ENV";
/// Derived: TLS enforcement flag.
pub const SSL: &str = "SSL";
/// Env var: CAPTCHA verification secret.
pub const CAPTCHA_SECRET: &str = "CAPTCHA_SECRET";
/// Env var: symmetric encryption secret.
pub const CRYPTO_SECRET: &str = "CRYPTO_SECRET";
/// Env var: symmetric encryption initialization vector.
pub const CRYPTO_IV: &str = "CRYPTO_IV";
/// Env var: application secret.
pub const APP_SECRET: &str = "APP_SECRET";
/// Env var: cache host.
pub const REDIS_HOST: &str = "REDIS_HOST";
/// Env var: cache port.
pub const REDIS_PORT: &str = "REDIS_PORT";

/// Variables read from the process environment.
pub const INPUTS: [&str; 18] = [
    FRONTEND_URL,
    DB_ENGINE,
    DB_HOST,
    DB_PORT,
    DB_USER,
    DB_PASSWORD,
    DB_DATABASE,
    DB_ENTITIES,
    API_URL,
    JWT_KEY,
    API_PORT,
    NODE_ENV,
    CAPTCHA_SECRET,
    CRYPTO_SECRET,
    CRYPTO_IV,
    APP_SECRET,
    REDIS_HOST,
    REDIS_PORT,
];

/// Variables whose raw value is parsed as an integer before validation.
pub const PORTS: [&str; 3] = [DB_PORT, API_PORT, REDIS_PORT];

/// Keys computed from the active environment rather than read directly.
pub const DERIVED: [&str; 3] = [DB_SYNCHRONIZE, DB_LOGGING, SSL];
