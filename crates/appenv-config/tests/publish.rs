//! Process-wide publication of the validated config.

use appenv_config::{ConfigError, Environment, RawSnapshot, get, init, init_from};
use pretty_assertions::assert_eq;

fn production_snapshot() -> RawSnapshot {
    RawSnapshot::from_vars([
        ("NODE_ENV", "production"),
        ("FRONTEND_URL", "https://app.example.com"),
        ("DB_ENGINE", "postgres"),
        ("DB_HOST", "db.internal"),
        ("DB_PORT", "5432"),
        ("DB_USER", "app"),
        ("DB_PASSWORD", "pw"),
        ("DB_DATABASE", "app"),
        ("DB_ENTITIES", "dist/**/*.entity.js"),
        ("API_URL", "https://api.example.com"),
        ("JWT_KEY", "jwt"),
        ("API_PORT", "443"),
        ("CAPTCHA_SECRET", "captcha"),
        ("CRYPTO_SECRET", "crypto"),
        ("CRYPTO_IV", "iv"),
        ("APP_SECRET", "secret"),
        ("REDIS_HOST", "cache.internal"),
        ("REDIS_PORT", "6379"),
    ])
}

/// Failed validation publishes nothing; success publishes one shared instance.
#[test]
fn publishes_a_single_instance() {
    assert!(get().is_none());

    let err = init_from(&RawSnapshot::default()).unwrap_err();
    assert!(matches!(err, ConfigError::Environment(_)));
    assert!(get().is_none());

    let first = init_from(&production_snapshot()).expect("publish");
    assert_eq!(first.environment, Environment::Production);
    assert_eq!(first.database.database, "app");

    let again = init_from(&RawSnapshot::default()).expect("already published");
    assert!(std::ptr::eq(first, again));

    let from_env = init().expect("already published");
    assert!(std::ptr::eq(first, from_env));

    let read = get().expect("published");
    assert!(std::ptr::eq(first, read));
}
