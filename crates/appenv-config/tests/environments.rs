//! Derivation rules observed through the public API.

use appenv_config::{
    AppConfig, ConfigSchema, Environment, RawSnapshot, database_name, derive_defaults, keys,
    resolve_environment,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn vars(env: Option<&'static str>) -> Vec<(&'static str, &'static str)> {
    let mut vars = vec![
        ("FRONTEND_URL", "http://localhost:5173"),
        ("DB_ENGINE", "mysql"),
        ("DB_HOST", "127.0.0.1"),
        ("DB_PORT", "3306"),
        ("DB_USER", "root"),
        ("DB_PASSWORD", "root"),
        ("DB_DATABASE", "shop"),
        ("DB_ENTITIES", "dist/**/*.entity.js"),
        ("API_URL", "http://localhost:3000"),
        ("JWT_KEY", "k"),
        ("API_PORT", "3000"),
        ("CAPTCHA_SECRET", "c"),
        ("CRYPTO_SECRET", "s"),
        ("CRYPTO_IV", "v"),
        ("APP_SECRET", "a"),
        ("REDIS_HOST", "127.0.0.1"),
        ("REDIS_PORT", "6379"),
    ];
    if let Some(env) = env {
        vars.push(("NODE_ENV", env));
    }
    vars
}

#[test]
fn every_environment_validates() {
    for env in Environment::ALL {
        let snapshot = RawSnapshot::from_vars(vars(Some(env.as_str())));
        let config = AppConfig::from_snapshot(&snapshot).expect("config");
        assert_eq!(config.environment, env);
        assert_eq!(config.ssl, env.is_production());
        assert_eq!(config.database.synchronize, env == Environment::Development);
        assert_eq!(config.database.logging, env != Environment::Test);
        assert_eq!(
            config.database.database,
            database_name("shop", env.as_str())
        );
    }
}

#[test]
fn absent_environment_matches_explicit_development() {
    let implicit = AppConfig::from_snapshot(&RawSnapshot::from_vars(vars(None))).expect("config");
    let explicit =
        AppConfig::from_snapshot(&RawSnapshot::from_vars(vars(Some("development")))).expect("config");
    assert_eq!(implicit, explicit);
    assert_eq!(implicit.database.database, "shop_development");
}

/// Derivation and validation compose as separate stages.
#[test]
fn stages_compose() {
    let snapshot = RawSnapshot::from_vars(vars(Some("local")));
    let active = resolve_environment(&snapshot);
    let derived = derive_defaults(&snapshot, active);
    assert_eq!(derived[keys::DB_DATABASE], json!("shop_local"));
    assert_eq!(derived[keys::DB_PORT], json!(3306));

    let validated = ConfigSchema::application().validate(&derived).expect("valid");
    assert_eq!(validated[keys::NODE_ENV], json!("local"));
    assert_eq!(validated[keys::SSL], json!(false));
}

#[test]
fn environment_names_round_trip() {
    for env in Environment::ALL {
        assert_eq!(env.as_str().parse::<Environment>(), Ok(env));
        assert_eq!(env.to_string(), env.as_str());
    }
    assert!("staging".parse::<Environment>().is_err());
    assert_eq!(Environment::default(), Environment::Development);
}
