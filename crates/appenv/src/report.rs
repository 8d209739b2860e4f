//! Human and machine readable output for the validation result.

use appenv_config::{AppConfig, ConfigSchema, EnvironmentError};
use clap::ValueEnum;
use std::fmt::Write;

/// Output format for the `check` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render the redacted config summary.
pub fn render_summary(config: &AppConfig, format: OutputFormat) -> anyhow::Result<String> {
    let summary = config.summary();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "environment: {}", config.environment)?;
            writeln!(out, "ssl: {}", config.ssl)?;
            writeln!(out, "frontend_url: {}", config.frontend_url)?;
            for section in ["database", "api", "cache", "secrets"] {
                let Some(fields) = summary.get(section).and_then(|value| value.as_object()) else {
                    continue;
                };
                writeln!(out, "{section}:")?;
                for (key, value) in fields {
                    match value.as_str() {
                        Some(text) => writeln!(out, "  {key}: {text}")?,
                        None => writeln!(out, "  {key}: {value}")?,
                    }
                }
            }
            Ok(out)
        }
    }
}

/// Render every violation, one per line, for stderr.
pub fn render_violations(err: &EnvironmentError, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(format!("{err}\n")),
        OutputFormat::Json => {
            let violations: Vec<serde_json::Value> = err
                .violations
                .iter()
                .map(|violation| {
                    serde_json::json!({
                        "key": violation.key,
                        "constraint": violation.constraint.to_string(),
                        "received": violation.received,
                    })
                })
                .collect();
            Ok(serde_json::to_string_pretty(
                &serde_json::json!({ "violations": violations }),
            )?)
        }
    }
}

/// Render the recognised variables as an aligned table.
pub fn render_schema(schema: &ConfigSchema) -> String {
    let rows = schema.describe();
    let key_width = rows
        .iter()
        .map(|row| row.key.len())
        .max()
        .unwrap_or(0)
        .max("KEY".len());
    let ty_width = rows
        .iter()
        .map(|row| row.ty.len())
        .max()
        .unwrap_or(0)
        .max("TYPE".len());

    let mut out = format!("{:key_width$}  {:ty_width$}  DEFAULT\n", "KEY", "TYPE");
    for row in rows {
        let default = match (&row.default, row.required) {
            (Some(default), _) => default.clone(),
            (None, true) => "(required)".to_string(),
            (None, false) => "-".to_string(),
        };
        out.push_str(&format!(
            "{:key_width$}  {:ty_width$}  {default}\n",
            row.key, row.ty
        ));
    }
    out
}
