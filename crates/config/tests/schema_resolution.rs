//! Integration tests for schema resolution and dry-run validation.

use serde_json::{Value, json};
use service_env_config::{
    ConfigSchema, EnvMap, ResolveError, VarRule, resolve_config, validate_config,
};
use service_env_shared::{ErrorCode, ErrorEnvelope};

fn snapshot(pairs: &[(&str, &str)]) -> EnvMap {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

fn billing_schema() -> ConfigSchema {
    ConfigSchema::new()
        .prefix("BILLING")
        .define("DATABASE_URL", VarRule::string().required())
        .define("PORT", VarRule::number().default_value(8080))
        .define("DEBUG", VarRule::boolean().default_value(false))
        .define("RATE_LIMITS", VarRule::json().default_value(json!({"rps": 25})))
        .define(
            "REGION",
            VarRule::string()
                .default_value("eu")
                .validator(|raw| raw == "eu" || raw == "us"),
        )
        .define(
            "ALLOWED_ORIGINS",
            VarRule::string().transform(|raw| {
                Value::Array(raw.split(',').map(|origin| json!(origin.trim())).collect())
            }),
        )
}

#[test]
fn full_schema_resolves_against_a_populated_environment() -> Result<(), ResolveError> {
    let env = snapshot(&[
        ("BILLING_DATABASE_URL", "postgres://db.internal/billing"),
        ("BILLING_PORT", "9443"),
        ("BILLING_DEBUG", "1"),
        ("BILLING_REGION", "us"),
        ("BILLING_ALLOWED_ORIGINS", "a.example.com, b.example.com"),
    ]);

    let config = resolve_config(&billing_schema(), &env)?;

    assert_eq!(
        config.get("DATABASE_URL"),
        Some(&json!("postgres://db.internal/billing"))
    );
    assert_eq!(config.get("PORT"), Some(&json!(9443.0)));
    assert_eq!(config.get("DEBUG"), Some(&json!(true)));
    assert_eq!(config.get("RATE_LIMITS"), Some(&json!({"rps": 25})));
    assert_eq!(config.get("REGION"), Some(&json!("us")));
    assert_eq!(
        config.get("ALLOWED_ORIGINS"),
        Some(&json!(["a.example.com", "b.example.com"]))
    );
    Ok(())
}

#[test]
fn defaults_cover_a_minimal_environment() -> Result<(), ResolveError> {
    let env = snapshot(&[("BILLING_DATABASE_URL", "postgres://db.internal/billing")]);

    let config = resolve_config(&billing_schema(), &env)?;

    assert_eq!(config.get("PORT"), Some(&json!(8080)));
    assert_eq!(config.get("DEBUG"), Some(&json!(false)));
    assert_eq!(config.get("REGION"), Some(&json!("eu")));
    // Optional, no default, unset: declared but explicitly absent.
    assert!(config.contains_key("ALLOWED_ORIGINS"));
    assert!(!config.is_set("ALLOWED_ORIGINS"));
    Ok(())
}

#[test]
fn first_failure_wins_and_maps_to_an_envelope() {
    // DATABASE_URL missing and PORT unparsable: resolution must surface the
    // missing required variable because it is declared first.
    let env = snapshot(&[("BILLING_PORT", "not-a-port")]);

    let Some(error) = resolve_config(&billing_schema(), &env).err() else {
        return;
    };
    assert!(matches!(
        error,
        ResolveError::RequiredMissing { ref var } if var.as_ref() == "BILLING_DATABASE_URL"
    ));

    let envelope: ErrorEnvelope = error.into();
    assert_eq!(
        envelope.code,
        ErrorCode::new("config", "required_env_missing")
    );
    assert_eq!(
        envelope.metadata.get("env_var").map(String::as_str),
        Some("BILLING_DATABASE_URL")
    );
}

#[test]
fn dry_run_reports_everything_the_resolver_would_hit() {
    let env = snapshot(&[
        ("BILLING_PORT", "not-a-port"),
        ("BILLING_REGION", "mars"),
    ]);

    let report = validate_config(&billing_schema(), &env);

    assert!(!report.valid);
    assert_eq!(report.errors.len(), 3);
    assert!(
        report
            .errors
            .iter()
            .any(|error| error.contains("BILLING_DATABASE_URL"))
    );
    assert!(report.errors.iter().any(|error| error.contains("BILLING_PORT")));
    assert!(
        report
            .errors
            .iter()
            .any(|error| error.contains("BILLING_REGION"))
    );
    // ALLOWED_ORIGINS is optional with no default and unset.
    assert_eq!(report.warnings.len(), 1);
    assert!(
        report
            .warnings
            .iter()
            .any(|warning| warning.contains("BILLING_ALLOWED_ORIGINS"))
    );
}

#[test]
fn dry_run_agrees_with_resolution_on_a_clean_environment() {
    let env = snapshot(&[
        ("BILLING_DATABASE_URL", "postgres://db.internal/billing"),
        ("BILLING_ALLOWED_ORIGINS", "a.example.com"),
    ]);

    let report = validate_config(&billing_schema(), &env);
    assert!(report.valid, "unexpected findings: {:?}", report.errors);
    assert!(report.warnings.is_empty());
    assert!(resolve_config(&billing_schema(), &env).is_ok());
}
