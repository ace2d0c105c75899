//! Accumulate-and-report companion to schema resolution.
//!
//! Unlike [`crate::resolve::resolve_config`], validation never fails and
//! never stops early: every finding across all keys lands in one report,
//! with hard errors separated from soft warnings. Transforms are not
//! evaluated during the dry run.

use crate::env::{EnvMap, float_value};
use crate::resolve::ResolveError;
use crate::schema::{ConfigSchema, VarType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a dry-run validation pass over a schema.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// True when no errors were recorded.
    pub valid: bool,
    /// Hard failures that would abort resolution.
    pub errors: Vec<String>,
    /// Soft findings: optional keys left unset with no default.
    pub warnings: Vec<String>,
}

/// Check every schema key against the snapshot without stopping early.
///
/// Missing required keys are reported as errors regardless of the schema's
/// `strict` flag; strict only governs whether resolution aborts.
#[must_use]
pub fn validate_config(schema: &ConfigSchema, env: &EnvMap) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for (key, rule) in &schema.entries {
        let actual = schema.actual_name(key);
        let raw = env
            .get(&actual)
            .map(String::as_str)
            .filter(|value| !value.is_empty());

        let Some(raw) = raw else {
            if rule.required {
                errors.push(
                    ResolveError::RequiredMissing {
                        var: actual.into(),
                    }
                    .to_string(),
                );
            } else if rule.default.is_none() {
                warnings.push(format!(
                    "optional environment variable {actual} is not set and has no default"
                ));
            }
            continue;
        };

        if let Some(validator) = &rule.validator {
            if !validator(raw) {
                // Mirror the resolver's per-key order: a rejected value is
                // never coerced, so coercion findings are not stacked on top.
                errors.push(
                    ResolveError::ValidatorRejected {
                        var: actual.into(),
                        value: raw.to_string(),
                    }
                    .to_string(),
                );
                continue;
            }
        }

        if rule.transform.is_some() {
            continue;
        }

        match rule.var_type {
            VarType::Number if float_value(raw).is_none() => {
                errors.push(
                    ResolveError::InvalidNumber {
                        var: actual.into(),
                        value: raw.to_string(),
                    }
                    .to_string(),
                );
            },
            VarType::Json if serde_json::from_str::<Value>(raw).is_err() => {
                errors.push(
                    ResolveError::InvalidJson {
                        var: actual.into(),
                        value: raw.to_string(),
                    }
                    .to_string(),
                );
            },
            _ => {},
        }
    }

    tracing::debug!(
        errors = errors.len(),
        warnings = warnings.len(),
        "validated configuration schema"
    );

    let valid = errors.is_empty();
    ValidationReport {
        valid,
        errors,
        warnings,
    }
}
