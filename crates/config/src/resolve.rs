//! Fail-fast schema resolution against an environment snapshot.
//!
//! Resolution walks the schema in declared order and aborts on the first
//! problem: schema-declared types are contractual, unlike the fail-soft
//! accessors in [`crate::env`]. Missing optional values fall back to the
//! rule default verbatim, or to the explicit absent marker.

use crate::env::{EnvMap, bool_value, float_value};
use crate::schema::{ConfigSchema, VarRule, VarType};
use serde_json::Value;
use service_env_shared::{ErrorCode, ErrorEnvelope, redact_if_secret};
use std::collections::BTreeMap;
use std::fmt;

/// Typed values resolved from a schema, one entry per logical key.
///
/// An entry holding `None` is the explicit absent marker: the key was
/// declared, left unset, and had no default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedConfig {
    values: BTreeMap<Box<str>, Option<Value>>,
}

impl ResolvedConfig {
    /// Resolved value for a logical key; `None` when unset or undeclared.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).and_then(Option::as_ref)
    }

    /// True when the key resolved to a value (coerced, transformed, or default).
    #[must_use]
    pub fn is_set(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(Some(_)))
    }

    /// True when the logical key was declared by the schema.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of declared keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the schema declared no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate logical keys with their resolved values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_ref(), value.as_ref()))
    }
}

/// Resolution failures; the first one encountered aborts the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A required variable was absent or empty under a strict schema.
    RequiredMissing {
        /// Actual environment variable name.
        var: Box<str>,
    },
    /// The rule's validator rejected the raw value.
    ValidatorRejected {
        /// Actual environment variable name.
        var: Box<str>,
        /// Raw input value.
        value: String,
    },
    /// A number-typed variable did not parse to a finite float.
    InvalidNumber {
        /// Actual environment variable name.
        var: Box<str>,
        /// Raw input value.
        value: String,
    },
    /// A json-typed variable did not parse as a JSON document.
    InvalidJson {
        /// Actual environment variable name.
        var: Box<str>,
        /// Raw input value.
        value: String,
    },
}

impl ResolveError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::RequiredMissing { .. } => ErrorCode::new("config", "required_env_missing"),
            Self::ValidatorRejected { .. } => ErrorCode::new("config", "env_validator_rejected"),
            Self::InvalidNumber { .. } => ErrorCode::new("config", "invalid_env_number"),
            Self::InvalidJson { .. } => ErrorCode::new("config", "invalid_env_json"),
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequiredMissing { var } => {
                write!(formatter, "missing required environment variable {var}")
            },
            Self::ValidatorRejected { var, .. } => write!(formatter, "{var} has an invalid value"),
            Self::InvalidNumber { var, .. } => write!(formatter, "{var} must be a number"),
            Self::InvalidJson { var, .. } => write!(formatter, "{var} must be valid JSON"),
        }
    }
}

impl std::error::Error for ResolveError {}

impl From<ResolveError> for ErrorEnvelope {
    fn from(error: ResolveError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ResolveError::RequiredMissing { var } => envelope.with_metadata("env_var", var),
            ResolveError::ValidatorRejected { var, value }
            | ResolveError::InvalidNumber { var, value }
            | ResolveError::InvalidJson { var, value } => {
                let redacted = redact_if_secret(&var, &value);
                envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", redacted)
            },
        }
    }
}

/// Resolve every schema key against the snapshot, failing on the first error.
///
/// There is no partial result: a failing key aborts resolution entirely.
pub fn resolve_config(
    schema: &ConfigSchema,
    env: &EnvMap,
) -> Result<ResolvedConfig, ResolveError> {
    let mut values = BTreeMap::new();

    for (key, rule) in &schema.entries {
        let actual = schema.actual_name(key);
        let raw = env.get(&actual);
        let resolved = resolve_entry(rule, &actual, raw.map(String::as_str), schema.strict)?;
        values.insert(key.clone(), resolved);
    }

    Ok(ResolvedConfig { values })
}

fn resolve_entry(
    rule: &VarRule,
    var: &str,
    raw: Option<&str>,
    strict: bool,
) -> Result<Option<Value>, ResolveError> {
    // An empty string counts as unset, same as `get_required_env`.
    let Some(raw) = raw.filter(|value| !value.is_empty()) else {
        if rule.required && strict {
            return Err(ResolveError::RequiredMissing { var: var.into() });
        }
        if rule.default.is_some() {
            tracing::debug!(var, "substituting schema default for unset variable");
        }
        return Ok(rule.default.clone());
    };

    if let Some(validator) = &rule.validator {
        if !validator(raw) {
            return Err(ResolveError::ValidatorRejected {
                var: var.into(),
                value: raw.to_string(),
            });
        }
    }

    if let Some(transform) = &rule.transform {
        return Ok(Some(transform(raw)));
    }

    coerce(rule.var_type, var, raw).map(Some)
}

fn coerce(var_type: VarType, var: &str, raw: &str) -> Result<Value, ResolveError> {
    match var_type {
        VarType::String => Ok(Value::String(raw.to_string())),
        VarType::Number => float_value(raw)
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| ResolveError::InvalidNumber {
                var: var.into(),
                value: raw.to_string(),
            }),
        VarType::Boolean => Ok(Value::Bool(bool_value(raw))),
        VarType::Json => {
            serde_json::from_str(raw).map_err(|_| ResolveError::InvalidJson {
                var: var.into(),
                value: raw.to_string(),
            })
        },
    }
}
