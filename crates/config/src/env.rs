//! Environment snapshot access with per-call coercion.
//!
//! This module keeps ad hoc env access:
//! - fail-soft (absence or a failed parse yields the caller's default)
//! - explicit (every accessor takes the snapshot as an argument)
//! - pure (only `snapshot_from_std_env` touches ambient process state)
//!
//! The one fail-fast accessor is [`get_required_env`], whose error converts
//! into the shared [`ErrorEnvelope`] for process-startup failure paths.

use serde_json::Value;
use service_env_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;

/// Immutable environment snapshot: variable name to raw string value.
///
/// Supplied by the host at call time; the library never caches it.
pub type EnvMap = BTreeMap<String, String>;

/// Collect the current process environment into a snapshot.
///
/// Hosts call this once at the edge and pass the snapshot down, keeping every
/// resolver and accessor call independently testable.
#[must_use]
pub fn snapshot_from_std_env() -> EnvMap {
    std::env::vars().collect()
}

/// Read a raw variable, falling back to `default` when the name was never set.
///
/// An empty string is a present value here; only absence falls back.
#[must_use]
pub fn get_env<'a>(env: &'a EnvMap, key: &str, default: &'a str) -> &'a str {
    env.get(key).map_or(default, String::as_str)
}

/// Read a variable that must be present and non-empty.
pub fn get_required_env(env: &EnvMap, key: &str) -> Result<String, MissingVarError> {
    match env.get(key) {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(MissingVarError { var: key.into() }),
    }
}

/// Read a float variable.
///
/// Absence, a failed parse, or a non-finite result (`NaN`, `±inf`) all fall
/// back to `default`.
#[must_use]
pub fn get_env_number(env: &EnvMap, key: &str, default: f64) -> f64 {
    env.get(key)
        .and_then(|raw| float_value(raw))
        .unwrap_or(default)
}

/// Read a boolean variable.
///
/// True iff the lower-cased value equals `"true"` or equals `"1"`. Any other
/// present value (including `"false"`, `"0"`, `"yes"`) yields false; absence
/// yields `default`.
#[must_use]
pub fn get_env_boolean(env: &EnvMap, key: &str, default: bool) -> bool {
    env.get(key).map_or(default, |raw| bool_value(raw))
}

/// Read a variable holding a JSON document.
///
/// Absence or a parse failure yields `default`; the failure is swallowed, not
/// surfaced.
#[must_use]
pub fn get_env_json(env: &EnvMap, key: &str, default: Value) -> Value {
    env.get(key)
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or(default)
}

/// Float coercion shared by the accessors, the resolver, and price parsing.
pub(crate) fn float_value(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Boolean coercion shared by the accessors, the resolver, and feature flags.
pub(crate) fn bool_value(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "true" | "1")
}

/// A required variable was absent or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingVarError {
    /// Environment variable name.
    pub var: Box<str>,
}

impl fmt::Display for MissingVarError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "missing required environment variable {}",
            self.var
        )
    }
}

impl std::error::Error for MissingVarError {}

impl From<MissingVarError> for ErrorEnvelope {
    fn from(error: MissingVarError) -> Self {
        let message = error.to_string();
        Self::expected(ErrorCode::new("config", "required_env_missing"), message)
            .with_metadata("env_var", error.var)
    }
}
