//! Feature-flag assembly from boolean environment variables.

use crate::env::{EnvMap, get_env_boolean};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declares one feature flag backed by an environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlag {
    /// Flag name used by lookups.
    pub name: Box<str>,
    /// Backing environment variable name.
    pub var: Box<str>,
    /// Value used when the variable is unset.
    pub default: bool,
}

impl FeatureFlag {
    /// Declare a flag with its backing variable and default.
    #[must_use]
    pub fn new(name: impl Into<Box<str>>, var: impl Into<Box<str>>, default: bool) -> Self {
        Self {
            name: name.into(),
            var: var.into(),
            default,
        }
    }
}

/// Resolve each declared flag via the shared boolean rule.
///
/// A present value enables the flag iff it lower-cases to `"true"` or equals
/// `"1"`; absence falls back to the flag's default.
#[must_use]
pub fn create_feature_flags(flags: &[FeatureFlag], env: &EnvMap) -> BTreeMap<Box<str>, bool> {
    flags
        .iter()
        .map(|flag| (flag.name.clone(), get_env_boolean(env, &flag.var, flag.default)))
        .collect()
}

/// Flag value by name; unknown names are disabled.
#[must_use]
pub fn is_feature_enabled(flags: &BTreeMap<Box<str>, bool>, name: &str) -> bool {
    flags.get(name).copied().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pairs: &[(&str, &str)]) -> EnvMap {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn flags_resolve_with_boolean_rule_and_defaults() {
        let flags = [
            FeatureFlag::new("batching", "FEATURE_BATCHING", false),
            FeatureFlag::new("tracing", "FEATURE_TRACING", true),
            FeatureFlag::new("beta", "FEATURE_BETA", false),
        ];
        let env = snapshot(&[("FEATURE_BATCHING", "1"), ("FEATURE_BETA", "yes")]);

        let resolved = create_feature_flags(&flags, &env);

        assert!(is_feature_enabled(&resolved, "batching"));
        assert!(is_feature_enabled(&resolved, "tracing"));
        // "yes" is a present value that does not match the boolean rule.
        assert!(!is_feature_enabled(&resolved, "beta"));
    }

    #[test]
    fn unknown_flag_is_disabled() {
        let resolved = create_feature_flags(&[], &snapshot(&[]));
        assert!(!is_feature_enabled(&resolved, "unknown"));
    }
}
