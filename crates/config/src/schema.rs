//! Declarative schema for env-backed configuration.
//!
//! A [`ConfigSchema`] maps logical keys to per-variable rules. Rules are
//! built fluently and may carry caller-supplied strategies (validator,
//! transform) evaluated uniformly by the resolver.

use serde_json::Value;
use std::fmt;

/// Coercion applied to a raw variable when no transform is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VarType {
    /// Keep the raw string unchanged.
    #[default]
    String,
    /// Float parse; failures are fatal during resolution.
    Number,
    /// True iff the lower-cased raw value is `"true"` or `"1"`.
    Boolean,
    /// Parse as a general JSON document; failures are fatal during resolution.
    Json,
}

/// Validation predicate over the raw string value.
pub type Validator = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Raw-string transform; takes precedence over [`VarType`] coercion.
pub type Transform = Box<dyn Fn(&str) -> Value + Send + Sync>;

/// Resolution rule for one logical configuration key.
pub struct VarRule {
    pub(crate) required: bool,
    pub(crate) default: Option<Value>,
    pub(crate) var_type: VarType,
    pub(crate) validator: Option<Validator>,
    pub(crate) transform: Option<Transform>,
}

impl VarRule {
    /// Rule with the given coercion type; optional, with no default.
    #[must_use]
    pub const fn new(var_type: VarType) -> Self {
        Self {
            required: false,
            default: None,
            var_type,
            validator: None,
            transform: None,
        }
    }

    /// String-typed rule.
    #[must_use]
    pub const fn string() -> Self {
        Self::new(VarType::String)
    }

    /// Number-typed rule.
    #[must_use]
    pub const fn number() -> Self {
        Self::new(VarType::Number)
    }

    /// Boolean-typed rule.
    #[must_use]
    pub const fn boolean() -> Self {
        Self::new(VarType::Boolean)
    }

    /// JSON-typed rule.
    #[must_use]
    pub const fn json() -> Self {
        Self::new(VarType::Json)
    }

    /// Mark the variable as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Default used verbatim (no coercion applied) when the variable is unset.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Predicate evaluated on the raw string before any coercion.
    #[must_use]
    pub fn validator(
        mut self,
        validator: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Transform replacing type coercion entirely for this key.
    #[must_use]
    pub fn transform(
        mut self,
        transform: impl Fn(&str) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }
}

impl Default for VarRule {
    fn default() -> Self {
        Self::string()
    }
}

impl fmt::Debug for VarRule {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("VarRule")
            .field("required", &self.required)
            .field("default", &self.default)
            .field("var_type", &self.var_type)
            .field("validator", &self.validator.is_some())
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// Ordered mapping from logical keys to per-variable rules.
///
/// Declared order is preserved: the resolver traverses entries in the order
/// they were defined, so the first failing key is deterministic.
#[derive(Debug)]
pub struct ConfigSchema {
    pub(crate) prefix: Option<Box<str>>,
    pub(crate) strict: bool,
    pub(crate) entries: Vec<(Box<str>, VarRule)>,
}

impl ConfigSchema {
    /// Empty schema; strict by default.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prefix: None,
            strict: true,
            entries: Vec::new(),
        }
    }

    /// Prefix joined with `_` to every logical key to form the actual name.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<Box<str>>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Control whether a missing required variable aborts resolution.
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Append a logical key with its rule; declared order is preserved.
    #[must_use]
    pub fn define(mut self, key: impl Into<Box<str>>, rule: VarRule) -> Self {
        self.entries.push((key.into(), rule));
        self
    }

    /// Actual environment name looked up for a logical key.
    #[must_use]
    pub fn actual_name(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}_{key}"),
            None => key.to_string(),
        }
    }

    /// Logical keys in declared order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_ref())
    }

    /// Number of declared keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no keys are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self::new()
    }
}
