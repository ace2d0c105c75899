//! # service-env-config
//!
//! Typed environment-variable access and configuration assembly for backend
//! services. This crate depends on `shared` only.
//!
//! Every function is a pure, synchronous read of a caller-supplied
//! environment snapshot followed by coercion and optional validation. Three
//! error policies coexist:
//!
//! - fail-fast: [`get_required_env`] and [`resolve_config`]
//! - fail-soft: the remaining `get_env*` accessors and [`parse_price`]
//! - accumulate: [`validate_config`]

/// Environment snapshot accessors with per-call coercion.
pub mod env;
/// Feature-flag assembly.
pub mod flags;
/// Price tables and route-to-price mappings.
pub mod pricing;
/// Fail-fast schema resolution.
pub mod resolve;
/// Schema types and rule builders.
pub mod schema;
/// Service descriptor normalization.
pub mod service;
/// Accumulate-and-report schema validation.
pub mod validate;

pub use env::{
    EnvMap, MissingVarError, get_env, get_env_boolean, get_env_json, get_env_number,
    get_required_env, snapshot_from_std_env,
};
pub use flags::{FeatureFlag, create_feature_flags, is_feature_enabled};
pub use pricing::{
    PriceVar, Route, RoutePrice, create_price_config, create_route_mapping, get_route_price,
    parse_price,
};
pub use resolve::{ResolveError, ResolvedConfig, resolve_config};
pub use schema::{ConfigSchema, Transform, Validator, VarRule, VarType};
pub use service::ServiceInfo;
pub use validate::{ValidationReport, validate_config};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
