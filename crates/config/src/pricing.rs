//! Price table and route-to-price assembly helpers.
//!
//! Prices are plain floats resolved fail-soft from the snapshot; there is no
//! rounding and no currency validation.

use crate::env::{EnvMap, float_value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Float-parse an optional raw price, falling back on absence or failure.
#[must_use]
pub fn parse_price(raw: Option<&str>, fallback: f64) -> f64 {
    raw.and_then(float_value).unwrap_or(fallback)
}

/// Declares one logical price key backed by an environment variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceVar {
    /// Logical price key.
    pub key: Box<str>,
    /// Backing environment variable name.
    pub var: Box<str>,
    /// Price used when the variable is unset or unparsable.
    pub default: f64,
}

impl PriceVar {
    /// Declare a price key with its backing variable and default.
    #[must_use]
    pub fn new(key: impl Into<Box<str>>, var: impl Into<Box<str>>, default: f64) -> Self {
        Self {
            key: key.into(),
            var: var.into(),
            default,
        }
    }
}

/// Resolve each declared price against the snapshot via [`parse_price`].
#[must_use]
pub fn create_price_config(price_vars: &[PriceVar], env: &EnvMap) -> BTreeMap<Box<str>, f64> {
    price_vars
        .iter()
        .map(|price| {
            let raw = env.get(&*price.var).map(String::as_str);
            (price.key.clone(), parse_price(raw, price.default))
        })
        .collect()
}

/// Route declaration binding a path to a logical price key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Route path.
    pub path: Box<str>,
    /// Logical price key looked up in the resolved price table.
    pub price_key: Box<str>,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Box<str>>,
}

impl Route {
    /// Declare a route with its price key and no description.
    #[must_use]
    pub fn new(path: impl Into<Box<str>>, price_key: impl Into<Box<str>>) -> Self {
        Self {
            path: path.into(),
            price_key: price_key.into(),
            description: None,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<Box<str>>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Priced route entry produced by [`create_route_mapping`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePrice {
    /// Route path.
    pub path: Box<str>,
    /// Resolved price; 0.0 when the price key was unknown.
    pub price: f64,
    /// Optional description carried over from the route declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Box<str>>,
}

/// Join routes with a resolved price table, keyed by path.
///
/// An unknown price key substitutes 0.0 silently rather than failing.
#[must_use]
pub fn create_route_mapping(
    routes: &[Route],
    prices: &BTreeMap<Box<str>, f64>,
) -> BTreeMap<Box<str>, RoutePrice> {
    routes
        .iter()
        .map(|route| {
            let price = prices.get(&route.price_key).copied().unwrap_or(0.0);
            (
                route.path.clone(),
                RoutePrice {
                    path: route.path.clone(),
                    price,
                    description: route.description.clone(),
                },
            )
        })
        .collect()
}

/// Price for a path, or `None` when the path is not mapped.
#[must_use]
pub fn get_route_price(routes: &BTreeMap<Box<str>, RoutePrice>, path: &str) -> Option<f64> {
    routes.get(path).map(|route| route.price)
}
