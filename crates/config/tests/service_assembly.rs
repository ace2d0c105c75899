//! Integration tests for price tables, route mappings, feature flags, and
//! the service descriptor, assembled the way a service bootstrap would.

use service_env_config::{
    EnvMap, FeatureFlag, PriceVar, Route, ServiceInfo, create_feature_flags, create_price_config,
    create_route_mapping, get_route_price, is_feature_enabled,
};

fn snapshot(pairs: &[(&str, &str)]) -> EnvMap {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

#[test]
fn bootstrap_assembles_prices_routes_and_flags() {
    let env = snapshot(&[
        ("PRICE_INGEST", "0.9"),
        ("PRICE_QUERY", "not-a-price"),
        ("FEATURE_BULK", "true"),
    ]);

    let prices = create_price_config(
        &[
            PriceVar::new("ingest", "PRICE_INGEST", 0.5),
            PriceVar::new("query", "PRICE_QUERY", 1.25),
        ],
        &env,
    );
    let routes = [
        Route::new("/v1/ingest", "ingest").with_description("bulk ingestion"),
        Route::new("/v1/query", "query"),
        Route::new("/v1/export", "export"),
    ];
    let mapping = create_route_mapping(&routes, &prices);
    let flags = create_feature_flags(
        &[
            FeatureFlag::new("bulk", "FEATURE_BULK", false),
            FeatureFlag::new("export", "FEATURE_EXPORT", false),
        ],
        &env,
    );

    assert_eq!(get_route_price(&mapping, "/v1/ingest"), Some(0.9));
    // Unparsable price falls back to the declared default.
    assert_eq!(get_route_price(&mapping, "/v1/query"), Some(1.25));
    // Undeclared price key prices the route at zero.
    assert_eq!(get_route_price(&mapping, "/v1/export"), Some(0.0));
    assert_eq!(get_route_price(&mapping, "/v1/unknown"), None);

    assert!(is_feature_enabled(&flags, "bulk"));
    assert!(!is_feature_enabled(&flags, "export"));
    assert!(!is_feature_enabled(&flags, "does-not-exist"));
}

#[test]
fn service_descriptor_round_trips_through_json() {
    let info = ServiceInfo::new("pricing-gateway", "0.4.2")
        .with_description("route pricing facade")
        .with_capability("pricing")
        .with_capability("flags")
        .with_endpoint("health", "/healthz")
        .with_endpoint("metrics", "/metrics");

    let encoded = serde_json::to_string(&info).unwrap_or_default();
    let decoded: Result<ServiceInfo, _> = serde_json::from_str(&encoded);

    assert!(matches!(decoded, Ok(ref round) if *round == info));
}

#[test]
fn minimal_descriptor_normalizes_collections() {
    let decoded: Result<ServiceInfo, _> =
        serde_json::from_str(r#"{"name": "s", "version": "1"}"#);

    assert!(matches!(
        decoded,
        Ok(ref info) if info.capabilities.is_empty() && info.endpoints.is_empty()
    ));
}
