//! Service descriptor normalization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized descriptor a backend service advertises about itself.
///
/// Deserialization fills `capabilities` with an empty sequence and
/// `endpoints` with an empty mapping when absent; explicit fields pass
/// through unchanged. No environment interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    /// Service name.
    pub name: Box<str>,
    /// Service version string.
    pub version: Box<str>,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Box<str>>,
    /// Advertised capabilities, in declaration order.
    #[serde(default)]
    pub capabilities: Vec<Box<str>>,
    /// Named endpoints exposed by the service.
    #[serde(default)]
    pub endpoints: BTreeMap<Box<str>, Box<str>>,
}

impl ServiceInfo {
    /// Descriptor with the given identity and empty capabilities/endpoints.
    #[must_use]
    pub fn new(name: impl Into<Box<str>>, version: impl Into<Box<str>>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: None,
            capabilities: Vec::new(),
            endpoints: BTreeMap::new(),
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<Box<str>>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append an advertised capability.
    #[must_use]
    pub fn with_capability(mut self, capability: impl Into<Box<str>>) -> Self {
        self.capabilities.push(capability.into());
        self
    }

    /// Register a named endpoint.
    #[must_use]
    pub fn with_endpoint(
        mut self,
        name: impl Into<Box<str>>,
        target: impl Into<Box<str>>,
    ) -> Self {
        self.endpoints.insert(name.into(), target.into());
        self
    }
}
