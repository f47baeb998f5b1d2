//! Remote endpoints: (scheme, address, optional security descriptor).

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::DirectoryError;

/// One remote access path to a resource.
///
/// The address always carries the canonical suffix for its resource kind
/// (see [`directory`](crate::directory)) before any further nesting is
/// appended. The security descriptor's shape is defined by the transport
/// layer and carried opaquely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub scheme: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<serde_json::Value>,
}

impl Endpoint {
    pub fn new(scheme: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            address: address.into(),
            security: None,
        }
    }

    /// Parse a URL string into an endpoint, keeping the original string
    /// as the address.
    pub fn from_url(address: &str) -> Result<Self, DirectoryError> {
        let parsed = Url::parse(address).map_err(|e| DirectoryError::InvalidAddress {
            address: address.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            scheme: parsed.scheme().to_string(),
            address: address.to_string(),
            security: None,
        })
    }

    /// The same endpoint (scheme and security) at a different address.
    #[must_use]
    pub fn with_address(&self, address: impl Into<String>) -> Self {
        Self {
            scheme: self.scheme.clone(),
            address: address.into(),
            security: self.security.clone(),
        }
    }

    /// True for endpoints reachable over HTTP or HTTPS.
    pub fn is_http(&self) -> bool {
        self.scheme == "http" || self.scheme == "https"
    }

    /// True for secure-transport endpoints.
    pub fn is_secure(&self) -> bool {
        self.scheme == "https"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_url_keeps_original_address() {
        let ep = Endpoint::from_url("http://host:8080/shells").unwrap();
        assert_eq!(ep.scheme, "http");
        assert_eq!(ep.address, "http://host:8080/shells");
    }

    #[test]
    fn from_url_rejects_garbage() {
        let err = Endpoint::from_url("not a url").unwrap_err();
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn with_address_preserves_scheme_and_security() {
        let mut ep = Endpoint::new("https", "https://host/aas");
        ep.security = Some(serde_json::json!({"profile": "tls"}));

        let derived = ep.with_address("https://host/aas/submodels/M1/submodel");
        assert_eq!(derived.scheme, "https");
        assert_eq!(derived.security, ep.security);
    }

    #[test]
    fn scheme_predicates() {
        assert!(Endpoint::new("http", "http://h").is_http());
        assert!(!Endpoint::new("http", "http://h").is_secure());
        assert!(Endpoint::new("https", "https://h").is_secure());
        assert!(!Endpoint::new("opc.tcp", "opc.tcp://h").is_http());
    }

    #[test]
    fn security_is_omitted_from_wire_when_absent() {
        let encoded = serde_json::to_value(Endpoint::new("http", "http://h")).unwrap();
        assert!(encoded.get("security").is_none());
    }
}
