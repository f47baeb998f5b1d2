//! Blocking client for one remote shell.
//!
//! Maps logical paths (`submodels/{id}/submodel/submodelElements/...`) to
//! HTTP calls against the shell's `/aas` endpoint and normalizes the
//! responses: retrieves answer `Ok(None)` on 404, non-success statuses
//! become remote errors carrying server diagnostics, undecodable
//! payloads become serialization errors, and transport or timeout
//! failures become network errors. Every call is a single attempt
//! bounded by the configured timeout.

use http::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use twinreg_model::{
    CallbackResponse, ElementValue, InvocationRecord, InvocationRequest, Shell, Submodel,
    SubmodelElement,
};
use twinreg_registry::{with_suffix, ResourceKind, ShellDescriptor};

use crate::config::ClientConfig;
use crate::invoker::OperationInvoker;
use crate::Error;

const SUBMODELS: &str = "submodels";
const SUBMODEL: &str = "submodel";
const SUBMODEL_ELEMENTS: &str = "submodelElements";
const VALUE: &str = "value";
const INVOKE: &str = "invoke";
const INVOCATION_LIST: &str = "invocationList";

#[derive(Debug)]
pub struct ShellClient {
    http: Client,
    endpoint: Url,
}

impl ShellClient {
    /// Connect to a shell endpoint, appending the `aas` suffix when the
    /// address does not already end with it. A malformed address aborts
    /// construction.
    pub fn new(endpoint: &str, config: &ClientConfig) -> Result<Self, Error> {
        let address = with_suffix(endpoint, ResourceKind::Shell.suffix());
        let endpoint = Url::parse(&address).map_err(|e| Error::Configuration {
            message: format!("malformed endpoint address '{}': {}", address, e),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, endpoint })
    }

    /// Connect via a descriptor's advertised endpoints.
    ///
    /// Only http(s) endpoints are considered. With `prefer_secure`, the
    /// first secure endpoint wins and plain http is the fallback;
    /// otherwise the first compatible endpoint is used. No usable
    /// endpoint is a configuration error, raised before any network
    /// attempt.
    pub fn from_descriptor(
        descriptor: &ShellDescriptor,
        config: &ClientConfig,
    ) -> Result<Self, Error> {
        let candidates: Vec<_> = descriptor
            .endpoints
            .iter()
            .filter(|ep| ep.is_http() && !ep.address.is_empty())
            .collect();

        let chosen = if config.prefer_secure {
            candidates
                .iter()
                .find(|ep| ep.is_secure())
                .or_else(|| candidates.first())
        } else {
            candidates.first()
        };

        let chosen = chosen.ok_or_else(|| Error::Configuration {
            message: format!(
                "shell '{}' advertises no usable http endpoint",
                descriptor.id_short
            ),
        })?;
        Self::new(&chosen.address, config)
    }

    /// The resolved `/aas` endpoint this client talks to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// An invoker bound to one operation element of this shell.
    pub fn invoker(
        &self,
        submodel_id: impl Into<String>,
        operation_path: impl Into<String>,
    ) -> OperationInvoker<'_> {
        OperationInvoker::new(self, submodel_id, operation_path)
    }

    // Shell level

    pub fn retrieve_shell(&self) -> Result<Option<Shell>, Error> {
        self.get_optional(self.endpoint.clone(), "shell")
    }

    pub fn retrieve_shell_descriptor(&self) -> Result<Option<ShellDescriptor>, Error> {
        self.get_optional(self.endpoint.clone(), "shell descriptor")
    }

    // Submodel level

    pub fn retrieve_submodels(&self) -> Result<Option<Vec<Submodel>>, Error> {
        let url = self.url_for(&[SUBMODELS])?;
        self.get_optional(url, "submodels")
    }

    pub fn retrieve_submodel(&self, submodel_id: &str) -> Result<Option<Submodel>, Error> {
        let url = self.url_for(&[SUBMODELS, submodel_id])?;
        self.get_optional(url, "submodel")
    }

    /// Full-body write: the submodel replaces whatever the remote side
    /// held under its id, or nothing changes on failure.
    pub fn create_or_update_submodel(
        &self,
        submodel: &Submodel,
    ) -> Result<Option<Submodel>, Error> {
        let url = self.url_for(&[SUBMODELS, &submodel.id_short])?;
        self.put_json(url, submodel, "submodel")
    }

    pub fn delete_submodel(&self, submodel_id: &str) -> Result<(), Error> {
        let url = self.url_for(&[SUBMODELS, submodel_id])?;
        self.delete_at(url, &format!("submodel '{}'", submodel_id))
    }

    // Element level

    pub fn retrieve_submodel_elements(
        &self,
        submodel_id: &str,
    ) -> Result<Option<Vec<SubmodelElement>>, Error> {
        let url = self.url_for(&[SUBMODELS, submodel_id, SUBMODEL, SUBMODEL_ELEMENTS])?;
        self.get_optional(url, "submodel elements")
    }

    pub fn retrieve_submodel_element(
        &self,
        submodel_id: &str,
        element_path: &str,
    ) -> Result<Option<SubmodelElement>, Error> {
        let url = self.url_for(&[
            SUBMODELS,
            submodel_id,
            SUBMODEL,
            SUBMODEL_ELEMENTS,
            element_path,
        ])?;
        self.get_optional(url, "submodel element")
    }

    pub fn create_or_update_submodel_element(
        &self,
        submodel_id: &str,
        element_path: &str,
        element: &SubmodelElement,
    ) -> Result<Option<SubmodelElement>, Error> {
        let url = self.url_for(&[
            SUBMODELS,
            submodel_id,
            SUBMODEL,
            SUBMODEL_ELEMENTS,
            element_path,
        ])?;
        self.put_json(url, element, "submodel element")
    }

    pub fn delete_submodel_element(
        &self,
        submodel_id: &str,
        element_path: &str,
    ) -> Result<(), Error> {
        let url = self.url_for(&[
            SUBMODELS,
            submodel_id,
            SUBMODEL,
            SUBMODEL_ELEMENTS,
            element_path,
        ])?;
        self.delete_at(url, &format!("submodel element '{}'", element_path))
    }

    // Value level

    /// Read an element's bare value.
    ///
    /// The payload is decoded in two steps: raw bytes to a raw wire
    /// value, then that value is typed into an [`ElementValue`]. The raw
    /// value may itself embed a structured document; typing it is a
    /// separate concern from transport decoding.
    pub fn retrieve_submodel_element_value(
        &self,
        submodel_id: &str,
        element_path: &str,
    ) -> Result<Option<ElementValue>, Error> {
        let url = self.url_for(&[
            SUBMODELS,
            submodel_id,
            SUBMODEL,
            SUBMODEL_ELEMENTS,
            element_path,
            VALUE,
        ])?;
        log::debug!("GET {}", url);
        let response = self.http.get(url).send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::remote_error(status, response));
        }

        let bytes = response.bytes()?;
        let text = std::str::from_utf8(&bytes).map_err(|e| Error::Serialization {
            message: format!("value payload is not UTF-8: {}", e),
        })?;
        let raw: serde_json::Value =
            serde_json::from_str(text).map_err(|e| Error::Serialization {
                message: format!("decoding value payload: {}", e),
            })?;
        Ok(Some(ElementValue::from_json(raw)))
    }

    /// Write an element's bare value — only the value itself is sent,
    /// never the element envelope.
    pub fn update_submodel_element_value(
        &self,
        submodel_id: &str,
        element_path: &str,
        value: &ElementValue,
    ) -> Result<(), Error> {
        let url = self.url_for(&[
            SUBMODELS,
            submodel_id,
            SUBMODEL,
            SUBMODEL_ELEMENTS,
            element_path,
            VALUE,
        ])?;
        log::debug!("PUT {}", url);
        let response = self.http.put(url).json(&value.value).send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                what: format!("submodel element '{}'", element_path),
            });
        }
        if !status.is_success() {
            return Err(Self::remote_error(status, response));
        }
        Ok(())
    }

    // Operation level

    /// Synchronous invocation: blocks until the remote side reports a
    /// terminal outcome.
    pub fn invoke_operation(
        &self,
        submodel_id: &str,
        operation_path: &str,
        request: &InvocationRequest,
    ) -> Result<InvocationRecord, Error> {
        let url = self.invoke_url(submodel_id, operation_path)?;
        self.post_json(url, &[("async", "false")], request, "invocation response")
    }

    /// Asynchronous invocation: returns immediately with the correlation
    /// token while remote execution continues independently.
    pub fn invoke_operation_async(
        &self,
        submodel_id: &str,
        operation_path: &str,
        request: &InvocationRequest,
    ) -> Result<CallbackResponse, Error> {
        let url = self.invoke_url(submodel_id, operation_path)?;
        self.post_json(url, &[("async", "true")], request, "callback response")
    }

    /// Single non-blocking probe for an asynchronous invocation's
    /// outcome. Unknown tokens answer `Ok(None)`.
    pub fn get_invocation_result(
        &self,
        submodel_id: &str,
        operation_path: &str,
        request_id: &str,
    ) -> Result<Option<InvocationRecord>, Error> {
        let url = self.url_for(&[
            SUBMODELS,
            submodel_id,
            SUBMODEL,
            SUBMODEL_ELEMENTS,
            operation_path,
            INVOCATION_LIST,
            request_id,
        ])?;
        self.get_optional(url, "invocation record")
    }

    // Plumbing

    fn invoke_url(&self, submodel_id: &str, operation_path: &str) -> Result<Url, Error> {
        self.url_for(&[
            SUBMODELS,
            submodel_id,
            SUBMODEL,
            SUBMODEL_ELEMENTS,
            operation_path,
            INVOKE,
        ])
    }

    /// Append path segments to the endpoint. A segment containing `/`
    /// (a nested element path) contributes one URL segment per piece.
    fn url_for(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.endpoint.clone();
        {
            let mut parts = url.path_segments_mut().map_err(|_| Error::Configuration {
                message: format!("endpoint '{}' cannot carry sub-paths", self.endpoint),
            })?;
            parts.pop_if_empty();
            for segment in segments {
                for piece in segment.split('/').filter(|p| !p.is_empty()) {
                    parts.push(piece);
                }
            }
        }
        Ok(url)
    }

    fn remote_error(status: StatusCode, response: Response) -> Error {
        let body = response.text().unwrap_or_default();
        Error::remote(status.as_u16(), &body)
    }

    fn get_optional<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<Option<T>, Error> {
        log::debug!("GET {}", url);
        let response = self.http.get(url).send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::remote_error(status, response));
        }
        let text = response.text()?;
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| Error::Serialization {
                message: format!("decoding {}: {}", what, e),
            })
    }

    fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
        what: &str,
    ) -> Result<Option<T>, Error> {
        log::debug!("PUT {}", url);
        let response = self.http.put(url).json(body).send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                what: what.to_string(),
            });
        }
        if !status.is_success() {
            return Err(Self::remote_error(status, response));
        }
        let text = response.text()?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| Error::Serialization {
                message: format!("decoding {}: {}", what, e),
            })
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
        body: &B,
        what: &str,
    ) -> Result<T, Error> {
        log::debug!("POST {}", url);
        let response = self.http.post(url).query(query).json(body).send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                what: what.to_string(),
            });
        }
        if !status.is_success() {
            return Err(Self::remote_error(status, response));
        }
        let text = response.text()?;
        serde_json::from_str(&text).map_err(|e| Error::Serialization {
            message: format!("decoding {}: {}", what, e),
        })
    }

    fn delete_at(&self, url: Url, what: &str) -> Result<(), Error> {
        log::debug!("DELETE {}", url);
        let response = self.http.delete(url).send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                what: what.to_string(),
            });
        }
        if !status.is_success() {
            return Err(Self::remote_error(status, response));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinreg_registry::Endpoint;

    #[test]
    fn constructor_appends_aas_suffix() {
        let client = ShellClient::new("http://host:5080/shells/S1", &ClientConfig::default())
            .unwrap();
        assert_eq!(client.endpoint().as_str(), "http://host:5080/shells/S1/aas");
    }

    #[test]
    fn constructor_keeps_existing_suffix() {
        let client = ShellClient::new("http://host:5080/shells/S1/aas", &ClientConfig::default())
            .unwrap();
        assert_eq!(client.endpoint().as_str(), "http://host:5080/shells/S1/aas");
    }

    #[test]
    fn malformed_address_aborts_construction() {
        let err = ShellClient::new("not a url", &ClientConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    fn descriptor_with(endpoints: Vec<Endpoint>) -> ShellDescriptor {
        let mut descriptor = ShellDescriptor::new("S1", "urn_example_s1");
        descriptor.endpoints = endpoints;
        descriptor
    }

    #[test]
    fn secure_endpoint_is_preferred() {
        let descriptor = descriptor_with(vec![
            Endpoint::new("http", "http://host/shells/S1/aas"),
            Endpoint::new("https", "https://host/shells/S1/aas"),
        ]);

        let client = ShellClient::from_descriptor(&descriptor, &ClientConfig::default()).unwrap();
        assert_eq!(client.endpoint().scheme(), "https");
    }

    #[test]
    fn insecure_fallback_when_no_secure_endpoint() {
        let descriptor = descriptor_with(vec![Endpoint::new("http", "http://host/shells/S1/aas")]);

        let client = ShellClient::from_descriptor(&descriptor, &ClientConfig::default()).unwrap();
        assert_eq!(client.endpoint().scheme(), "http");
    }

    #[test]
    fn first_compatible_endpoint_without_secure_preference() {
        let descriptor = descriptor_with(vec![
            Endpoint::new("http", "http://host/shells/S1/aas"),
            Endpoint::new("https", "https://host/shells/S1/aas"),
        ]);
        let config = ClientConfig {
            prefer_secure: false,
            ..ClientConfig::default()
        };

        let client = ShellClient::from_descriptor(&descriptor, &config).unwrap();
        assert_eq!(client.endpoint().scheme(), "http");
    }

    #[test]
    fn non_http_endpoints_are_ignored() {
        let descriptor = descriptor_with(vec![
            Endpoint::new("opc.tcp", "opc.tcp://host:4840"),
            Endpoint::new("http", "http://host/shells/S1/aas"),
        ]);

        let client = ShellClient::from_descriptor(&descriptor, &ClientConfig::default()).unwrap();
        assert_eq!(client.endpoint().scheme(), "http");
    }

    #[test]
    fn missing_endpoint_is_a_configuration_error() {
        let descriptor = descriptor_with(Vec::new());
        let err = ShellClient::from_descriptor(&descriptor, &ClientConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn nested_element_paths_expand_into_segments() {
        let client = ShellClient::new("http://host/aas", &ClientConfig::default()).unwrap();
        let url = client
            .url_for(&[SUBMODELS, "M1", SUBMODEL, SUBMODEL_ELEMENTS, "coll/inner", VALUE])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://host/aas/submodels/M1/submodel/submodelElements/coll/inner/value"
        );
    }
}
