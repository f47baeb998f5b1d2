//! Blocking client for a remote descriptor registry.
//!
//! CRUD on shell descriptors at the registry's `/shells` root, with the
//! same response normalization as the shell client.

use http::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use url::Url;

use twinreg_registry::{with_suffix, ResourceKind, ShellDescriptor};

use crate::config::ClientConfig;
use crate::Error;

pub struct RegistryClient {
    http: Client,
    root: Url,
}

impl RegistryClient {
    /// Connect to a registry root, appending the `shells` suffix when
    /// the address does not already end with it.
    pub fn new(root: &str, config: &ClientConfig) -> Result<Self, Error> {
        let address = with_suffix(root, ResourceKind::ShellRepository.suffix());
        let root = Url::parse(&address).map_err(|e| Error::Configuration {
            message: format!("malformed registry address '{}': {}", address, e),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, root })
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    fn shell_url(&self, shell_id: &str) -> Result<Url, Error> {
        let mut url = self.root.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Configuration {
                message: format!("registry root '{}' cannot carry sub-paths", self.root),
            })?
            .pop_if_empty()
            .push(shell_id);
        Ok(url)
    }

    /// All registered shell descriptors.
    pub fn retrieve_shells(&self) -> Result<Vec<ShellDescriptor>, Error> {
        log::debug!("GET {}", self.root);
        let response = self.http.get(self.root.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::remote(status.as_u16(), &body));
        }
        let text = response.text()?;
        serde_json::from_str(&text).map_err(|e| Error::Serialization {
            message: format!("decoding shell descriptors: {}", e),
        })
    }

    pub fn retrieve_shell(&self, shell_id: &str) -> Result<Option<ShellDescriptor>, Error> {
        let url = self.shell_url(shell_id)?;
        log::debug!("GET {}", url);
        let response = self.http.get(url).send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::remote(status.as_u16(), &body));
        }
        let text = response.text()?;
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| Error::Serialization {
                message: format!("decoding shell descriptor: {}", e),
            })
    }

    /// Register or replace a shell descriptor under its id.
    pub fn create_or_update_shell(&self, descriptor: &ShellDescriptor) -> Result<(), Error> {
        let url = self.shell_url(&descriptor.id_short)?;
        log::debug!("PUT {}", url);
        let response = self.http.put(url).json(descriptor).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::remote(status.as_u16(), &body));
        }
        Ok(())
    }

    /// Create-only registration. An already-existing id answers 409,
    /// surfaced as a conflict.
    pub fn register_shell_new(&self, descriptor: &ShellDescriptor) -> Result<(), Error> {
        log::debug!("POST {}", self.root);
        let response = self.http.post(self.root.clone()).json(descriptor).send()?;
        let status = response.status();
        if status == StatusCode::CONFLICT {
            return Err(Error::Conflict {
                what: format!("shell '{}'", descriptor.id_short),
            });
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::remote(status.as_u16(), &body));
        }
        Ok(())
    }

    pub fn delete_shell(&self, shell_id: &str) -> Result<(), Error> {
        let url = self.shell_url(shell_id)?;
        log::debug!("DELETE {}", url);
        let response = self.http.delete(url).send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                what: format!("shell '{}'", shell_id),
            });
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::remote(status.as_u16(), &body));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_gains_shells_suffix() {
        let client = RegistryClient::new("http://registry:4000", &ClientConfig::default()).unwrap();
        assert_eq!(client.root().as_str(), "http://registry:4000/shells");
    }

    #[test]
    fn pre_suffixed_root_is_unchanged() {
        let client =
            RegistryClient::new("http://registry:4000/shells", &ClientConfig::default()).unwrap();
        assert_eq!(client.root().as_str(), "http://registry:4000/shells");
    }

    #[test]
    fn malformed_root_aborts_construction() {
        assert!(matches!(
            RegistryClient::new("::::", &ClientConfig::default()),
            Err(Error::Configuration { .. })
        ));
    }
}
