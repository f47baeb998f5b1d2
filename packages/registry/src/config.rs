//! Host-side configuration consumed by the endpoint directory.

use serde::{Deserialize, Serialize};

/// Root addresses a host binds or advertises.
///
/// A URL whose host is the wildcard token `+` stands for "every local
/// interface" and is expanded during root resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default)]
    pub urls: Vec<String>,
}

impl HostConfig {
    pub fn new(urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }
}
