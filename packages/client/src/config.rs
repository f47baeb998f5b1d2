//! Client-side configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Behavior knobs shared by every client in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Upper bound for every remote call. Exceeding it yields a network
    /// error rather than hanging.
    pub timeout: Duration,

    /// Prefer a secure-transport endpoint over an equivalent insecure
    /// one when a descriptor advertises both.
    pub prefer_secure: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            prefer_secure: true,
        }
    }
}
