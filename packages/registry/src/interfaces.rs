//! Local network interface enumeration.
//!
//! Wildcard-address expansion needs the machine's interface addresses.
//! The lookup sits behind [`NetworkInterfaces`] so tests can substitute a
//! fixed provider.

use std::net::IpAddr;

/// Source of local interface addresses.
pub trait NetworkInterfaces {
    /// All local IPv4 and IPv6 addresses.
    fn addresses(&self) -> Vec<IpAddr>;
}

/// OS-backed provider.
pub struct OsNetworkInterfaces;

impl NetworkInterfaces for OsNetworkInterfaces {
    fn addresses(&self) -> Vec<IpAddr> {
        match if_addrs::get_if_addrs() {
            Ok(interfaces) => interfaces.into_iter().map(|iface| iface.ip()).collect(),
            Err(e) => {
                log::error!("network interface enumeration failed: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_provider_reports_without_panicking() {
        // Interface sets differ per machine; only the call contract is
        // checked here.
        let _ = OsNetworkInterfaces.addresses();
    }
}
