//! Derivation of per-node endpoints from root endpoints and the resource
//! hierarchy.
//!
//! Every resource kind has a canonical address suffix. Roots are
//! canonicalized once, then each nesting level appends
//! `/{identifier}/{kind-suffix}` to every ancestor endpoint,
//! independently per scheme, depth-first. Registration assigns the
//! derived lists; endpoints are immutable until roots change and the
//! hierarchy is re-registered.

use std::net::IpAddr;

use url::Url;

use crate::config::HostConfig;
use crate::descriptor::{RegistryDescriptor, ShellDescriptor, SubmodelRepositoryDescriptor};
use crate::endpoint::Endpoint;
use crate::error::DirectoryError;
use crate::interfaces::NetworkInterfaces;

/// Host token standing for "every local interface".
pub const WILDCARD_HOST: &str = "+";

/// Levels of the resource hierarchy with their canonical suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    ShellRepository,
    Shell,
    SubmodelRepository,
    Submodel,
}

impl ResourceKind {
    pub fn suffix(&self) -> &'static str {
        match self {
            ResourceKind::ShellRepository => "shells",
            ResourceKind::Shell => "aas",
            ResourceKind::SubmodelRepository => "submodels",
            ResourceKind::Submodel => "submodel",
        }
    }
}

/// Append `/{suffix}` unless the address already ends with it.
/// Idempotent; a trailing `/` is normalized away first.
pub fn with_suffix(address: &str, suffix: &str) -> String {
    let trimmed = address.trim_end_matches('/');
    if trimmed.ends_with(&format!("/{}", suffix)) {
        trimmed.to_string()
    } else {
        format!("{}/{}", trimmed, suffix)
    }
}

/// Address of a shell under a shell repository endpoint.
pub fn shell_endpoint(endpoint: &Endpoint, shell_id: &str) -> String {
    format!(
        "{}/{}/{}",
        with_suffix(&endpoint.address, ResourceKind::ShellRepository.suffix()),
        shell_id,
        ResourceKind::Shell.suffix()
    )
}

/// Address of a submodel under a shell endpoint.
pub fn submodel_endpoint(endpoint: &Endpoint, submodel_id: &str) -> String {
    format!(
        "{}/submodels/{}/{}",
        with_suffix(&endpoint.address, ResourceKind::Shell.suffix()),
        submodel_id,
        ResourceKind::Submodel.suffix()
    )
}

/// Address of a submodel under a submodel repository endpoint.
pub fn submodel_in_repository_endpoint(endpoint: &Endpoint, submodel_id: &str) -> String {
    format!(
        "{}/{}/{}",
        with_suffix(&endpoint.address, ResourceKind::SubmodelRepository.suffix()),
        submodel_id,
        ResourceKind::Submodel.suffix()
    )
}

/// Root endpoints plus the derivation rules.
#[derive(Debug, Clone)]
pub struct EndpointDirectory {
    roots: Vec<Endpoint>,
}

impl EndpointDirectory {
    /// Build from explicit root endpoints. An empty set is a
    /// configuration error, never silently accepted.
    pub fn new(roots: Vec<Endpoint>) -> Result<Self, DirectoryError> {
        if roots.is_empty() {
            return Err(DirectoryError::NoUsableEndpoints);
        }
        Ok(Self { roots })
    }

    /// Resolve roots from host configuration.
    ///
    /// Wildcard-host URLs are expanded into one endpoint per local
    /// interface address; explicit URLs are taken as-is. Malformed URLs
    /// are logged and skipped. A result with no usable endpoint is an
    /// error.
    pub fn from_config(
        config: &HostConfig,
        interfaces: &dyn NetworkInterfaces,
    ) -> Result<Self, DirectoryError> {
        let mut roots = Vec::new();
        for raw in &config.urls {
            if raw.contains(WILDCARD_HOST) {
                match Url::parse(&raw.replace(WILDCARD_HOST, "localhost")) {
                    Ok(parsed) => roots.extend(expand_wildcard(
                        parsed.scheme(),
                        parsed.port_or_known_default(),
                        interfaces,
                    )),
                    Err(e) => log::warn!("skipping malformed root address '{}': {}", raw, e),
                }
            } else {
                match Endpoint::from_url(raw) {
                    Ok(endpoint) => roots.push(endpoint),
                    Err(e) => log::warn!("skipping malformed root address '{}': {}", raw, e),
                }
            }
        }
        Self::new(roots)
    }

    pub fn roots(&self) -> &[Endpoint] {
        &self.roots
    }

    /// Derive and assign endpoints for a shell repository and everything
    /// beneath it.
    pub fn register_shell_repository(&self, descriptor: &mut RegistryDescriptor) {
        let repository: Vec<Endpoint> = self
            .roots
            .iter()
            .map(|ep| {
                ep.with_address(with_suffix(
                    &ep.address,
                    ResourceKind::ShellRepository.suffix(),
                ))
            })
            .collect();

        for shell in &mut descriptor.shells {
            Self::assign_shell(&repository, shell);
        }
        descriptor.endpoints = repository;
    }

    /// Derive and assign endpoints for one standalone shell and its
    /// submodels.
    pub fn register_shell(&self, descriptor: &mut ShellDescriptor) {
        let roots: Vec<Endpoint> = self
            .roots
            .iter()
            .map(|ep| ep.with_address(with_suffix(&ep.address, ResourceKind::Shell.suffix())))
            .collect();
        Self::assign_submodels(&roots, descriptor);
        descriptor.endpoints = roots;
    }

    /// Derive and assign endpoints for a submodel repository.
    pub fn register_submodel_repository(&self, descriptor: &mut SubmodelRepositoryDescriptor) {
        let repository: Vec<Endpoint> = self
            .roots
            .iter()
            .map(|ep| {
                ep.with_address(with_suffix(
                    &ep.address,
                    ResourceKind::SubmodelRepository.suffix(),
                ))
            })
            .collect();

        for submodel in &mut descriptor.submodels {
            submodel.endpoints = repository
                .iter()
                .map(|ep| ep.with_address(submodel_in_repository_endpoint(ep, &submodel.id_short)))
                .collect();
        }
        descriptor.endpoints = repository;
    }

    fn assign_shell(parents: &[Endpoint], shell: &mut ShellDescriptor) {
        let endpoints: Vec<Endpoint> = parents
            .iter()
            .map(|ep| ep.with_address(shell_endpoint(ep, &shell.id_short)))
            .collect();
        log::debug!(
            "derived {} endpoint(s) for shell '{}'",
            endpoints.len(),
            shell.id_short
        );
        Self::assign_submodels(&endpoints, shell);
        shell.endpoints = endpoints;
    }

    fn assign_submodels(parents: &[Endpoint], shell: &mut ShellDescriptor) {
        for submodel in &mut shell.submodels {
            submodel.endpoints = parents
                .iter()
                .map(|ep| ep.with_address(submodel_endpoint(ep, &submodel.id_short)))
                .collect();
        }
    }
}

/// One endpoint per (interface address, scheme, port).
fn expand_wildcard(
    scheme: &str,
    port: Option<u16>,
    interfaces: &dyn NetworkInterfaces,
) -> Vec<Endpoint> {
    interfaces
        .addresses()
        .into_iter()
        .map(|ip| {
            let host = match ip {
                IpAddr::V4(v4) => v4.to_string(),
                IpAddr::V6(v6) => format!("[{}]", v6),
            };
            let address = match port {
                Some(port) => format!("{}://{}:{}", scheme, host, port),
                None => format!("{}://{}", scheme, host),
            };
            Endpoint::new(scheme, address)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::SubmodelDescriptor;
    use std::net::{Ipv4Addr, Ipv6Addr};

    struct FixedInterfaces(Vec<IpAddr>);

    impl NetworkInterfaces for FixedInterfaces {
        fn addresses(&self) -> Vec<IpAddr> {
            self.0.clone()
        }
    }

    fn two_level_registry() -> RegistryDescriptor {
        RegistryDescriptor::new().with_shell(
            ShellDescriptor::new("S1", "urn_example_s1")
                .with_submodel(SubmodelDescriptor::new("M1", "urn_example_m1")),
        )
    }

    #[test]
    fn with_suffix_appends_once() {
        assert_eq!(with_suffix("http://host:80", "shells"), "http://host:80/shells");
        assert_eq!(
            with_suffix("http://host:80/shells", "shells"),
            "http://host:80/shells"
        );
        assert_eq!(
            with_suffix("http://host:80/", "shells"),
            "http://host:80/shells"
        );
        assert_eq!(
            with_suffix("http://host:80/shells/", "shells"),
            "http://host:80/shells"
        );
        // Idempotent.
        let once = with_suffix("http://host:80", "aas");
        assert_eq!(with_suffix(&once, "aas"), once);
    }

    #[test]
    fn two_level_derivation_matches_the_grammar() {
        let directory =
            EndpointDirectory::new(vec![Endpoint::new("http", "http://host:80")]).unwrap();
        let mut registry = two_level_registry();

        directory.register_shell_repository(&mut registry);

        assert_eq!(registry.endpoints[0].address, "http://host:80/shells");
        let shell = registry.shell("S1").unwrap();
        assert_eq!(shell.endpoints[0].address, "http://host:80/shells/S1/aas");
        let submodel = shell.submodel("M1").unwrap();
        assert_eq!(
            submodel.endpoints[0].address,
            "http://host:80/shells/S1/aas/submodels/M1/submodel"
        );
    }

    #[test]
    fn pre_suffixed_root_is_not_doubled() {
        let directory =
            EndpointDirectory::new(vec![Endpoint::new("http", "http://host:80/shells")]).unwrap();
        let mut registry = two_level_registry();

        directory.register_shell_repository(&mut registry);

        assert_eq!(registry.endpoints[0].address, "http://host:80/shells");
        assert_eq!(
            registry.shell("S1").unwrap().endpoints[0].address,
            "http://host:80/shells/S1/aas"
        );
    }

    #[test]
    fn derivation_is_independent_per_scheme() {
        let directory = EndpointDirectory::new(vec![
            Endpoint::new("http", "http://host:80"),
            Endpoint::new("https", "https://host:443"),
        ])
        .unwrap();
        let mut registry = two_level_registry();

        directory.register_shell_repository(&mut registry);

        let shell = registry.shell("S1").unwrap();
        assert_eq!(shell.endpoints.len(), 2);
        assert_eq!(shell.endpoints[0].scheme, "http");
        assert_eq!(shell.endpoints[1].scheme, "https");
        assert_eq!(
            shell.endpoints[1].address,
            "https://host:443/shells/S1/aas"
        );
    }

    #[test]
    fn security_descriptor_is_carried_through_derivation() {
        let mut root = Endpoint::new("https", "https://host");
        root.security = Some(serde_json::json!({"profile": "tls"}));
        let directory = EndpointDirectory::new(vec![root]).unwrap();
        let mut registry = two_level_registry();

        directory.register_shell_repository(&mut registry);

        let submodel = registry.shell("S1").unwrap().submodel("M1").unwrap();
        assert_eq!(
            submodel.endpoints[0].security,
            Some(serde_json::json!({"profile": "tls"}))
        );
    }

    #[test]
    fn standalone_shell_gets_aas_suffix() {
        let directory =
            EndpointDirectory::new(vec![Endpoint::new("http", "http://device:5080")]).unwrap();
        let mut shell = ShellDescriptor::new("S1", "urn_example_s1")
            .with_submodel(SubmodelDescriptor::new("M1", "urn_example_m1"));

        directory.register_shell(&mut shell);

        assert_eq!(shell.endpoints[0].address, "http://device:5080/aas");
        assert_eq!(
            shell.submodel("M1").unwrap().endpoints[0].address,
            "http://device:5080/aas/submodels/M1/submodel"
        );
    }

    #[test]
    fn submodel_repository_derivation() {
        let directory =
            EndpointDirectory::new(vec![Endpoint::new("http", "http://host:80")]).unwrap();
        let mut repo = SubmodelRepositoryDescriptor::new()
            .with_submodel(SubmodelDescriptor::new("M1", "urn_example_m1"));

        directory.register_submodel_repository(&mut repo);

        assert_eq!(repo.endpoints[0].address, "http://host:80/submodels");
        assert_eq!(
            repo.submodels[0].endpoints[0].address,
            "http://host:80/submodels/M1/submodel"
        );
    }

    #[test]
    fn re_registration_replaces_derived_endpoints() {
        let mut registry = two_level_registry();

        EndpointDirectory::new(vec![Endpoint::new("http", "http://old:80")])
            .unwrap()
            .register_shell_repository(&mut registry);
        EndpointDirectory::new(vec![Endpoint::new("http", "http://new:80")])
            .unwrap()
            .register_shell_repository(&mut registry);

        let shell = registry.shell("S1").unwrap();
        assert_eq!(shell.endpoints.len(), 1);
        assert_eq!(shell.endpoints[0].address, "http://new:80/shells/S1/aas");
    }

    #[test]
    fn empty_roots_are_a_configuration_error() {
        assert!(matches!(
            EndpointDirectory::new(Vec::new()),
            Err(DirectoryError::NoUsableEndpoints)
        ));
    }

    #[test]
    fn config_with_only_malformed_urls_is_an_error() {
        let config = HostConfig::new(["not a url"]);
        let interfaces = FixedInterfaces(Vec::new());
        assert!(matches!(
            EndpointDirectory::from_config(&config, &interfaces),
            Err(DirectoryError::NoUsableEndpoints)
        ));
    }

    #[test]
    fn explicit_urls_skip_interface_expansion() {
        let config = HostConfig::new(["http://device:5080"]);
        let interfaces = FixedInterfaces(vec![IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9))]);

        let directory = EndpointDirectory::from_config(&config, &interfaces).unwrap();
        assert_eq!(directory.roots().len(), 1);
        assert_eq!(directory.roots()[0].address, "http://device:5080");
    }

    #[test]
    fn wildcard_host_expands_to_every_interface() {
        let config = HostConfig::new(["http://+:5080"]);
        let interfaces = FixedInterfaces(vec![
            IpAddr::V4(Ipv4Addr::new(192, 168, 0, 2)),
            IpAddr::V6(Ipv6Addr::LOCALHOST),
        ]);

        let directory = EndpointDirectory::from_config(&config, &interfaces).unwrap();
        let addresses: Vec<&str> = directory
            .roots()
            .iter()
            .map(|ep| ep.address.as_str())
            .collect();
        assert_eq!(
            addresses,
            vec!["http://192.168.0.2:5080", "http://[::1]:5080"]
        );
    }

    #[test]
    fn wildcard_with_no_interfaces_is_an_error() {
        let config = HostConfig::new(["http://+:5080"]);
        let interfaces = FixedInterfaces(Vec::new());
        assert!(matches!(
            EndpointDirectory::from_config(&config, &interfaces),
            Err(DirectoryError::NoUsableEndpoints)
        ));
    }
}
