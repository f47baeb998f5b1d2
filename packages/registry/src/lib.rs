//! Endpoint derivation and descriptor registry.
//!
//! Descriptors mirror the resource hierarchy's addressing information;
//! the [`EndpointDirectory`] derives every level's endpoints from a small
//! set of root endpoints, and the [`DescriptorStore`] keeps registrations
//! in a path-addressable tree.
//!
//! # Example
//!
//! ```rust
//! use twinreg_registry::{
//!     Endpoint, EndpointDirectory, RegistryDescriptor, ShellDescriptor, SubmodelDescriptor,
//! };
//!
//! let directory =
//!     EndpointDirectory::new(vec![Endpoint::new("http", "http://host:80")]).unwrap();
//! let mut registry = RegistryDescriptor::new().with_shell(
//!     ShellDescriptor::new("S1", "urn_example_s1")
//!         .with_submodel(SubmodelDescriptor::new("M1", "urn_example_m1")),
//! );
//!
//! directory.register_shell_repository(&mut registry);
//!
//! let submodel = registry.shell("S1").unwrap().submodel("M1").unwrap();
//! assert_eq!(
//!     submodel.endpoints[0].address,
//!     "http://host:80/shells/S1/aas/submodels/M1/submodel"
//! );
//! ```

mod config;
mod descriptor;
mod directory;
mod endpoint;
mod error;
mod interfaces;
mod store;

pub use config::HostConfig;
pub use descriptor::{
    RegistryDescriptor, ShellDescriptor, SubmodelDescriptor, SubmodelRepositoryDescriptor,
};
pub use directory::{
    shell_endpoint, submodel_endpoint, submodel_in_repository_endpoint, with_suffix,
    EndpointDirectory, ResourceKind, WILDCARD_HOST,
};
pub use endpoint::Endpoint;
pub use error::{DirectoryError, StoreError};
pub use interfaces::{NetworkInterfaces, OsNetworkInterfaces};
pub use store::DescriptorStore;
