//! twinreg: a hierarchical digital-twin resource registry.
//!
//! Assets are modeled as shells containing submodels containing
//! elements. The hierarchy lives in a path-addressable tree
//! ([`tree`]), is advertised through descriptors whose endpoints are
//! derived from a handful of root addresses ([`registry`]), and is
//! accessed remotely over HTTP with uniform success/failure results
//! ([`client`]). Leaf values are typed properties with change
//! notification ([`model`]).
//!
//! # Deriving endpoints for a two-level hierarchy
//!
//! ```rust
//! use twinreg::registry::{
//!     Endpoint, EndpointDirectory, RegistryDescriptor, ShellDescriptor, SubmodelDescriptor,
//! };
//!
//! let directory =
//!     EndpointDirectory::new(vec![Endpoint::new("http", "http://host:80")]).unwrap();
//! let mut registry = RegistryDescriptor::new().with_shell(
//!     ShellDescriptor::new("S1", "urn_example_s1")
//!         .with_submodel(SubmodelDescriptor::new("M1", "urn_example_m1")),
//! );
//! directory.register_shell_repository(&mut registry);
//!
//! assert_eq!(
//!     registry.shell("S1").unwrap().endpoints[0].address,
//!     "http://host:80/shells/S1/aas"
//! );
//! ```
//!
//! # Watching a property
//!
//! ```rust
//! use twinreg::model::{DataType, ElementValue, Property};
//!
//! let mut speed = Property::new("Speed", DataType::Double);
//! let watch = speed.subscribe(|change| {
//!     assert_eq!(change.id_short, "Speed");
//! });
//! speed.set(Some(ElementValue::from_typed(&3.2).unwrap()));
//! watch.unsubscribe();
//! ```

pub use twinreg_client as client;
pub use twinreg_model as model;
pub use twinreg_registry as registry;
pub use twinreg_tree as tree;

pub use twinreg_client::{ClientConfig, Error, OperationInvoker, RegistryClient, ShellClient};
pub use twinreg_model::{
    DataType, ElementValue, InvocationList, InvocationRecord, InvocationRequest, Message,
    Property, SubmodelElement,
};
pub use twinreg_registry::{
    DescriptorStore, Endpoint, EndpointDirectory, HostConfig, RegistryDescriptor, ShellDescriptor,
    SubmodelDescriptor,
};
pub use twinreg_tree::{Path, PathTree};
