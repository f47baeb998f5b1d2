//! Element model for the twinreg resource hierarchy.
//!
//! This layer defines what lives at the leaves of the tree:
//! - [`ElementValue`] / [`DataType`]: the boxed-value-plus-type-tag view
//!   used at the transport boundary.
//! - [`Property`]: live get/set indirection with synchronous change
//!   notification and scoped subscriptions.
//! - Wire envelopes for shells, submodels, and elements, decoded through
//!   an explicit [`ModelTypeRegistry`].
//! - The operation invocation protocol: requests, correlation tokens,
//!   and the [`InvocationList`] outcome table.

mod element;
mod error;
mod invocation;
mod message;
pub mod model_type;
mod property;
mod value;

pub use element::{
    ElementCollection, OperationElement, OperationVariable, PropertyElement, Shell, Submodel,
    SubmodelElement,
};
pub use error::{InvocationError, ModelError, ValueError};
pub use invocation::{
    CallbackResponse, InvocationList, InvocationRecord, InvocationRequest, InvocationState,
    OperationHandler,
};
pub use message::{Message, Severity};
pub use model_type::{ElementFactory, ModelTypeRegistry};
pub use property::{
    GetHandler, Property, SetHandler, Subscription, TypedProperty, ValueChange,
};
pub use value::{DataType, ElementValue};
