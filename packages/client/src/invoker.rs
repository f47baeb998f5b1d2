//! Invoker bound to one remote operation element.
//!
//! Wraps the shell client's invocation endpoints for a fixed target.
//! The synchronous path blocks until the remote side answers with a
//! terminal record; the asynchronous path returns a correlation token
//! immediately. There is no internal polling loop — a caller waiting for
//! completion re-probes with its own backoff. Concurrent invocations
//! against the same operation are independent.

use twinreg_model::{CallbackResponse, InvocationRecord, InvocationRequest};

use crate::shell_client::ShellClient;
use crate::Error;

pub struct OperationInvoker<'c> {
    client: &'c ShellClient,
    submodel_id: String,
    operation_path: String,
}

impl<'c> OperationInvoker<'c> {
    pub(crate) fn new(
        client: &'c ShellClient,
        submodel_id: impl Into<String>,
        operation_path: impl Into<String>,
    ) -> Self {
        Self {
            client,
            submodel_id: submodel_id.into(),
            operation_path: operation_path.into(),
        }
    }

    /// Invoke synchronously; the returned record is terminal.
    pub fn invoke(&self, request: &InvocationRequest) -> Result<InvocationRecord, Error> {
        self.client
            .invoke_operation(&self.submodel_id, &self.operation_path, request)
    }

    /// Invoke asynchronously; returns the correlation token to probe
    /// with while remote execution continues.
    pub fn invoke_async(&self, request: &InvocationRequest) -> Result<CallbackResponse, Error> {
        self.client
            .invoke_operation_async(&self.submodel_id, &self.operation_path, request)
    }

    /// Probe the invocation's current state once, without blocking.
    /// `Ok(None)` for an unknown token.
    pub fn result(&self, request_id: &str) -> Result<Option<InvocationRecord>, Error> {
        self.client
            .get_invocation_result(&self.submodel_id, &self.operation_path, request_id)
    }
}
