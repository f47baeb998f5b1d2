//! Operation invocation protocol types and correlation bookkeeping.
//!
//! An asynchronous invocation returns immediately with a correlation
//! token (`request_id`); its outcome is recorded in an
//! [`InvocationList`] and probed non-blockingly. The list owns no
//! threads: hosts drive execution and report outcomes.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::element::OperationVariable;
use crate::error::InvocationError;
use crate::message::Message;

/// Arguments for invoking an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRequest {
    pub request_id: String,
    #[serde(default)]
    pub input_arguments: Vec<OperationVariable>,
    /// Server-side execution timeout in milliseconds, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl InvocationRequest {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            input_arguments: Vec::new(),
            timeout: None,
        }
    }

    pub fn with_argument(mut self, argument: OperationVariable) -> Self {
        self.input_arguments.push(argument);
        self
    }
}

/// Immediate answer to an asynchronous invocation: the correlation token
/// to probe with, and optionally where results will be published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackResponse {
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// State of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvocationState {
    Pending,
    Completed,
    Failed,
}

/// Outcome record of one invocation, keyed by its correlation token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRecord {
    pub request_id: String,
    pub state: InvocationState,
    #[serde(default)]
    pub output_arguments: Vec<OperationVariable>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl InvocationRecord {
    pub fn pending(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            state: InvocationState::Pending,
            output_arguments: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn completed(request_id: impl Into<String>, outputs: Vec<OperationVariable>) -> Self {
        Self {
            request_id: request_id.into(),
            state: InvocationState::Completed,
            output_arguments: outputs,
            messages: Vec::new(),
        }
    }

    pub fn failed(request_id: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            request_id: request_id.into(),
            state: InvocationState::Failed,
            output_arguments: Vec::new(),
            messages,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == InvocationState::Pending
    }

    pub fn is_completed(&self) -> bool {
        self.state == InvocationState::Completed
    }

    pub fn is_failed(&self) -> bool {
        self.state == InvocationState::Failed
    }
}

/// Executes an operation: input arguments in, output arguments or
/// diagnostics out.
pub type OperationHandler =
    Box<dyn Fn(&[OperationVariable]) -> Result<Vec<OperationVariable>, Vec<Message>> + Send + Sync>;

/// Correlation table of invocation outcomes.
///
/// Records transition Pending → Completed or Pending → Failed and are
/// retained until explicitly removed. Concurrent invocations are
/// independent entries; the list imposes no ordering between them.
#[derive(Default)]
pub struct InvocationList {
    records: Mutex<HashMap<String, InvocationRecord>>,
}

/// Each table operation is atomic, so a record map behind a poisoned
/// lock is still consistent.
fn relock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InvocationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new pending invocation under its correlation token.
    pub fn issue(&self, request_id: &str) -> Result<InvocationRecord, InvocationError> {
        let mut records = relock(&self.records);
        if records.contains_key(request_id) {
            return Err(InvocationError::DuplicateRequest {
                request_id: request_id.to_string(),
            });
        }
        let record = InvocationRecord::pending(request_id);
        records.insert(request_id.to_string(), record.clone());
        Ok(record)
    }

    /// Transition a pending invocation to Completed.
    pub fn complete(
        &self,
        request_id: &str,
        outputs: Vec<OperationVariable>,
    ) -> Result<(), InvocationError> {
        self.finish(request_id, InvocationRecord::completed(request_id, outputs))
    }

    /// Transition a pending invocation to Failed.
    pub fn fail(&self, request_id: &str, messages: Vec<Message>) -> Result<(), InvocationError> {
        self.finish(request_id, InvocationRecord::failed(request_id, messages))
    }

    fn finish(&self, request_id: &str, terminal: InvocationRecord) -> Result<(), InvocationError> {
        let mut records = relock(&self.records);
        let record = records
            .get_mut(request_id)
            .ok_or_else(|| InvocationError::UnknownRequest {
                request_id: request_id.to_string(),
            })?;
        if !record.is_pending() {
            return Err(InvocationError::AlreadyTerminal {
                request_id: request_id.to_string(),
            });
        }
        *record = terminal;
        Ok(())
    }

    /// Non-blocking probe: the current record for a token, or `None` for
    /// an unknown one.
    pub fn probe(&self, request_id: &str) -> Option<InvocationRecord> {
        relock(&self.records).get(request_id).cloned()
    }

    /// Drop a record from the table.
    pub fn remove(&self, request_id: &str) -> Option<InvocationRecord> {
        relock(&self.records).remove(request_id)
    }

    /// Issue, run the handler to completion on the calling thread, and
    /// record the terminal outcome. Hosts wanting asynchrony call this
    /// from a worker of their own.
    pub fn execute(
        &self,
        request: &InvocationRequest,
        handler: &OperationHandler,
    ) -> Result<InvocationRecord, InvocationError> {
        self.issue(&request.request_id)?;
        match handler(&request.input_arguments) {
            Ok(outputs) => self.complete(&request.request_id, outputs)?,
            Err(messages) => self.fail(&request.request_id, messages)?,
        }
        self.probe(&request.request_id)
            .ok_or_else(|| InvocationError::UnknownRequest {
                request_id: request.request_id.clone(),
            })
    }
}
