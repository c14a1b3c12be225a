//! Testing utilities for feint.
//!
//! This module provides utilities to make asserting on faked traffic easier.
//!
//! # Features
//!
//! - [`CallLog`]: An ordered, shared log of named events
//! - [`RecordingDispatcher`]: A stand-in "real" transport that records the
//!   requests it receives and can be programmed to complete them
//! - [`HookRecorder`]: Records every hook invocation with its arguments

use feint_core::{
    AfterErrorHook, AfterSuccessHook, BeforeHook, DispatchError, Dispatcher, Outcome, Request,
    Response, TransportError, Xhr,
};
use serde_json::Value;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Call Log
// ============================================================================

/// An ordered log of named events shared between hooks and callbacks.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// let request = Request::new("api/Customers").on_success(log.success_callback("success"));
/// let hooks = HookRecorder::with_log(log.clone());
///
/// // ... dispatch ...
///
/// assert_eq!(log.entries(), vec!["before", "afterSuccess", "success"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    /// A snapshot of all entries, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// A success callback that appends `tag` when invoked.
    pub fn success_callback(
        &self,
        tag: &'static str,
    ) -> impl Fn(&Value, &str, &Xhr) + Send + Sync + use<> {
        let log = self.clone();
        move |_, _, _| log.push(tag)
    }

    /// An error callback that appends `tag` when invoked.
    pub fn error_callback(
        &self,
        tag: &'static str,
    ) -> impl Fn(&Xhr, &str, &TransportError) + Send + Sync + use<> {
        let log = self.clone();
        move |_, _, _| log.push(tag)
    }
}

// ============================================================================
// Recording Dispatcher
// ============================================================================

#[derive(Debug, Clone)]
enum Reply {
    Record,
    Complete(Outcome),
    Refuse(String),
}

/// A dispatcher that records every request it receives.
///
/// By default it only records. It can be programmed to complete each request
/// synchronously with an [`Outcome`], or to refuse requests with a
/// [`DispatchError::Transport`].
///
/// # Example
///
/// ```rust,ignore
/// let real = RecordingDispatcher::new();
/// let adapter = Adapter::new("jQuery", real.clone());
///
/// adapter.ajax(Request::new("api/Customers"))?;
///
/// assert_eq!(real.count(), 1);
/// assert_eq!(real.last().unwrap().url(), Some("api/Customers"));
/// ```
#[derive(Clone)]
pub struct RecordingDispatcher {
    requests: Arc<Mutex<Vec<Request>>>,
    reply: Arc<Mutex<Reply>>,
}

impl RecordingDispatcher {
    /// Create a dispatcher that only records.
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(Mutex::new(Reply::Record)),
        }
    }

    /// Create a dispatcher that completes every request with `outcome`.
    pub fn replying(outcome: Outcome) -> Self {
        let dispatcher = Self::new();
        dispatcher.set_reply(outcome);
        dispatcher
    }

    /// Complete subsequent requests with `outcome`.
    pub fn set_reply(&self, outcome: Outcome) {
        *self.reply.lock().unwrap() = Reply::Complete(outcome);
    }

    /// Refuse subsequent requests with a transport error.
    pub fn set_refusal(&self, message: impl Into<String>) {
        *self.reply.lock().unwrap() = Reply::Refuse(message.into());
    }

    /// Go back to recording only.
    pub fn clear_reply(&self) {
        *self.reply.lock().unwrap() = Reply::Record;
    }

    /// Recorded requests, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request.
    pub fn last(&self) -> Option<Request> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Number of requests received.
    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Forget all recorded requests.
    pub fn clear(&self) {
        self.requests.lock().unwrap().clear();
    }
}

impl Default for RecordingDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher for RecordingDispatcher {
    fn dispatch(&self, request: Request) -> Result<(), DispatchError> {
        self.requests.lock().unwrap().push(request.clone());

        let reply = self.reply.lock().unwrap().clone();
        match reply {
            Reply::Record => Ok(()),
            Reply::Complete(outcome) => {
                request.complete(&outcome);
                Ok(())
            }
            Reply::Refuse(message) => Err(DispatchError::Transport(message.into())),
        }
    }
}

// ============================================================================
// Hook Recorder
// ============================================================================

/// One recorded hook invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum HookCall {
    /// A `before` invocation.
    Before {
        /// Url of the caller's request.
        url: Option<String>,
        /// The matched response, if any.
        response: Option<Response>,
    },
    /// An `afterSuccess` invocation.
    AfterSuccess {
        /// Url of the caller's request.
        url: Option<String>,
        /// The matched response, if any.
        response: Option<Response>,
        /// Payload.
        data: Value,
        /// Text status.
        text_status: String,
        /// Transport result.
        xhr: Xhr,
    },
    /// An `afterError` invocation.
    AfterError {
        /// Url of the caller's request.
        url: Option<String>,
        /// The matched response, if any.
        response: Option<Response>,
        /// Transport result.
        xhr: Xhr,
        /// Text status.
        text_status: String,
        /// The error thrown.
        error: TransportError,
    },
}

/// Records every hook invocation.
///
/// Implements all three hook traits. Clones share the same record, so one
/// clone can be installed as each hook and another kept for assertions.
#[derive(Debug, Clone, Default)]
pub struct HookRecorder {
    calls: Arc<Mutex<Vec<HookCall>>>,
    befores: Arc<AtomicUsize>,
    log: Option<CallLog>,
}

impl HookRecorder {
    /// Create a recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder that also appends `before`, `afterSuccess` and
    /// `afterError` to a shared [`CallLog`].
    pub fn with_log(log: CallLog) -> Self {
        Self {
            log: Some(log),
            ..Self::default()
        }
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<HookCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of `before` invocations.
    pub fn before_count(&self) -> usize {
        self.befores.load(Ordering::SeqCst)
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
        self.befores.store(0, Ordering::SeqCst);
    }

    fn record(&self, tag: &'static str, call: HookCall) {
        if let Some(log) = &self.log {
            log.push(tag);
        }
        self.calls.lock().unwrap().push(call);
    }
}

impl BeforeHook for HookRecorder {
    fn before(&self, request: &Request, response: Option<&Response>) {
        self.befores.fetch_add(1, Ordering::SeqCst);
        self.record(
            "before",
            HookCall::Before {
                url: request.url().map(str::to_string),
                response: response.cloned(),
            },
        );
    }
}

impl AfterSuccessHook for HookRecorder {
    fn after_success(
        &self,
        request: &Request,
        response: Option<&Response>,
        data: &Value,
        text_status: &str,
        xhr: &Xhr,
    ) {
        self.record(
            "afterSuccess",
            HookCall::AfterSuccess {
                url: request.url().map(str::to_string),
                response: response.cloned(),
                data: data.clone(),
                text_status: text_status.to_string(),
                xhr: xhr.clone(),
            },
        );
    }
}

impl AfterErrorHook for HookRecorder {
    fn after_error(
        &self,
        request: &Request,
        response: Option<&Response>,
        xhr: &Xhr,
        text_status: &str,
        error: &TransportError,
    ) {
        self.record(
            "afterError",
            HookCall::AfterError {
                url: request.url().map(str::to_string),
                response: response.cloned(),
                xhr: xhr.clone(),
                text_status: text_status.to_string(),
                error: error.clone(),
            },
        );
    }
}
