//! Request descriptors.
//!
//! A [`Request`] is what a caller hands to an adapter: a url, optional success
//! and error callbacks, and whatever adapter-specific fields the transport
//! understands. Cloning a request is shallow; callbacks are shared handles.

use crate::{
    merge::extend,
    response::{Outcome, TransportError, Xhr},
};
use serde_json::{Map, Value};
use std::{fmt, sync::Arc};

/// Callback invoked on the success channel with `(data, text_status, xhr)`.
pub type SuccessCallback = Arc<dyn Fn(&Value, &str, &Xhr) + Send + Sync>;

/// Callback invoked on the error channel with `(xhr, text_status, error)`.
pub type ErrorCallback = Arc<dyn Fn(&Xhr, &str, &TransportError) + Send + Sync>;

/// An outgoing request.
///
/// # Example
///
/// ```rust,ignore
/// let request = Request::new("api/Customers")
///     .with_field("type", "GET")
///     .on_success(|data, _status, _xhr| println!("{data}"))
///     .on_error(|xhr, _status, err| eprintln!("{} {err}", xhr.status));
/// ```
#[derive(Clone, Default)]
pub struct Request {
    url: Option<String>,
    success: Option<SuccessCallback>,
    error: Option<ErrorCallback>,
    fields: Map<String, Value>,
}

impl Request {
    /// Create a request for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Set the success callback.
    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value, &str, &Xhr) + Send + Sync + 'static,
    {
        self.success = Some(Arc::new(callback));
        self
    }

    /// Set the error callback.
    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Xhr, &str, &TransportError) + Send + Sync + 'static,
    {
        self.error = Some(Arc::new(callback));
        self
    }

    /// Add an adapter-specific field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Shallow-merge adapter-specific fields.
    pub fn with_fields(mut self, fields: &Map<String, Value>) -> Self {
        extend(&mut self.fields, fields);
        self
    }

    /// The url, if one was given and it is not empty.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    /// Replace the url.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = Some(url.into());
    }

    /// Look up an adapter-specific field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All adapter-specific fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The success callback, if any.
    pub fn success(&self) -> Option<&SuccessCallback> {
        self.success.as_ref()
    }

    /// The error callback, if any.
    pub fn error(&self) -> Option<&ErrorCallback> {
        self.error.as_ref()
    }

    /// Replace the success callback.
    pub fn set_success(&mut self, callback: SuccessCallback) {
        self.success = Some(callback);
    }

    /// Replace the error callback.
    pub fn set_error(&mut self, callback: ErrorCallback) {
        self.error = Some(callback);
    }

    /// Invoke the success callback, if any.
    pub fn succeed(&self, data: &Value, text_status: &str, xhr: &Xhr) {
        if let Some(callback) = &self.success {
            callback(data, text_status, xhr);
        }
    }

    /// Invoke the error callback, if any.
    pub fn fail(&self, xhr: &Xhr, text_status: &str, error: &TransportError) {
        if let Some(callback) = &self.error {
            callback(xhr, text_status, error);
        }
    }

    /// Deliver an outcome to whichever callback corresponds to it.
    pub fn complete(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Success {
                data,
                text_status,
                xhr,
            } => self.succeed(data, text_status, xhr),
            Outcome::Failure {
                xhr,
                text_status,
                error,
            } => self.fail(xhr, text_status, error),
        }
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("url", &self.url)
            .field("fields", &self.fields)
            .field("success", &self.success.is_some())
            .field("error", &self.error.is_some())
            .finish()
    }
}
