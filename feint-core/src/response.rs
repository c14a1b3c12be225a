//! Canned responses and the transport results synthesized from them.
//!
//! - [`Response`] - A pre-authored stand-in for a real transport outcome
//! - [`Xhr`] - The transport-level result handed to callbacks
//! - [`TransportError`] - The "error thrown" value on the error path
//! - [`Outcome`] - Exactly one of the success or error channel

use crate::merge::extend;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Status used when a response does not declare one.
pub const DEFAULT_STATUS: i64 = 200;

/// Status text used when a response does not declare one.
pub const DEFAULT_STATUS_TEXT: &str = "200 - OK";

/// Message of the error handed to the error callback when a response does not
/// declare `errorThrown`.
pub const DEFAULT_ERROR_MESSAGE: &str = "fake ajax error";

/// The exception delivered to an error callback.
///
/// Deserializes from a plain string so fixtures can write
/// `"errorThrown": "connection reset"`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
#[serde(transparent)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Create a transport error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for TransportError {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_MESSAGE)
    }
}

impl From<&str> for TransportError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for TransportError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// A transport-level result, shaped after an `XMLHttpRequest`.
///
/// Keys that have no typed field are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Xhr {
    /// HTTP status code. Any integer; only `200..300` counts as success.
    pub status: i64,
    /// HTTP status text.
    pub status_text: String,
    /// Raw response body.
    pub response_text: String,
    /// Any other transport-specific fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Xhr {
    fn default() -> Self {
        Self {
            status: DEFAULT_STATUS,
            status_text: DEFAULT_STATUS_TEXT.to_string(),
            response_text: String::new(),
            extra: Map::new(),
        }
    }
}

impl Xhr {
    /// Create a transport result with the given status and status text.
    pub fn new(status: i64, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            ..Self::default()
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Look up a field by its wire name, typed fields included.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "status" => Some(Value::from(self.status)),
            "statusText" => Some(Value::from(self.status_text.as_str())),
            "responseText" => Some(Value::from(self.response_text.as_str())),
            _ => self.extra.get(key).cloned(),
        }
    }

    /// Shallow-merge `fields` over this result.
    ///
    /// `status`, `statusText` and `responseText` update the typed fields. A
    /// `status` that is not an integer (or a string holding one) is kept in
    /// `extra` and leaves the typed status untouched.
    pub fn overlay(&mut self, fields: &Map<String, Value>) {
        let mut rest = Map::new();
        for (key, value) in fields {
            match key.as_str() {
                "status" => match status_from_value(value) {
                    Some(status) => self.status = status,
                    None => {
                        rest.insert(key.clone(), value.clone());
                    }
                },
                "statusText" => self.status_text = text_from_value(value),
                "responseText" => self.response_text = text_from_value(value),
                _ => {
                    rest.insert(key.clone(), value.clone());
                }
            }
        }
        extend(&mut self.extra, &rest);
    }
}

fn status_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text_from_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A canned response.
///
/// Every field is optional; defaults are applied when a transport result is
/// synthesized. Field names follow the camelCase wire form when loaded from
/// JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Response {
    /// Url pattern compared against the request url.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Payload for the success path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// HTTP status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    /// HTTP status text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    /// Raw response body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,
    /// Text status passed to callbacks, defaults to the status text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_status: Option<String>,
    /// Fields overlaid on the synthesized transport result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xhr: Option<Map<String, Value>>,
    /// Force the error path regardless of status.
    pub is_error: bool,
    /// Error handed to the error callback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_thrown: Option<TransportError>,
}

impl Response {
    /// Create an empty response (a 200 with an empty sequence as data).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a response that applies to urls matching `pattern`.
    pub fn for_url(pattern: impl Into<String>) -> Self {
        Self {
            url: Some(pattern.into()),
            ..Self::default()
        }
    }

    /// Set the success payload.
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the HTTP status.
    pub fn with_status(mut self, status: i64) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the HTTP status text.
    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = Some(text.into());
        self
    }

    /// Set the raw response body.
    pub fn with_response_text(mut self, text: impl Into<String>) -> Self {
        self.response_text = Some(text.into());
        self
    }

    /// Set the text status passed to callbacks.
    pub fn with_text_status(mut self, text: impl Into<String>) -> Self {
        self.text_status = Some(text.into());
        self
    }

    /// Add a field to the transport result overlay.
    pub fn with_xhr_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.xhr
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Force the error path.
    pub fn as_error(mut self) -> Self {
        self.is_error = true;
        self
    }

    /// Set the error handed to the error callback.
    pub fn with_error_thrown(mut self, error: impl Into<TransportError>) -> Self {
        self.error_thrown = Some(error.into());
        self
    }

    /// The url pattern, empty when none was given.
    pub fn pattern(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    /// The success payload, an empty sequence when absent or null.
    pub fn resolved_data(&self) -> Value {
        match &self.data {
            Some(data) if !data.is_null() => data.clone(),
            _ => Value::Array(Vec::new()),
        }
    }

    /// The error for the error path, a generic fake error when absent.
    pub fn resolved_error(&self) -> TransportError {
        self.error_thrown.clone().unwrap_or_default()
    }
}

/// The synthesized result of a faked request.
///
/// Exactly one of the two channels fires per request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Delivered to the success callback as `(data, text_status, xhr)`.
    Success {
        /// Payload.
        data: Value,
        /// Text status.
        text_status: String,
        /// Transport result.
        xhr: Xhr,
    },
    /// Delivered to the error callback as `(xhr, text_status, error)`.
    Failure {
        /// Transport result.
        xhr: Xhr,
        /// Text status.
        text_status: String,
        /// The error thrown.
        error: TransportError,
    },
}

impl Outcome {
    /// Whether this is the success channel.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// The transport result on either channel.
    pub fn xhr(&self) -> &Xhr {
        match self {
            Outcome::Success { xhr, .. } | Outcome::Failure { xhr, .. } => xhr,
        }
    }

    /// The text status on either channel.
    pub fn text_status(&self) -> &str {
        match self {
            Outcome::Success { text_status, .. } | Outcome::Failure { text_status, .. } => {
                text_status
            }
        }
    }
}
