//! Error types for feint.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`FeintError`] - Top-level error type for all feint operations
//! - [`ConfigurationError`] - Test authoring mistakes, always surfaced to the caller
//! - [`DispatchError`] - Errors returned by a [`Dispatcher`](crate::Dispatcher)
//! - [`MatcherError`] - Faults raised by a url matcher for a single candidate
//!
//! Simulated transport failures are not errors in this sense. They travel through
//! the request's error callback as a [`TransportError`](crate::TransportError).

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all feint operations.
#[derive(Error, Debug)]
pub enum FeintError {
    /// The test double was misconfigured.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A dispatcher failed.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A url matcher failed.
    #[error("matcher error: {0}")]
    Matcher(#[from] MatcherError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors caused by a misconfigured test double.
///
/// These are fatal: they indicate a mistake in the test, not a simulated
/// transport failure.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The registry has no adapter of this kind and name.
    #[error(
        "no existing {kind} adapter `{}` to fake",
        .name.as_deref().unwrap_or("<default>")
    )]
    NoSuchAdapter {
        /// Adapter kind that was looked up (e.g. `ajax`).
        kind: String,
        /// Requested adapter name, `None` for the registry default.
        name: Option<String>,
    },

    /// The configuration is neither null, an array of results, nor a config object.
    #[error("test adapter config must be an object or an array of JSON results: {0}")]
    MalformedConfig(String),

    /// The configuration source was not valid JSON.
    #[error("invalid test adapter config JSON")]
    InvalidJson(#[from] serde_json::Error),
}

/// Errors that can be returned from a dispatch call.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The fake dispatcher could not resolve its configuration.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The underlying transport failed to issue the request.
    #[error("transport failed to issue request")]
    Transport(#[source] BoxError),
}

/// Errors raised by a url matcher while testing a single candidate.
#[derive(Error, Debug)]
pub enum MatcherError {
    /// The candidate's pattern could not be compiled.
    #[error("invalid url pattern `{pattern}`")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why it failed to compile.
        #[source]
        source: BoxError,
    },

    /// The candidate's route template could not be parsed.
    #[error("invalid route template `{route}`")]
    InvalidRoute {
        /// The offending route template.
        route: String,
        /// Why it was rejected.
        #[source]
        source: BoxError,
    },

    /// A custom matcher failed.
    #[error(transparent)]
    Custom(BoxError),
}

// Convenience conversions
impl From<BoxError> for FeintError {
    fn from(err: BoxError) -> Self {
        FeintError::Custom(err)
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Transport(err)
    }
}

impl From<BoxError> for MatcherError {
    fn from(err: BoxError) -> Self {
        MatcherError::Custom(err)
    }
}
