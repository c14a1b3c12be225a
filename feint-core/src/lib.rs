//! # feint-core
//!
//! Core contracts for the feint transport test double.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! transport adapters and registries that want to be fakeable without pulling
//! in the test double itself.
//!
//! # Pieces
//!
//! - [`Request`]: what a caller hands to an adapter, with success and error
//!   callbacks and pass-through transport fields.
//! - [`Dispatcher`]: the adapter's entry point for issuing a request. Real and
//!   fake transports are both dispatchers.
//! - [`Adapter`]: a named transport holding a swappable dispatcher slot.
//! - [`AdapterRegistry`]: looks adapters up by kind and name.
//! - [`Response`], [`Xhr`], [`Outcome`]: canned responses and the transport
//!   results synthesized from them.
//! - [`UrlMatcher`]: decides whether a response's pattern applies to a url.
//! - [`BeforeHook`], [`AfterSuccessHook`], [`AfterErrorHook`]: instrumentation.
//!
//! # Error Types
//!
//! - [`FeintError`] - Top-level error type
//! - [`ConfigurationError`] - Fatal test misconfiguration
//! - [`DispatchError`] - Failures to issue a request
//! - [`MatcherError`] - Per-candidate matcher faults

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod adapter;
mod dispatcher;
mod error;
mod hook;
mod matcher;
mod merge;
mod request;
mod response;

// Re-exports
pub use adapter::{AJAX, Adapter, AdapterRegistry};
pub use dispatcher::{Dispatcher, SharedDispatcher, same_dispatcher};
pub use error::{BoxError, ConfigurationError, DispatchError, FeintError, MatcherError};
pub use hook::{AfterErrorHook, AfterSuccessHook, BeforeHook, NoopHook};
pub use matcher::{TryMatcher, UrlMatcher};
pub use merge::extend;
pub use request::{ErrorCallback, Request, SuccessCallback};
pub use response::{
    DEFAULT_ERROR_MESSAGE, DEFAULT_STATUS, DEFAULT_STATUS_TEXT, Outcome, Response,
    TransportError, Xhr,
};
