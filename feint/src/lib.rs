//! # feint - Request-Interception Test Double
//!
//! `feint` swaps the dispatcher of a registered transport adapter for a fake
//! one. While enabled, requests whose url matches a configured response are
//! answered locally; everything else passes through to the real transport.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use feint::prelude::*;
//! use serde_json::json;
//!
//! let registry = InMemoryRegistry::new();
//! let adapter = registry.register(AJAX, Adapter::new("jQuery", real_transport));
//!
//! let test_adapter = TestAdapter::new(
//!     &registry,
//!     None,
//!     AdapterConfig::new()
//!         .with_response(Response::for_url("/users").with_data(json!([{ "id": 1 }]))),
//! )?;
//!
//! test_adapter.enable();
//! adapter.ajax(Request::new("/users/42").on_success(|data, text_status, xhr| {
//!     assert_eq!(data, &json!([{ "id": 1 }]));
//!     assert_eq!(text_status, "200 - OK");
//!     assert_eq!(xhr.status, 200);
//! }))?;
//! test_adapter.disable();
//! ```
//!
//! ## Configuration
//!
//! A configuration is either an [`AdapterConfig`] or a bare list of JSON
//! results, which becomes the default response for every request. Both forms
//! can also be loaded from JSON, see [`TestAdapterConfig::from_json_str`].

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod binding;
mod config;
mod engine;
mod matching;

pub use binding::{TestAdapter, TestAdapterBuilder};
pub use config::{AdapterConfig, ConfigHandle, Hooks, TestAdapterConfig};
pub use engine::{FakeDispatcher, synthesize};
pub use matching::match_response;

pub use feint_core::{
    // Adapters
    AJAX,
    Adapter,
    AdapterRegistry,
    // Hooks
    AfterErrorHook,
    AfterSuccessHook,
    BeforeHook,
    // Errors
    BoxError,
    ConfigurationError,
    // Response defaults
    DEFAULT_ERROR_MESSAGE,
    DEFAULT_STATUS,
    DEFAULT_STATUS_TEXT,
    DispatchError,
    // Dispatch
    Dispatcher,
    ErrorCallback,
    FeintError,
    MatcherError,
    NoopHook,
    Outcome,
    Request,
    Response,
    SharedDispatcher,
    SuccessCallback,
    TransportError,
    TryMatcher,
    // Matching
    UrlMatcher,
    Xhr,
    extend,
    same_dispatcher,
};

/// Adapter registries.
pub mod registry {
    #![allow(clippy::wildcard_imports)]
    pub use feint_std::registry::*;
}

/// Standard url matchers.
pub mod matchers {
    #![allow(clippy::wildcard_imports)]
    pub use feint_std::matchers::*;
}

/// Standard hook implementations.
pub mod hooks {
    #![allow(clippy::wildcard_imports)]
    pub use feint_std::hooks::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use feint_std::testing::*;
}

/// Prelude module - common imports for feint.
///
/// # Usage
///
/// ```rust,ignore
/// use feint::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        AJAX, Adapter, AdapterConfig, AdapterRegistry, AfterErrorHook, AfterSuccessHook,
        BeforeHook, ConfigurationError, DispatchError, Dispatcher, Outcome, Request, Response,
        TestAdapter, TestAdapterConfig, TransportError, UrlMatcher, Xhr,
        registry::InMemoryRegistry,
    };
}
