//! Logging hooks - observability for faked requests.

use feint_core::{AfterErrorHook, AfterSuccessHook, BeforeHook, Request, Response, TransportError, Xhr};
use serde_json::Value;

/// Hooks that log every intercepted request and its completion.
///
/// Implements all three hook traits, so one value can be installed as
/// `before`, `after_success` and `after_error` at once. Logs go through
/// `tracing` when the `tracing` feature is enabled and are dropped otherwise.
///
/// # Example
///
/// ```rust,ignore
/// use feint::{AdapterConfig, hooks::LoggingHooks};
///
/// let config = AdapterConfig::new()
///     .before(LoggingHooks::named("customers"))
///     .after_success(LoggingHooks::named("customers"))
///     .after_error(LoggingHooks::named("customers"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingHooks {
    name: &'static str,
}

impl LoggingHooks {
    /// Create logging hooks with a default name.
    pub fn new() -> Self {
        Self { name: "feint" }
    }

    /// Create logging hooks with a custom name.
    ///
    /// The name is used in log messages to identify the test double.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log messages.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl BeforeHook for LoggingHooks {
    fn before(&self, request: &Request, response: Option<&Response>) {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                name = %self.name,
                url = ?request.url(),
                canned = response.is_some(),
                pattern = ?response.and_then(|r| r.url.as_deref()),
                "intercepted request"
            );
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = (self.name, request, response);
        }
    }
}

impl AfterSuccessHook for LoggingHooks {
    fn after_success(
        &self,
        request: &Request,
        response: Option<&Response>,
        data: &Value,
        text_status: &str,
        xhr: &Xhr,
    ) {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                name = %self.name,
                url = ?request.url(),
                canned = response.is_some(),
                status = xhr.status,
                text_status,
                data = %data,
                "request succeeded"
            );
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = (self.name, request, response, data, text_status, xhr);
        }
    }
}

impl AfterErrorHook for LoggingHooks {
    fn after_error(
        &self,
        request: &Request,
        response: Option<&Response>,
        xhr: &Xhr,
        text_status: &str,
        error: &TransportError,
    ) {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                name = %self.name,
                url = ?request.url(),
                canned = response.is_some(),
                status = xhr.status,
                text_status,
                error = %error,
                "request failed"
            );
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = (self.name, request, response, xhr, text_status, error);
        }
    }
}
