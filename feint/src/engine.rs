//! # Fake Dispatch Engine
//!
//! [`FakeDispatcher`] is what an enabled [`TestAdapter`](crate::TestAdapter)
//! installs in its adapter's dispatcher slot. For every request it:
//!
//! 1. clones the caller's request, leaving the original untouched;
//! 2. normalizes the current configuration (fatal if malformed);
//! 3. picks the first matching response, else the default response;
//! 4. wraps the clone's callbacks so each `after*` hook runs before the
//!    caller's own callback;
//! 5. runs `before`;
//! 6. with no response, forwards the clone to the original dispatcher;
//!    otherwise synthesizes an [`Outcome`] and completes the clone with it.

use crate::{
    config::{ConfigHandle, Hooks},
    matching::match_response,
};
use feint_core::{
    ConfigurationError, DEFAULT_STATUS, DEFAULT_STATUS_TEXT, DispatchError, Dispatcher,
    ErrorCallback, Outcome, Request, Response, SharedDispatcher, SuccessCallback, TransportError,
    UrlMatcher, Xhr,
};
use feint_std::matchers::RegexMatcher;
use serde_json::{Map, Value};
use std::{fmt, sync::Arc};

/// The dispatcher installed while a test adapter is enabled.
pub struct FakeDispatcher {
    config: ConfigHandle,
    original: SharedDispatcher,
    default_matcher: RegexMatcher,
}

struct Resolved {
    hooks: Hooks,
    response: Option<Arc<Response>>,
}

impl FakeDispatcher {
    /// Create a fake dispatcher reading `config` and falling back to `original`.
    pub fn new(config: ConfigHandle, original: SharedDispatcher) -> Self {
        Self {
            config,
            original,
            default_matcher: RegexMatcher::new(),
        }
    }

    /// The dispatcher requests pass through to when no response applies.
    pub fn original(&self) -> &SharedDispatcher {
        &self.original
    }

    /// The configuration read on every request.
    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    // The configuration lock is held only here, never while hooks or
    // callbacks run.
    fn resolve(&self, url: Option<&str>) -> Result<Resolved, ConfigurationError> {
        let guard = self.config.read();
        let config = guard.normalize()?;
        let matcher: &dyn UrlMatcher = match config.url_matcher.as_deref() {
            Some(matcher) => matcher,
            None => &self.default_matcher,
        };

        let response = match match_response(url, &config.responses, matcher) {
            Some(response) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(url = ?url, pattern = response.pattern(), "matched canned response");
                Some(response)
            }
            None => {
                #[cfg(feature = "tracing")]
                {
                    if config.default_response.is_some() {
                        tracing::debug!(url = ?url, "using default response");
                    }
                }
                config.default_response.as_ref()
            }
        };

        Ok(Resolved {
            hooks: config.hooks(),
            response: response.cloned().map(Arc::new),
        })
    }
}

impl Dispatcher for FakeDispatcher {
    fn dispatch(&self, request: Request) -> Result<(), DispatchError> {
        let original = Arc::new(request);
        let mut ajax = Request::clone(&original);

        let Resolved { hooks, response } = self.resolve(original.url())?;

        ajax.set_success(wrap_success(&original, &response, &hooks));
        ajax.set_error(wrap_error(&original, &response, &hooks));

        hooks.before.before(&original, response.as_deref());

        let Some(response) = response else {
            #[cfg(feature = "tracing")]
            tracing::debug!(url = ?original.url(), "no canned response; passing through");
            return self.original.dispatch(ajax);
        };

        ajax.complete(&synthesize(&response));
        Ok(())
    }
}

impl fmt::Debug for FakeDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeDispatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn wrap_success(
    original: &Arc<Request>,
    response: &Option<Arc<Response>>,
    hooks: &Hooks,
) -> SuccessCallback {
    let (original, response) = (original.clone(), response.clone());
    let hook = hooks.after_success.clone();
    Arc::new(move |data: &Value, text_status: &str, xhr: &Xhr| {
        hook.after_success(&original, response.as_deref(), data, text_status, xhr);
        original.succeed(data, text_status, xhr);
    })
}

fn wrap_error(
    original: &Arc<Request>,
    response: &Option<Arc<Response>>,
    hooks: &Hooks,
) -> ErrorCallback {
    let (original, response) = (original.clone(), response.clone());
    let hook = hooks.after_error.clone();
    Arc::new(move |xhr: &Xhr, text_status: &str, error: &TransportError| {
        hook.after_error(&original, response.as_deref(), xhr, text_status, error);
        original.fail(xhr, text_status, error);
    })
}

/// Synthesize the transport result for a canned response.
///
/// Unset, zero and empty values fall back to the defaults: status 200, status
/// text `"200 - OK"`, empty response text. `xhr` fields are then overlaid, and
/// the text status defaults to the resulting status text. The error channel is
/// chosen when `is_error` is set or the status is outside `200..300`.
pub fn synthesize(response: &Response) -> Outcome {
    let mut xhr = Xhr {
        status: response
            .status
            .filter(|status| *status != 0)
            .unwrap_or(DEFAULT_STATUS),
        status_text: non_empty(&response.status_text).unwrap_or(DEFAULT_STATUS_TEXT).to_string(),
        response_text: non_empty(&response.response_text).unwrap_or_default().to_string(),
        extra: Map::new(),
    };
    if let Some(overlay) = &response.xhr {
        xhr.overlay(overlay);
    }
    let text_status = non_empty(&response.text_status)
        .map(str::to_string)
        .unwrap_or_else(|| xhr.status_text.clone());

    if response.is_error || !xhr.is_success() {
        Outcome::Failure {
            xhr,
            text_status,
            error: response.resolved_error(),
        }
    } else {
        Outcome::Success {
            data: response.resolved_data(),
            text_status,
            xhr,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
