//! # Instrumentation Hooks
//!
//! Hooks observe every intercepted request without influencing it:
//!
//! - [`BeforeHook`] runs once per request, after the canned response has been
//!   chosen and before anything is dispatched.
//! - [`AfterSuccessHook`] runs on the success channel, strictly before the
//!   caller's own success callback.
//! - [`AfterErrorHook`] runs on the error channel, strictly before the
//!   caller's own error callback.
//!
//! Every hook receives the caller's original request and the matched response
//! (`None` when the request was passed through to the real transport).
//! Closures with the matching signature are hooks; [`NoopHook`] stands in for
//! absent ones.

use crate::{
    request::Request,
    response::{Response, TransportError, Xhr},
};
use serde_json::Value;

/// Runs before a request is dispatched.
pub trait BeforeHook: Send + Sync {
    /// Called with the caller's request and the matched response, if any.
    fn before(&self, request: &Request, response: Option<&Response>);
}

/// Runs when a request completes on the success channel.
pub trait AfterSuccessHook: Send + Sync {
    /// Called with the caller's request, the matched response, and the success arguments.
    fn after_success(
        &self,
        request: &Request,
        response: Option<&Response>,
        data: &Value,
        text_status: &str,
        xhr: &Xhr,
    );
}

/// Runs when a request completes on the error channel.
pub trait AfterErrorHook: Send + Sync {
    /// Called with the caller's request, the matched response, and the error arguments.
    fn after_error(
        &self,
        request: &Request,
        response: Option<&Response>,
        xhr: &Xhr,
        text_status: &str,
        error: &TransportError,
    );
}

impl<F> BeforeHook for F
where
    F: Fn(&Request, Option<&Response>) + Send + Sync,
{
    fn before(&self, request: &Request, response: Option<&Response>) {
        self(request, response)
    }
}

impl<F> AfterSuccessHook for F
where
    F: Fn(&Request, Option<&Response>, &Value, &str, &Xhr) + Send + Sync,
{
    fn after_success(
        &self,
        request: &Request,
        response: Option<&Response>,
        data: &Value,
        text_status: &str,
        xhr: &Xhr,
    ) {
        self(request, response, data, text_status, xhr)
    }
}

impl<F> AfterErrorHook for F
where
    F: Fn(&Request, Option<&Response>, &Xhr, &str, &TransportError) + Send + Sync,
{
    fn after_error(
        &self,
        request: &Request,
        response: Option<&Response>,
        xhr: &Xhr,
        text_status: &str,
        error: &TransportError,
    ) {
        self(request, response, xhr, text_status, error)
    }
}

/// A hook that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl BeforeHook for NoopHook {
    fn before(&self, _request: &Request, _response: Option<&Response>) {}
}

impl AfterSuccessHook for NoopHook {
    fn after_success(
        &self,
        _request: &Request,
        _response: Option<&Response>,
        _data: &Value,
        _text_status: &str,
        _xhr: &Xhr,
    ) {
    }
}

impl AfterErrorHook for NoopHook {
    fn after_error(
        &self,
        _request: &Request,
        _response: Option<&Response>,
        _xhr: &Xhr,
        _text_status: &str,
        _error: &TransportError,
    ) {
    }
}
