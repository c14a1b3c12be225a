//! Dispatcher core trait.
//!
//! A [`Dispatcher`] is an adapter's entry point for issuing a request. The real
//! transport and the fake one are both dispatchers; an [`Adapter`](crate::Adapter)
//! holds whichever is currently installed.

use crate::{error::DispatchError, request::Request};
use std::sync::Arc;

/// Issues requests on behalf of an adapter.
///
/// Completion is reported through the request's callbacks. The returned
/// `Result` only carries failures to *issue* the request.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot dispatch requests",
    label = "missing `Dispatcher` implementation",
    note = "Implement `Dispatcher` or use a closure `Fn(Request) -> Result<(), DispatchError>`."
)]
pub trait Dispatcher: Send + Sync {
    /// Issue the request.
    fn dispatch(&self, request: Request) -> Result<(), DispatchError>;
}

impl<F> Dispatcher for F
where
    F: Fn(Request) -> Result<(), DispatchError> + Send + Sync,
{
    fn dispatch(&self, request: Request) -> Result<(), DispatchError> {
        self(request)
    }
}

/// A shared, type-erased dispatcher.
pub type SharedDispatcher = Arc<dyn Dispatcher>;

/// Whether two shared dispatchers are the same instance.
pub fn same_dispatcher(a: &SharedDispatcher, b: &SharedDispatcher) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
