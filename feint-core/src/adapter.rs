//! Transport adapters and the registry that owns them.

use crate::{
    dispatcher::{Dispatcher, SharedDispatcher, same_dispatcher},
    error::DispatchError,
    request::Request,
};
use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

/// Adapter kind for request transports.
pub const AJAX: &str = "ajax";

/// A named transport adapter with a swappable dispatcher slot.
///
/// Requests issued through [`Adapter::ajax`] go to whichever dispatcher is
/// installed at the time of the call.
pub struct Adapter {
    name: String,
    slot: RwLock<SharedDispatcher>,
}

impl Adapter {
    /// Create an adapter dispatching through `dispatcher`.
    pub fn new<D: Dispatcher + 'static>(name: impl Into<String>, dispatcher: D) -> Self {
        Self::from_shared(name, Arc::new(dispatcher))
    }

    /// Create an adapter from an already shared dispatcher.
    pub fn from_shared(name: impl Into<String>, dispatcher: SharedDispatcher) -> Self {
        Self {
            name: name.into(),
            slot: RwLock::new(dispatcher),
        }
    }

    /// The adapter's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The currently installed dispatcher.
    pub fn dispatcher(&self) -> SharedDispatcher {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Install `dispatcher`, returning the one it replaced.
    pub fn replace_dispatcher(&self, dispatcher: SharedDispatcher) -> SharedDispatcher {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        #[cfg(feature = "tracing")]
        tracing::trace!(adapter = %self.name, "replacing dispatcher");
        std::mem::replace(&mut *slot, dispatcher)
    }

    /// Whether `dispatcher` is the one currently installed.
    pub fn is_dispatching_through(&self, dispatcher: &SharedDispatcher) -> bool {
        same_dispatcher(
            &self.slot.read().unwrap_or_else(PoisonError::into_inner),
            dispatcher,
        )
    }

    /// Issue a request through the installed dispatcher.
    ///
    /// The slot lock is released before dispatching, so a dispatcher may swap
    /// the slot while it runs.
    pub fn ajax(&self, request: Request) -> Result<(), DispatchError> {
        let dispatcher = self.dispatcher();
        dispatcher.dispatch(request)
    }
}

impl fmt::Debug for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Looks up live adapter instances.
///
/// Returning the live instance matters: the test double mutates its slot.
pub trait AdapterRegistry: Send + Sync {
    /// Find the adapter of `kind` named `name`, or the kind's default when `name` is `None`.
    fn adapter_instance(&self, kind: &str, name: Option<&str>) -> Option<Arc<Adapter>>;
}

impl<T: AdapterRegistry + ?Sized> AdapterRegistry for Arc<T> {
    fn adapter_instance(&self, kind: &str, name: Option<&str>) -> Option<Arc<Adapter>> {
        (**self).adapter_instance(kind, name)
    }
}

impl<T: AdapterRegistry + ?Sized> AdapterRegistry for &T {
    fn adapter_instance(&self, kind: &str, name: Option<&str>) -> Option<Arc<Adapter>> {
        (**self).adapter_instance(kind, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> SharedDispatcher {
        let log = log.clone();
        Arc::new(move |request: Request| -> Result<(), DispatchError> {
            log.lock()
                .unwrap()
                .push(format!("{tag}:{}", request.url().unwrap_or_default()));
            Ok(())
        })
    }

    #[test]
    fn test_ajax_routes_through_installed_dispatcher() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let real = recording(&log, "real");
        let adapter = Adapter::from_shared("jQuery", real.clone());

        adapter.ajax(Request::new("a")).unwrap();
        let previous = adapter.replace_dispatcher(recording(&log, "fake"));
        adapter.ajax(Request::new("b")).unwrap();

        assert!(same_dispatcher(&previous, &real));
        assert_eq!(*log.lock().unwrap(), vec!["real:a", "fake:b"]);
    }

    #[test]
    fn test_is_dispatching_through() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let real = recording(&log, "real");
        let fake = recording(&log, "fake");
        let adapter = Adapter::from_shared("jQuery", real.clone());

        assert!(adapter.is_dispatching_through(&real));
        adapter.replace_dispatcher(fake.clone());
        assert!(adapter.is_dispatching_through(&fake));
        assert!(!adapter.is_dispatching_through(&real));
    }

    #[test]
    fn test_dispatcher_may_swap_slot_while_running() {
        let adapter = Arc::new(Adapter::new(
            "jQuery",
            |_: Request| -> Result<(), DispatchError> { Ok(()) },
        ));
        let weak = Arc::downgrade(&adapter);
        adapter.replace_dispatcher(Arc::new(move |_: Request| -> Result<(), DispatchError> {
            if let Some(adapter) = weak.upgrade() {
                adapter.replace_dispatcher(Arc::new(
                    |_: Request| -> Result<(), DispatchError> { Ok(()) },
                ));
            }
            Ok(())
        }));

        adapter.ajax(Request::new("a")).unwrap();
    }
}
