//! Adapter registry binding.

use crate::{
    config::{ConfigHandle, TestAdapterConfig},
    engine::FakeDispatcher,
};
use feint_core::{
    AJAX, Adapter, AdapterRegistry, ConfigurationError, SharedDispatcher, same_dispatcher,
};
use std::{fmt, sync::Arc};

/// A test double bound to one transport adapter.
///
/// Construction captures the adapter's current dispatcher. [`enable`](Self::enable)
/// installs the fake dispatcher in its place and [`disable`](Self::disable)
/// puts the captured one back. Both are idempotent.
///
/// # Example
///
/// ```rust,ignore
/// let test_adapter = TestAdapter::new(
///     &registry,
///     None,
///     AdapterConfig::new()
///         .with_response(Response::for_url("Customers").with_data(json!([{ "id": 1 }]))),
/// )?;
///
/// test_adapter.enable();
/// adapter.ajax(Request::new("api/Customers").on_success(|data, _, _| {
///     assert_eq!(data, &json!([{ "id": 1 }]));
/// }))?;
/// test_adapter.disable();
/// ```
pub struct TestAdapter {
    adapter: Arc<Adapter>,
    original: SharedDispatcher,
    fake: SharedDispatcher,
    config: ConfigHandle,
}

impl TestAdapter {
    /// Bind to the ajax adapter named `adapter_name` (the registry's default
    /// when `None`).
    ///
    /// Fails with [`ConfigurationError::NoSuchAdapter`] when the registry has
    /// no such adapter.
    pub fn new<R>(
        registry: &R,
        adapter_name: Option<&str>,
        config: impl Into<TestAdapterConfig>,
    ) -> Result<Self, ConfigurationError>
    where
        R: AdapterRegistry + ?Sized,
    {
        let adapter = registry
            .adapter_instance(AJAX, adapter_name)
            .ok_or_else(|| ConfigurationError::NoSuchAdapter {
                kind: AJAX.to_string(),
                name: adapter_name.map(str::to_string),
            })?;

        let original = adapter.dispatcher();
        let config = ConfigHandle::new(config);
        let fake: SharedDispatcher =
            Arc::new(FakeDispatcher::new(config.clone(), original.clone()));

        Ok(Self {
            adapter,
            original,
            fake,
            config,
        })
    }

    /// Create a builder.
    pub fn builder() -> TestAdapterBuilder {
        TestAdapterBuilder::default()
    }

    /// Route the adapter's requests through the fake dispatcher.
    pub fn enable(&self) {
        let previous = self.adapter.replace_dispatcher(self.fake.clone());
        if same_dispatcher(&previous, &self.fake) {
            return;
        }
        if !same_dispatcher(&previous, &self.original) {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                adapter = %self.adapter.name(),
                "enabling over a dispatcher this test adapter did not capture; last enable wins"
            );
        }
        #[cfg(feature = "tracing")]
        tracing::info!(adapter = %self.adapter.name(), "test adapter enabled");
    }

    /// Restore the dispatcher captured at construction.
    pub fn disable(&self) {
        let previous = self.adapter.replace_dispatcher(self.original.clone());
        if same_dispatcher(&previous, &self.original) {
            return;
        }
        if !same_dispatcher(&previous, &self.fake) {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                adapter = %self.adapter.name(),
                "disabling replaced a dispatcher this test adapter did not install"
            );
        }
        #[cfg(feature = "tracing")]
        tracing::info!(adapter = %self.adapter.name(), "test adapter disabled");
    }

    /// Whether the adapter currently dispatches through this test adapter.
    pub fn is_enabled(&self) -> bool {
        self.adapter.is_dispatching_through(&self.fake)
    }

    /// The bound adapter.
    pub fn adapter(&self) -> &Arc<Adapter> {
        &self.adapter
    }

    /// The dispatcher captured at construction.
    pub fn original_dispatcher(&self) -> &SharedDispatcher {
        &self.original
    }

    /// A snapshot of the current configuration.
    pub fn config(&self) -> TestAdapterConfig {
        self.config.get()
    }

    /// Replace the configuration. Applies from the next request on.
    pub fn set_config(&self, config: impl Into<TestAdapterConfig>) {
        self.config.set(config);
    }

    /// Mutate the configuration in place. Applies from the next request on.
    pub fn update_config<T>(&self, f: impl FnOnce(&mut TestAdapterConfig) -> T) -> T {
        self.config.update(f)
    }

    /// A shared handle to the configuration, e.g. for hooks that reconfigure.
    pub fn config_handle(&self) -> ConfigHandle {
        self.config.clone()
    }
}

impl fmt::Debug for TestAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestAdapter")
            .field("adapter", &self.adapter.name())
            .field("enabled", &self.is_enabled())
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for a [`TestAdapter`].
#[derive(Debug, Default)]
pub struct TestAdapterBuilder {
    adapter_name: Option<String>,
    config: TestAdapterConfig,
}

impl TestAdapterBuilder {
    /// Bind to the adapter with this name instead of the registry default.
    pub fn adapter(mut self, name: impl Into<String>) -> Self {
        self.adapter_name = Some(name.into());
        self
    }

    /// Set the initial configuration.
    pub fn config(mut self, config: impl Into<TestAdapterConfig>) -> Self {
        self.config = config.into();
        self
    }

    /// Resolve the adapter and build the test adapter.
    pub fn build<R>(self, registry: &R) -> Result<TestAdapter, ConfigurationError>
    where
        R: AdapterRegistry + ?Sized,
    {
        TestAdapter::new(registry, self.adapter_name.as_deref(), self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdapterConfig;
    use feint_core::{DispatchError, Request};
    use feint_std::registry::InMemoryRegistry;

    fn registry() -> InMemoryRegistry {
        let registry = InMemoryRegistry::new();
        registry.register(
            AJAX,
            Adapter::new("jQuery", |_: Request| -> Result<(), DispatchError> { Ok(()) }),
        );
        registry
    }

    #[test]
    fn test_missing_adapter_fails_construction() {
        let err = TestAdapter::new(&registry(), Some("angular"), AdapterConfig::new()).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::NoSuchAdapter { ref kind, name: Some(ref name) }
                if kind == "ajax" && name == "angular"
        ));

        let empty = InMemoryRegistry::new();
        let err = TestAdapter::builder().build(&empty).unwrap_err();
        assert!(matches!(err, ConfigurationError::NoSuchAdapter { name: None, .. }));
    }

    #[test]
    fn test_enable_disable_toggle_slot() {
        let registry = registry();
        let test_adapter = TestAdapter::builder().adapter("jQuery").build(&registry).unwrap();
        let adapter = test_adapter.adapter().clone();

        assert!(!test_adapter.is_enabled());
        test_adapter.enable();
        assert!(test_adapter.is_enabled());
        assert!(!adapter.is_dispatching_through(test_adapter.original_dispatcher()));
        test_adapter.disable();
        assert!(!test_adapter.is_enabled());
        assert!(adapter.is_dispatching_through(test_adapter.original_dispatcher()));
    }

    #[test]
    fn test_disable_before_enable_is_noop() {
        let registry = registry();
        let test_adapter = TestAdapter::new(&registry, None, None::<AdapterConfig>).unwrap();

        test_adapter.disable();

        assert!(
            test_adapter
                .adapter()
                .is_dispatching_through(test_adapter.original_dispatcher())
        );
    }

    #[test]
    fn test_config_accessors() {
        let registry = registry();
        let test_adapter = TestAdapter::new(&registry, None, TestAdapterConfig::Unset).unwrap();

        test_adapter.set_config(vec![serde_json::json!(1)]);
        assert!(matches!(test_adapter.config(), TestAdapterConfig::Data(_)));

        let handle = test_adapter.config_handle();
        handle.set(AdapterConfig::new());
        assert!(matches!(test_adapter.config(), TestAdapterConfig::Config(_)));

        let len = test_adapter.update_config(|config| config.config_mut().responses.len());
        assert_eq!(len, 0);
    }
}
