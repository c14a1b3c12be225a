//! In-memory adapter registry.
//!
//! Adapters are grouped by kind (e.g. [`AJAX`](feint_core::AJAX)) and looked up
//! by name. Each kind has a default adapter: the first one registered, unless
//! another is registered with [`InMemoryRegistry::register_default`].

use feint_core::{Adapter, AdapterRegistry};
use std::{
    collections::HashMap,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};

#[derive(Default)]
struct KindEntry {
    adapters: HashMap<String, Arc<Adapter>>,
    default: Option<String>,
}

/// A thread-safe registry of adapters, keyed by kind and name.
///
/// # Example
///
/// ```rust,ignore
/// let registry = InMemoryRegistry::new();
/// registry.register(AJAX, Adapter::new("jQuery", real_transport));
///
/// let adapter = registry.adapter_instance(AJAX, None).unwrap();
/// assert_eq!(adapter.name(), "jQuery");
/// ```
#[derive(Default)]
pub struct InMemoryRegistry {
    kinds: RwLock<HashMap<String, KindEntry>>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Register an adapter under `kind`, replacing any adapter with the same name.
    ///
    /// The first adapter registered for a kind becomes its default.
    pub fn register(&self, kind: &str, adapter: Adapter) -> Arc<Adapter> {
        self.insert(kind, Arc::new(adapter), false)
    }

    /// Register an adapter under `kind` and make it the kind's default.
    pub fn register_default(&self, kind: &str, adapter: Adapter) -> Arc<Adapter> {
        self.insert(kind, Arc::new(adapter), true)
    }

    /// Register an already shared adapter.
    pub fn register_shared(&self, kind: &str, adapter: Arc<Adapter>, is_default: bool) {
        self.insert(kind, adapter, is_default);
    }

    /// Make the adapter named `name` the default for `kind`.
    ///
    /// Returns `false` if no such adapter is registered.
    pub fn set_default(&self, kind: &str, name: &str) -> bool {
        let mut kinds = self.kinds.write().unwrap_or_else(PoisonError::into_inner);
        match kinds.get_mut(kind) {
            Some(entry) if entry.adapters.contains_key(name) => {
                entry.default = Some(name.to_string());
                true
            }
            _ => false,
        }
    }

    /// Remove an adapter. If it was the default, the kind is left without one.
    pub fn unregister(&self, kind: &str, name: &str) -> Option<Arc<Adapter>> {
        let mut kinds = self.kinds.write().unwrap_or_else(PoisonError::into_inner);
        let entry = kinds.get_mut(kind)?;
        let removed = entry.adapters.remove(name)?;
        if entry.default.as_deref() == Some(name) {
            entry.default = None;
        }
        Some(removed)
    }

    /// Names of the adapters registered for `kind`, sorted.
    pub fn names(&self, kind: &str) -> Vec<String> {
        let kinds = self.kinds.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = kinds
            .get(kind)
            .map(|entry| entry.adapters.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    fn insert(&self, kind: &str, adapter: Arc<Adapter>, is_default: bool) -> Arc<Adapter> {
        let mut kinds = self.kinds.write().unwrap_or_else(PoisonError::into_inner);
        let entry = kinds.entry(kind.to_string()).or_default();
        let name = adapter.name().to_string();
        if is_default || entry.default.is_none() {
            entry.default = Some(name.clone());
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(kind, adapter = %name, is_default, "registered adapter");
        entry.adapters.insert(name, adapter.clone());
        adapter
    }
}

impl AdapterRegistry for InMemoryRegistry {
    fn adapter_instance(&self, kind: &str, name: Option<&str>) -> Option<Arc<Adapter>> {
        let kinds = self.kinds.read().unwrap_or_else(PoisonError::into_inner);
        let entry = kinds.get(kind)?;
        let name = match name {
            Some(name) => name,
            None => entry.default.as_deref()?,
        };
        entry.adapters.get(name).cloned()
    }
}

/// Builder for constructing an [`InMemoryRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    registry: InMemoryRegistry,
}

impl RegistryBuilder {
    /// Create a new empty registry builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter.
    pub fn register(self, kind: &str, adapter: Adapter) -> Self {
        self.registry.register(kind, adapter);
        self
    }

    /// Register an adapter as its kind's default.
    pub fn register_default(self, kind: &str, adapter: Adapter) -> Self {
        self.registry.register_default(kind, adapter);
        self
    }

    /// Build the registry.
    pub fn build(self) -> InMemoryRegistry {
        self.registry
    }
}

/// The process-wide registry.
///
/// Frameworks that keep a single global adapter configuration register their
/// adapters here. Tests that want isolation should prefer their own
/// [`InMemoryRegistry`].
pub fn global() -> &'static InMemoryRegistry {
    static GLOBAL: OnceLock<InMemoryRegistry> = OnceLock::new();
    GLOBAL.get_or_init(InMemoryRegistry::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use feint_core::{AJAX, DispatchError, Request};

    fn adapter(name: &str) -> Adapter {
        Adapter::new(name, |_: Request| -> Result<(), DispatchError> { Ok(()) })
    }

    #[test]
    fn test_first_registered_is_default() {
        let registry = InMemoryRegistry::builder()
            .register(AJAX, adapter("jQuery"))
            .register(AJAX, adapter("angular"))
            .build();

        let default = registry.adapter_instance(AJAX, None).unwrap();
        assert_eq!(default.name(), "jQuery");
        let named = registry.adapter_instance(AJAX, Some("angular")).unwrap();
        assert_eq!(named.name(), "angular");
    }

    #[test]
    fn test_register_default_overrides() {
        let registry = InMemoryRegistry::new();
        registry.register(AJAX, adapter("jQuery"));
        registry.register_default(AJAX, adapter("angular"));

        assert_eq!(registry.adapter_instance(AJAX, None).unwrap().name(), "angular");
        assert!(registry.set_default(AJAX, "jQuery"));
        assert_eq!(registry.adapter_instance(AJAX, None).unwrap().name(), "jQuery");
        assert!(!registry.set_default(AJAX, "missing"));
    }

    #[test]
    fn test_lookup_misses() {
        let registry = InMemoryRegistry::new();
        assert!(registry.adapter_instance(AJAX, None).is_none());

        registry.register(AJAX, adapter("jQuery"));
        assert!(registry.adapter_instance(AJAX, Some("angular")).is_none());
        assert!(registry.adapter_instance("dataService", None).is_none());
    }

    #[test]
    fn test_lookup_returns_live_instance() {
        let registry = InMemoryRegistry::new();
        let registered = registry.register(AJAX, adapter("jQuery"));
        let found = registry.adapter_instance(AJAX, Some("jQuery")).unwrap();
        assert!(Arc::ptr_eq(&registered, &found));
    }

    #[test]
    fn test_unregister_clears_default() {
        let registry = InMemoryRegistry::new();
        registry.register(AJAX, adapter("jQuery"));
        registry.register(AJAX, adapter("angular"));

        assert!(registry.unregister(AJAX, "jQuery").is_some());
        assert!(registry.adapter_instance(AJAX, None).is_none());
        assert_eq!(registry.names(AJAX), vec!["angular".to_string()]);
        assert!(registry.unregister(AJAX, "jQuery").is_none());
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(global(), global()));
    }
}
