//! Binding through the process-wide registry.

use feint::{
    AJAX, Adapter, AdapterRegistry, Request, TestAdapter,
    registry,
    testing::{CallLog, RecordingDispatcher},
};
use lazy_static::lazy_static;
use serde_json::json;
use std::sync::Arc;

lazy_static! {
    static ref REAL: RecordingDispatcher = RecordingDispatcher::new();
    static ref ADAPTER: Arc<Adapter> =
        registry::global().register(AJAX, Adapter::new("global-jQuery", REAL.clone()));
}

#[test]
fn test_global_registry_binding() {
    let adapter = ADAPTER.clone();
    assert!(
        registry::global()
            .adapter_instance(AJAX, Some("global-jQuery"))
            .is_some()
    );

    let test_adapter = TestAdapter::new(
        registry::global(),
        Some("global-jQuery"),
        vec![json!({ "id": 1 })],
    )
    .unwrap();
    test_adapter.enable();

    let log = CallLog::new();
    adapter
        .ajax(Request::new("/users").on_success(log.success_callback("success")))
        .unwrap();
    test_adapter.disable();
    adapter.ajax(Request::new("/users")).unwrap();

    assert_eq!(log.entries(), vec!["success"]);
    assert_eq!(REAL.count(), 1);
}
