//! Enabling and disabling a test adapter.

use feint::{
    AJAX, Adapter, AdapterConfig, AdapterRegistry, ConfigurationError, TestAdapter,
    registry::InMemoryRegistry, same_dispatcher,
    testing::{CallLog, RecordingDispatcher},
};
use serde_json::json;

mod common;
use common::{Fixture, logged_request, users_config};

#[test]
fn test_enable_is_idempotent() {
    let fixture = Fixture::new();
    let before_binding = fixture.adapter.dispatcher();
    let test_adapter = fixture.test_adapter(users_config());

    test_adapter.enable();
    test_adapter.enable();
    assert!(test_adapter.is_enabled());

    test_adapter.disable();
    assert!(!test_adapter.is_enabled());
    assert!(same_dispatcher(&fixture.adapter.dispatcher(), &before_binding));
}

#[test]
fn test_disable_is_idempotent() {
    let fixture = Fixture::new();
    let test_adapter = fixture.test_adapter(users_config());

    test_adapter.enable();
    test_adapter.disable();
    test_adapter.disable();

    let log = CallLog::new();
    fixture
        .adapter
        .ajax(logged_request("/users/42", &log))
        .unwrap();

    // Back on the real transport, which only records.
    assert_eq!(fixture.real.count(), 1);
    assert!(log.is_empty());
}

#[test]
fn test_requests_only_faked_while_enabled() {
    let fixture = Fixture::new();
    let test_adapter = fixture.test_adapter(users_config());
    let log = CallLog::new();

    fixture.adapter.ajax(logged_request("/users/1", &log)).unwrap();
    test_adapter.enable();
    fixture.adapter.ajax(logged_request("/users/2", &log)).unwrap();
    test_adapter.disable();
    fixture.adapter.ajax(logged_request("/users/3", &log)).unwrap();

    assert_eq!(log.entries(), vec!["success"]);
    let urls: Vec<_> = fixture
        .real
        .requests()
        .iter()
        .map(|request| request.url().unwrap().to_string())
        .collect();
    assert_eq!(urls, vec!["/users/1", "/users/3"]);
}

#[test]
fn test_named_adapter_binding() {
    let jquery = RecordingDispatcher::new();
    let angular = RecordingDispatcher::new();
    let registry = InMemoryRegistry::builder()
        .register(AJAX, Adapter::new("jQuery", jquery.clone()))
        .register(AJAX, Adapter::new("angular", angular.clone()))
        .build();

    let test_adapter = TestAdapter::builder()
        .adapter("angular")
        .config(users_config())
        .build(&registry)
        .unwrap();
    test_adapter.enable();

    assert_eq!(test_adapter.adapter().name(), "angular");

    let jquery_adapter = registry.adapter_instance(AJAX, Some("jQuery")).unwrap();
    jquery_adapter
        .ajax(feint::Request::new("/users/1"))
        .unwrap();
    assert_eq!(jquery.count(), 1);
    assert_eq!(angular.count(), 0);
}

#[test]
fn test_unknown_adapter_is_rejected() {
    let fixture = Fixture::new();

    let err = TestAdapter::new(&fixture.registry, Some("fetch"), AdapterConfig::new()).unwrap_err();

    assert!(matches!(err, ConfigurationError::NoSuchAdapter { .. }));
    assert_eq!(err.to_string(), "no existing ajax adapter `fetch` to fake");
}

#[test]
fn test_later_enable_wins() {
    let fixture = Fixture::new();
    let first = fixture.test_adapter(json!([{ "from": "first" }]));
    let second = fixture.test_adapter(json!([{ "from": "second" }]));

    first.enable();
    second.enable();
    assert!(second.is_enabled());
    assert!(!first.is_enabled());

    // The second binding captured the real transport at construction.
    second.disable();
    assert!(
        fixture
            .adapter
            .is_dispatching_through(second.original_dispatcher())
    );
}

#[test]
fn test_reconfigure_between_requests() {
    let fixture = Fixture::new();
    let test_adapter = fixture.test_adapter(users_config());
    test_adapter.enable();
    let log = CallLog::new();

    fixture.adapter.ajax(logged_request("/orders/1", &log)).unwrap();
    assert_eq!(fixture.real.count(), 1);

    test_adapter.update_config(|config| {
        config
            .config_mut()
            .responses
            .push(feint::Response::for_url("/orders").with_status(404));
    });
    fixture.adapter.ajax(logged_request("/orders/1", &log)).unwrap();

    assert_eq!(fixture.real.count(), 1);
    assert_eq!(log.entries(), vec!["error"]);
}
