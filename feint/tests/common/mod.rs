#![allow(dead_code)]

use feint::{
    AJAX, Adapter, AdapterConfig, Request, Response, TestAdapter,
    registry::InMemoryRegistry,
    testing::{CallLog, RecordingDispatcher},
};
use serde_json::{Value, json};
use std::sync::Arc;

// ============================================================================
// Fixture
// ============================================================================

/// A registry with one ajax adapter, `jQuery`, backed by a recording
/// "real" transport.
pub struct Fixture {
    pub registry: InMemoryRegistry,
    pub adapter: Arc<Adapter>,
    pub real: RecordingDispatcher,
}

impl Fixture {
    pub fn new() -> Self {
        let real = RecordingDispatcher::new();
        let registry = InMemoryRegistry::new();
        let adapter = registry.register(AJAX, Adapter::new("jQuery", real.clone()));
        Self {
            registry,
            adapter,
            real,
        }
    }

    pub fn test_adapter(&self, config: impl Into<feint::TestAdapterConfig>) -> TestAdapter {
        TestAdapter::new(&self.registry, None, config).unwrap()
    }
}

// ============================================================================
// Requests
// ============================================================================

/// A request whose callbacks append `success` / `error` to `log`.
pub fn logged_request(url: &str, log: &CallLog) -> Request {
    Request::new(url)
        .on_success(log.success_callback("success"))
        .on_error(log.error_callback("error"))
}

/// What the caller's callbacks observed.
#[derive(Debug, Clone, PartialEq)]
pub enum Seen {
    Success {
        data: Value,
        text_status: String,
        status: i64,
    },
    Error {
        status: i64,
        text_status: String,
        message: String,
    },
}

/// A request that records the arguments its callbacks receive.
pub fn capturing_request(url: &str) -> (Request, Arc<std::sync::Mutex<Vec<Seen>>>) {
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let (on_success, on_error) = (seen.clone(), seen.clone());
    let request = Request::new(url)
        .on_success(move |data, text_status, xhr| {
            on_success.lock().unwrap().push(Seen::Success {
                data: data.clone(),
                text_status: text_status.to_string(),
                status: xhr.status,
            });
        })
        .on_error(move |xhr, text_status, error| {
            on_error.lock().unwrap().push(Seen::Error {
                status: xhr.status,
                text_status: text_status.to_string(),
                message: error.message().to_string(),
            });
        });
    (request, seen)
}

// ============================================================================
// Configurations
// ============================================================================

pub fn users_config() -> AdapterConfig {
    AdapterConfig::new().with_response(Response::for_url("/users").with_data(json!([{ "id": 1 }])))
}
