//! Standard instrumentation hooks.

pub mod logging;

pub use logging::LoggingHooks;
