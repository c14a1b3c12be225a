//! # feint-std
//!
//! Standard implementations for the feint transport test double.
//!
//! This crate provides:
//! - **Registries**: [`InMemoryRegistry`](registry::InMemoryRegistry) and a
//!   process-wide [`global`](registry::global) instance
//! - **Url matchers**: [`RegexMatcher`](matchers::RegexMatcher), and
//!   `RouteMatcher` behind the `matchit` feature
//! - **Standard hooks**: [`LoggingHooks`](hooks::LoggingHooks)
//! - **Testing utilities**: recording dispatchers and hook recorders

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core contracts
pub use feint_core;

// Modules
pub mod hooks;
pub mod matchers;
pub mod registry;
pub mod testing;
