//! # Url Matchers
//!
//! | Matcher | Pattern syntax | Anchoring |
//! |---------|----------------|-----------|
//! | `RegexMatcher` | Regular expression | Unanchored, matches anywhere in the url |
//! | `RouteMatcher` | Route template (`/users/{id}`) | Whole path, query string ignored |
//!
//! `RouteMatcher` requires the `matchit` feature.

pub mod regex;
#[cfg(feature = "matchit")]
pub mod route;

pub use self::regex::RegexMatcher;
#[cfg(feature = "matchit")]
pub use self::route::RouteMatcher;
