//! Route-template url matcher.
//!
//! Provides parameter/wildcard matching for paths (e.g. `/users/{id}`,
//! `/files/{*rest}`) on top of `matchit`.

use feint_core::{MatcherError, UrlMatcher};
use matchit::Router as InnerRouter;
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

/// Treats the pattern as a `matchit` route template.
///
/// Unlike [`RegexMatcher`](super::RegexMatcher) the template must match the
/// whole path. Anything from the first `?` or `#` in the url is ignored.
#[derive(Default)]
pub struct RouteMatcher {
    cache: Mutex<HashMap<String, InnerRouter<()>>>,
}

impl RouteMatcher {
    /// Create a matcher with an empty route cache.
    pub fn new() -> Self {
        Self::default()
    }
}

impl UrlMatcher for RouteMatcher {
    fn matches(&self, url: &str, pattern: &str) -> Result<bool, MatcherError> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(router) = cache.get(pattern) {
            return Ok(router.at(path).is_ok());
        }

        let mut router = InnerRouter::new();
        router
            .insert(pattern, ())
            .map_err(|e| MatcherError::InvalidRoute {
                route: pattern.to_string(),
                source: Box::new(e),
            })?;
        let matched = router.at(path).is_ok();
        cache.insert(pattern.to_string(), router);
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_match() {
        let matcher = RouteMatcher::new();
        assert!(matcher.matches("/users/42", "/users/{id}").unwrap());
        assert!(matcher.matches("/users/42?expand=orders", "/users/{id}").unwrap());
        assert!(!matcher.matches("/users/42/orders", "/users/{id}").unwrap());
        assert!(!matcher.matches("/users", "/users/{id}").unwrap());
    }

    #[test]
    fn test_wildcard_match() {
        let matcher = RouteMatcher::new();
        assert!(matcher.matches("/files/a/b/c.png", "/files/{*rest}").unwrap());
        assert!(!matcher.matches("/images/c.png", "/files/{*rest}").unwrap());
    }

    #[test]
    fn test_invalid_route_is_an_error() {
        let matcher = RouteMatcher::new();
        let err = matcher
            .matches("/files/a/more", "/files/{*rest}/more")
            .unwrap_err();
        assert!(matches!(err, MatcherError::InvalidRoute { .. }));
    }
}
