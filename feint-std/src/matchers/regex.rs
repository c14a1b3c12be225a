//! Regular-expression url matcher.

use ::regex::Regex;
use feint_core::{MatcherError, UrlMatcher};
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

/// Treats the pattern as a regular expression and tests it anywhere in the url.
///
/// The match is unanchored and case-sensitive: `/users` matches
/// `api/users/42`. Anchor explicitly (`^/users$`) for exact matches.
///
/// Compiled patterns are cached per matcher. A pattern that fails to compile
/// yields [`MatcherError::InvalidPattern`] and is not cached.
#[derive(Debug, Default)]
pub struct RegexMatcher {
    cache: Mutex<HashMap<String, Regex>>,
}

impl RegexMatcher {
    /// Create a matcher with an empty pattern cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of compiled patterns held in the cache.
    pub fn cached(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl UrlMatcher for RegexMatcher {
    fn matches(&self, url: &str, pattern: &str) -> Result<bool, MatcherError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(regex) = cache.get(pattern) {
            return Ok(regex.is_match(url));
        }

        let regex = Regex::new(pattern).map_err(|e| MatcherError::InvalidPattern {
            pattern: pattern.to_string(),
            source: Box::new(e),
        })?;
        let matched = regex.is_match(url);
        cache.insert(pattern.to_string(), regex);
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unanchored_match() {
        let matcher = RegexMatcher::new();
        assert!(matcher.matches("/users/42", "/users").unwrap());
        assert!(matcher.matches("api/Customers?$top=5", "Customers").unwrap());
        assert!(!matcher.matches("/orders/42", "/users").unwrap());
    }

    #[test]
    fn test_case_sensitive() {
        let matcher = RegexMatcher::new();
        assert!(!matcher.matches("api/customers", "Customers").unwrap());
        assert!(matcher.matches("api/customers", "(?i)Customers").unwrap());
    }

    #[test]
    fn test_anchored_patterns() {
        let matcher = RegexMatcher::new();
        assert!(matcher.matches("/users", "^/users$").unwrap());
        assert!(!matcher.matches("/users/42", "^/users$").unwrap());
        assert!(matcher.matches("/users/42", r"^/users/\d+$").unwrap());
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        let matcher = RegexMatcher::new();
        assert!(matcher.matches("anything/at/all", "").unwrap());
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let matcher = RegexMatcher::new();
        let err = matcher.matches("/users", "(unclosed").unwrap_err();
        assert!(matches!(err, MatcherError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
        assert_eq!(matcher.cached(), 0);
    }

    #[test]
    fn test_patterns_are_cached() {
        let matcher = RegexMatcher::new();
        matcher.matches("/a", "/a").unwrap();
        matcher.matches("/a/b", "/a").unwrap();
        matcher.matches("/b", "/b").unwrap();
        assert_eq!(matcher.cached(), 2);
    }
}
