//! Url matcher trait.

use crate::error::MatcherError;

/// Decides whether a canned response's url pattern applies to a request url.
///
/// An `Err` means the matcher could not evaluate this candidate. Callers treat
/// it as "no match" and move on to the next candidate.
///
/// Any `Fn(&str, &str) -> bool` closure is a matcher. Wrap a closure returning
/// `Result<bool, MatcherError>` in [`TryMatcher`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `UrlMatcher`",
    label = "missing `UrlMatcher` implementation",
    note = "Use a closure `Fn(&str, &str) -> bool` or wrap a fallible one in `TryMatcher`."
)]
pub trait UrlMatcher: Send + Sync {
    /// Test `url` against `pattern`.
    fn matches(&self, url: &str, pattern: &str) -> Result<bool, MatcherError>;
}

impl<F> UrlMatcher for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn matches(&self, url: &str, pattern: &str) -> Result<bool, MatcherError> {
        Ok(self(url, pattern))
    }
}

/// Adapts a fallible closure into a [`UrlMatcher`].
#[derive(Debug, Clone, Copy)]
pub struct TryMatcher<F>(pub F);

impl<F> UrlMatcher for TryMatcher<F>
where
    F: Fn(&str, &str) -> Result<bool, MatcherError> + Send + Sync,
{
    fn matches(&self, url: &str, pattern: &str) -> Result<bool, MatcherError> {
        (self.0)(url, pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_matcher() {
        let exact = |url: &str, pattern: &str| url == pattern;
        assert!(exact.matches("api/Orders", "api/Orders").unwrap());
        assert!(!exact.matches("api/Orders/1", "api/Orders").unwrap());
    }

    #[test]
    fn test_try_matcher_propagates_faults() {
        let matcher = TryMatcher(|_: &str, pattern: &str| {
            if pattern.is_empty() {
                Err(MatcherError::Custom("empty pattern".into()))
            } else {
                Ok(true)
            }
        });

        assert!(matcher.matches("api/Orders", "Orders").unwrap());
        assert!(matcher.matches("api/Orders", "").is_err());
    }
}
