//! Response matching.

use feint_core::{Response, UrlMatcher};

/// Select the first response whose url pattern applies to `url`.
///
/// Returns `None` when `url` is absent or empty, when `responses` is empty, or
/// when no candidate matches. A matcher error counts as "no match" for that
/// candidate only; the remaining candidates are still tried.
pub fn match_response<'a>(
    url: Option<&str>,
    responses: &'a [Response],
    matcher: &dyn UrlMatcher,
) -> Option<&'a Response> {
    let url = url.filter(|url| !url.is_empty())?;
    responses
        .iter()
        .find(|candidate| match matcher.matches(url, candidate.pattern()) {
            Ok(matched) => matched,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    url,
                    pattern = candidate.pattern(),
                    error = %e,
                    "url matcher failed; skipping candidate"
                );
                #[cfg(not(feature = "tracing"))]
                let _ = e;
                false
            }
        })
}
