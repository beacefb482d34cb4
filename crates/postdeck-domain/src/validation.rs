//! Input validation for post title and url edits

use url::Url;

use crate::errors::{DomainError, DomainResult};

/// Check whether `candidate` is an http(s) URL.
///
/// Absolute URLs must use the `http` or `https` scheme and carry a host.
/// Root-relative paths such as `/category/post` are accepted too. Anything
/// else, including scheme-less `host/path` strings, is rejected.
pub fn is_valid_url(candidate: &str) -> bool {
    let candidate = candidate.trim();
    if candidate.is_empty() || candidate.chars().any(char::is_whitespace) {
        return false;
    }

    if candidate.starts_with('/') {
        if candidate.starts_with("//") {
            return false;
        }
        // Resolve against a throwaway base to check the path is well formed
        return Url::parse("http://localhost")
            .and_then(|base| base.join(candidate))
            .is_ok();
    }

    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

/// Validate the user-provided fields of a post
pub fn validate_post_input(title: &str, url: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::validation("title", "Title cannot be empty"));
    }
    if !is_valid_url(url) {
        return Err(DomainError::validation(
            "url",
            format!("'{}' is not a valid http(s) URL", url),
        ));
    }
    Ok(())
}
