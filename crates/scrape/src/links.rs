// ABOUTME: Link normalization for listing and detail hrefs.
// ABOUTME: Resolves relative hrefs against the portal base without double-prefixing absolute ones.

use url::Url;

/// Normalizes an href into an absolute URL string.
///
/// Already-absolute http(s) hrefs pass through unchanged. Relative hrefs
/// (path-relative, root-relative, or fragment) are resolved against `base`
/// with standard URL-resolution rules. Empty input yields an empty string,
/// as does an href that cannot be resolved; this function never errors.
pub fn normalize(href: &str, base: &Url) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    match base.join(href) {
        Ok(url) => url.to_string(),
        Err(_) => String::new(),
    }
}
