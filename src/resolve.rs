//! Link normalization against a site's base URL.

use url::Url;

/// Resolve a possibly relative headline link against the scheme and host of
/// `site_url`.
///
/// Links that already carry an `http`/`https` scheme pass through untouched.
/// A missing leading slash is prepended before joining, so `"a/b"` on
/// `https://example.com` becomes `https://example.com/a/b`.
///
/// Never fails: if `site_url` does not parse, the link comes back unchanged
/// and the downstream fetch reports the failure for that article.
pub fn resolve(link: &str, site_url: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        return link.to_string();
    }

    let base = match Url::parse(site_url) {
        Ok(base) => base,
        Err(_) => return link.to_string(),
    };

    let path = if link.starts_with('/') {
        link.to_string()
    } else {
        format!("/{link}")
    };

    // An absolute path replaces the base's own path, so only the scheme and
    // host of `site_url` survive the join.
    match base.join(&path) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => link.to_string(),
    }
}
