/// URL helpers for federated references
///
/// Everything here degrades instead of failing: a malformed URL yields an
/// empty host or an unchanged input, never a panic.
use crate::{
    error::{Resolution, ResolutionExt, Unresolved, UnresolvedReason},
    metrics,
};
use url::Url;

/// Extract the network authority (host plus non-default port) from a URL.
///
/// Returns the empty string when the URL cannot be parsed or has no host.
pub fn extract_host(url: &str) -> String {
    try_extract_host(url).or_fallback()
}

/// Strict variant of [`extract_host`]
pub fn try_extract_host(url: &str) -> Resolution {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "failed to parse url for host extraction");
            metrics::record_host_extraction_failure("malformed");
            return Err(Unresolved::new(url, "", UnresolvedReason::MalformedUrl));
        }
    };

    match authority(&parsed) {
        Some(host) => Ok(host),
        None => {
            metrics::record_host_extraction_failure("missing_host");
            Err(Unresolved::new(url, "", UnresolvedReason::MissingHost))
        }
    }
}

/// `host[:port]`, with the port omitted when it is the scheme default
fn authority(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Check for an explicit `http://` or `https://` scheme
pub fn is_absolute_url(value: &str) -> bool {
    has_prefix_ignore_case(value, "http://") || has_prefix_ignore_case(value, "https://")
}

fn has_prefix_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}

/// Check that a URL parses and has both a scheme and a host
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value)
        .map(|u| !u.scheme().is_empty() && u.host_str().map_or(false, |h| !h.is_empty()))
        .unwrap_or(false)
}

/// `scheme://authority` of a URL
///
/// `http://example.com/api/authors/` -> `http://example.com`
pub fn base_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = authority(&parsed)?;
    Some(format!("{}://{}", parsed.scheme(), host))
}

/// URL prefix up to and including the first `api` path segment
///
/// `http://example.com/api/authors/` -> `http://example.com/api/`. When no
/// `api` segment exists the bare `scheme://authority/` is returned.
pub fn api_base_url(url: &str) -> Option<String> {
    let base = base_host(url)?;
    let parsed = Url::parse(url).ok()?;

    let parts: Vec<&str> = parsed.path().trim_matches('/').split('/').collect();
    match parts.iter().position(|p| *p == "api") {
        Some(index) => Some(format!("{}/{}/", base, parts[..=index].join("/"))),
        None => Some(format!("{}/", base)),
    }
}

/// Ensure a URL ends with a trailing slash
pub fn normalize_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

/// Canonical form of an author URL, so the same author reached through
/// different spellings compares equal.
///
/// Lowercases scheme and host, drops default ports, strips trailing slashes
/// from the path. Userinfo, query and fragment are kept. Input that does not
/// parse is returned unchanged.
pub fn normalize_author_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let Some(host) = authority(&parsed) else {
        return url.to_string();
    };

    let userinfo = match (parsed.username(), parsed.password()) {
        ("", _) => String::new(),
        (user, Some(password)) => format!("{}:{}@", user, password),
        (user, None) => format!("{}@", user),
    };

    let mut normalized = format!(
        "{}://{}{}{}",
        parsed.scheme(),
        userinfo,
        host,
        parsed.path().trim_end_matches('/')
    );

    if let Some(query) = parsed.query() {
        normalized.push('?');
        normalized.push_str(query);
    }
    if let Some(fragment) = parsed.fragment() {
        normalized.push('#');
        normalized.push_str(fragment);
    }

    normalized
}

/// Join a base URL with a path
///
/// The base is treated as a directory and a leading `/` on `path` is ignored,
/// so `join_urls("http://a/api", "/authors/")` is `http://a/api/authors/`.
pub fn join_urls(base: &str, path: &str) -> String {
    let base = normalize_url(base);
    let path = path.trim_start_matches('/');

    match Url::parse(&base).and_then(|b| b.join(path)) {
        Ok(joined) => joined.to_string(),
        Err(_) => format!("{}{}", base, path),
    }
}

/// Percent-encode every byte outside `A-Z a-z 0-9 - _ . ~`
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Decode a percent-encoded string, returning the input when it does not
/// decode to valid UTF-8
pub fn percent_decode(value: &str) -> String {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_host_keeps_explicit_port() {
        assert_eq!(
            extract_host("http://node-a.example:8000/api/authors/abc/"),
            "node-a.example:8000"
        );
        assert_eq!(extract_host("https://Node-B.Example/api/"), "node-b.example");
    }

    #[test]
    fn test_extract_host_drops_default_port() {
        assert_eq!(extract_host("http://node-a.example:80/api/"), "node-a.example");
        assert_eq!(extract_host("https://node-a.example:443/"), "node-a.example");
    }

    #[test]
    fn test_extract_host_malformed() {
        assert_eq!(extract_host("not a url"), "");
        assert_eq!(extract_host(""), "");
        assert_eq!(extract_host("/api/authors/1/"), "");

        let err = try_extract_host("not a url").unwrap_err();
        assert_eq!(err.reason, UnresolvedReason::MalformedUrl);
        assert_eq!(err.fallback, "");
    }

    #[test]
    fn test_extract_host_missing_host() {
        assert_eq!(extract_host("mailto:someone@example.com"), "");
        let err = try_extract_host("mailto:someone@example.com").unwrap_err();
        assert_eq!(err.reason, UnresolvedReason::MissingHost);
    }

    #[test]
    fn test_is_absolute_url() {
        assert!(is_absolute_url("http://node-a.example/"));
        assert!(is_absolute_url("HTTPS://node-a.example/"));
        assert!(!is_absolute_url("ftp://node-a.example/"));
        assert!(!is_absolute_url("c53452d6-f3eb-4616-8338-49288a3da001"));
        assert!(!is_absolute_url("http:/"));
        assert!(!is_absolute_url(""));
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("http://example.com/api/"));
        assert!(!is_valid_url("example.com/api/"));
        assert!(!is_valid_url("not a url"));
    }

    #[test]
    fn test_base_host_and_api_base() {
        let url = "http://example.com:8000/api/authors/111/";
        assert_eq!(base_host(url).as_deref(), Some("http://example.com:8000"));
        assert_eq!(
            api_base_url(url).as_deref(),
            Some("http://example.com:8000/api/")
        );
        assert_eq!(
            api_base_url("http://example.com/service/api/authors/").as_deref(),
            Some("http://example.com/service/api/")
        );
        assert_eq!(
            api_base_url("http://example.com/authors/").as_deref(),
            Some("http://example.com/")
        );
        assert_eq!(base_host("not a url"), None);
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("http://a/api"), "http://a/api/");
        assert_eq!(normalize_url("http://a/api/"), "http://a/api/");
    }

    #[test]
    fn test_normalize_author_url() {
        assert_eq!(
            normalize_author_url("HTTP://Node-A.Example:80/api/authors/111/"),
            "http://node-a.example/api/authors/111"
        );
        assert_eq!(
            normalize_author_url("https://node-a.example:8443/api/authors/111?x=1#top"),
            "https://node-a.example:8443/api/authors/111?x=1#top"
        );
        assert_eq!(
            normalize_author_url("http://user:pw@node-a.example/api/authors/1/"),
            "http://user:pw@node-a.example/api/authors/1"
        );
        assert_eq!(normalize_author_url("not a url"), "not a url");
        assert_eq!(normalize_author_url(""), "");
    }

    #[test]
    fn test_join_urls() {
        assert_eq!(
            join_urls("http://node-a.example/api", "/authors/"),
            "http://node-a.example/api/authors/"
        );
        assert_eq!(
            join_urls("http://node-a.example/api/", "entries/1/"),
            "http://node-a.example/api/entries/1/"
        );
    }

    #[test]
    fn test_percent_encoding() {
        assert_eq!(
            percent_encode("http://node-a.example:8000/api/authors/1/"),
            "http%3A%2F%2Fnode-a.example%3A8000%2Fapi%2Fauthors%2F1%2F"
        );
        assert_eq!(
            percent_decode("http%3A%2F%2Fnode-a.example%3A8000%2F"),
            "http://node-a.example:8000/"
        );
        assert_eq!(percent_decode("%FF"), "%FF");
    }
}
