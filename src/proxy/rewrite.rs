//! Outbound URL construction.
//!
//! The upstream URL is the configured origin, followed by the inbound path
//! with the gateway's mount prefix removed, followed by the inbound query
//! minus any credential-in-query parameter.

use axum::http::Uri;

use super::CREDENTIAL_QUERY_PARAM;

/// Remove `prefix` from the front of `path` when it matches on a segment
/// boundary. Paths outside the prefix are returned unchanged.
#[must_use]
pub fn strip_mount_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() || prefix == "/" {
        return path;
    }
    match path.strip_prefix(prefix) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Drop every `name=...` pair from a raw query string, leaving the other
/// pairs byte-for-byte intact. Parameter names are compared after
/// percent-decoding so `%6Bey=...` is caught too. Returns `None` when
/// nothing is left.
#[must_use]
pub fn strip_query_param(query: &str, name: &str) -> Option<String> {
    let kept: Vec<&str> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            url::form_urlencoded::parse(pair.as_bytes())
                .next()
                .map_or(true, |(key, _)| key != name)
        })
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join("&"))
    }
}

pub fn upstream_uri(
    origin: &str,
    mount_prefix: &str,
    inbound: &Uri,
) -> Result<Uri, http::uri::InvalidUri> {
    let path = strip_mount_prefix(inbound.path(), mount_prefix);
    let query = inbound
        .query()
        .and_then(|q| strip_query_param(q, CREDENTIAL_QUERY_PARAM));

    let url = match query {
        Some(q) => format!("{origin}{path}?{q}"),
        None => format!("{origin}{path}"),
    };
    url.parse()
}
