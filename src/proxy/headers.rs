//! Request and response header rewriting.
//!
//! [`build_upstream_headers`] takes the caller's headers, strips
//! hop-by-hop and framing headers that belong to the inbound connection,
//! drops the gate token, and writes the resolved credential.
//! [`adjust_response_headers`] prepares an upstream response for relay.

use std::sync::LazyLock;

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_ORIGIN, AUTHORIZATION, CACHE_CONTROL, CONTENT_LENGTH, HOST,
};
use axum::http::{HeaderMap, HeaderName, HeaderValue};

use super::credential::{Credential, CredentialSource};
use super::{CREDENTIAL_HEADER, GATE_HEADER};
use crate::error::ForwardError;

static HOP_BY_HOP: LazyLock<Vec<HeaderName>> = LazyLock::new(|| {
    [
        "connection",
        "keep-alive",
        "transfer-encoding",
        "te",
        "trailer",
        "upgrade",
        "proxy-authorization",
        "proxy-authenticate",
    ]
    .iter()
    .filter_map(|name| name.parse::<HeaderName>().ok())
    .collect()
});

pub fn build_upstream_headers(
    mut headers: HeaderMap,
    credential: &Credential,
) -> Result<HeaderMap, ForwardError> {
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
    // The outbound connection sets its own Host and framing.
    headers.remove(HOST);
    headers.remove(CONTENT_LENGTH);

    headers.remove(GATE_HEADER);

    // A bearer credential moves into the dedicated header.
    if credential.source() == CredentialSource::Bearer {
        headers.remove(AUTHORIZATION);
    }

    let value = credential.header_value().map_err(http::Error::from)?;
    headers.insert(CREDENTIAL_HEADER, value);

    Ok(headers)
}

/// Strip connection-scoped headers from an upstream response, disable
/// caching, and open it to cross-origin readers. `content-length` is kept:
/// the body is relayed untouched, so the upstream's value stays accurate.
pub fn adjust_response_headers(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
}
