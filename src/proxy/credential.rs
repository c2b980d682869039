//! Upstream credential resolution.
//!
//! [`resolve`] picks the credential for one request with strict priority:
//! the dedicated credential header, then an `Authorization: Bearer` token,
//! then the gateway's configured default. The first non-empty value wins.
//! Malformed inputs are treated as absent and fall through.

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderValue};

use super::CREDENTIAL_HEADER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Header,
    Bearer,
    Default,
}

/// A resolved upstream credential. The value is never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    value: String,
    source: CredentialSource,
}

impl Credential {
    #[must_use]
    pub fn new(value: impl Into<String>, source: CredentialSource) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }

    #[must_use]
    pub const fn source(&self) -> CredentialSource {
        self.source
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Header value marked sensitive so it is left out of debug output.
    pub fn header_value(&self) -> Result<HeaderValue, http::header::InvalidHeaderValue> {
        let mut value = HeaderValue::from_str(&self.value)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

#[must_use]
pub fn resolve(headers: &HeaderMap, default: Option<&str>) -> Option<Credential> {
    if let Some(value) = header_credential(headers) {
        return Some(Credential::new(value, CredentialSource::Header));
    }
    if let Some(token) = bearer_token(headers) {
        return Some(Credential::new(token, CredentialSource::Bearer));
    }
    default
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| Credential::new(v, CredentialSource::Default))
}

fn header_credential(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(CREDENTIAL_HEADER)?
        .to_str()
        .ok()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Extract `<token>` from `Authorization: Bearer <token>`, scheme matched
/// case-insensitively.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
