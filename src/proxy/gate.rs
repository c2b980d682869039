//! Optional shared-secret access gate.
//!
//! Both the presented token and the configured secret are hashed before
//! comparison so the check does not short-circuit on the first differing
//! byte of the secret itself.

use axum::http::HeaderMap;
use sha2::{Digest, Sha256};

use super::GATE_HEADER;

#[must_use]
pub fn is_authorized(headers: &HeaderMap, secret: &str) -> bool {
    let Some(presented) = headers.get(GATE_HEADER) else {
        return false;
    };
    Sha256::digest(presented.as_bytes()) == Sha256::digest(secret.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_token_passes() {
        let mut headers = HeaderMap::new();
        headers.insert(GATE_HEADER, "s3cret".parse().unwrap());
        assert!(is_authorized(&headers, "s3cret"));
    }

    #[test]
    fn missing_or_wrong_token_fails() {
        assert!(!is_authorized(&HeaderMap::new(), "s3cret"));

        let mut headers = HeaderMap::new();
        headers.insert(GATE_HEADER, "s3cret ".parse().unwrap());
        assert!(!is_authorized(&headers, "s3cret"));
    }
}
