//! Unified error types for keyrelay.
//!
//! Defines [`GatewayError`] (startup and CLI failures), [`ForwardError`]
//! (per-request outcomes that short-circuit forwarding) and
//! [`ValidationError`] for config validation failures. Error messages
//! include contextual hints to guide the user toward a fix.

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  {}: {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        // write! to String is infallible (only fails on OOM which is unrecoverable)
        let _ = write!(buf, "{e}");
    }
    buf
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("Config file not found: {}", path.display())]
    ConfigFileNotFound { path: PathBuf },

    #[error("Config parse error in {path}:\n  {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config validation failed:\n{}", format_errors(.errors))]
    ConfigValidation { errors: Vec<ValidationError> },

    #[error("Unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),
}

/// Outcomes that end a request before (or instead of) relaying an
/// upstream response.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ForwardError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error(
        "Missing API key. Send it in the x-goog-api-key header or as \
         'Authorization: Bearer <key>', or configure UPSTREAM_API_KEY on the gateway."
    )]
    MissingCredential,

    #[error("Invalid upstream URI: {0}")]
    UpstreamUri(#[from] http::uri::InvalidUri),

    #[error("Failed to build upstream request: {0}")]
    Request(#[from] http::Error),

    #[error("Upstream request failed: {source}")]
    Upstream {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ForwardError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::MissingCredential => StatusCode::BAD_REQUEST,
            Self::UpstreamUri(_) | Self::Request(_) | Self::Upstream { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Transport failures are reported generically; the detail goes to the log.
        let body = if status.is_server_error() {
            tracing::error!(error = %self, "upstream call failed");
            "Bad Gateway".to_string()
        } else {
            self.to_string()
        };

        let mut response = (status, Body::from(body)).into_response();
        response.headers_mut().insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::{CREDENTIAL_HEADER, DEFAULT_CREDENTIAL_ENV};

    #[test]
    fn statuses_match_rejection_table() {
        assert_eq!(ForwardError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ForwardError::MissingCredential.status(),
            StatusCode::BAD_REQUEST
        );
        let upstream = ForwardError::Upstream {
            source: "connection reset".into(),
        };
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn missing_credential_names_every_source() {
        let message = ForwardError::MissingCredential.to_string();
        assert!(message.contains(CREDENTIAL_HEADER));
        assert!(message.contains("Authorization: Bearer"));
        assert!(message.contains(DEFAULT_CREDENTIAL_ENV));
    }

    #[test]
    fn validation_error_display_includes_suggestion() {
        let err = ValidationError {
            field: "mount_prefix".into(),
            message: "must start with '/'".into(),
            suggestion: Some("did you mean '/api'?".into()),
        };
        assert_eq!(
            err.to_string(),
            "  mount_prefix: must start with '/' (did you mean '/api'?)"
        );
    }
}
