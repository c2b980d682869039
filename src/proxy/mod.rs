//! Core HTTP forwarding.
//!
//! [`ForwardingHandler`] turns one inbound request into one outbound
//! request against the configured upstream and relays the response. It is
//! a pure function of (request, configuration, transport): no shared
//! mutable state, no retries, no buffering. [`forward_handler`] is the
//! Axum fallback that feeds it every non-`/health` request.
//!
//! Submodules handle preflight answers ([`cors`]), the optional access
//! gate ([`gate`]), credential lookup ([`credential`]), URL rewriting
//! ([`rewrite`]), header sanitization ([`headers`]) and the outbound
//! transport ([`upstream`]).

pub mod cors;
pub mod credential;
pub mod gate;
pub mod headers;
pub mod rewrite;
pub mod upstream;

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request};
use axum::response::{IntoResponse, Response};

use crate::config::model::Config;
use crate::error::ForwardError;
use crate::server::AppState;
use upstream::Upstream;

/// Header carrying the upstream credential, inbound and outbound.
pub const CREDENTIAL_HEADER: &str = "x-goog-api-key";
/// Query parameter callers sometimes put the credential in; always removed.
pub const CREDENTIAL_QUERY_PARAM: &str = "key";
/// Header carrying the gate token when the gate is enabled.
pub const GATE_HEADER: &str = "x-gateway-token";
/// Environment variable holding the default upstream credential.
pub const DEFAULT_CREDENTIAL_ENV: &str = "UPSTREAM_API_KEY";
/// Environment variable holding the gate secret.
pub const GATE_TOKEN_ENV: &str = "GATEWAY_TOKEN";

#[derive(Clone)]
pub struct ForwardingHandler {
    config: Arc<Config>,
    upstream: Arc<dyn Upstream>,
}

impl ForwardingHandler {
    #[must_use]
    pub fn new(config: Arc<Config>, upstream: Arc<dyn Upstream>) -> Self {
        Self { config, upstream }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn handle(&self, request: Request<Body>) -> Result<Response, ForwardError> {
        let (parts, body) = request.into_parts();

        if parts.method == Method::OPTIONS {
            return Ok(cors::preflight_response(
                &parts.headers,
                self.config.preflight_max_age,
            ));
        }

        if let Some(secret) = self.config.gate_token.as_deref() {
            if !gate::is_authorized(&parts.headers, secret) {
                return Err(ForwardError::Unauthorized);
            }
        }

        let credential =
            credential::resolve(&parts.headers, self.config.default_credential.as_deref())
                .ok_or(ForwardError::MissingCredential)?;

        let uri =
            rewrite::upstream_uri(&self.config.upstream, &self.config.mount_prefix, &parts.uri)?;
        let outbound_headers = headers::build_upstream_headers(parts.headers, &credential)?;

        // Re-wrapping drops the inbound size hint, so hyper frames the body
        // as chunks instead of copying the caller's content-length.
        let body = if carries_body(&parts.method) {
            Body::from_stream(body.into_data_stream())
        } else {
            Body::empty()
        };

        let mut outbound = Request::builder()
            .method(parts.method)
            .uri(uri)
            .body(body)?;
        *outbound.headers_mut() = outbound_headers;

        let mut response = self.upstream.send(outbound).await?;
        headers::adjust_response_headers(response.headers_mut());
        Ok(response)
    }
}

/// GET and HEAD never forward a body, whatever the caller sent.
#[must_use]
pub fn carries_body(method: &Method) -> bool {
    *method != Method::GET && *method != Method::HEAD
}

pub async fn forward_handler(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
) -> Response {
    match state.handler.handle(request).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}
