//! The outbound transport seam.
//!
//! [`Upstream`] is the single capability the forwarding handler needs:
//! send one request, get one response. [`HyperUpstream`] implements it
//! with the shared hyper client; tests substitute recording doubles.
//!
//! The client never follows redirects, so 3xx responses reach the caller
//! as-is. Both bodies stay streaming: the request body is handed to hyper
//! without a precomputed length and the response body is wrapped, not
//! collected.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};

use crate::error::ForwardError;
use crate::server::HttpClient;

// async_trait is required here because Upstream is used as Arc<dyn Upstream>
// and native async fn in traits does not support dyn dispatch.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn send(&self, request: Request<Body>) -> Result<Response<Body>, ForwardError>;
}

#[derive(Clone)]
pub struct HyperUpstream {
    client: HttpClient,
}

impl HyperUpstream {
    #[must_use]
    pub const fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Upstream for HyperUpstream {
    async fn send(&self, request: Request<Body>) -> Result<Response<Body>, ForwardError> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| ForwardError::Upstream {
                source: Box::new(e),
            })?;
        Ok(response.map(Body::new))
    }
}
