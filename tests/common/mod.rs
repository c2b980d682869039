//! Shared doubles for integration tests: a recording [`Upstream`] for
//! handler-level tests and a recording HTTP server for end-to-end tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Method, Request, Response, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::mpsc;

use keyrelay::config::model::Config;
use keyrelay::error::ForwardError;
use keyrelay::proxy::upstream::{HyperUpstream, Upstream};
use keyrelay::proxy::ForwardingHandler;
use keyrelay::server::{self, AppState};

pub const PREFIX: &str = "/.netlify/functions/gateway";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

type Responder = Box<dyn Fn() -> Response<Body> + Send + Sync>;

/// Records every request it receives and answers with a canned response.
pub struct SpyUpstream {
    calls: Mutex<Vec<Recorded>>,
    respond: Responder,
}

impl SpyUpstream {
    pub fn ok() -> Arc<Self> {
        Self::responding(|| Response::new(Body::from("from upstream")))
    }

    pub fn responding(respond: impl Fn() -> Response<Body> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        })
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn only_call(&self) -> Recorded {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one upstream call");
        calls.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Upstream for SpyUpstream {
    async fn send(&self, request: Request<Body>) -> Result<Response<Body>, ForwardError> {
        let (parts, body) = request.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| ForwardError::Upstream {
                source: Box::new(e),
            })?
            .to_bytes();

        self.calls.lock().unwrap().push(Recorded {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
        });
        Ok((self.respond)())
    }
}

/// An upstream whose transport always fails.
pub struct FailingUpstream;

#[async_trait]
impl Upstream for FailingUpstream {
    async fn send(&self, _request: Request<Body>) -> Result<Response<Body>, ForwardError> {
        Err(ForwardError::Upstream {
            source: "connection reset by peer".into(),
        })
    }
}

pub fn test_config() -> Config {
    Config {
        upstream: "https://upstream.test".into(),
        ..Config::default()
    }
}

pub fn handler_with(config: Config, upstream: Arc<dyn Upstream>) -> ForwardingHandler {
    ForwardingHandler::new(Arc::new(config), upstream)
}

/// Run the handler the way the router does, turning rejections into responses.
pub async fn call(handler: &ForwardingHandler, request: Request<Body>) -> Response<Body> {
    match handler.handle(request).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// -- End-to-end servers --

pub type RequestLog = Arc<Mutex<Vec<Recorded>>>;

async fn record(
    State(log): State<RequestLog>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response<Body> {
    let path = uri.path().to_string();
    log.lock().unwrap().push(Recorded {
        method,
        uri,
        headers,
        body: body.clone(),
    });

    match path.as_str() {
        "/redirect" => (
            StatusCode::FOUND,
            [("location", "https://elsewhere.test/target")],
        )
            .into_response(),
        "/echo" => (StatusCode::OK, body).into_response(),
        _ => (
            StatusCode::OK,
            [("cache-control", "public, max-age=60"), ("x-upstream", "mock")],
            "upstream says hi",
        )
            .into_response(),
    }
}

/// Start a recording upstream on an ephemeral port.
pub async fn start_mock_upstream() -> (SocketAddr, RequestLog) {
    let log: RequestLog = Arc::default();
    let router = Router::new().fallback(record).with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (addr, log)
}

type ChunkSlot = Arc<Mutex<Option<mpsc::Receiver<Bytes>>>>;

async fn stream_chunks(State(slot): State<ChunkSlot>) -> Response<Body> {
    let Some(rx) = slot.lock().unwrap().take() else {
        return StatusCode::GONE.into_response();
    };
    let stream = futures_util::stream::unfold(rx, |mut rx| async move {
        rx.recv()
            .await
            .map(|chunk| (Ok::<_, std::io::Error>(chunk), rx))
    });

    Response::builder()
        .header("content-type", "text/event-stream")
        .body(Body::from_stream(stream))
        .unwrap()
}

/// Start an upstream that answers one request with an event stream fed by
/// the returned sender. The body ends when the sender is dropped.
pub async fn start_streaming_upstream() -> (SocketAddr, mpsc::Sender<Bytes>) {
    let (tx, rx) = mpsc::channel(4);
    let slot: ChunkSlot = Arc::new(Mutex::new(Some(rx)));
    let router = Router::new().fallback(stream_chunks).with_state(slot);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (addr, tx)
}

/// Start the gateway on an ephemeral port, relaying to `config.upstream`.
pub async fn start_gateway(config: Config) -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let client = server::build_http_client(Duration::from_millis(config.connect_timeout_ms));
    let handler = ForwardingHandler::new(Arc::new(config), Arc::new(HyperUpstream::new(client)));
    let router = server::build_router(Arc::new(AppState::new(handler)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    (addr, shutdown_tx)
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
