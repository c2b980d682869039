//! `keyrelay run`: start the gateway.
//!
//! Resolves configuration from flags, environment and file, builds the
//! upstream client and forwarding handler, and serves the Axum router
//! until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::RunArgs;
use crate::config;
use crate::error::GatewayError;
use crate::logging;
use crate::proxy::upstream::HyperUpstream;
use crate::proxy::ForwardingHandler;
use crate::server::{self, AppState};

pub async fn execute(args: RunArgs) -> Result<(), GatewayError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let config = config::resolve(args.config.as_deref(), args.overrides()).await?;

    if !config.gate_enabled() {
        tracing::warn!("no gate token configured; anyone can relay through this gateway");
    }

    let client = server::build_http_client(Duration::from_millis(config.connect_timeout_ms));
    let upstream = Arc::new(HyperUpstream::new(client));

    let origin = config.upstream.clone();
    let mount_prefix = config.mount_prefix.clone();
    let gate_enabled = config.gate_enabled();
    let default_credential = config.has_default_credential();

    let handler = ForwardingHandler::new(Arc::new(config), upstream);
    let router = server::build_router(Arc::new(AppState::new(handler)));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        upstream = %origin,
        mount_prefix = %mount_prefix,
        gate_enabled,
        default_credential,
        "keyrelay started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("keyrelay stopped");
    Ok(())
}
