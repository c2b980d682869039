//! keyrelay is a single-upstream HTTP forwarding gateway.
//!
//! It receives client requests under a mount prefix, resolves an upstream
//! API credential (caller header, bearer token, or a configured default),
//! strips the caller-facing gate token and connection-scoped headers, and
//! relays the request to one fixed upstream origin. Request and response
//! bodies stream through without buffering.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, validate, health).
//! - [`config`] -- One-shot configuration loading from flags, environment
//!   and file, plus validation.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`health`] -- `GET /health` endpoint handler.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`proxy`] -- The forwarding handler: preflight, access gate, credential
//!   resolution, URL rewriting, header sanitization, and the upstream seam.
//! - [`server`] -- Axum router, shared read-only state, HTTP client, and
//!   graceful shutdown.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | JSON config file support |
//! | `toml` | TOML config file support |
//! | `file-backends` | All file format backends |

// Binary crate: public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod proxy;
pub mod server;
