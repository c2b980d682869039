//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (run, validate, health), and their associated argument
//! structs. Every `run` flag has an environment variable equivalent for
//! serverless and container deployments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::ConfigOverrides;

#[derive(Parser)]
#[command(
    name = "keyrelay",
    version,
    about = "Single-upstream HTTP forwarding gateway with credential injection",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        UPSTREAM_API_KEY=... keyrelay run          Relay with a default credential\n  \
        keyrelay run -c keyrelay.yaml              Start with a config file\n  \
        keyrelay health                            Check a running instance"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the gateway
    Run(Box<RunArgs>),

    /// Validate a config file without starting
    Validate(ValidateArgs),

    /// Check health of a running instance
    Health(HealthArgs),
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        keyrelay run                                          Auto-detect config\n  \
        keyrelay run -p 8080 --pretty                         Local dev mode\n  \
        keyrelay run --upstream https://api.example.com      Different upstream\n  \
        GATEWAY_TOKEN=s3cret keyrelay run                     Require x-gateway-token")]
pub struct RunArgs {
    /// Config file path (.yaml, .json, .toml)
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // -- Gateway --
    /// Upstream origin every request is relayed to
    #[arg(long, env = "UPSTREAM_URL", help_heading = "Gateway")]
    pub upstream: Option<String>,

    /// Path prefix stripped from inbound requests before forwarding
    #[arg(long, env = "MOUNT_PREFIX", help_heading = "Gateway")]
    pub mount_prefix: Option<String>,

    /// Default upstream credential, used when the caller supplies none
    #[arg(
        long,
        env = "UPSTREAM_API_KEY",
        hide_env_values = true,
        help_heading = "Gateway"
    )]
    pub api_key: Option<String>,

    /// Shared secret callers must send in x-gateway-token
    #[arg(
        long,
        env = "GATEWAY_TOKEN",
        hide_env_values = true,
        help_heading = "Gateway"
    )]
    pub gate_token: Option<String>,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    // -- Tuning --
    /// Upstream TCP connect timeout in milliseconds
    #[arg(long, env = "CONNECT_TIMEOUT_MS", help_heading = "Tuning")]
    pub connect_timeout_ms: Option<u64>,

    /// Access-Control-Max-Age advertised on preflight responses, in seconds
    #[arg(long, env = "PREFLIGHT_MAX_AGE", help_heading = "Tuning")]
    pub preflight_max_age: Option<u64>,
}

impl RunArgs {
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            upstream: self.upstream.clone(),
            mount_prefix: self.mount_prefix.clone(),
            default_credential: self.api_key.clone(),
            gate_token: self.gate_token.clone(),
            preflight_max_age: self.preflight_max_age,
            connect_timeout_ms: self.connect_timeout_ms,
        }
    }
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Config file to validate
    #[arg(default_value = "keyrelay.yaml")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ValidateFormat,
}

#[derive(Args)]
pub struct HealthArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:3000")]
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ValidateFormat {
    Text,
    Json,
}
