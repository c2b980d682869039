//! Serde data structures for the keyrelay configuration file.
//!
//! [`Config`] is the single immutable value the gateway is built from.
//! It derives `Deserialize` with `deny_unknown_fields` for strict parsing;
//! `Debug` is implemented by hand so secrets never reach a log line.

use serde::Deserialize;

pub const DEFAULT_UPSTREAM: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MOUNT_PREFIX: &str = "/.netlify/functions/gateway";

fn default_upstream() -> String {
    DEFAULT_UPSTREAM.to_string()
}

fn default_mount_prefix() -> String {
    DEFAULT_MOUNT_PREFIX.to_string()
}

const fn default_preflight_max_age() -> u64 {
    86_400
}

const fn default_connect_timeout_ms() -> u64 {
    10_000
}

#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Origin every request is relayed to, e.g. `https://api.example.com`.
    #[serde(default = "default_upstream")]
    pub upstream: String,

    /// Path prefix the gateway is mounted under; stripped before forwarding.
    #[serde(default = "default_mount_prefix")]
    pub mount_prefix: String,

    /// Credential used when the caller supplies none.
    #[serde(default)]
    pub default_credential: Option<String>,

    /// When set, callers must present this value in the gate header.
    #[serde(default)]
    pub gate_token: Option<String>,

    /// `Access-Control-Max-Age` advertised on preflight responses, in seconds.
    #[serde(default = "default_preflight_max_age")]
    pub preflight_max_age: u64,

    /// TCP connect timeout for the upstream transport.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream: default_upstream(),
            mount_prefix: default_mount_prefix(),
            default_credential: None,
            gate_token: None,
            preflight_max_age: default_preflight_max_age(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl Config {
    /// Treat blank secrets as absent so an empty env var disables the
    /// feature instead of configuring an empty secret.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.default_credential = non_blank(self.default_credential);
        self.gate_token = non_blank(self.gate_token);
        self.upstream = self.upstream.trim().trim_end_matches('/').to_string();
        self.mount_prefix = self.mount_prefix.trim().to_string();
        self
    }

    #[must_use]
    pub const fn gate_enabled(&self) -> bool {
        self.gate_token.is_some()
    }

    #[must_use]
    pub const fn has_default_credential(&self) -> bool {
        self.default_credential.is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Config")
            .field("upstream", &self.upstream)
            .field("mount_prefix", &self.mount_prefix)
            .field("default_credential", &redact(&self.default_credential))
            .field("gate_token", &redact(&self.gate_token))
            .field("preflight_max_age", &self.preflight_max_age)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .finish()
    }
}
