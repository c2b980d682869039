//! Configuration loading and validation.
//!
//! The gateway is configured once at startup. [`resolve`] layers values
//! from highest to lowest priority: explicit overrides (CLI flags and their
//! environment variables), an optional config file, then built-in
//! defaults. The result is validated and frozen; nothing mutates it while
//! requests are being served.

pub mod model;
pub mod sources;
pub mod validation;

use std::path::{Path, PathBuf};

use crate::error::GatewayError;
use model::Config;
use sources::file_source::FileSource;

/// File names probed in the working directory when no config path is given.
pub const AUTO_DETECT_CANDIDATES: &[&str] = &[
    "keyrelay.yaml",
    "keyrelay.yml",
    "keyrelay.json",
    "keyrelay.toml",
];

/// Values supplied on the command line or through the environment.
#[derive(Default, Clone)]
pub struct ConfigOverrides {
    pub upstream: Option<String>,
    pub mount_prefix: Option<String>,
    pub default_credential: Option<String>,
    pub gate_token: Option<String>,
    pub preflight_max_age: Option<u64>,
    pub connect_timeout_ms: Option<u64>,
}

impl ConfigOverrides {
    fn apply(self, mut config: Config) -> Config {
        if let Some(upstream) = self.upstream {
            config.upstream = upstream;
        }
        if let Some(prefix) = self.mount_prefix {
            config.mount_prefix = prefix;
        }
        if let Some(credential) = self.default_credential {
            config.default_credential = Some(credential);
        }
        if let Some(token) = self.gate_token {
            config.gate_token = Some(token);
        }
        if let Some(max_age) = self.preflight_max_age {
            config.preflight_max_age = max_age;
        }
        if let Some(timeout) = self.connect_timeout_ms {
            config.connect_timeout_ms = timeout;
        }
        config
    }
}

/// Build the final, validated configuration.
pub async fn resolve(
    explicit: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<Config, GatewayError> {
    let base = match resolve_file_source(explicit).await? {
        Some(source) => {
            tracing::info!(
                path = %source.path().display(),
                format = source.format(),
                "loading config file"
            );
            source.load().await?
        }
        None => Config::default(),
    };

    let config = overrides.apply(base).normalized();

    if let Err(errors) = validation::validate(&config) {
        return Err(GatewayError::ConfigValidation { errors });
    }

    Ok(config)
}

async fn resolve_file_source(explicit: Option<&Path>) -> Result<Option<FileSource>, GatewayError> {
    if let Some(path) = explicit {
        return FileSource::for_path(path).map(Some);
    }

    for name in AUTO_DETECT_CANDIDATES {
        let path = PathBuf::from(name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!(path = %path.display(), "auto-detected config file");
            return FileSource::for_path(&path).map(Some);
        }
    }

    Ok(None)
}
