//! File-backed configuration sources.
//!
//! Provides the [`FileSource`](file_source::FileSource) loader and the
//! [`parse_config_str`] helper for format-specific deserialization. Each
//! format is gated by a cargo feature (`yaml`, `json`, `toml`).

pub mod file_source;

use crate::config::model::Config;
use crate::error::GatewayError;

/// Parse a config string based on file extension.
pub fn parse_config_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<Config, GatewayError> {
    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| GatewayError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "json")]
        "json" => serde_json::from_str(content).map_err(|e| GatewayError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(|e| GatewayError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        other => Err(GatewayError::UnsupportedFormat(other.to_string())),
    }
}
