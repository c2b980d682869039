//! Async file-based config source.
//!
//! [`FileSource`] loads a [`Config`] from a YAML, JSON or TOML file, picking
//! the parser from the file extension. It reads the file asynchronously via
//! Tokio. The gateway reads its configuration once at startup, so there is
//! no change detection.

use std::path::{Path, PathBuf};

use super::parse_config_str;
use crate::config::model::Config;
use crate::error::GatewayError;

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: &'static str,
}

impl FileSource {
    /// Build a source for `path`, rejecting extensions whose parser is not
    /// compiled in.
    pub fn for_path(path: &Path) -> Result<Self, GatewayError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let format = match ext {
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => "yaml",

            #[cfg(feature = "json")]
            "json" => "json",

            #[cfg(feature = "toml")]
            "toml" => "toml",

            other => return Err(GatewayError::UnsupportedFormat(other.to_string())),
        };

        Ok(Self {
            path: path.to_path_buf(),
            format,
        })
    }

    #[must_use]
    pub const fn format(&self) -> &'static str {
        self.format
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_content(&self) -> Result<String, GatewayError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GatewayError::ConfigFileNotFound {
                    path: self.path.clone(),
                }
            } else {
                GatewayError::Io(e)
            }
        })
    }

    /// Parse the file without validating, so callers can layer CLI and
    /// environment overrides on top before the final check.
    pub async fn load(&self) -> Result<Config, GatewayError> {
        let content = self.read_content().await?;
        parse_config_str(self.format, &content, &self.path.display().to_string())
    }
}
