//! Configuration validation with detailed error reporting.
//!
//! The [`validate`] function checks a parsed [`Config`] for structural
//! errors: an upstream that is not an absolute http(s) origin, a mount
//! prefix that cannot be matched against request paths, and zero-valued
//! timings. Returns a list of [`ValidationError`] values with per-field
//! suggestions.

use http::HeaderValue;
use url::Url;

use super::model::Config;
use crate::error::ValidationError;

/// Validate the upstream origin. Returns `Ok(())` or a human-readable error.
pub fn validate_upstream(upstream: &str) -> Result<(), String> {
    let parsed = Url::parse(upstream).map_err(|_| format!("'{upstream}' is not a valid URL"))?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(format!(
            "unsupported scheme '{scheme}' (expected http or https)"
        ));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err("upstream must include a host".into());
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err("upstream must not carry a query string or fragment".into());
    }
    Ok(())
}

/// Validate the mount prefix. Returns `Ok(())` or a human-readable error.
pub fn validate_mount_prefix(prefix: &str) -> Result<(), String> {
    if prefix.is_empty() {
        return Err("mount prefix cannot be empty".into());
    }
    if !prefix.starts_with('/') {
        return Err("mount prefix must start with '/'".into());
    }
    if prefix == "/" {
        return Err("mount prefix cannot be '/': the gateway serves its own /health there".into());
    }
    if prefix.ends_with('/') {
        return Err("mount prefix must not end with '/'".into());
    }
    if prefix.contains(['?', '#']) {
        return Err("mount prefix must be a plain path".into());
    }
    Ok(())
}

pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(msg) = validate_upstream(&config.upstream) {
        errors.push(ValidationError {
            field: "upstream".into(),
            suggestion: if config.upstream.contains("://") {
                None
            } else {
                Some(format!("did you mean 'https://{}'?", config.upstream))
            },
            message: msg,
        });
    }

    if let Err(msg) = validate_mount_prefix(&config.mount_prefix) {
        let trimmed = config.mount_prefix.trim_matches('/');
        errors.push(ValidationError {
            field: "mount_prefix".into(),
            suggestion: if trimmed.is_empty() {
                None
            } else {
                Some(format!("did you mean '/{trimmed}'?"))
            },
            message: msg,
        });
    }

    if let Some(ref credential) = config.default_credential {
        if HeaderValue::from_str(credential).is_err() {
            errors.push(ValidationError {
                field: "default_credential".into(),
                message: "credential contains characters not allowed in an HTTP header".into(),
                suggestion: Some("check for stray newlines in the secret".into()),
            });
        }
    }

    if config.connect_timeout_ms == 0 {
        errors.push(ValidationError {
            field: "connect_timeout_ms".into(),
            message: "connect timeout must be greater than zero".into(),
            suggestion: None,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[must_use]
pub fn format_validation_report(path: &str, config: &Config) -> String {
    let on_off = |enabled: bool| if enabled { "enabled" } else { "disabled" };
    let lines = [
        format!("  upstream:           {}", config.upstream),
        format!("  mount prefix:       {}", config.mount_prefix),
        format!("  access gate:        {}", on_off(config.gate_enabled())),
        format!(
            "  default credential: {}",
            if config.has_default_credential() {
                "configured"
            } else {
                "none"
            }
        ),
        format!("  preflight max-age:  {}s", config.preflight_max_age),
        format!("  connect timeout:    {}ms", config.connect_timeout_ms),
    ];

    format!("{} is valid\n{}", path, lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn upstream_without_scheme_suggests_https() {
        let config = Config {
            upstream: "api.example.com".into(),
            ..Config::default()
        };
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].suggestion.as_deref(),
            Some("did you mean 'https://api.example.com'?")
        );
    }

    #[test]
    fn non_http_scheme_fails() {
        let config = Config {
            upstream: "ftp://files.example.com".into(),
            ..Config::default()
        };
        let errors = validate(&config).unwrap_err();
        assert!(errors[0].message.contains("unsupported scheme"));
    }

    #[test]
    fn upstream_with_query_fails() {
        let err = validate_upstream("https://api.example.com?key=abc").unwrap_err();
        assert!(err.contains("query"));
    }

    #[test]
    fn mount_prefix_without_slash_fails() {
        let config = Config {
            mount_prefix: "gateway".into(),
            ..Config::default()
        };
        let errors = validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.suggestion.as_deref() == Some("did you mean '/gateway'?")));
    }

    #[test]
    fn mount_prefix_with_trailing_slash_fails() {
        assert!(validate_mount_prefix("/gateway/").is_err());
    }

    #[test]
    fn root_mount_prefix_is_rejected() {
        let config = Config {
            mount_prefix: "/".into(),
            ..Config::default()
        };
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "mount_prefix");
        assert!(errors[0].message.contains("/health"));
        assert!(errors[0].suggestion.is_none());
    }

    #[test]
    fn zero_connect_timeout_fails() {
        let config = Config {
            connect_timeout_ms: 0,
            ..Config::default()
        };
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors[0].field, "connect_timeout_ms");
    }

    #[test]
    fn credential_with_newline_fails() {
        let config = Config {
            default_credential: Some("abc\ndef".into()),
            ..Config::default()
        };
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors[0].field, "default_credential");
    }

    #[test]
    fn report_never_prints_secrets() {
        let config = Config {
            default_credential: Some("sk-123".into()),
            gate_token: Some("open-sesame".into()),
            ..Config::default()
        };
        let report = format_validation_report("keyrelay.yaml", &config);
        assert!(report.contains("access gate:        enabled"));
        assert!(!report.contains("sk-123"));
        assert!(!report.contains("open-sesame"));
    }
}
