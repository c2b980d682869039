//! `keyrelay validate`: check a configuration file for errors.
//!
//! Parses and validates the config file, reporting results in either
//! human-readable text or machine-readable JSON format. Environment
//! overrides are not applied: this checks the file alone.

use crate::cli::{ValidateArgs, ValidateFormat};
use crate::config::sources::file_source::FileSource;
use crate::config::validation;
use crate::error::GatewayError;

pub async fn execute(args: &ValidateArgs) -> Result<(), GatewayError> {
    let path = &args.config;

    if !path.exists() {
        return Err(GatewayError::ConfigFileNotFound { path: path.clone() });
    }

    let config = FileSource::for_path(path)?
        .load()
        .await?
        .normalized();

    if let Err(errors) = validation::validate(&config) {
        match args.format {
            ValidateFormat::Text => {
                eprintln!("\u{2717} {} has {} errors\n", path.display(), errors.len());
                for error in &errors {
                    eprintln!("{error}");
                }
            }
            ValidateFormat::Json => {
                let json_errors: Vec<serde_json::Value> = errors
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "field": e.field,
                            "message": e.message,
                            "suggestion": e.suggestion,
                        })
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::json!({
                        "valid": false,
                        "errors": json_errors,
                    })
                );
            }
        }
        return Err(GatewayError::ConfigValidation { errors });
    }

    match args.format {
        ValidateFormat::Text => {
            println!(
                "\u{2713} {}",
                validation::format_validation_report(&path.display().to_string(), &config)
            );
        }
        ValidateFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "valid": true,
                    "upstream": config.upstream,
                    "mount_prefix": config.mount_prefix,
                    "gate_enabled": config.gate_enabled(),
                    "default_credential_configured": config.has_default_credential(),
                })
            );
        }
    }

    Ok(())
}
