//! Utility functions for the CLI

use crate::error::{CliError, CliResult};
use colored::{ColoredString, Colorize};
use dynact_core::PropertyValues;
use serde_json::Value as JsonValue;
use std::path::Path;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// `RUST_LOG` wins; otherwise `info`, or `debug` when verbose.
pub fn init_tracing(verbose: bool) -> CliResult<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CliError::General(format!("Failed to set tracing subscriber: {}", e)))?;

    Ok(())
}

/// Utility for colored console output
pub struct ColoredOutput;

impl ColoredOutput {
    pub fn success(msg: &str) -> ColoredString {
        msg.green().bold()
    }

    pub fn error(msg: &str) -> ColoredString {
        msg.red().bold()
    }

    pub fn warning(msg: &str) -> ColoredString {
        msg.yellow().bold()
    }

    pub fn dim(msg: &str) -> ColoredString {
        msg.dimmed()
    }

    pub fn highlight(msg: &str) -> ColoredString {
        msg.cyan().bold()
    }
}

/// Validate file exists and is readable
pub fn validate_file_exists(path: &Path) -> CliResult<()> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

/// Values from `--values` or `--values-file`; none given means no values.
pub fn read_values(values: Option<String>, values_file: Option<&Path>) -> CliResult<PropertyValues> {
    let parsed: JsonValue = match (values, values_file) {
        (Some(text), None) => serde_json::from_str(&text)
            .map_err(|e| CliError::InvalidArgument(format!("Invalid JSON values: {}", e)))?,
        (None, Some(path)) => {
            validate_file_exists(path)?;
            let content = std::fs::read_to_string(path)?;
            // JSON first, YAML as a fallback
            match serde_json::from_str(&content) {
                Ok(value) => value,
                Err(_) => serde_yaml::from_str(&content)?,
            }
        }
        (None, None) => return Ok(PropertyValues::new()),
        (Some(_), Some(_)) => {
            return Err(CliError::InvalidArgument(
                "Use either --values or --values-file, not both".to_string(),
            ))
        }
    };

    match parsed {
        JsonValue::Object(map) => Ok(map.into_iter().collect()),
        JsonValue::Null => Ok(PropertyValues::new()),
        _ => Err(CliError::InvalidArgument("Values must be a JSON object".to_string())),
    }
}
