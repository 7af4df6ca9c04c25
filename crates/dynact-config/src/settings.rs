//! Environment overrides for verifier settings

use crate::error::{ConfigError, ConfigResult};
use dynact_connectors::VerifierSettings;
use std::env;

pub const ENV_VERIFIER_URL: &str = "DYNACT_VERIFIER_URL";
pub const ENV_VERIFIER_CONNECT_TIMEOUT_MS: &str = "DYNACT_VERIFIER_CONNECT_TIMEOUT_MS";
pub const ENV_VERIFIER_CALL_TIMEOUT_MS: &str = "DYNACT_VERIFIER_CALL_TIMEOUT_MS";

/// Apply `DYNACT_VERIFIER_*` variables on top of `settings`. The URL variable
/// alone is enough to create settings when the manifest has none.
pub fn apply_verifier_env(settings: Option<VerifierSettings>) -> ConfigResult<Option<VerifierSettings>> {
    apply_overrides(settings, |name| env::var(name).ok())
}

fn apply_overrides<F>(settings: Option<VerifierSettings>, lookup: F) -> ConfigResult<Option<VerifierSettings>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = match (settings, lookup(ENV_VERIFIER_URL)) {
        (Some(mut s), Some(url)) => {
            s.url = url;
            s
        }
        (Some(s), None) => s,
        (None, Some(url)) => VerifierSettings::new(url),
        (None, None) => return Ok(None),
    };

    if let Some(raw) = lookup(ENV_VERIFIER_CONNECT_TIMEOUT_MS) {
        settings.connect_timeout_ms = parse_ms(ENV_VERIFIER_CONNECT_TIMEOUT_MS, &raw)?;
    }
    if let Some(raw) = lookup(ENV_VERIFIER_CALL_TIMEOUT_MS) {
        settings.call_timeout_ms = parse_ms(ENV_VERIFIER_CALL_TIMEOUT_MS, &raw)?;
    }
    Ok(Some(settings))
}

fn parse_ms(name: &str, raw: &str) -> ConfigResult<u64> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Validation(format!("{} must be a number of milliseconds, got '{}'", name, raw)))
}
