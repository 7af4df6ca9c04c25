//! Environment variable interpolation with a prefix whitelist and defaults

use regex::Regex;
use serde_json::Value as JsonValue;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvResolverError {
    #[error("Environment variable '{0}' not found and no default provided")]
    VarNotFound(String),
    #[error("Environment variable '{0}' is not in whitelist. Allowed prefixes: {1:?}")]
    VarNotWhitelisted(String, Vec<String>),
    #[error("Invalid variable syntax: '{0}'. Expected ${{VAR}} or ${{VAR:default}}")]
    InvalidSyntax(String),
}

static VAR_PATTERN: OnceLock<Regex> = OnceLock::new();

fn var_pattern() -> Result<&'static Regex, EnvResolverError> {
    if let Some(re) = VAR_PATTERN.get() {
        return Ok(re);
    }
    let re = Regex::new(r"\$\{([^}:]+)(?::([^}]*))?\}")
        .map_err(|e| EnvResolverError::InvalidSyntax(e.to_string()))?;
    Ok(VAR_PATTERN.get_or_init(|| re))
}

/// Resolves `${VAR}` and `${VAR:default}` in string values.
#[derive(Debug, Clone)]
pub struct EnvResolver {
    /// Empty means no restrictions
    allowed_prefixes: Vec<String>,
}

impl Default for EnvResolver {
    fn default() -> Self {
        Self { allowed_prefixes: vec!["DYNACT_".to_string()] }
    }
}

impl EnvResolver {
    pub fn new(allowed_prefixes: Vec<String>) -> Self {
        Self { allowed_prefixes }
    }

    pub fn unrestricted() -> Self {
        Self { allowed_prefixes: vec![] }
    }

    /// Resolve every string inside `value`. Keys are left alone and strings
    /// stay strings.
    pub fn resolve(&self, value: &JsonValue) -> Result<JsonValue, EnvResolverError> {
        self.resolve_value(value, false)
    }

    /// Like [`resolve`](Self::resolve), but a string that is exactly one
    /// reference takes the type its value parses as (bool, integer, float).
    pub fn resolve_typed(&self, value: &JsonValue) -> Result<JsonValue, EnvResolverError> {
        self.resolve_value(value, true)
    }

    fn resolve_value(&self, value: &JsonValue, typed: bool) -> Result<JsonValue, EnvResolverError> {
        match value {
            JsonValue::String(s) => self.resolve_string(s, typed),
            JsonValue::Object(obj) => {
                let mut resolved = serde_json::Map::with_capacity(obj.len());
                for (key, val) in obj {
                    resolved.insert(key.clone(), self.resolve_value(val, typed)?);
                }
                Ok(JsonValue::Object(resolved))
            }
            JsonValue::Array(arr) => arr
                .iter()
                .map(|item| self.resolve_value(item, typed))
                .collect::<Result<Vec<_>, _>>()
                .map(JsonValue::Array),
            other => Ok(other.clone()),
        }
    }

    fn resolve_string(&self, input: &str, typed: bool) -> Result<JsonValue, EnvResolverError> {
        if !input.contains("${") {
            return Ok(JsonValue::String(input.to_string()));
        }
        let re = var_pattern()?;

        let mut result = String::with_capacity(input.len());
        let mut last = 0;
        let mut references = 0;
        for caps in re.captures_iter(input) {
            let (Some(full), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let var_name = name.as_str();
            self.validate_var_name(var_name)?;

            let value = match env::var(var_name) {
                Ok(value) => value,
                Err(_) => match caps.get(2) {
                    Some(default) => default.as_str().to_string(),
                    None => return Err(EnvResolverError::VarNotFound(var_name.to_string())),
                },
            };

            result.push_str(&input[last..full.start()]);
            result.push_str(&value);
            last = full.end();
            references += 1;
        }
        result.push_str(&input[last..]);

        let whole_reference = references == 1 && re.find(input).is_some_and(|m| m.as_str() == input);
        if !typed || !whole_reference {
            return Ok(JsonValue::String(result));
        }

        if let Ok(b) = result.parse::<bool>() {
            Ok(JsonValue::Bool(b))
        } else if let Ok(i) = result.parse::<i64>() {
            Ok(JsonValue::Number(i.into()))
        } else if let Some(n) = result.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            Ok(JsonValue::Number(n))
        } else {
            Ok(JsonValue::String(result))
        }
    }

    fn validate_var_name(&self, var_name: &str) -> Result<(), EnvResolverError> {
        if self.allowed_prefixes.is_empty()
            || self.allowed_prefixes.iter().any(|prefix| var_name.starts_with(prefix))
        {
            return Ok(());
        }
        Err(EnvResolverError::VarNotWhitelisted(var_name.to_string(), self.allowed_prefixes.clone()))
    }
}
