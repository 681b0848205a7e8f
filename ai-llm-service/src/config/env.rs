//! Environment lookups used when building model profiles.
//!
//! Blank values count as unset everywhere.

use crate::error_handler::{AiLlmError, ConfigError};

pub(crate) fn var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn var_or(name: &str, default: &str) -> String {
    var(name).unwrap_or_else(|| default.to_string())
}

pub(crate) fn required(name: &'static str) -> Result<String, AiLlmError> {
    var(name).ok_or_else(|| ConfigError::MissingVar(name).into())
}

pub(crate) fn parsed<T: std::str::FromStr>(
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, AiLlmError> {
    var(name)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| {
                AiLlmError::from(ConfigError::InvalidNumber {
                    var: name,
                    reason: expected,
                })
            })
        })
        .transpose()
}

/// `value` must carry an http(s) scheme.
pub(crate) fn http_url(name: &'static str, value: String) -> Result<String, AiLlmError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value)
    } else {
        Err(ConfigError::InvalidFormat {
            var: name,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_scheme_is_required() {
        assert!(http_url("OLLAMA_URL", "http://localhost:11434".into()).is_ok());
        assert!(http_url("OLLAMA_URL", "https://ollama.internal".into()).is_ok());
        let err = http_url("OLLAMA_URL", "localhost:11434".into()).unwrap_err();
        assert!(err.to_string().contains("OLLAMA_URL"));
    }

    #[test]
    fn unset_variables_read_as_none() {
        assert_eq!(var("LIBRARIAN_TEST_SURELY_UNSET_VAR"), None);
        assert_eq!(var_or("LIBRARIAN_TEST_SURELY_UNSET_VAR", "x"), "x");
        assert!(required("LIBRARIAN_TEST_SURELY_UNSET_VAR").is_err());
        assert!(matches!(
            parsed::<u32>("LIBRARIAN_TEST_SURELY_UNSET_VAR", "expected u32"),
            Ok(None)
        ));
    }
}
