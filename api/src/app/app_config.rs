use std::net::SocketAddr;

use crate::error_handler::AppError;

pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:7860";
pub const DEFAULT_APP_TITLE: &str = "The Librarian: Borges Expert";
pub const DEFAULT_APP_DESCRIPTION: &str =
    "Explore the infinite library of Jorge Luis Borges through intelligent conversation.";

/// HTTP server and page settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub address: SocketAddr,
    pub title: String,
    pub description: String,
}

impl AppConfig {
    /// Load from `API_ADDRESS`, `APP_TITLE` and `APP_DESCRIPTION`.
    ///
    /// # Errors
    /// `AppError::InvalidConfig` when `API_ADDRESS` is not a socket address.
    pub fn from_env() -> Result<Self, AppError> {
        let raw = env_or("API_ADDRESS", DEFAULT_API_ADDRESS);
        Self::new(
            &raw,
            env_or("APP_TITLE", DEFAULT_APP_TITLE),
            env_or("APP_DESCRIPTION", DEFAULT_APP_DESCRIPTION),
        )
    }

    pub fn new(address: &str, title: String, description: String) -> Result<Self, AppError> {
        let address = address
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| AppError::InvalidConfig {
                var: "API_ADDRESS",
                reason: format!("'{address}': {e}"),
            })?;
        Ok(Self {
            address,
            title,
            description,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(([0, 0, 0, 0], 7860)),
            title: DEFAULT_APP_TITLE.to_string(),
            description: DEFAULT_APP_DESCRIPTION.to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_address() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.address.to_string(), DEFAULT_API_ADDRESS);
        assert_eq!(cfg.title, "The Librarian: Borges Expert");
    }

    #[test]
    fn rejects_unparsable_address() {
        let err = AppConfig::new("localhost", "t".into(), "d".into()).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig { var: "API_ADDRESS", .. }));
        assert!(AppConfig::new(" 127.0.0.1:8080 ", "t".into(), "d".into()).is_ok());
    }
}
