//! Client configuration.
//!
//! The base URL is passed explicitly to `TodoApi::new`; reading it from the
//! process environment is the host's job (`ClientConfig::from_env`).

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable holding the API base URL.
pub const BASE_URL_VAR: &str = "SELF_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            base_url: base_url.into(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            std::env::var(BASE_URL_VAR).map_err(|_| ConfigError::MissingVar(BASE_URL_VAR))?;
        Self::new(base_url)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::InvalidUrl {
                url: self.base_url.clone(),
                reason: "empty",
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl {
                url: self.base_url.clone(),
                reason: "scheme must be http or https",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(ClientConfig::new("http://localhost:3000").is_ok());
        assert!(ClientConfig::new("https://example.com/").is_ok());
    }

    #[test]
    fn rejects_empty_url() {
        let err = ClientConfig::new("  ").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { reason: "empty", .. }));
    }

    #[test]
    fn rejects_missing_scheme() {
        let err = ClientConfig::new("localhost:3000").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn deserializes_camel_case_key() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"baseUrl":"http://localhost:3000"}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
    }
}
