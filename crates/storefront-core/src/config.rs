//! Commerce API endpoint configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default commerce API version path segment.
pub const DEFAULT_API_VERSION: &str = "2024-01";

/// Errors raised while loading or validating store configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration value is absent.
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    /// A configuration value is present but unusable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Connection settings for the hosted commerce platform.
///
/// The platform is reached through a single HTTPS POST endpoint,
/// authenticated by a static access token and versioned by a path segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store domain (e.g. "my-shop.myshopify.com").
    pub domain: String,
    /// Static storefront access token.
    pub access_token: String,
    /// API version path segment.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

impl StoreConfig {
    /// Create a configuration with the default API version.
    pub fn new(domain: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            access_token: access_token.into(),
            api_version: default_api_version(),
        }
    }

    /// Override the API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Load from `STOREFRONT_DOMAIN` / `STOREFRONT_ACCESS_TOKEN`
    /// (and optional `STOREFRONT_API_VERSION`), failing fast when either
    /// required variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let domain = std::env::var("STOREFRONT_DOMAIN")
            .map_err(|_| ConfigError::Missing("STOREFRONT_DOMAIN"))?;
        let access_token = std::env::var("STOREFRONT_ACCESS_TOKEN")
            .map_err(|_| ConfigError::Missing("STOREFRONT_ACCESS_TOKEN"))?;
        let mut config = Self::new(domain, access_token);
        if let Ok(version) = std::env::var("STOREFRONT_API_VERSION") {
            config.api_version = version;
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject empty or whitespace-only values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.domain.trim().is_empty() {
            return Err(ConfigError::Invalid("store domain is empty".to_string()));
        }
        if self.access_token.trim().is_empty() {
            return Err(ConfigError::Invalid("access token is empty".to_string()));
        }
        if self.api_version.trim().is_empty() {
            return Err(ConfigError::Invalid("API version is empty".to_string()));
        }
        Ok(())
    }

    /// The full GraphQL endpoint URL.
    pub fn endpoint(&self) -> String {
        format!(
            "https://{}/api/{}/graphql.json",
            self.domain, self.api_version
        )
    }
}
