//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_core::StoreConfig;
use storefront_shipping::ShippingConfig;

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Commerce API connection.
    #[serde(default)]
    pub store: Option<StoreConfig>,

    /// Carrier gateway connection.
    #[serde(default)]
    pub shipping: Option<ShippingConfig>,

    /// Cart session persistence.
    #[serde(default)]
    pub cart: CartConfig,
}

/// Where the cart id record lives between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    /// Path of the persisted cart id record.
    #[serde(default = "default_cart_file")]
    pub file: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            file: default_cart_file(),
        }
    }
}

fn default_cart_file() -> String {
    ".storefront-cart.json".to_string()
}

impl CliConfig {
    /// Load from a TOML file, or fall back to environment variables.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(path) = path {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {path}"))?;
            return toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {path}"));
        }

        let mut config = Self::default();
        if let Ok(store) = StoreConfig::from_env() {
            config.store = Some(store);
        }
        if let Ok(shipping) = ShippingConfig::from_env() {
            config.shipping = Some(shipping);
        }
        Ok(config)
    }

    /// The store connection, required for every command.
    pub fn store(&self) -> Result<&StoreConfig> {
        self.store.as_ref().context(
            "store configuration missing: set STOREFRONT_DOMAIN / STOREFRONT_ACCESS_TOKEN \
             or pass --config",
        )
    }
}
