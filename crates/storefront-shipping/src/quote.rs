//! Carrier gateway client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ShippingError;

/// Default carrier gateway endpoint.
const DEFAULT_ENDPOINT: &str = "https://api.frenet.com.br/shipping/quote";

/// Quotes are interactive; fail fast rather than retry.
const QUOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Fixed parcel dimensions in centimeters, pending per-product dimensions in
/// the catalog.
const PARCEL_DIMENSION_CM: u32 = 20;

/// Minimum billable weight in kilograms.
const MIN_WEIGHT_KG: f64 = 1.0;

/// Carrier gateway connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingConfig {
    /// Gateway API token.
    pub token: String,
    /// Origin postal code the store ships from.
    pub origin_postal_code: String,
    /// Gateway endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl ShippingConfig {
    /// Create a configuration for the default gateway endpoint.
    pub fn new(token: impl Into<String>, origin_postal_code: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            origin_postal_code: origin_postal_code.into(),
            endpoint: default_endpoint(),
        }
    }

    /// Override the gateway endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Load from `SHIPPING_TOKEN` / `SHIPPING_ORIGIN_POSTAL_CODE`.
    pub fn from_env() -> Result<Self, ShippingError> {
        let token =
            std::env::var("SHIPPING_TOKEN").map_err(|_| ShippingError::Config("SHIPPING_TOKEN"))?;
        let origin = std::env::var("SHIPPING_ORIGIN_POSTAL_CODE")
            .map_err(|_| ShippingError::Config("SHIPPING_ORIGIN_POSTAL_CODE"))?;
        Ok(Self::new(token, origin))
    }
}

/// One cart line reduced to what a quote needs.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteItem {
    pub quantity: u32,
    /// Unit price in the store currency.
    pub price: f64,
    /// Weight in kilograms.
    pub weight: f64,
}

/// A quoted delivery option.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingOption {
    pub name: String,
    pub carrier: String,
    pub price: f64,
    /// Lead time in business days.
    pub days: u32,
}

/// Stateless quote client for the carrier gateway.
pub struct ShippingClient {
    config: ShippingConfig,
    http: reqwest::Client,
}

impl ShippingClient {
    /// Create a client.
    pub fn new(config: ShippingConfig) -> Result<Self, ShippingError> {
        if config.token.trim().is_empty() {
            return Err(ShippingError::Config("token"));
        }
        if normalize_postal_code(&config.origin_postal_code).is_none() {
            return Err(ShippingError::Config("origin_postal_code"));
        }
        let http = reqwest::Client::builder()
            .timeout(QUOTE_TIMEOUT)
            .build()
            .map_err(|e| ShippingError::Carrier(e.to_string()))?;
        Ok(Self { config, http })
    }

    /// Quote delivery options for the given destination and items,
    /// cheapest option first.
    ///
    /// All input validation happens before any network call, so rejected
    /// input costs nothing.
    pub async fn quote(
        &self,
        destination_postal_code: &str,
        items: &[QuoteItem],
    ) -> Result<Vec<ShippingOption>, ShippingError> {
        let destination = normalize_postal_code(destination_postal_code)
            .ok_or(ShippingError::InvalidPostalCode)?;
        if items.is_empty() {
            return Err(ShippingError::EmptyCart);
        }
        for item in items {
            if item.quantity == 0 {
                return Err(ShippingError::InvalidItem("quantity must be positive".into()));
            }
            if item.price < 0.0 {
                return Err(ShippingError::InvalidItem("price cannot be negative".into()));
            }
            if item.weight < 0.0 {
                return Err(ShippingError::InvalidItem("weight cannot be negative".into()));
            }
        }

        let origin = normalize_postal_code(&self.config.origin_postal_code)
            .ok_or(ShippingError::Config("origin_postal_code"))?;
        let payload = QuoteRequestWire::build(&origin, &destination, items);

        let response = self
            .http
            .post(&self.config.endpoint)
            .header("token", &self.config.token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ShippingError::Carrier(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "carrier gateway returned an error");
            return Err(ShippingError::Carrier(format!("HTTP {}", status.as_u16())));
        }

        let body: QuoteResponseWire = response
            .json()
            .await
            .map_err(|e| ShippingError::Carrier(e.to_string()))?;

        let Some(services) = body.services else {
            tracing::warn!(message = body.message.as_deref(), "carrier response missing services");
            return Err(ShippingError::Carrier(
                body.message.unwrap_or_else(|| "unexpected gateway response".into()),
            ));
        };

        let mut options: Vec<ShippingOption> = services
            .into_iter()
            .filter(|service| !service.error)
            .filter_map(ServiceWire::into_option)
            .collect();
        options.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal));

        if options.is_empty() {
            return Err(ShippingError::NoOptions);
        }
        Ok(options)
    }
}

/// Keep only digits; a usable postal code has exactly eight.
fn normalize_postal_code(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits.len() == 8).then_some(digits)
}

// --- Gateway wire shapes (field names are the gateway's, typos included) ---

#[derive(Debug, Serialize)]
struct QuoteRequestWire {
    #[serde(rename = "SellerCEP")]
    seller_postal_code: String,
    #[serde(rename = "RecipientCEP")]
    recipient_postal_code: String,
    #[serde(rename = "ShipmentInvoiceValue")]
    invoice_value: f64,
    #[serde(rename = "ShippingItemArray")]
    items: Vec<QuoteItemWire>,
    #[serde(rename = "RecipientCountry")]
    recipient_country: &'static str,
}

impl QuoteRequestWire {
    fn build(origin: &str, destination: &str, items: &[QuoteItem]) -> Self {
        let invoice_value = items
            .iter()
            .map(|item| item.price * f64::from(item.quantity))
            .sum();
        Self {
            seller_postal_code: origin.to_string(),
            recipient_postal_code: destination.to_string(),
            invoice_value,
            items: items.iter().map(QuoteItemWire::from_item).collect(),
            recipient_country: "BR",
        }
    }
}

#[derive(Debug, Serialize)]
struct QuoteItemWire {
    #[serde(rename = "Weight")]
    weight: f64,
    #[serde(rename = "Length")]
    length: u32,
    #[serde(rename = "Height")]
    height: u32,
    #[serde(rename = "Width")]
    width: u32,
    #[serde(rename = "Quantity")]
    quantity: u32,
    #[serde(rename = "IsFragile")]
    is_fragile: bool,
}

impl QuoteItemWire {
    fn from_item(item: &QuoteItem) -> Self {
        Self {
            weight: if item.weight > 0.0 { item.weight } else { MIN_WEIGHT_KG },
            length: PARCEL_DIMENSION_CM,
            height: PARCEL_DIMENSION_CM,
            width: PARCEL_DIMENSION_CM,
            quantity: item.quantity,
            is_fragile: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct QuoteResponseWire {
    // "Sevices" is the gateway's own spelling.
    #[serde(rename = "ShippingSevicesArray")]
    services: Option<Vec<ServiceWire>>,
    #[serde(rename = "Message")]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServiceWire {
    #[serde(rename = "ServiceDescription", default)]
    description: String,
    #[serde(rename = "Carrier", default)]
    carrier: String,
    #[serde(rename = "ShippingPrice", default)]
    price: String,
    #[serde(rename = "DeliveryTime", default)]
    delivery_time: String,
    #[serde(rename = "Error", default)]
    error: bool,
    #[serde(rename = "Msg", default)]
    #[allow(dead_code)]
    message: Option<String>,
}

impl ServiceWire {
    fn into_option(self) -> Option<ShippingOption> {
        let price = self.price.parse::<f64>().ok()?;
        let days = self.delivery_time.parse::<u32>().unwrap_or(0);
        Some(ShippingOption {
            name: self.description,
            carrier: self.carrier,
            price,
            days,
        })
    }
}
