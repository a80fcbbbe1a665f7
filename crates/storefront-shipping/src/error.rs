//! Shipping failure surface.

use thiserror::Error;

/// Failure of a shipping quote, with the caller-facing distinctions the
/// storefront needs: configuration problems, rejected input, carrier
/// failures, and the empty-result case.
#[derive(Debug, Error)]
pub enum ShippingError {
    /// Required gateway configuration is absent.
    #[error("shipping configuration missing: {0}")]
    Config(&'static str),

    /// Destination postal code is not 8 digits after normalization.
    #[error("destination postal code must have 8 digits")]
    InvalidPostalCode,

    /// No items were supplied.
    #[error("no items to quote")]
    EmptyCart,

    /// An item failed validation before any network call.
    #[error("invalid quote item: {0}")]
    InvalidItem(String),

    /// The carrier gateway failed or answered with an unexpected shape.
    #[error("carrier quote request failed: {0}")]
    Carrier(String),

    /// The gateway answered, but no carrier serves this destination.
    #[error("no delivery options available for this destination")]
    NoOptions,
}
