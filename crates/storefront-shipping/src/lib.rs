//! Shipping quotes for the storefront.
//!
//! A thin, stateless call-and-map proxy over the carrier quote gateway:
//! validate the destination and items before spending any network time, map
//! them onto the gateway's wire payload, and hand back the usable options
//! cheapest-first. Quotes are interactive and real-time, so nothing here is
//! cached or retried.

mod error;
mod quote;

pub use error::ShippingError;
pub use quote::{QuoteItem, ShippingClient, ShippingConfig, ShippingOption};
