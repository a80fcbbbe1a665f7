//! Shipping quote command.

use anyhow::{Context, Result};
use clap::Args;
use storefront_shipping::{QuoteItem, ShippingClient};

use crate::commands::cart::open_session;
use crate::config::CliConfig;
use crate::output::Output;

#[derive(Args)]
pub struct ShippingArgs {
    /// Destination postal code
    pub postal_code: String,

    /// Weight per line in kilograms
    #[arg(long, default_value_t = 1.0)]
    pub weight: f64,
}

pub async fn quote(config: &CliConfig, output: &Output, args: ShippingArgs) -> Result<()> {
    let shipping = config.shipping.clone().context(
        "shipping configuration missing: set SHIPPING_TOKEN / SHIPPING_ORIGIN_POSTAL_CODE \
         or pass --config",
    )?;

    let session = open_session(config).await?;
    let Some(cart) = session.cart() else {
        output.warn("No cart to quote; add an item first.");
        return Ok(());
    };
    if cart.lines.is_empty() {
        output.warn("The cart is empty.");
        return Ok(());
    }

    let items: Vec<QuoteItem> = cart
        .lines
        .iter()
        .map(|line| QuoteItem {
            quantity: line.quantity,
            price: line.merchandise.price.amount.parse().unwrap_or(0.0),
            weight: args.weight,
        })
        .collect();

    let client = ShippingClient::new(shipping)?;
    match client.quote(&args.postal_code, &items).await {
        Ok(options) => {
            output.success(&format!("{} delivery options", options.len()));
            for option in options {
                output.item(
                    &option.carrier,
                    &format!("{} - {:.2} - {} business days", option.name, option.price, option.days),
                );
            }
        }
        Err(error) => output.error(&format!("Quote failed: {error}")),
    }
    Ok(())
}
