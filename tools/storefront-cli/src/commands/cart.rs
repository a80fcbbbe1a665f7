//! Cart session commands.

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Subcommand};
use storefront_cart::{CartSession, JsonFileCartIdStore, RemoteCartApi};
use storefront_data::StorefrontClient;

use crate::config::CliConfig;
use crate::output::Output;

#[derive(Subcommand)]
pub enum CartArgs {
    /// Show the current cart
    Show,

    /// Add a variant to the cart
    Add(AddArgs),

    /// Remove a line from the cart
    Remove(RemoveArgs),

    /// Change a line's quantity
    Update(UpdateArgs),

    /// Print the checkout handoff URL
    Checkout,
}

#[derive(Args)]
pub struct AddArgs {
    /// Variant id (gid://...)
    pub variant_id: String,

    /// Quantity to add
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Cart line id
    pub line_id: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Cart line id
    pub line_id: String,

    /// New quantity
    pub quantity: u32,
}

/// Build a session over the configured store and restore it from the
/// persisted cart id.
pub(crate) async fn open_session(config: &CliConfig) -> Result<CartSession> {
    let client = Arc::new(StorefrontClient::new(config.store()?)?);
    let api = Arc::new(RemoteCartApi::new(client));
    let ids = Arc::new(JsonFileCartIdStore::new(config.cart.file.as_str()));
    let session = CartSession::new(api, ids);
    session.init().await;
    Ok(session)
}

pub async fn run(config: &CliConfig, output: &Output, args: CartArgs) -> Result<()> {
    let session = open_session(config).await?;

    match args {
        CartArgs::Show => show(output, &session),
        CartArgs::Add(args) => {
            session.add_item(&args.variant_id, args.quantity).await?;
            output.success("Added to cart.");
            show(output, &session);
        }
        CartArgs::Remove(args) => {
            session.remove_item(&args.line_id).await?;
            output.success("Removed from cart.");
            show(output, &session);
        }
        CartArgs::Update(args) => {
            session.update_item(&args.line_id, args.quantity).await?;
            output.success("Quantity updated.");
            show(output, &session);
        }
        CartArgs::Checkout => match session.checkout_url() {
            Some(url) => output.item("checkout", &url),
            None => output.warn("No cart yet; add an item first."),
        },
    }
    Ok(())
}

fn show(output: &Output, session: &CartSession) {
    let Some(cart) = session.cart() else {
        output.warn("No cart yet; add an item first.");
        return;
    };

    output.info(&format!("Cart {} ({} items)", cart.id, cart.total_quantity));
    for line in &cart.lines {
        output.item(
            &line.id,
            &format!(
                "{} ({}) x{} - {}",
                line.merchandise.product.title,
                line.merchandise.title,
                line.quantity,
                line.merchandise.price
            ),
        );
    }
    output.item("subtotal", &cart.cost.subtotal_amount.to_string());
    output.item("total", &cart.cost.total_amount.to_string());
}
