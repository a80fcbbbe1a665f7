//! Cart domain types.

use storefront_core::{Image, Money, SelectedOption};

/// Subtotal and total amounts, authoritative only from the remote platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartCost {
    pub subtotal_amount: Money,
    pub total_amount: Money,
}

/// The parent product a cart line points back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchandiseProduct {
    pub title: String,
    pub handle: String,
    pub image: Option<Image>,
}

/// The specific variant a cart line holds. Read-only: the core never
/// mutates variant data, only line quantity and presence.
#[derive(Debug, Clone, PartialEq)]
pub struct Merchandise {
    pub id: String,
    pub title: String,
    pub price: Money,
    pub selected_options: Vec<SelectedOption>,
    pub product: MerchandiseProduct,
}

/// One quantity-bearing entry in a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub id: String,
    pub quantity: u32,
    pub merchandise: Merchandise,
}

/// The remote-hosted shopping session aggregate.
///
/// An in-memory `Cart` is only ever a direct copy of the last authoritative
/// server response, or the short-lived optimistic projection produced by
/// [`Cart::without_line`]. It is never rebuilt by local arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    /// Opaque id issued by the remote platform; the only durable cart state.
    pub id: String,
    /// Remote-issued checkout handoff URL, opaque and never parsed.
    pub checkout_url: String,
    pub total_quantity: u32,
    pub cost: CartCost,
    /// Line order is whatever the remote system returned.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Find a line by id.
    pub fn line(&self, line_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == line_id)
    }

    /// Optimistic projection of this cart with one line removed.
    ///
    /// The target line is filtered out and the total quantity decremented by
    /// that line's quantity. Subtotal and total are left stale on purpose:
    /// currency-safe recomputation needs authoritative data, which arrives
    /// with the real response.
    pub fn without_line(&self, line_id: &str) -> Cart {
        let removed_quantity = self
            .line(line_id)
            .map(|line| line.quantity)
            .unwrap_or_default();
        let mut projected = self.clone();
        projected.lines.retain(|line| line.id != line_id);
        projected.total_quantity = self.total_quantity.saturating_sub(removed_quantity);
        projected
    }
}
