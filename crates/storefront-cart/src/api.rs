//! The cart-changing GraphQL operations.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use storefront_core::{Connection, Image, Money, SelectedOption};
use storefront_data::{FetchPolicy, StorefrontClient};

use crate::types::{Cart, CartCost, CartLine, Merchandise, MerchandiseProduct};

/// One cart fragment shared by every operation, so callers always receive a
/// complete, consistent snapshot and never need a partial merge.
const CART_FRAGMENT: &str = r#"
  id
  checkoutUrl
  totalQuantity
  cost {
    subtotalAmount { amount currencyCode }
    totalAmount { amount currencyCode }
  }
  lines(first: 100) {
    edges {
      node {
        id
        quantity
        merchandise {
          ... on ProductVariant {
            id
            title
            price { amount currencyCode }
            selectedOptions { name value }
            product {
              title
              handle
              images(first: 1) {
                edges { node { url altText } }
              }
            }
          }
        }
      }
    }
  }
"#;

/// Input for adding one merchandise line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub merchandise_id: String,
    pub quantity: u32,
}

/// Input for updating one existing line's quantity.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineUpdate {
    pub id: String,
    pub quantity: u32,
}

/// The cart operation surface consumed by the session store.
///
/// Every call resolves to the updated cart, or `None` on any failure; the
/// remote data layer has already logged and categorized what went wrong.
/// `read` returning `None` for a stored id is the caller's signal to discard
/// that id and start a new session.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// Create a new, empty remote cart.
    async fn create(&self) -> Option<Cart>;

    /// Fetch the current cart for a stored id.
    async fn read(&self, cart_id: &str) -> Option<Cart>;

    /// Add merchandise lines.
    async fn add_lines(&self, cart_id: &str, lines: &[CartLineInput]) -> Option<Cart>;

    /// Remove lines by id.
    async fn remove_lines(&self, cart_id: &str, line_ids: &[String]) -> Option<Cart>;

    /// Update line quantities.
    async fn update_lines(&self, cart_id: &str, updates: &[CartLineUpdate]) -> Option<Cart>;
}

/// [`CartApi`] backed by the commerce GraphQL API.
///
/// Cart state must never be served from cache, so every operation runs under
/// the always-fresh policy.
pub struct RemoteCartApi {
    client: Arc<StorefrontClient>,
}

impl RemoteCartApi {
    /// Create the remote cart surface over a shared client.
    pub fn new(client: Arc<StorefrontClient>) -> Self {
        Self { client }
    }

    async fn run<T: serde::de::DeserializeOwned>(
        &self,
        operation: &str,
        query: String,
        variables: serde_json::Value,
    ) -> Option<T> {
        match self
            .client
            .execute::<T>(&query, variables, &FetchPolicy::no_store())
            .await
        {
            Ok(payload) => payload.into_data(),
            Err(error) => {
                tracing::warn!(
                    operation,
                    category = error.category(),
                    "cart operation failed"
                );
                None
            }
        }
    }
}

#[async_trait]
impl CartApi for RemoteCartApi {
    async fn create(&self) -> Option<Cart> {
        let query = format!("mutation CartCreate {{ cartCreate {{ cart {{ {CART_FRAGMENT} }} }} }}");
        self.run::<CartCreateData>("create", query, json!({}))
            .await
            .and_then(|data| data.cart_create)
            .and_then(|wrapper| wrapper.cart)
            .map(CartWire::into_cart)
    }

    async fn read(&self, cart_id: &str) -> Option<Cart> {
        let query = format!("query CartRead($id: ID!) {{ cart(id: $id) {{ {CART_FRAGMENT} }} }}");
        self.run::<CartReadData>("read", query, json!({ "id": cart_id }))
            .await
            .and_then(|data| data.cart)
            .map(CartWire::into_cart)
    }

    async fn add_lines(&self, cart_id: &str, lines: &[CartLineInput]) -> Option<Cart> {
        let query = format!(
            "mutation CartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!) {{ \
             cartLinesAdd(cartId: $cartId, lines: $lines) {{ cart {{ {CART_FRAGMENT} }} }} }}"
        );
        let variables = json!({ "cartId": cart_id, "lines": lines });
        self.run::<CartLinesAddData>("add_lines", query, variables)
            .await
            .and_then(|data| data.cart_lines_add)
            .and_then(|wrapper| wrapper.cart)
            .map(CartWire::into_cart)
    }

    async fn remove_lines(&self, cart_id: &str, line_ids: &[String]) -> Option<Cart> {
        let query = format!(
            "mutation CartLinesRemove($cartId: ID!, $lineIds: [ID!]!) {{ \
             cartLinesRemove(cartId: $cartId, lineIds: $lineIds) {{ cart {{ {CART_FRAGMENT} }} }} }}"
        );
        let variables = json!({ "cartId": cart_id, "lineIds": line_ids });
        self.run::<CartLinesRemoveData>("remove_lines", query, variables)
            .await
            .and_then(|data| data.cart_lines_remove)
            .and_then(|wrapper| wrapper.cart)
            .map(CartWire::into_cart)
    }

    async fn update_lines(&self, cart_id: &str, updates: &[CartLineUpdate]) -> Option<Cart> {
        let query = format!(
            "mutation CartLinesUpdate($cartId: ID!, $lines: [CartLineUpdateInput!]!) {{ \
             cartLinesUpdate(cartId: $cartId, lines: $lines) {{ cart {{ {CART_FRAGMENT} }} }} }}"
        );
        let variables = json!({ "cartId": cart_id, "lines": updates });
        self.run::<CartLinesUpdateData>("update_lines", query, variables)
            .await
            .and_then(|data| data.cart_lines_update)
            .and_then(|wrapper| wrapper.cart)
            .map(CartWire::into_cart)
    }
}

// --- Wire shapes ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartCreateData {
    cart_create: Option<MutationCartWire>,
}

#[derive(Debug, Deserialize)]
struct CartReadData {
    cart: Option<CartWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartLinesAddData {
    cart_lines_add: Option<MutationCartWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartLinesRemoveData {
    cart_lines_remove: Option<MutationCartWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartLinesUpdateData {
    cart_lines_update: Option<MutationCartWire>,
}

#[derive(Debug, Deserialize)]
struct MutationCartWire {
    cart: Option<CartWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartWire {
    id: String,
    checkout_url: String,
    #[serde(default)]
    total_quantity: u32,
    cost: CartCostWire,
    #[serde(default)]
    lines: Connection<CartLineWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartCostWire {
    subtotal_amount: Money,
    total_amount: Money,
}

#[derive(Debug, Deserialize)]
struct CartLineWire {
    id: String,
    quantity: u32,
    merchandise: MerchandiseWire,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MerchandiseWire {
    id: String,
    title: String,
    price: Money,
    #[serde(default)]
    selected_options: Vec<SelectedOption>,
    product: MerchandiseProductWire,
}

#[derive(Debug, Deserialize)]
struct MerchandiseProductWire {
    title: String,
    handle: String,
    #[serde(default)]
    images: Connection<Image>,
}

impl CartWire {
    fn into_cart(self) -> Cart {
        Cart {
            id: self.id,
            checkout_url: self.checkout_url,
            total_quantity: self.total_quantity,
            cost: CartCost {
                subtotal_amount: self.cost.subtotal_amount,
                total_amount: self.cost.total_amount,
            },
            lines: self
                .lines
                .into_nodes()
                .into_iter()
                .map(CartLineWire::into_line)
                .collect(),
        }
    }
}

impl CartLineWire {
    fn into_line(self) -> CartLine {
        CartLine {
            id: self.id,
            quantity: self.quantity,
            merchandise: Merchandise {
                id: self.merchandise.id,
                title: self.merchandise.title,
                price: self.merchandise.price,
                selected_options: self.merchandise.selected_options,
                product: MerchandiseProduct {
                    title: self.merchandise.product.title,
                    handle: self.merchandise.product.handle,
                    image: self.merchandise.product.images.into_first(),
                },
            },
        }
    }
}
