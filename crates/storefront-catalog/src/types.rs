//! Catalog domain types.
//!
//! Fetched, never owned: every value here is a fresh snapshot decoded from
//! the commerce API, handed to the caller without shared mutable state.

use serde::Deserialize;
use storefront_core::{Image, Money, SelectedOption};

/// An option definition on a product (name plus its allowed values).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductOption {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Price range across a product's variants.
///
/// Listing queries only fetch the minimum; the maximum is present on detail
/// reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_variant_price: Money,
    #[serde(default)]
    pub max_variant_price: Option<Money>,
}

/// One concrete purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    pub price: Money,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    /// Variant-specific image, when the catalog assigns one.
    #[serde(default)]
    pub image: Option<Image>,
}

/// The first variant of a listed product, enough to add-to-cart from a tile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSummary {
    pub id: String,
    pub available_for_sale: bool,
    pub price: Money,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

/// A full product with every variant stitched in.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub title: String,
    /// URL slug, unique per store.
    pub handle: String,
    pub description: String,
    pub description_html: String,
    pub available_for_sale: bool,
    pub product_type: Option<String>,
    pub options: Vec<ProductOption>,
    pub price_range: PriceRange,
    pub images: Vec<Image>,
    /// All variants, concatenated across remote pages in page order.
    pub variants: Vec<Variant>,
}

/// A lightweight product row for collection listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub product_type: Option<String>,
    pub available_for_sale: bool,
    pub min_price: Money,
    pub image: Option<Image>,
    pub first_variant: Option<VariantSummary>,
}

/// A search suggestion row.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub image: Option<Image>,
    pub min_price: Money,
}

/// A collection row for navigation and sitemaps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectionSummary {
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub image: Option<Image>,
}
