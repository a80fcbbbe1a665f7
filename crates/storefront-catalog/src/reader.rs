//! The catalog reader.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use storefront_core::{Connection, Image, Money};
use storefront_data::{FetchPolicy, StorefrontClient};

use crate::queries;
use crate::types::{
    CollectionSummary, PriceRange, Product, ProductOption, ProductSummary, SearchHit, Variant,
    VariantSummary,
};

/// Minimum search term length after trimming.
pub const SEARCH_MIN_CHARS: usize = 2;
/// Maximum search term length after trimming.
pub const SEARCH_MAX_CHARS: usize = 100;
/// Cap on returned search suggestions.
pub const SEARCH_RESULT_LIMIT: usize = 5;

const PRODUCT_LIST_TTL: Duration = Duration::from_secs(3600);
const PRODUCT_DETAIL_TTL: Duration = Duration::from_secs(1800);
const COLLECTIONS_TTL: Duration = Duration::from_secs(86_400);
const SEARCH_TTL: Duration = Duration::from_secs(300);

/// Pause between variant pages to stay under the platform rate limit.
const VARIANT_PAGE_DELAY: Duration = Duration::from_millis(200);
/// Safety bound against a paginator that never reports a last page.
const MAX_VARIANT_PAGES: u32 = 16;

/// Sort order for collection listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Created,
    Title,
    Price,
    BestSelling,
}

impl SortKey {
    /// Schema enum position for this sort key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Title => "TITLE",
            Self::Price => "PRICE",
            Self::BestSelling => "BEST_SELLING",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read-only catalog queries over the commerce API client.
///
/// Every method resolves to a value or the empty shape for that call; no
/// remote failure escapes as an error.
pub struct CatalogReader {
    client: Arc<StorefrontClient>,
}

impl CatalogReader {
    /// Create a reader over a shared client.
    pub fn new(client: Arc<StorefrontClient>) -> Self {
        Self { client }
    }

    /// Ordered product rows for one collection. Cached for an hour under the
    /// `products` and `collection-{handle}` tags.
    pub async fn collection_products(
        &self,
        handle: &str,
        sort_key: SortKey,
        reverse: bool,
        page_size: u32,
    ) -> Vec<ProductSummary> {
        let query = queries::collection_products_query(sort_key, reverse);
        let policy = FetchPolicy::cached(PRODUCT_LIST_TTL)
            .with_tag("products")
            .with_tag(format!("collection-{handle}"));
        let variables = json!({ "handle": handle, "first": page_size });

        match self
            .client
            .execute::<CollectionProductsData>(&query, variables, &policy)
            .await
        {
            Ok(payload) => payload
                .into_data()
                .and_then(|data| data.collection_by_handle)
                .map(|collection| {
                    collection
                        .products
                        .into_nodes()
                        .into_iter()
                        .map(ProductRowWire::into_summary)
                        .collect()
                })
                .unwrap_or_default(),
            Err(error) => {
                tracing::warn!(
                    handle,
                    category = error.category(),
                    "collection listing failed"
                );
                Vec::new()
            }
        }
    }

    /// Full product detail including ALL variants, or `None` when the handle
    /// does not resolve. Never an error for a missing product.
    pub async fn product(&self, handle: &str) -> Option<Product> {
        let policy =
            FetchPolicy::cached(PRODUCT_DETAIL_TTL).with_tag(format!("product-{handle}"));
        let detail = match self
            .client
            .execute::<ProductDetailData>(
                queries::PRODUCT_DETAIL_QUERY,
                json!({ "handle": handle }),
                &policy,
            )
            .await
        {
            Ok(payload) => payload.into_data().and_then(|data| data.product_by_handle),
            Err(error) => {
                tracing::warn!(handle, category = error.category(), "product fetch failed");
                None
            }
        }?;

        let variants = self.all_variants(handle).await;
        Some(detail.into_product(variants))
    }

    /// Best-effort search suggestions for a prefix-style title query.
    ///
    /// Terms outside the 2–100 character bound (after trimming) are rejected
    /// before any remote call; any failure yields an empty list.
    pub async fn search(&self, term: &str) -> Vec<SearchHit> {
        let term = term.trim();
        let length = term.chars().count();
        if !(SEARCH_MIN_CHARS..=SEARCH_MAX_CHARS).contains(&length) {
            return Vec::new();
        }

        let sanitized = term.replace('"', "\\\"");
        let policy = FetchPolicy::cached(SEARCH_TTL).with_tag("search");
        let variables = json!({ "query": format!("title:{sanitized}*") });

        match self
            .client
            .execute::<SearchData>(queries::SEARCH_QUERY, variables, &policy)
            .await
        {
            Ok(payload) => payload
                .into_data()
                .map(|data| {
                    data.products
                        .into_nodes()
                        .into_iter()
                        .take(SEARCH_RESULT_LIMIT)
                        .map(SearchRowWire::into_hit)
                        .collect()
                })
                .unwrap_or_default(),
            Err(error) => {
                tracing::warn!(term, category = error.category(), "search failed");
                Vec::new()
            }
        }
    }

    /// Collection rows for navigation and sitemaps. Cached for a day.
    pub async fn collections(&self) -> Vec<CollectionSummary> {
        let policy = FetchPolicy::cached(COLLECTIONS_TTL).with_tag("collections");
        match self
            .client
            .execute::<CollectionsData>(queries::COLLECTIONS_QUERY, json!({}), &policy)
            .await
        {
            Ok(payload) => payload
                .into_data()
                .map(|data| data.collections.into_nodes())
                .unwrap_or_default(),
            Err(error) => {
                tracing::warn!(category = error.category(), "collection listing failed");
                Vec::new()
            }
        }
    }

    /// Follow the variant cursor until the remote reports the last page.
    ///
    /// Pages are fetched always-fresh: stitching cached and live pages would
    /// mix snapshots of a moving list.
    async fn all_variants(&self, handle: &str) -> Vec<Variant> {
        let mut variants = Vec::new();
        let mut cursor: Option<String> = None;

        for page in 0..MAX_VARIANT_PAGES {
            if page > 0 {
                tokio::time::sleep(VARIANT_PAGE_DELAY).await;
            }

            let variables = json!({ "handle": handle, "cursor": cursor.as_deref() });
            let connection = match self
                .client
                .execute::<VariantPageData>(
                    queries::VARIANT_PAGE_QUERY,
                    variables,
                    &FetchPolicy::no_store(),
                )
                .await
            {
                Ok(payload) => payload
                    .into_data()
                    .and_then(|data| data.product_by_handle)
                    .map(|product| product.variants),
                Err(error) => {
                    tracing::warn!(
                        handle,
                        category = error.category(),
                        "variant page fetch failed"
                    );
                    None
                }
            };

            let Some(connection) = connection else {
                return variants;
            };

            let page_info = connection.page_info.clone().unwrap_or_default();
            variants.extend(connection.into_nodes());

            if !page_info.has_next_page {
                return variants;
            }
            match page_info.end_cursor {
                Some(next) => cursor = Some(next),
                None => return variants,
            }
        }

        tracing::warn!(
            handle,
            limit = MAX_VARIANT_PAGES,
            "variant pagination bound reached, returning a partial list"
        );
        variants
    }
}

// --- Wire shapes ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollectionProductsData {
    collection_by_handle: Option<CollectionProductsWire>,
}

#[derive(Debug, Deserialize)]
struct CollectionProductsWire {
    products: Connection<ProductRowWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRowWire {
    id: String,
    title: String,
    handle: String,
    #[serde(default)]
    product_type: Option<String>,
    available_for_sale: bool,
    price_range: PriceRange,
    #[serde(default)]
    images: Connection<Image>,
    #[serde(default)]
    variants: Connection<VariantSummary>,
}

impl ProductRowWire {
    fn into_summary(self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            title: self.title,
            handle: self.handle,
            product_type: self.product_type,
            available_for_sale: self.available_for_sale,
            min_price: self.price_range.min_variant_price,
            image: self.images.into_first(),
            first_variant: self.variants.into_first(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductDetailData {
    product_by_handle: Option<ProductDetailWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductDetailWire {
    id: String,
    title: String,
    handle: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    description_html: String,
    available_for_sale: bool,
    #[serde(default)]
    product_type: Option<String>,
    #[serde(default)]
    options: Vec<ProductOption>,
    price_range: PriceRange,
    #[serde(default)]
    images: Connection<Image>,
}

impl ProductDetailWire {
    fn into_product(self, variants: Vec<Variant>) -> Product {
        Product {
            id: self.id,
            title: self.title,
            handle: self.handle,
            description: self.description,
            description_html: self.description_html,
            available_for_sale: self.available_for_sale,
            product_type: self.product_type,
            options: self.options,
            price_range: self.price_range,
            images: self.images.into_nodes(),
            variants,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantPageData {
    product_by_handle: Option<VariantPageWire>,
}

#[derive(Debug, Deserialize)]
struct VariantPageWire {
    variants: Connection<Variant>,
}

#[derive(Debug, Deserialize)]
struct CollectionsData {
    collections: Connection<CollectionSummary>,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    products: Connection<SearchRowWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchRowWire {
    id: String,
    title: String,
    handle: String,
    #[serde(default)]
    images: Connection<Image>,
    price_range: MinPriceWire,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MinPriceWire {
    min_variant_price: Money,
}

impl SearchRowWire {
    fn into_hit(self) -> SearchHit {
        SearchHit {
            id: self.id,
            title: self.title,
            handle: self.handle,
            image: self.images.into_first(),
            min_price: self.price_range.min_variant_price,
        }
    }
}
