//! Read-only catalog access for the headless storefront.
//!
//! [`CatalogReader`] translates domain questions (list a collection, load a
//! product with every variant, suggest search results) into commerce API
//! calls and assembles complete entities. Variant lists that the remote API
//! paginates are stitched into one logical product via an explicit cursor
//! loop with a safety bound.
//!
//! The whole component is best-effort: no call raises; failures come back
//! as the empty shape for that call (`None` product, empty list) and the
//! caller decides on user-facing messaging.

mod queries;
mod reader;
mod types;

pub use reader::{
    CatalogReader, SortKey, SEARCH_MAX_CHARS, SEARCH_MIN_CHARS, SEARCH_RESULT_LIMIT,
};
pub use types::{
    CollectionSummary, PriceRange, Product, ProductOption, ProductSummary, SearchHit, Variant,
    VariantSummary,
};
