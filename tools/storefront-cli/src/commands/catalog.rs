//! Catalog commands.

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, ValueEnum};
use storefront_catalog::{CatalogReader, SortKey};
use storefront_data::StorefrontClient;

use crate::config::CliConfig;
use crate::output::Output;

/// Sort order for collection listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Created,
    Title,
    Price,
    BestSelling,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Created => SortKey::Created,
            SortArg::Title => SortKey::Title,
            SortArg::Price => SortKey::Price,
            SortArg::BestSelling => SortKey::BestSelling,
        }
    }
}

#[derive(Args)]
pub struct CollectionArgs {
    /// Collection handle
    pub handle: String,

    /// Sort order
    #[arg(long, value_enum, default_value_t = SortArg::Created)]
    pub sort: SortArg,

    /// Reverse the sort order
    #[arg(long)]
    pub reverse: bool,

    /// Number of products to fetch
    #[arg(long, default_value_t = 9)]
    pub page_size: u32,
}

#[derive(Args)]
pub struct ProductArgs {
    /// Product handle
    pub handle: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search term (2-100 characters)
    pub term: String,
}

fn reader(config: &CliConfig) -> Result<CatalogReader> {
    let client = StorefrontClient::new(config.store()?)?;
    Ok(CatalogReader::new(Arc::new(client)))
}

pub async fn collections(config: &CliConfig, output: &Output) -> Result<()> {
    let reader = reader(config)?;
    let collections = reader.collections().await;

    if collections.is_empty() {
        output.warn("No collections found.");
        return Ok(());
    }
    output.success(&format!("{} collections", collections.len()));
    for collection in collections {
        output.item(&collection.handle, &collection.title);
    }
    Ok(())
}

pub async fn collection(config: &CliConfig, output: &Output, args: CollectionArgs) -> Result<()> {
    let reader = reader(config)?;
    let rows = reader
        .collection_products(&args.handle, args.sort.into(), args.reverse, args.page_size)
        .await;

    if rows.is_empty() {
        output.warn(&format!("No products found in '{}'.", args.handle));
        return Ok(());
    }
    output.success(&format!("{} products in '{}'", rows.len(), args.handle));
    for row in rows {
        let availability = if row.available_for_sale { "" } else { " (sold out)" };
        output.item(
            &row.handle,
            &format!("{} - from {}{}", row.title, row.min_price, availability),
        );
    }
    Ok(())
}

pub async fn product(config: &CliConfig, output: &Output, args: ProductArgs) -> Result<()> {
    let reader = reader(config)?;
    let Some(product) = reader.product(&args.handle).await else {
        output.warn(&format!("Product '{}' not found.", args.handle));
        return Ok(());
    };

    output.success(&product.title);
    output.item("handle", &product.handle);
    output.item("from", &product.price_range.min_variant_price.to_string());
    if let Some(max) = &product.price_range.max_variant_price {
        output.item("up to", &max.to_string());
    }
    for option in &product.options {
        output.item(&option.name, &option.values.join(", "));
    }
    output.info(&format!("{} variants", product.variants.len()));
    for variant in &product.variants {
        let availability = if variant.available_for_sale { "" } else { " (sold out)" };
        output.item(
            &variant.title,
            &format!("{} - {}{}", variant.id, variant.price, availability),
        );
        output.detail(&format!("{:?}", variant.selected_options));
    }
    Ok(())
}

pub async fn search(config: &CliConfig, output: &Output, args: SearchArgs) -> Result<()> {
    let reader = reader(config)?;
    let hits = reader.search(&args.term).await;

    if hits.is_empty() {
        output.warn("No matches.");
        return Ok(());
    }
    for hit in hits {
        output.item(&hit.handle, &format!("{} - {}", hit.title, hit.min_price));
    }
    Ok(())
}
