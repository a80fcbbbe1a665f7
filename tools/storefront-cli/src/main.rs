//! Storefront CLI - drive the headless storefront core from a terminal.
//!
//! Commands:
//! - `storefront collections` - list store collections
//! - `storefront collection <handle>` - list products in a collection
//! - `storefront product <handle>` - product detail with every variant
//! - `storefront search <term>` - search suggestions
//! - `storefront cart <show|add|remove|update|checkout>` - cart session
//! - `storefront shipping <postal-code>` - quote delivery for the cart

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CartArgs, CollectionArgs, ProductArgs, SearchArgs, ShippingArgs};
use config::CliConfig;
use output::Output;

/// Storefront CLI - catalog, cart, and shipping against a hosted store
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (TOML); environment variables are used when absent
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List store collections
    Collections,

    /// List products in a collection
    Collection(CollectionArgs),

    /// Show a product with all its variants
    Product(ProductArgs),

    /// Search the catalog
    Search(SearchArgs),

    /// Inspect and mutate the cart session
    #[command(subcommand)]
    Cart(CartArgs),

    /// Quote shipping for the current cart
    Shipping(ShippingArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(cli.verbose);
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Collections => commands::catalog::collections(&config, &output).await,
        Commands::Collection(args) => commands::catalog::collection(&config, &output, args).await,
        Commands::Product(args) => commands::catalog::product(&config, &output, args).await,
        Commands::Search(args) => commands::catalog::search(&config, &output, args).await,
        Commands::Cart(args) => commands::cart::run(&config, &output, args).await,
        Commands::Shipping(args) => commands::shipping::quote(&config, &output, args).await,
    }
}
