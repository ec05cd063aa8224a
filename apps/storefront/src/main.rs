use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    cart, checkout::checkout, format_total, sync, CatalogService, State, Store,
};
use shared::{
    action::Action,
    domain::{CategoryId, ProductId},
};
use storage::{OfflineStore, Storage};
use tracing::info;

mod config;
mod services;

use config::{load_settings, Settings};
use services::{JsonFileCatalog, LocalCheckout, TokenAuth};

#[derive(Parser, Debug)]
#[command(about = "Browse the catalog and manage the shopping cart")]
struct Cli {
    /// Overrides the configured offline cache database.
    #[arg(long)]
    database_url: Option<String>,
    /// Overrides the configured catalog document.
    #[arg(long)]
    catalog: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Refresh categories and products from the catalog, falling back to the cache.
    Sync,
    Categories,
    Products {
        #[arg(long)]
        category: Option<String>,
    },
    Add {
        product_id: String,
    },
    Remove {
        product_id: String,
    },
    Quantity {
        product_id: String,
        quantity: u32,
    },
    Cart,
    Clear,
    Checkout,
    /// Apply a raw JSON action to the current state and print the result.
    Dispatch {
        action: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(database_url) = cli.database_url {
        settings.database_url = database_url;
    }
    if let Some(catalog) = cli.catalog {
        settings.catalog_path = catalog;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    run(cli.command, &settings).await
}

async fn run(command: Command, settings: &Settings) -> Result<()> {
    let storage = Storage::new(&settings.database_url)
        .await
        .with_context(|| format!("failed to open offline cache {}", settings.database_url))?;
    let cache: Arc<dyn OfflineStore> = Arc::new(storage);
    let catalog: Arc<dyn CatalogService> = Arc::new(JsonFileCatalog::new(&settings.catalog_path));
    let store = Store::default();

    let restored = sync::restore_cart(&store, cache.as_ref()).await?;
    info!(restored, database_url = %settings.database_url, "storefront ready");

    match command {
        Command::Sync => {
            let report = sync::SyncTask::spawn(store.clone(), catalog, Arc::clone(&cache))
                .join()
                .await?;
            let state = store.get_state();
            println!(
                "categories: {} ({:?}), products: {} ({:?})",
                state.categories.len(),
                report.categories,
                state.products.len(),
                report.products
            );
        }
        Command::Categories => {
            sync::sync_categories(&store, catalog.as_ref(), cache.as_ref()).await?;
            for category in &store.get_state().categories {
                println!("{}\t{}", category.id, category.name);
            }
        }
        Command::Products { category } => {
            sync::sync_products(&store, catalog.as_ref(), cache.as_ref()).await?;
            if let Some(category) = category {
                store.dispatch(Action::UpdateCurrentCategory {
                    current_category: CategoryId::new(category),
                });
            }
            for product in store.get_state().visible_products() {
                println!(
                    "{}\t{}\t${}",
                    product.id,
                    product.name,
                    format_total(product.price)
                );
            }
        }
        Command::Add { product_id } => {
            sync::sync_products(&store, catalog.as_ref(), cache.as_ref()).await?;
            let id = ProductId::new(product_id);
            let product = store
                .get_state()
                .find_product(&id)
                .cloned()
                .ok_or_else(|| anyhow!("no product with id {id}"))?;
            let line = cart::add_to_cart(&store, cache.as_ref(), &product).await?;
            println!("{} x{}", line.product.name, line.purchase_quantity);
            print_cart(&store.get_state());
        }
        Command::Remove { product_id } => {
            cart::remove_from_cart(&store, cache.as_ref(), &ProductId::new(product_id)).await?;
            print_cart(&store.get_state());
        }
        Command::Quantity {
            product_id,
            quantity,
        } => {
            cart::update_quantity(&store, cache.as_ref(), &ProductId::new(product_id), quantity)
                .await?;
            print_cart(&store.get_state());
        }
        Command::Cart => {
            store.dispatch(Action::ToggleCart);
            print_cart(&store.get_state());
        }
        Command::Clear => {
            cart::clear_cart(&store, cache.as_ref()).await?;
            print_cart(&store.get_state());
        }
        Command::Checkout => {
            let auth = TokenAuth::new(settings.auth_token.clone());
            let service = LocalCheckout::new(&settings.checkout_base_url);
            let session = checkout(&store, &auth, &service).await?;
            println!("redirect: {}", session.redirect_url);
        }
        Command::Dispatch { action } => {
            let action = Action::from_json(&action).context("invalid action JSON")?;
            let state = store.dispatch(action);
            println!("{}", serde_json::to_string_pretty(state.as_ref())?);
        }
    }

    Ok(())
}

fn print_cart(state: &State) {
    if !state.cart_open {
        println!("cart closed ({} items)", state.cart_item_count());
        return;
    }
    if state.cart.is_empty() {
        println!("cart is empty");
        return;
    }
    for line in &state.cart {
        println!(
            "{}\t{}\tx{}\t${}",
            line.id(),
            line.product.name,
            line.purchase_quantity,
            format_total(line.subtotal())
        );
    }
    println!("Total: ${}", format_total(state.cart_total()));
}
