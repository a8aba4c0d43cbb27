mod actor_framework;
mod actors;
mod app_system;
mod bot_preview;
mod catalog;
mod clients;
mod config;
mod domain;
mod error;
mod messages;
mod order_actor;
mod render;
mod shell;
mod shop;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

use std::path::PathBuf;
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::{error, info, warn, Instrument};
use crate::actors::BotSnapshot;
use crate::app_system::{setup_tracing, ShopSystem};
use crate::catalog::{Catalog, CatalogError, CatalogQuery, CategoryFilter, ALL_CATEGORIES};
use crate::config::ShopConfig;
use crate::domain::{DeliveryMethod, OrderDraft};
use crate::error::ShopError;
use crate::order_actor::OrderError;
use crate::render::{
    CartView, CatalogView, CheckoutView, HeaderView, KeyboardView, OrdersView, TurnView,
};
use crate::shell::Shell;
use crate::shop::View;

#[derive(Parser)]
#[command(name = "shop-bot-demo")]
#[command(about = "Demo storefront with a scripted Telegram bot preview")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the catalog, optionally filtered
    Catalog {
        /// Substring of a product name or description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Exact category name, or "all"
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,
    },
    /// Run a scripted shopping session end to end
    Walkthrough,
    /// Replay the bot conversation, then press the given buttons
    Bot {
        /// Button label to press once the replay is over (repeatable)
        #[arg(long = "press")]
        presses: Vec<String>,
    },
    /// Interactive shop over stdin
    Shell,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cli = Cli::parse();

    // Setup tracing once for the entire application
    setup_tracing(if cli.verbose { "debug" } else { "info" });

    let config = match &cli.config {
        Some(path) => ShopConfig::from_file(path).map_err(|e| e.to_string())?,
        None => ShopConfig::load_or_default(),
    };
    let catalog = load_catalog(&config).map_err(|e| e.to_string())?;
    info!(products = catalog.len(), "Catalog loaded");

    let system = ShopSystem::new(&config, catalog);

    let result = match cli.command {
        Commands::Catalog { search, category } => {
            print_catalog(&system, CatalogQuery::new(search, CategoryFilter::parse(&category))).await
        }
        Commands::Walkthrough => walkthrough(&system, config.shop.free_delivery_threshold).await,
        Commands::Bot { presses } => replay_bot(&system, presses).await,
        Commands::Shell => Shell::new(&system, config.shop.free_delivery_threshold).run().await,
    };

    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    result
}

fn load_catalog(config: &ShopConfig) -> Result<Catalog, CatalogError> {
    match &config.catalog.fixture_path {
        Some(path) => Catalog::from_path(path),
        None => Catalog::from_fixture(),
    }
}

async fn print_catalog(system: &ShopSystem, query: CatalogQuery) -> Result<(), String> {
    let page = system.shop_client.catalog(query).await.map_err(|e| e.to_string())?;
    print!("{}", CatalogView(&page));
    Ok(())
}

async fn print_header(system: &ShopSystem) -> Result<(), ShopError> {
    let header = system.shop_client.header().await?;
    print!("{}", HeaderView(&header));
    Ok(())
}

/// Scripted session: fill the cart, trip validation once, then place an order.
async fn walkthrough(system: &ShopSystem, free_delivery_threshold: u64) -> Result<(), String> {
    let shop = &system.shop_client;

    let span = tracing::info_span!("browse");
    async {
        let query = CatalogQuery::new("наушники", CategoryFilter::All);
        let page = shop.catalog(query).await?;
        print_header(system).await?;
        print!("{}", CatalogView(&page));

        for product_id in ["1", "1", "2", "8"] {
            match shop.add_to_cart(product_id.to_string()).await {
                Ok(cart) => info!(%product_id, items = cart.item_count, "Added to cart"),
                Err(e) => warn!(%product_id, error = %e, "Could not add to cart"),
            }
        }
        shop.update_quantity("2".to_string(), 3).await?;
        shop.navigate(View::Cart).await?;
        let cart = shop.cart().await?;
        print_header(system).await?;
        print!("{}", CartView { cart: &cart, free_delivery_threshold });
        Ok::<_, ShopError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("checkout");
    async {
        shop.navigate(View::Checkout).await?;
        let cart = shop.cart().await?;

        let invalid = OrderDraft {
            name: String::new(),
            phone: "+7 (999) 123-45-67".to_string(),
            email: "ivan-at-example".to_string(),
            address: "г. Москва, ул. Ленина, д. 1, кв. 1".to_string(),
            ..OrderDraft::default()
        };
        match shop.place_order(invalid.clone()).await {
            Err(ShopError::Order(OrderError::Validation(errors))) => {
                print_header(system).await?;
                print!("{}", CheckoutView { cart: &cart, draft: &invalid, errors: Some(&errors) });
            }
            Err(e) => return Err(e),
            Ok(order) => warn!(order_id = %order.id, "Invalid form was accepted"),
        }

        let valid = OrderDraft {
            name: "Иванов Иван Иванович".to_string(),
            email: "ivan@example.com".to_string(),
            comment: "Позвонить за час".to_string(),
            delivery_method: DeliveryMethod::Pickup,
            ..invalid
        };
        let order = shop.place_order(valid).await?;
        println!("✅ Заказ #{} оформлен!\n{}\n", order.id, order.notice);
        Ok::<_, ShopError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let orders = shop.orders().await.map_err(|e| e.to_string())?;
    print_header(system).await.map_err(|e| e.to_string())?;
    print!("{}", OrdersView(&orders));
    Ok(())
}

/// Prints turns as they arrive until the replay is idle.
async fn follow(updates: &mut watch::Receiver<BotSnapshot>, shown: &mut usize) -> Result<(), String> {
    loop {
        let snapshot = updates.borrow_and_update().clone();
        for turn in snapshot.turns.iter().skip(*shown) {
            print!("{}", TurnView(turn));
        }
        *shown = snapshot.turns.len();
        if snapshot.idle {
            return Ok(());
        }
        updates.changed().await.map_err(|e| e.to_string())?;
    }
}

async fn replay_bot(system: &ShopSystem, presses: Vec<String>) -> Result<(), String> {
    system.shop_client.navigate(View::Bot).await.map_err(|e| e.to_string())?;
    let preview = system.open_bot_preview();
    let mut updates = preview.client.subscribe();
    let mut shown = 0;

    follow(&mut updates, &mut shown).await?;
    for label in presses {
        preview.client.press(label).await.map_err(|e| e.to_string())?;
        follow(&mut updates, &mut shown).await?;
    }

    let turns = preview.client.transcript().await.map_err(|e| e.to_string())?;
    if let Some(last) = turns.last() {
        print!("{}", KeyboardView(&last.keyboard));
    }
    preview.client.shutdown().await.map_err(|e| e.to_string())
}
