//! # Shelf Headless Entry Point
//!
//! Opens the local store and prints the stock report: every product with
//! its status badge, grouped counts first.
//!
//! ## Usage
//! ```bash
//! # Whole stock
//! cargo run -p shelf-app
//!
//! # Only one filter chip
//! cargo run -p shelf-app -- expired
//! cargo run -p shelf-app -- near-expiry
//! ```

use shelf_app::commands::product::list_products;
use shelf_app::{bootstrap, init_tracing};
use shelf_core::StockFilter;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    info!("Starting Shelf");

    let filter = match std::env::args().nth(1).as_deref() {
        None | Some("all") => StockFilter::All,
        Some("expired") => StockFilter::Expired,
        Some("near-expiry") => StockFilter::NearExpiry,
        Some(other) => {
            error!(arg = %other, "Unknown filter");
            eprintln!("Usage: shelf [all | expired | near-expiry]");
            std::process::exit(2);
        }
    };

    let (db, config) = bootstrap().await?;
    let list = list_products(&db, &config, Some(filter)).await?;

    println!("{}", config.store_name);
    println!(
        "{} products: {} fresh, {} expiring soon, {} expired",
        list.summary.total, list.summary.fresh, list.summary.near_expiry, list.summary.expired
    );
    println!();

    for p in &list.products {
        println!(
            "{:<6}  {:<28} qty {:>4}  exp {}  {:>4}d  {}",
            p.id,
            p.name,
            p.quantity,
            p.expiration_date.with_timezone(&config.timezone()).format("%Y-%m-%d"),
            p.days_remaining,
            p.badge.as_deref().unwrap_or("")
        );
    }

    db.inner().close().await;
    Ok(())
}
