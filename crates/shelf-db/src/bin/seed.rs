//! # Seed Data Generator
//!
//! Populates the database with perishable products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 40 products (default)
//! cargo run -p shelf-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p shelf-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p shelf-db --bin seed -- --db ./data/shelf.db
//! ```
//!
//! ## Generated Products
//! Expiration dates are spread so the list shows every status:
//! - roughly a fifth already expired
//! - roughly a third expiring within 30 days
//! - the rest fresh

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use shelf_core::id::generate_unique_id_with;
use shelf_core::{BrazilianState, Product};
use shelf_db::{Database, DbConfig};
use std::collections::HashSet;
use std::env;

/// Product names with a plausible shelf life in days.
const CATALOG: &[(&str, i64)] = &[
    ("Whole Milk 1L", 10),
    ("Skim Milk 1L", 10),
    ("Greek Yogurt", 25),
    ("Queijo Minas 500g", 20),
    ("Mozzarella 400g", 45),
    ("Butter 200g", 90),
    ("Cream Cheese", 60),
    ("Eggs Dozen", 28),
    ("White Bread", 7),
    ("Wheat Bread", 7),
    ("Pao de Queijo 1kg", 180),
    ("Ham 200g", 15),
    ("Chicken Breast 1kg", 5),
    ("Ground Beef 500g", 4),
    ("Orange Juice 1L", 30),
    ("Tomato Sauce", 365),
    ("Requeijao 200g", 40),
    ("Doce de Leite", 240),
    ("Fresh Pasta 500g", 21),
    ("Lettuce", 6),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 40;
    let mut db_path = String::from("./shelf_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(40);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shelf Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 40)");
                println!("  -d, --db <PATH>    Database file path (default: ./shelf_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Shelf Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut rng = rand::thread_rng();
    let mut taken: HashSet<String> = HashSet::new();
    let mut products = Vec::with_capacity(count);

    for n in 0..count {
        let id = generate_unique_id_with(&mut rng, |id| taken.contains(id))?;
        taken.insert(id.clone());
        products.push(generate_product(&mut rng, id, n));
    }

    // One write for the whole collection
    db.products().save_all(&products).await?;

    let now = Utc::now();
    let expired = products.iter().filter(|p| p.status(&now).is_expired()).count();
    let near = products
        .iter()
        .filter(|p| p.status(&now).is_near_expiry())
        .count();

    println!();
    println!("✓ Generated {} products", products.len());
    println!("  Expired:      {}", expired);
    println!("  Near expiry:  {}", near);
    println!("  Fresh:        {}", products.len() - expired - near);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates one product with realistic data.
fn generate_product<R: Rng>(rng: &mut R, id: String, seed: usize) -> Product {
    let now = Utc::now();
    let (name, shelf_life) = CATALOG[seed % CATALOG.len()];

    // Spread expirations from 15 days ago to 90 days ahead
    let days_left: i64 = match rng.gen_range(0..10) {
        0 | 1 => rng.gen_range(-15..0),
        2..=4 => rng.gen_range(1..=30),
        _ => rng.gen_range(31..=90),
    };
    let expiration_date = now + Duration::days(days_left);
    let manufacturing_date = expiration_date - Duration::days(shelf_life);

    let state = BrazilianState::ALL
        .choose(rng)
        .copied()
        .unwrap_or(BrazilianState::SP);

    Product {
        id,
        name: name.to_string(),
        manufacturing_date,
        expiration_date,
        quantity: rng.gen_range(1..=120),
        batch: format!("L{}{:03}", (b'A' + (seed % 26) as u8) as char, seed % 1000),
        barcode: format!("789{:010}", rng.gen_range(0..10_000_000_000u64)),
        state: state.code().to_string(),
        image_uri: None,
        description: None,
    }
}
