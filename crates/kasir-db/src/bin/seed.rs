//! # Seed Data Generator
//!
//! Populates the database with categories and products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p kasir-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p kasir-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p kasir-db --bin seed -- --db ./data/kasir.db
//! ```
//!
//! Each product is named `{item} {size}`, priced from the item's base price
//! plus a size surcharge, with stock between 0 and 100. Seeding is skipped
//! when the database already holds products.

use std::env;

use kasir_core::{NewCategory, NewProduct};
use kasir_db::{CategoryStore, Database, DbConfig, ProductStore};

/// Categories with (item, base price) pairs.
const CATALOG: &[(&str, &str, &[(&str, i64)])] = &[
    (
        "Minuman",
        "Minuman kemasan dan seduh",
        &[
            ("Teh Botol", 4000),
            ("Teh Pucuk", 3500),
            ("Aqua", 3000),
            ("Kopi Susu", 6000),
            ("Susu UHT", 7000),
            ("Jus Jeruk", 8000),
        ],
    ),
    (
        "Makanan Instan",
        "Mi, bubur, dan lauk siap saji",
        &[
            ("Indomie Goreng", 3500),
            ("Indomie Soto", 3300),
            ("Sarimi Kari", 3000),
            ("Pop Mie", 5500),
            ("Bubur Instan", 6500),
        ],
    ),
    (
        "Camilan",
        "Keripik, biskuit, dan permen",
        &[
            ("Chitato", 11000),
            ("Qtela", 9000),
            ("Roma Kelapa", 8500),
            ("Oreo", 9500),
            ("Kacang Garuda", 12000),
        ],
    ),
    (
        "Sembako",
        "Kebutuhan pokok",
        &[
            ("Beras", 14000),
            ("Gula Pasir", 15000),
            ("Minyak Goreng", 18000),
            ("Telur", 28000),
            ("Tepung Terigu", 12000),
        ],
    ),
    (
        "Perlengkapan Mandi",
        "Sabun, sampo, dan pasta gigi",
        &[
            ("Sabun Mandi", 4500),
            ("Sampo", 9000),
            ("Pasta Gigi", 11000),
            ("Sikat Gigi", 7500),
        ],
    ),
];

/// Size variants with a price surcharge.
const SIZES: &[(&str, i64)] = &[
    ("Kecil", 0),
    ("Sedang", 1500),
    ("Besar", 3000),
    ("Jumbo", 6000),
    ("Isi 3", 7000),
    ("Isi 6", 15000),
    ("Isi 12", 32000),
    ("Dus", 90000),
];

const DEFAULT_COUNT: usize = 200;
const DEFAULT_DB: &str = "./kasir_dev.db";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = DEFAULT_COUNT;
    let mut db_path = String::from(DEFAULT_DB);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
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
                println!("Kasir POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: {})", DEFAULT_COUNT);
                println!("  -d, --db <PATH>    Database file path (default: {})", DEFAULT_DB);
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Kasir POS Seed Data Generator");
    println!("================================");
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

    println!();
    println!("Generating products...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    'catalog: for (category_name, description, items) in CATALOG {
        let category = db
            .categories()
            .create(&NewCategory {
                name: category_name.to_string(),
                description: Some(description.to_string()),
            })
            .await?;

        for (item_idx, (item, base_price)) in items.iter().enumerate() {
            for (size_idx, (size, surcharge)) in SIZES.iter().enumerate() {
                if generated >= count {
                    break 'catalog;
                }

                let product = NewProduct {
                    name: format!("{} {}", item, size),
                    price: base_price + surcharge,
                    stock: ((generated * 37 + item_idx * 7 + size_idx) % 101) as i64,
                    category_id: Some(category.id),
                };

                if let Err(e) = db.products().create(&product).await {
                    eprintln!("Failed to insert {}: {}", product.name, e);
                    continue;
                }

                generated += 1;
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    let teh = db.products().list(Some("teh")).await?;
    println!("  Filter 'teh': {} products", teh.len());

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
