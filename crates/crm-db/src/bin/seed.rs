//! # Seed Data Generator
//!
//! Resets the database to a small, consistent demo data set.
//!
//! ## Usage
//! ```bash
//! # Seed ./crm.db (or $CRM_DATABASE_PATH)
//! cargo run -p crm-db --bin seed
//!
//! # Specify database path
//! cargo run -p crm-db --bin seed -- --db ./data/crm.db
//! ```
//!
//! ## Generated Data
//! - Customers: Alice (with phone), Bob (without)
//! - Products: Laptop 999.99 × 10, Phone 499.99 × 20
//! - One order for Alice containing both products (total 1499.98)

use std::env;

use anyhow::Context;
use chrono::Utc;
use crm_core::{Money, NewCustomer, NewProduct, Order};
use crm_db::{Database, DbConfig, Store};
use tracing_subscriber::EnvFilter;

const DEFAULT_DB_PATH: &str = "./crm.db";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("CRM_DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("CRM Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $CRM_DATABASE_PATH or {DEFAULT_DB_PATH})");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 CRM Seed Data Generator");
    println!("==========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening database at {db_path}"))?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Links first, then the rows they reference
    let orders = db.orders().delete_all().await?;
    let customers = db.customers().delete_all().await?;
    let products = db.products().delete_all().await?;
    println!(
        "✓ Cleared {} orders, {} customers, {} products",
        orders, customers, products
    );

    let alice = NewCustomer::new("Alice", "alice@example.com", Some("+1234567890".to_string()))
        .into_customer();
    let bob = NewCustomer::new("Bob", "bob@example.com", None).into_customer();
    for customer in [&alice, &bob] {
        db.insert_customer(customer).await?;
    }

    let laptop = NewProduct {
        name: "Laptop".to_string(),
        price: Money::from_cents(99_999),
        stock: 10,
    }
    .into_product();
    let phone = NewProduct {
        name: "Phone".to_string(),
        price: Money::from_cents(49_999),
        stock: 20,
    }
    .into_product();
    for product in [&laptop, &phone] {
        db.insert_product(product).await?;
    }

    let items = vec![laptop, phone];
    let order = Order::for_products(&alice.id, &items, Some(Utc::now()))
        .context("Failed to build seed order")?;
    let product_ids: Vec<String> = items.iter().map(|p| p.id.clone()).collect();
    db.insert_order(&order, &product_ids).await?;

    println!();
    println!("✓ Customers: {}", db.count_customers().await?);
    println!("✓ Products:  {}", db.list_products().await?.len());
    println!("✓ Orders:    {} (total {})", db.count_orders().await?, order.total_amount());
    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
