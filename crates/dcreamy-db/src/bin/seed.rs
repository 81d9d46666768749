//! # Seed Data Generator
//!
//! Populates a development database with a realistic warung: one owner,
//! an ice-cream catalog, back-room stock items with usage rules, and a
//! day of sample transactions.
//!
//! ## Usage
//! ```bash
//! cargo run -p dcreamy-db --bin seed
//!
//! # Specify database path
//! cargo run -p dcreamy-db --bin seed -- --db ./data/dcreamy.db
//! ```

use chrono::{Duration, Utc};
use std::env;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use dcreamy_core::{
    BusinessDayClock, PaymentMethod, Product, Profile, Shop, StockItem, Transaction,
    TransactionKind, UserRole,
};
use dcreamy_db::{Database, DbConfig};

/// Catalog: (name, emoji, category, buy price, sell price, stock)
const PRODUCTS: &[(&str, &str, &str, i64, i64, i64)] = &[
    ("Es Krim Vanilla", "🍦", "es krim", 4_000, 8_000, 50),
    ("Es Krim Coklat", "🍫", "es krim", 4_500, 8_000, 50),
    ("Es Krim Stroberi", "🍓", "es krim", 4_500, 8_000, 40),
    ("Es Krim Jumbo", "🍨", "es krim", 9_000, 20_000, 20),
    ("Milkshake Coklat", "🥤", "minuman", 6_000, 15_000, 30),
    ("Teh Botol", "🍵", "minuman", 3_000, 5_000, 48),
    ("Air Mineral", "💧", "minuman", 2_000, 4_000, 60),
];

/// Back-room supplies: (name, unit, quantity, min stock)
const STOCK_ITEMS: &[(&str, &str, i64, i64)] = &[
    ("Cup 12oz", "pcs", 200, 50),
    ("Cup Jumbo", "pcs", 60, 20),
    ("Sedotan", "pcs", 500, 100),
    ("Sendok Es Krim", "pcs", 300, 100),
    ("Topping Coklat", "botol", 8, 3),
];

/// Which products consume which supplies, per sale:
/// (product name, stock item name, quantity used)
const USAGE_RULES: &[(&str, &str, i64)] = &[
    ("Es Krim Vanilla", "Cup 12oz", 1),
    ("Es Krim Vanilla", "Sendok Es Krim", 1),
    ("Es Krim Coklat", "Cup 12oz", 1),
    ("Es Krim Coklat", "Sendok Es Krim", 1),
    ("Es Krim Coklat", "Topping Coklat", 1),
    ("Es Krim Stroberi", "Cup 12oz", 1),
    ("Es Krim Stroberi", "Sendok Es Krim", 1),
    ("Es Krim Jumbo", "Cup Jumbo", 1),
    ("Es Krim Jumbo", "Sendok Es Krim", 2),
    ("Milkshake Coklat", "Cup 12oz", 1),
    ("Milkshake Coklat", "Sedotan", 1),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = "./dcreamy_dev.db".to_string();

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
                println!("D'Creamy Finance Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./dcreamy_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 D'Creamy Finance Seed Data Generator");
    println!("=======================================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing_shops: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shops")
        .fetch_one(db.pool())
        .await?;
    if existing_shops > 0 {
        println!("⚠ Database already has {} shop(s)", existing_shops);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let now = Utc::now();

    // Owner and shop
    let owner = Profile {
        id: Uuid::new_v4().to_string(),
        full_name: Some("Bu Rina".to_string()),
        phone: Some("+62811111111".to_string()),
        avatar_url: None,
        role: UserRole::Owner,
        shop_id: None,
        created_at: now,
        updated_at: now,
    };
    db.profiles().insert(&owner).await?;

    let shop = Shop {
        id: Uuid::new_v4().to_string(),
        owner_id: owner.id.clone(),
        name: "D'Creamy".to_string(),
        address: Some("Jl. Mawar No. 1, Bandung".to_string()),
        phone: Some("+62811111111".to_string()),
        logo_url: None,
        created_at: now,
        updated_at: now,
    };

    db.shops().insert(&shop).await?;
    db.profiles()
        .assign_to_shop(&owner.id, &shop.id, UserRole::Owner)
        .await?;

    println!("✓ Created shop '{}' with owner {}", shop.name, owner.id);

    // Catalog
    println!();
    println!("Seeding catalog...");

    let mut product_ids: Vec<(String, String, i64)> = Vec::new(); // (name, id, sell price)
    for (name, emoji, category, buy_price, sell_price, stock) in PRODUCTS {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            shop_id: shop.id.clone(),
            name: (*name).to_string(),
            category: (*category).to_string(),
            emoji: Some((*emoji).to_string()),
            image_url: None,
            buy_price: *buy_price,
            sell_price: *sell_price,
            stock: *stock,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await?;
        product_ids.push(((*name).to_string(), product.id, *sell_price));
    }
    println!("  {} products", product_ids.len());

    // Stock items
    let mut stock_ids: Vec<(String, String)> = Vec::new(); // (name, id)
    for (name, unit, quantity, min_stock) in STOCK_ITEMS {
        let item = StockItem {
            id: Uuid::new_v4().to_string(),
            shop_id: shop.id.clone(),
            name: (*name).to_string(),
            quantity: *quantity,
            unit: (*unit).to_string(),
            min_stock: *min_stock,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.stock().insert(&item).await?;
        stock_ids.push(((*name).to_string(), item.id));
    }
    println!("  {} stock items", stock_ids.len());

    // Usage rules
    let mut rules = 0;
    for (product_name, stock_name, quantity_used) in USAGE_RULES {
        let product_id = product_ids
            .iter()
            .find(|(name, _, _)| name == product_name)
            .map(|(_, id, _)| id.clone());
        let stock_item_id = stock_ids
            .iter()
            .find(|(name, _)| name == stock_name)
            .map(|(_, id)| id.clone());

        if let (Some(product_id), Some(stock_item_id)) = (product_id, stock_item_id) {
            db.stock()
                .link_usage(&product_id, &stock_item_id, *quantity_used)
                .await?;
            rules += 1;
        }
    }
    println!("  {} usage rules", rules);

    // A morning of sales inside the current business day, deducting stock
    // the same way the POS form does
    println!();
    println!("Recording sample transactions...");

    let deduction = db.stock_deduction();
    let mut recorded = 0;
    for (idx, (name, product_id, sell_price)) in product_ids.iter().enumerate() {
        let quantity = 1 + (idx as i64 % 3);
        let tx = Transaction {
            id: Uuid::new_v4().to_string(),
            shop_id: shop.id.clone(),
            kind: TransactionKind::Income,
            amount: sell_price * quantity,
            product_id: Some(product_id.clone()),
            quantity: Some(quantity),
            category: "penjualan".to_string(),
            note: None,
            receipt_url: None,
            payment_method: Some(if idx % 2 == 0 {
                PaymentMethod::Cash
            } else {
                PaymentMethod::Qris
            }),
            created_by: owner.id.clone(),
            created_at: now - Duration::minutes(idx as i64 * 7),
        };
        db.transactions().insert(&tx).await?;
        db.products().adjust_stock(product_id, -quantity).await?;

        let outcome = deduction.deduct(product_id, quantity).await;
        if !outcome.insufficient_items.is_empty() {
            println!("  ⚠ {} short on: {:?}", name, outcome.insufficient_items);
        }
        recorded += 1;
    }

    // One expense so the report has both sides of the ledger
    let expense = Transaction {
        id: Uuid::new_v4().to_string(),
        shop_id: shop.id.clone(),
        kind: TransactionKind::Expense,
        amount: 120_000,
        product_id: None,
        quantity: None,
        category: "bahan baku".to_string(),
        note: Some("Susu & cup mingguan".to_string()),
        receipt_url: None,
        payment_method: Some(PaymentMethod::Transfer),
        created_by: owner.id.clone(),
        created_at: now,
    };
    db.transactions().insert(&expense).await?;
    recorded += 1;

    println!("  {} transactions", recorded);

    // Verify
    println!();
    println!("Verifying...");

    let hits = db.products().search(&shop.id, "krim", 10).await?;
    println!("  Search 'krim': {} results", hits.len());

    let low = db.stock().below_minimum(&shop.id).await?;
    println!("  Low stock items: {}", low.len());

    let clock = BusinessDayClock::default();
    let (start, end) = clock.business_day_range_for(now);
    let summary = db.transactions().summary_between(&shop.id, start, end).await?;
    println!(
        "  Business day {}: {} entries, net {}",
        clock.business_day_label(),
        summary.entries,
        summary.net()
    );
    println!("  Reset in: {}", clock.format_countdown());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
