//! Shared fixtures for the repository and service tests.
//!
//! The in-memory database is the fake: every test gets an isolated SQLite
//! instance with the real migrations applied, then builds the rows it
//! needs through the real repositories.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Database, DbConfig};
use dcreamy_core::{
    PaymentMethod, Product, Profile, Shop, StockItem, Transaction, TransactionKind, UserRole,
};

pub(crate) async fn test_database() -> Database {
    Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database")
}

pub(crate) async fn sample_profile(
    db: &Database,
    role: UserRole,
    shop_id: Option<String>,
) -> Profile {
    let now = Utc::now();
    let profile = Profile {
        id: Uuid::new_v4().to_string(),
        full_name: Some("Test User".to_string()),
        phone: None,
        avatar_url: None,
        role,
        shop_id,
        created_at: now,
        updated_at: now,
    };
    db.profiles().insert(&profile).await.expect("insert profile");
    profile
}

/// A shop with its owner profile already assigned.
pub(crate) async fn sample_shop(db: &Database) -> (Shop, Profile) {
    let owner = sample_profile(db, UserRole::Owner, None).await;

    let now = Utc::now();
    let shop = Shop {
        id: Uuid::new_v4().to_string(),
        owner_id: owner.id.clone(),
        name: "D'Creamy".to_string(),
        address: Some("Jl. Mawar 1".to_string()),
        phone: None,
        logo_url: None,
        created_at: now,
        updated_at: now,
    };
    db.shops().insert(&shop).await.expect("insert shop");
    db.profiles()
        .assign_to_shop(&owner.id, &shop.id, UserRole::Owner)
        .await
        .expect("assign owner");

    let owner = db
        .profiles()
        .get_by_id(&owner.id)
        .await
        .expect("fetch owner")
        .expect("owner exists");

    (shop, owner)
}

pub(crate) async fn sample_product(
    db: &Database,
    shop_id: &str,
    name: &str,
    sell_price: i64,
) -> Product {
    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4().to_string(),
        shop_id: shop_id.to_string(),
        name: name.to_string(),
        category: "es krim".to_string(),
        emoji: Some("🍦".to_string()),
        image_url: None,
        buy_price: (sell_price * 6) / 10,
        sell_price,
        stock: 10,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    db.products().insert(&product).await.expect("insert product");
    product
}

pub(crate) async fn sample_stock_item(
    db: &Database,
    shop_id: &str,
    name: &str,
    quantity: i64,
    min_stock: i64,
) -> StockItem {
    let now = Utc::now();
    let item = StockItem {
        id: Uuid::new_v4().to_string(),
        shop_id: shop_id.to_string(),
        name: name.to_string(),
        quantity,
        unit: "pcs".to_string(),
        min_stock,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    db.stock().insert(&item).await.expect("insert stock item");
    item
}

/// Inserts a ledger entry at a fixed instant and returns its id.
pub(crate) async fn insert_transaction(
    db: &Database,
    shop_id: &str,
    created_by: &str,
    kind: TransactionKind,
    amount: i64,
    at: DateTime<Utc>,
) -> String {
    let (category, payment_method) = match kind {
        TransactionKind::Income => ("penjualan", Some(PaymentMethod::Cash)),
        TransactionKind::Expense => ("bahan baku", None),
    };

    let tx = Transaction {
        id: Uuid::new_v4().to_string(),
        shop_id: shop_id.to_string(),
        kind,
        amount,
        product_id: None,
        quantity: None,
        category: category.to_string(),
        note: None,
        receipt_url: None,
        payment_method,
        created_by: created_by.to_string(),
        created_at: at,
    };
    db.transactions().insert(&tx).await.expect("insert transaction");
    tx.id
}
