//! Shared test utilities.
//!
//! Helpers for setting up in-memory stores and building payloads and rows
//! with sensible defaults.

use crate::{
    core::{
        customer::NewCustomer,
        finance::{FinancialTransaction, NewTransaction, TransactionKind, TransactionStatus},
        product::{NewProduct, Product},
        sale::{NewSale, SaleStatus},
    },
    entities::{inventory_level, product},
    errors::Result,
    store::SqlStore,
};
use chrono::{TimeZone, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Routes tracing output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A [`SqlStore`] over a fresh in-memory database.
pub async fn setup_sql_store() -> Result<SqlStore> {
    Ok(SqlStore::new(setup_test_db().await?))
}

/// Inserts a product row directly, without an inventory level.
///
/// # Defaults
/// * category: "Lentes"
/// * brand: "Brand"
/// * price: 100.0
pub async fn insert_product_row(
    store: &SqlStore,
    sku: &str,
    name: &str,
    min_stock: i32,
) -> Result<product::Model> {
    let row = product::ActiveModel {
        sku: Set(sku.to_string()),
        name: Set(name.to_string()),
        category: Set("Lentes".to_string()),
        brand: Set("Brand".to_string()),
        min_stock: Set(min_stock),
        price: Set(100.0),
        is_active: Set(true),
        ..Default::default()
    };
    Ok(row.insert(store.connection()).await?)
}

pub async fn insert_inventory_level(
    store: &SqlStore,
    product_id: i64,
    quantity: i32,
) -> Result<inventory_level::Model> {
    let row = inventory_level::ActiveModel {
        product_id: Set(product_id),
        quantity: Set(quantity),
        ..Default::default()
    };
    Ok(row.insert(store.connection()).await?)
}

#[must_use]
pub fn new_product_fixture(sku: &str) -> NewProduct {
    NewProduct {
        sku: sku.to_string(),
        name: format!("Produto {sku}"),
        category: "Acessórios".to_string(),
        brand: "Brand".to_string(),
        min_stock: 5,
        price: 85.0,
    }
}

/// A valid customer whose e-mail is derived from `name`.
#[must_use]
pub fn new_customer_fixture(name: &str) -> NewCustomer {
    let local: String = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(".");
    NewCustomer {
        name: name.to_string(),
        email: format!("{local}@email.com"),
        phone: Some("(11) 99999-0001".to_string()),
        city: Some("São Paulo".to_string()),
    }
}

#[must_use]
pub fn new_sale_fixture(status: SaleStatus, total: f64) -> NewSale {
    NewSale {
        customer_id: Some(1),
        status,
        payment_method: "PIX".to_string(),
        total,
        notes: None,
    }
}

#[must_use]
pub fn new_transaction_fixture(kind: TransactionKind, amount: f64) -> NewTransaction {
    NewTransaction {
        kind,
        category: "Vendas".to_string(),
        amount,
        related_order_id: None,
        status: None,
        description: Some("Lançamento de teste".to_string()),
    }
}

#[must_use]
pub fn product_fixture(
    id: i64,
    name: &str,
    category: &str,
    stock: i32,
    min_stock: i32,
    price: f64,
) -> Product {
    Product {
        id,
        sku: format!("SKU-{id}"),
        name: name.to_string(),
        category: category.to_string(),
        brand: "Brand".to_string(),
        price,
        min_stock,
        stock,
        is_active: true,
    }
}

/// A transaction dated 2024-12-01 with no description.
#[must_use]
pub fn transaction_fixture(
    id: i64,
    kind: TransactionKind,
    amount: f64,
    status: TransactionStatus,
) -> FinancialTransaction {
    FinancialTransaction {
        id,
        kind,
        category: "Vendas".to_string(),
        amount,
        related_order_id: None,
        status,
        description: None,
        created_at: Utc
            .with_ymd_and_hms(2024, 12, 1, 10, 0, 0)
            .single()
            .unwrap_or_default(),
    }
}
