//! Seed data shown while no live rows are available.
//!
//! Pages fall back to these records until the first fetch succeeds, and
//! [`crate::store::memory::MemoryStore::seeded`] serves them as a store.

use crate::core::{
    customer::Customer,
    finance::{FinancialTransaction, TransactionKind, TransactionStatus},
    product::Product,
    sale::{SaleStatus, SalesOrder},
};
use chrono::{DateTime, NaiveDate, Utc};

fn seed_time(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .map(|n| n.and_utc())
        .unwrap_or_default()
}

fn product(
    id: i64,
    name: &str,
    sku: &str,
    category: &str,
    brand: &str,
    (stock, min_stock): (i32, i32),
    price: f64,
) -> Product {
    Product {
        id,
        sku: sku.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        brand: brand.to_string(),
        price,
        min_stock,
        stock,
        is_active: true,
    }
}

/// Inventory seed, ordered by name like the live query.
#[must_use]
pub fn products() -> Vec<Product> {
    let mut products = vec![
        product(1, "Óculos Ray-Ban Aviador", "RB-3025", "Óculos de Sol", "Ray-Ban", (15, 5), 890.0),
        product(2, "Armação Oakley Crosslink", "OK-CL-01", "Armações", "Oakley", (8, 3), 650.0),
        product(3, "Lente Transitions Gen 8", "LT-G8-01", "Lentes", "Transitions", (3, 10), 420.0),
        product(4, "Óculos Chilli Beans Sport", "CB-SP-22", "Óculos de Sol", "Chilli Beans", (22, 8), 320.0),
        product(5, "Estojo Premium Couro", "EST-PR-01", "Acessórios", "Genérico", (45, 15), 85.0),
        product(6, "Lente Varilux X Series", "VX-XS-02", "Lentes", "Varilux", (2, 5), 1250.0),
    ];
    products.sort_by(|a, b| a.name.cmp(&b.name));
    products
}

fn customer(id: i64, name: &str, email: &str, phone: &str, city: &str, purchases: i32) -> Customer {
    Customer {
        id,
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        city: city.to_string(),
        total_purchases: Some(purchases),
    }
}

#[must_use]
pub fn customers() -> Vec<Customer> {
    vec![
        customer(1, "Maria Silva", "maria@email.com", "(11) 99999-0001", "São Paulo", 5),
        customer(2, "João Santos", "joao@email.com", "(11) 99999-0002", "São Paulo", 3),
        customer(3, "Ana Costa", "ana@email.com", "(21) 99999-0003", "Rio de Janeiro", 8),
        customer(4, "Pedro Lima", "pedro@email.com", "(31) 99999-0004", "Belo Horizonte", 2),
        customer(5, "Carla Souza", "carla@email.com", "(11) 99999-0005", "São Paulo", 12),
    ]
}

fn order(
    id: i64,
    customer_id: Option<i64>,
    status: SaleStatus,
    method: &str,
    total: f64,
    created_at: DateTime<Utc>,
) -> SalesOrder {
    SalesOrder {
        id,
        customer_id,
        status,
        payment_method: Some(method.to_string()),
        total,
        notes: None,
        created_at,
    }
}

/// Sales seed, newest first.
#[must_use]
pub fn sales_orders() -> Vec<SalesOrder> {
    vec![
        order(1, Some(1), SaleStatus::Paid, "Cartão Crédito", 1250.0, seed_time(2024, 12, 4, 15)),
        order(2, Some(2), SaleStatus::Pending, "PIX", 890.0, seed_time(2024, 12, 4, 11)),
        order(3, Some(3), SaleStatus::Paid, "Cartão Débito", 2100.0, seed_time(2024, 12, 3, 16)),
        order(4, Some(4), SaleStatus::Cancelled, "Dinheiro", 450.0, seed_time(2024, 12, 3, 10)),
        order(5, Some(5), SaleStatus::Paid, "Cartão Crédito", 1780.0, seed_time(2024, 12, 2, 14)),
        order(6, None, SaleStatus::Paid, "PIX", 650.0, seed_time(2024, 12, 2, 9)),
    ]
}

fn transaction(
    id: i64,
    description: &str,
    category: &str,
    (kind, status): (TransactionKind, TransactionStatus),
    amount: f64,
    created_at: DateTime<Utc>,
) -> FinancialTransaction {
    FinancialTransaction {
        id,
        kind,
        category: category.to_string(),
        amount,
        related_order_id: None,
        status,
        description: Some(description.to_string()),
        created_at,
    }
}

/// Finance seed, newest first.
#[must_use]
pub fn financial_transactions() -> Vec<FinancialTransaction> {
    use TransactionKind::{Inflow, Outflow};
    use TransactionStatus::{Completed, Pending};
    vec![
        transaction(1, "Venda - Maria Silva", "Vendas", (Inflow, Completed), 1250.0, seed_time(2024, 12, 4, 15)),
        transaction(2, "Fornecedor - Luxottica", "Compras", (Outflow, Completed), 3500.0, seed_time(2024, 12, 4, 9)),
        transaction(3, "Venda - Ana Costa", "Vendas", (Inflow, Completed), 2100.0, seed_time(2024, 12, 3, 16)),
        transaction(4, "Aluguel Dezembro", "Despesas Fixas", (Outflow, Pending), 2800.0, seed_time(2024, 12, 3, 8)),
        transaction(5, "Venda - Carla Souza", "Vendas", (Inflow, Completed), 1780.0, seed_time(2024, 12, 2, 14)),
    ]
}
