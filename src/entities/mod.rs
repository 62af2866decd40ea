//! Entity module - SeaORM definitions for the store's tables.
//! These entities mirror the storage rows; `core` maps them to display records.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod customer;
pub mod financial_transaction;
pub mod inventory_level;
pub mod product;
pub mod sales_order;

use serde::{Deserialize, Deserializer};

// Re-export specific types to avoid conflicts
pub use customer::{Column as CustomerColumn, Entity as Customer, Model as CustomerModel};
pub use financial_transaction::{
    Column as FinancialTransactionColumn, Entity as FinancialTransaction,
    Model as FinancialTransactionModel,
};
pub use inventory_level::{
    Column as InventoryLevelColumn, Entity as InventoryLevel, Model as InventoryLevelModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use sales_order::{Column as SalesOrderColumn, Entity as SalesOrder, Model as SalesOrderModel};

/// Reads a nullable text column as an empty string.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
