//! Product entity - Catalog items sold by the store.
//!
//! A product carries its SKU, brand, category, unit price and the minimum
//! stock threshold. The quantity on hand lives in `inventory_levels`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Stock keeping unit, e.g. "RB-3025"
    pub sku: String,
    /// Display name (e.g., "Óculos Ray-Ban Aviador")
    pub name: String,
    /// Catalog category (e.g., "Lentes", "Armações")
    pub category: String,
    /// Manufacturer brand
    pub brand: String,
    /// Stock level at or below which the product needs restocking
    pub min_stock: i32,
    /// Unit price
    pub price: f64,
    /// Whether the product is still sold
    pub is_active: bool,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product has at most one inventory level row
    #[sea_orm(has_one = "super::inventory_level::Entity")]
    InventoryLevel,
}

impl Related<super::inventory_level::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryLevel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
