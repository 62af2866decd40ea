//! Sales order entity - One sale, from draft to paid or cancelled.
//!
//! The `status` column is free text in the store; `core::sale::SaleStatus`
//! decodes it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sales order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Buying customer, None for walk-in sales
    pub customer_id: Option<i64>,
    /// Order status as stored (e.g., `"pago"`, `"pendente"`)
    pub status: String,
    /// Payment method label (e.g., "PIX", "Cartão Crédito")
    pub payment_method: Option<String>,
    /// Order total
    pub total: f64,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the order was created
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
