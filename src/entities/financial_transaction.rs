//! Financial transaction entity - Money entering or leaving the store.
//!
//! `kind` is `"entrada"` (inflow) or `"saida"` (outflow) and `status` is
//! free text; both are decoded in `core::finance`.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Financial transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "financial_transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Direction of the money as stored
    pub kind: String,
    /// Bookkeeping category (e.g., "Vendas", "Despesas Fixas")
    pub category: String,
    /// Transaction amount, always non-negative; `kind` carries the sign
    pub amount: f64,
    /// Sales order that produced this transaction, if any
    pub related_order_id: Option<i64>,
    /// Settlement status as stored
    pub status: String,
    /// Human-readable description
    pub description: Option<String>,
    /// When the transaction was recorded
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
