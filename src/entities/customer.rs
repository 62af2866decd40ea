//! Customer entity - People who buy from the store.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Unique identifier for the customer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name
    pub name: String,
    /// Contact e-mail
    pub email: String,
    /// Contact phone, digits with optional formatting
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub phone: String,
    /// City of residence
    #[serde(default, deserialize_with = "super::null_as_empty")]
    pub city: String,
    /// Number of purchases, maintained by the store when known
    pub total_purchases: Option<i32>,
}

/// Customers are referenced by sales orders but own no relations here
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
