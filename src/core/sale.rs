//! Sales orders and the sales page's view-state.
//!
//! Order status is stored as free text and the store has accumulated several
//! spellings for the same state. [`SaleStatus::parse`] accepts all of them and
//! [`SaleStatus::as_str`] is the one spelling written back.

use crate::{
    core::customer::Customer,
    core::filter::{SearchTerm, Selector, average, sum_by},
    core::validation::{Field, FieldErrors, require, require_amount},
    entities::sales_order,
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Label used for orders without a customer.
pub const WALK_IN_CUSTOMER: &str = "Walk-in customer";

/// Lifecycle of a sales order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaleStatus {
    Draft,
    Pending,
    Paid,
    Cancelled,
}

impl SaleStatus {
    /// Every status, in form order.
    pub const ALL: [Self; 4] = [Self::Draft, Self::Pending, Self::Paid, Self::Cancelled];

    /// Decodes any spelling found in the store.
    ///
    /// # Errors
    /// Returns `Error::InvalidStatus` for an unknown value.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "rascunho" | "draft" => Ok(Self::Draft),
            "pendente" | "pending" => Ok(Self::Pending),
            "pago" | "paid" | "concluído" | "concluido" | "completed" => Ok(Self::Paid),
            "cancelado" | "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(Error::InvalidStatus {
                value: raw.to_string(),
            }),
        }
    }

    /// Spelling written to the store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "rascunho",
            Self::Pending => "pendente",
            Self::Paid => "pago",
            Self::Cancelled => "cancelado",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for SaleStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sales order as shown on the sales page.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesOrder {
    pub id: i64,
    pub customer_id: Option<i64>,
    pub status: SaleStatus,
    pub payment_method: Option<String>,
    pub total: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<sales_order::Model> for SalesOrder {
    type Error = Error;

    fn try_from(row: sales_order::Model) -> Result<Self> {
        Ok(Self {
            id: row.id,
            customer_id: row.customer_id,
            status: SaleStatus::parse(&row.status)?,
            payment_method: row.payment_method,
            total: row.total,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

impl SalesOrder {
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.status == SaleStatus::Paid
    }
}

/// An order joined with the display name of its customer.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleListing {
    pub order: SalesOrder,
    pub customer_name: String,
}

/// Resolves customer names for each order, keeping order.
#[must_use]
pub fn with_customer_names(orders: &[SalesOrder], customers: &[Customer]) -> Vec<SaleListing> {
    let names: HashMap<i64, &str> = customers.iter().map(|c| (c.id, c.name.as_str())).collect();
    orders
        .iter()
        .map(|order| SaleListing {
            customer_name: order
                .customer_id
                .and_then(|id| names.get(&id).copied())
                .unwrap_or(WALK_IN_CUSTOMER)
                .to_string(),
            order: order.clone(),
        })
        .collect()
}

/// Filters of the sales page.
#[derive(Debug, Clone, Default)]
pub struct SaleFilter {
    /// Matched against the customer name
    pub search: SearchTerm,
    pub status: Selector<SaleStatus>,
}

impl SaleFilter {
    #[must_use]
    pub fn matches(&self, listing: &SaleListing) -> bool {
        self.search.matches_any(&[&listing.customer_name]) && self.status.accepts(&listing.order.status)
    }

    #[must_use]
    pub fn apply(&self, listings: &[SaleListing]) -> Vec<SaleListing> {
        listings
            .iter()
            .filter(|l| self.matches(l))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty() || self.status.is_active()
    }
}

/// Aggregates of the sales summary cards; only paid orders count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalesSummary {
    pub paid_count: usize,
    pub revenue: f64,
    /// Revenue per paid order, zero without paid orders
    pub average_ticket: f64,
}

impl SalesSummary {
    #[must_use]
    pub fn from_orders(orders: &[SalesOrder]) -> Self {
        let paid: Vec<SalesOrder> = orders.iter().filter(|o| o.is_paid()).cloned().collect();
        let revenue = sum_by(&paid, |o| o.total);
        Self {
            paid_count: paid.len(),
            revenue,
            average_ticket: average(revenue, paid.len()),
        }
    }
}

/// Payload of the "new sale" form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub customer_id: Option<i64>,
    pub status: SaleStatus,
    pub payment_method: String,
    pub total: f64,
    pub notes: Option<String>,
}

impl NewSale {
    /// # Errors
    /// Returns `Error::Validation` when the payment method is blank or the
    /// total is negative or not a number.
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        require(&mut errors, Field::PaymentMethod, &self.payment_method);
        require_amount(&mut errors, Field::Total, self.total);
        errors.into_result()
    }

    /// Blank notes are sent as absent.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.trim().is_empty())
    }
}
