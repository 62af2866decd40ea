//! Financial transactions and the finance page's view-state.

use crate::{
    core::filter::{SearchTerm, Selector},
    core::validation::{Field, FieldErrors, require, require_amount},
    entities::financial_transaction,
    errors::{Error, Result},
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::fmt;

/// Direction of money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Inflow,
    Outflow,
}

impl TransactionKind {
    /// # Errors
    /// Returns `Error::InvalidStatus` for an unknown value.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "entrada" | "inflow" | "income" => Ok(Self::Inflow),
            "saida" | "saída" | "outflow" | "expense" => Ok(Self::Outflow),
            _ => Err(Error::InvalidStatus {
                value: raw.to_string(),
            }),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inflow => "entrada",
            Self::Outflow => "saida",
        }
    }

    /// Sign shown before the amount.
    #[must_use]
    pub const fn sign(self) -> char {
        match self {
            Self::Inflow => '+',
            Self::Outflow => '-',
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inflow => "inflow",
            Self::Outflow => "outflow",
        })
    }
}

/// Settlement state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
}

impl TransactionStatus {
    /// # Errors
    /// Returns `Error::InvalidStatus` for an unknown value.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "pendente" | "pending" => Ok(Self::Pending),
            "concluído" | "concluido" | "completed" | "pago" | "paid" => Ok(Self::Completed),
            _ => Err(Error::InvalidStatus {
                value: raw.to_string(),
            }),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pendente",
            Self::Completed => "concluido",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        })
    }
}

/// Financial transaction as shown on the finance page.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialTransaction {
    pub id: i64,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub related_order_id: Option<i64>,
    pub status: TransactionStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<financial_transaction::Model> for FinancialTransaction {
    type Error = Error;

    fn try_from(row: financial_transaction::Model) -> Result<Self> {
        Ok(Self {
            id: row.id,
            kind: TransactionKind::parse(&row.kind)?,
            category: row.category,
            amount: row.amount,
            related_order_id: row.related_order_id,
            status: TransactionStatus::parse(&row.status)?,
            description: row.description,
            created_at: row.created_at,
        })
    }
}

impl FinancialTransaction {
    #[must_use]
    pub fn description_or_category(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.category)
    }

    fn is_completed(&self, kind: TransactionKind) -> bool {
        self.kind == kind && self.status == TransactionStatus::Completed
    }
}

/// Filters of the finance page.
#[derive(Debug, Clone, Default)]
pub struct FinanceFilter {
    /// Matched against description and category
    pub search: SearchTerm,
    pub kind: Selector<TransactionKind>,
}

impl FinanceFilter {
    #[must_use]
    pub fn matches(&self, tx: &FinancialTransaction) -> bool {
        self.search
            .matches_any(&[tx.description.as_deref().unwrap_or_default(), &tx.category])
            && self.kind.accepts(&tx.kind)
    }

    #[must_use]
    pub fn apply(&self, transactions: &[FinancialTransaction]) -> Vec<FinancialTransaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty() || self.kind.is_active()
    }
}

/// Cash-flow cards. Inflows and outflows count completed transactions only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinanceSummary {
    pub inflows: f64,
    pub outflows: f64,
    /// inflows − outflows
    pub balance: f64,
    /// Everything not yet settled, either direction
    pub pending: f64,
}

impl FinanceSummary {
    #[must_use]
    pub fn from_transactions(transactions: &[FinancialTransaction]) -> Self {
        let inflows = transactions
            .iter()
            .filter(|t| t.is_completed(TransactionKind::Inflow))
            .map(|t| t.amount)
            .sum::<f64>();
        let outflows = transactions
            .iter()
            .filter(|t| t.is_completed(TransactionKind::Outflow))
            .map(|t| t.amount)
            .sum::<f64>();
        let pending = transactions
            .iter()
            .filter(|t| t.status == TransactionStatus::Pending)
            .map(|t| t.amount)
            .sum::<f64>();
        Self {
            inflows,
            outflows,
            balance: inflows - outflows,
            pending,
        }
    }
}

/// Completed inflow and outflow totals for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyFlow {
    pub year: i32,
    pub month: u32,
    pub inflows: f64,
    pub outflows: f64,
}

impl MonthlyFlow {
    /// Short month name, e.g. "Dec".
    #[must_use]
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map_or_else(|| format!("{}-{:02}", self.year, self.month), |d| d.format("%b").to_string())
    }
}

/// The `months` calendar months ending with the month of `today`, oldest first.
#[must_use]
pub fn monthly_flows(
    transactions: &[FinancialTransaction],
    today: NaiveDate,
    months: u32,
) -> Vec<MonthlyFlow> {
    let mut flows: Vec<MonthlyFlow> = (0..months)
        .rev()
        .map(|back| {
            let index = today.year() * 12 + today.month0() as i32 - back as i32;
            MonthlyFlow {
                year: index.div_euclid(12),
                // rem_euclid keeps this in 0..12
                #[allow(clippy::cast_sign_loss)]
                month: index.rem_euclid(12) as u32 + 1,
                inflows: 0.0,
                outflows: 0.0,
            }
        })
        .collect();

    for tx in transactions
        .iter()
        .filter(|t| t.status == TransactionStatus::Completed)
    {
        let date = tx.created_at.date_naive();
        if let Some(flow) = flows
            .iter_mut()
            .find(|f| f.year == date.year() && f.month == date.month())
        {
            match tx.kind {
                TransactionKind::Inflow => flow.inflows += tx.amount,
                TransactionKind::Outflow => flow.outflows += tx.amount,
            }
        }
    }
    flows
}

/// Payload of the "new transaction" form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub related_order_id: Option<i64>,
    /// Defaults to pending when not chosen
    pub status: Option<TransactionStatus>,
    pub description: Option<String>,
}

impl NewTransaction {
    /// # Errors
    /// Returns `Error::Validation` when the category is blank or the amount
    /// is negative or not a number.
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        require(&mut errors, Field::Category, &self.category);
        require_amount(&mut errors, Field::Amount, self.amount);
        errors.into_result()
    }

    #[must_use]
    pub fn status(&self) -> TransactionStatus {
        self.status.unwrap_or_default()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }
}
