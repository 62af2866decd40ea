//! Customer records and the customers page's view-state.

use crate::{
    core::filter::SearchTerm,
    core::validation::{Field, FieldErrors, is_valid_email, is_valid_phone, require},
    entities::customer,
    errors::Result,
};

/// Customer as shown on the customers page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    /// Purchase count when the store tracks it
    pub total_purchases: Option<i32>,
}

impl From<customer::Model> for Customer {
    fn from(row: customer::Model) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            city: row.city,
            total_purchases: row.total_purchases,
        }
    }
}

impl Customer {
    /// A customer with at least one recorded purchase.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.total_purchases.unwrap_or(0) > 0
    }
}

/// Search box of the customers page; matches name, e-mail and phone.
#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    pub search: SearchTerm,
}

impl CustomerFilter {
    #[must_use]
    pub fn matches(&self, customer: &Customer) -> bool {
        self.search
            .matches_any(&[&customer.name, &customer.email, &customer.phone])
    }

    #[must_use]
    pub fn apply(&self, customers: &[Customer]) -> Vec<Customer> {
        customers
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
    }
}

/// Aggregates shown in the customers summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerSummary {
    pub customer_count: usize,
    pub active_count: usize,
    pub total_purchases: i64,
}

impl CustomerSummary {
    #[must_use]
    pub fn from_customers(customers: &[Customer]) -> Self {
        Self {
            customer_count: customers.len(),
            active_count: customers.iter().filter(|c| c.is_active()).count(),
            total_purchases: customers
                .iter()
                .map(|c| i64::from(c.total_purchases.unwrap_or(0)))
                .sum(),
        }
    }
}

/// Payload of the "new customer" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
}

impl NewCustomer {
    /// # Errors
    /// Returns `Error::Validation` when the name is blank, the e-mail is
    /// malformed or a given phone has the wrong number of digits.
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        require(&mut errors, Field::Name, &self.name);
        if !is_valid_email(self.email.trim()) {
            errors.add(Field::Email, "invalid e-mail");
        }
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            if !is_valid_phone(phone) {
                errors.add(Field::Phone, "phone needs area code plus 8 or 9 digits");
            }
        }
        errors.into_result()
    }
}
