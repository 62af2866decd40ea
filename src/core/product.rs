//! Product business logic - Inventory records, stock classification and the
//! inventory page's view-state.
//!
//! The store keeps the quantity on hand in a separate `inventory_levels` row;
//! [`Product::from_storage`] folds it into the display record so every other
//! function here works on one flat type.

use crate::{
    core::filter::{SearchTerm, Selector, sum_by},
    core::validation::{Field, FieldErrors, require, require_amount},
    entities::product,
    errors::Result,
};

/// Product as shown on the inventory page.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub price: f64,
    pub min_stock: i32,
    /// Units on hand; zero when the store has no inventory row
    pub stock: i32,
    pub is_active: bool,
}

/// Whether a product needs restocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// Stock at or below the minimum threshold
    Low,
    Normal,
}

impl Product {
    /// Builds the display record from a product row and the quantity of its
    /// inventory row, if the store has one.
    #[must_use]
    pub fn from_storage(row: product::Model, quantity: Option<i32>) -> Self {
        Self {
            id: row.id,
            sku: row.sku,
            name: row.name,
            category: row.category,
            brand: row.brand,
            price: row.price,
            min_stock: row.min_stock,
            stock: quantity.unwrap_or(0),
            is_active: row.is_active,
        }
    }

    /// Low stock iff current stock ≤ minimum threshold.
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }

    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        if self.is_low_stock() {
            StockLevel::Low
        } else {
            StockLevel::Normal
        }
    }

    /// Price times units on hand.
    #[must_use]
    pub fn stock_value(&self) -> f64 {
        self.price * f64::from(self.stock)
    }
}

/// Filters available on the inventory page.
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    /// Matched against name and SKU
    pub search: SearchTerm,
    pub category: Selector<String>,
    pub stock: Selector<StockLevel>,
}

impl InventoryFilter {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.search.matches_any(&[&product.name, &product.sku])
            && self.category.accepts(&product.category)
            && self.stock.accepts(&product.stock_level())
    }

    /// Returns the matching products in their original order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }

    /// Whether the "clear filters" action has anything to clear.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty() || self.category.is_active() || self.stock.is_active()
    }
}

/// Aggregates shown in the inventory summary cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventorySummary {
    pub product_count: usize,
    pub low_stock_count: usize,
    /// Σ price × stock
    pub stock_value: f64,
}

impl InventorySummary {
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            product_count: products.len(),
            low_stock_count: products.iter().filter(|p| p.is_low_stock()).count(),
            stock_value: sum_by(products, Product::stock_value),
        }
    }
}

/// Distinct categories in first-seen order, for the category selector.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        if !seen.contains(&product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

/// Products at or below their minimum, lowest stock first.
#[must_use]
pub fn low_stock(products: &[Product]) -> Vec<Product> {
    let mut low: Vec<Product> = products
        .iter()
        .filter(|p| p.is_low_stock())
        .cloned()
        .collect();
    low.sort_by_key(|p| p.stock);
    low
}

/// Payload of the "new product" form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub min_stock: i32,
    pub price: f64,
}

impl NewProduct {
    /// Checks required fields and amounts before anything is sent to the store.
    ///
    /// # Errors
    /// Returns `Error::Validation` listing every failing field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        require(&mut errors, Field::Sku, &self.sku);
        require(&mut errors, Field::Name, &self.name);
        require(&mut errors, Field::Category, &self.category);
        require(&mut errors, Field::Brand, &self.brand);
        require_amount(&mut errors, Field::Price, self.price);
        if self.min_stock < 0 {
            errors.add(Field::MinStock, "must not be negative");
        }
        errors.into_result()
    }
}
