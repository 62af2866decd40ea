//! Inventory page: stock summary, filterable product table, CSV export.

use crate::{
    core::{
        product::{InventoryFilter, InventorySummary, Product, StockLevel, categories},
        seed,
    },
    pages::{PageKind, list_section, rows_or_seed},
    query::{QueryKey, QueryState},
    ui::{Page, Section, Shell, StatsCard, Table, format::currency},
};

/// The rows an export of the current view would contain.
#[must_use]
pub fn visible_products(state: &QueryState<Product>, filter: &InventoryFilter) -> Vec<Product> {
    filter.apply(state.rows())
}

#[must_use]
pub fn build(state: &QueryState<Product>, filter: &InventoryFilter) -> Page {
    let all = rows_or_seed(state, seed::products);
    let summary = InventorySummary::from_products(&all);

    let cards = vec![
        Shell::Stats(StatsCard::new("Products", summary.product_count.to_string())),
        Shell::Stats(
            StatsCard::new("Low stock", summary.low_stock_count.to_string())
                .with_subtitle("at or below minimum"),
        ),
        Shell::Stats(StatsCard::new("Stock value", currency(summary.stock_value))),
    ];

    Page::new(PageKind::Inventory.title())
        .with_section(Section::new("Summary", cards))
        .with_section(list_section("Products", state, QueryKey::Products, |rows| {
            product_list(rows, filter)
        }))
}

fn product_list(rows: &[Product], filter: &InventoryFilter) -> Vec<Shell> {
    if rows.is_empty() {
        return vec![Shell::empty("No products registered yet")];
    }
    let visible = filter.apply(rows);
    if visible.is_empty() {
        return vec![Shell::empty("No products match the filters")];
    }

    let mut shells = Vec::new();
    if filter.has_active_filters() {
        shells.push(Shell::Stats(
            StatsCard::new("Showing", format!("{} of {}", visible.len(), rows.len()))
                .with_subtitle(format!("categories: {}", categories(rows).join(", "))),
        ));
    }

    let mut table = Table::new([
        "SKU", "Name", "Category", "Brand", "Stock", "Minimum", "Price", "Status",
    ]);
    for product in &visible {
        table.push_row(vec![
            product.sku.clone(),
            product.name.clone(),
            product.category.clone(),
            product.brand.clone(),
            product.stock.to_string(),
            product.min_stock.to_string(),
            currency(product.price),
            match product.stock_level() {
                StockLevel::Low => "low".to_string(),
                StockLevel::Normal => "normal".to_string(),
            },
        ]);
    }
    shells.push(Shell::Table(table));
    shells
}
