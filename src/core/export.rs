//! CSV export of the inventory view.
//!
//! Output is UTF-8 with a byte-order mark so spreadsheet tools pick the right
//! encoding. Every cell is double-quoted and every line ends with CRLF.

use crate::{
    core::product::Product,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

const BOM: &[u8] = "\u{feff}".as_bytes();

/// Header row of the inventory export.
pub const INVENTORY_HEADERS: [&str; 7] = [
    "SKU",
    "Name",
    "Category",
    "Brand",
    "Current stock",
    "Minimum stock",
    "Price",
];

/// Serializes `products` (usually the filtered view) into CSV bytes.
///
/// # Errors
/// Returns `Error::EmptyExport` when there is nothing to export, or a CSV
/// error if serialization fails.
pub fn inventory_csv(products: &[Product]) -> Result<Vec<u8>> {
    if products.is_empty() {
        return Err(Error::EmptyExport);
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::CRLF)
        .from_writer(BOM.to_vec());

    writer.write_record(INVENTORY_HEADERS)?;
    for product in products {
        writer.write_record([
            product.sku.clone(),
            product.name.clone(),
            product.category.clone(),
            product.brand.clone(),
            product.stock.to_string(),
            product.min_stock.to_string(),
            format!("{:.2}", product.price),
        ])?;
    }

    writer.into_inner().map_err(|e| Error::Io(e.into_error()))
}

/// File name for an export made on `date`, e.g. `inventory-2024-12-04.csv`.
#[must_use]
pub fn inventory_file_name(date: NaiveDate) -> String {
    format!("inventory-{}.csv", date.format("%Y-%m-%d"))
}

/// Writes the export into `dir` and returns the created path.
///
/// # Errors
/// Returns the serialization error or the I/O error from writing the file.
#[instrument(skip(products), fields(rows = products.len()))]
pub fn write_inventory_csv(dir: &Path, products: &[Product], date: NaiveDate) -> Result<PathBuf> {
    let bytes = inventory_csv(products)?;
    let path = dir.join(inventory_file_name(date));
    std::fs::write(&path, bytes)?;
    info!("Exported {} inventory rows to {:?}", products.len(), path);
    Ok(path)
}
