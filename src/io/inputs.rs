// src/io/inputs.rs

use crate::error::PlannerResult;
use crate::model::records::{Item, PricingRecord, Supplier};
use crate::model::table::PurchasingTable;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// Reads every row of a headed CSV file into `T`.
/// Columns not named by `T` are ignored.
fn read_table<T: DeserializeOwned>(path: &Path) -> PlannerResult<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;

    let mut rows = Vec::new();
    for record in rdr.deserialize::<T>() {
        rows.push(record?);
    }

    debug!(path = %path.display(), rows = rows.len(), "Loaded table");
    Ok(rows)
}

pub fn read_items(path: &Path) -> PlannerResult<Vec<Item>> {
    read_table(path)
}

pub fn read_suppliers(path: &Path) -> PlannerResult<Vec<Supplier>> {
    read_table(path)
}

pub fn read_pricing(path: &Path) -> PlannerResult<Vec<PricingRecord>> {
    read_table(path)
}

/// Loads the three input files and joins them.
pub fn load_purchasing_table(
    items_path: &Path,
    suppliers_path: &Path,
    pricing_path: &Path,
    strict: bool,
) -> PlannerResult<PurchasingTable> {
    let items = read_items(items_path)?;
    let suppliers = read_suppliers(suppliers_path)?;
    let pricing = read_pricing(pricing_path)?;
    PurchasingTable::join(items, suppliers, pricing, strict)
}
