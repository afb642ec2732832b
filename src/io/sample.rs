// src/io/sample.rs

use crate::error::PlannerResult;
use crate::model::plan::round_to_cents;
use crate::model::records::{Item, PricingRecord, Supplier, UNITS_PER_PALLET};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct SampleInputs {
    pub items: Vec<Item>,
    pub suppliers: Vec<Supplier>,
    pub pricing: Vec<PricingRecord>,
}

/// Generates a random but solvable purchasing scenario.
///
/// Every item is priced by at least one supplier, its stock window
/// `[MinStock, min(MaxStock, demand before expiry)]` spans at least two
/// pallets, and supplier capacity covers the whole shortfall. Supplier
/// minimums are left at zero.
///
/// # Arguments
/// * `n_items` - Number of items (IDs `I001`, `I002`, ...).
/// * `n_suppliers` - Number of suppliers (IDs `S01`, `S02`, ...). At least one is created.
/// * `seed` - Same seed, same tables.
pub fn generate_sample_inputs(n_items: usize, n_suppliers: usize, seed: u64) -> SampleInputs {
    let mut rng = StdRng::seed_from_u64(seed);
    let pallet = UNITS_PER_PALLET as f64;
    let n_suppliers = n_suppliers.max(1);

    // Daily sales hover around 20 units; clamp so nothing sells negative.
    let daily_sales = Normal::<f64>::new(20.0, 6.0).expect("constant parameters are valid");

    let mut items = Vec::with_capacity(n_items);
    for i in 0..n_items {
        let sale = round_to_cents(daily_sales.sample(&mut rng).max(1.0));
        let current_stock = rng.gen_range(0..=200) as f64;
        let min_stock = current_stock + rng.gen_range(0..=300) as f64;
        let max_stock = min_stock + pallet * rng.gen_range(2..=10) as f64;

        // Shelf life long enough that demand covers MinStock plus two pallets.
        let needed_days = ((min_stock + 2.0 * pallet) / sale).ceil();
        let expiry_days = needed_days.max(rng.gen_range(7..=60) as f64);

        items.push(Item {
            item_id: format!("I{:03}", i + 1),
            average_daily_sale: sale,
            expiry_days,
            current_stock,
            min_stock,
            max_stock,
        });
    }

    // Each item is at most 300 units (12.5 pallets) short.
    let capacity = 15.0 * n_items.max(1) as f64;
    let suppliers: Vec<Supplier> = (0..n_suppliers)
        .map(|s| Supplier {
            supplier_id: format!("S{:02}", s + 1),
            min_pallets: 0.0,
            max_pallets: capacity + rng.gen_range(0..=50) as f64,
        })
        .collect();

    let mut pricing = Vec::new();
    for item in &items {
        let anchor = rng.gen_range(0..n_suppliers);
        for (s, supplier) in suppliers.iter().enumerate() {
            if s == anchor || rng.gen_bool(0.5) {
                pricing.push(PricingRecord {
                    item_id: item.item_id.clone(),
                    supplier_id: supplier.supplier_id.clone(),
                    cost_per_pallet: round_to_cents(rng.gen_range(5.0..50.0)),
                });
            }
        }
    }

    SampleInputs {
        items,
        suppliers,
        pricing,
    }
}

fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> PlannerResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `items.csv`, `suppliers.csv` and `pricing.csv` into `dir`,
/// creating it if needed.
pub fn write_sample_inputs(dir: &Path, inputs: &SampleInputs) -> PlannerResult<()> {
    fs::create_dir_all(dir)?;
    write_table(&dir.join("items.csv"), &inputs.items)?;
    write_table(&dir.join("suppliers.csv"), &inputs.suppliers)?;
    write_table(&dir.join("pricing.csv"), &inputs.pricing)?;
    Ok(())
}
