// src/planning/verify.rs

use crate::model::plan::PurchasePlan;
use crate::model::table::PurchasingTable;
use std::collections::HashMap;
use thiserror::Error;

/// A bound the plan fails to respect.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("item {item_id}: stock after ordering {projected:.3} is below MinStock {min}")]
    BelowMinStock {
        item_id: String,
        projected: f64,
        min: f64,
    },

    #[error("item {item_id}: stock after ordering {projected:.3} exceeds MaxStock {max}")]
    AboveMaxStock {
        item_id: String,
        projected: f64,
        max: f64,
    },

    #[error("item {item_id}: stock after ordering {projected:.3} exceeds expected demand before expiry {demand}")]
    AboveExpiryDemand {
        item_id: String,
        projected: f64,
        demand: f64,
    },

    #[error("supplier {supplier_id}: {ordered:.3} pallets is below MinPallets {min}")]
    BelowMinPallets {
        supplier_id: String,
        ordered: f64,
        min: f64,
    },

    #[error("supplier {supplier_id}: {ordered:.3} pallets exceeds MaxPallets {max}")]
    AboveMaxPallets {
        supplier_id: String,
        ordered: f64,
        max: f64,
    },
}

/// Checks every item and supplier bound of `table` against `plan`.
///
/// `tolerance` is relative to the bound's magnitude (with a floor of 1),
/// so large stock figures don't trip on solver rounding.
pub fn verify_plan(
    table: &PurchasingTable,
    plan: &PurchasePlan,
    units_per_pallet: f64,
    tolerance: f64,
) -> Vec<Violation> {
    let mut by_item: HashMap<&str, f64> = HashMap::new();
    let mut by_supplier: HashMap<&str, f64> = HashMap::new();
    for order in &plan.orders {
        *by_item.entry(order.item_id.as_str()).or_insert(0.0) += order.pallets;
        *by_supplier.entry(order.supplier_id.as_str()).or_insert(0.0) += order.pallets;
    }

    let slack = |bound: f64| tolerance * bound.abs().max(1.0);
    let mut violations = Vec::new();

    for group in table.items() {
        let item = &group.item;
        let pallets = by_item.get(item.item_id.as_str()).copied().unwrap_or(0.0);
        let projected = pallets * units_per_pallet + item.current_stock;

        if projected < item.min_stock - slack(item.min_stock) {
            violations.push(Violation::BelowMinStock {
                item_id: item.item_id.clone(),
                projected,
                min: item.min_stock,
            });
        }
        if projected > item.max_stock + slack(item.max_stock) {
            violations.push(Violation::AboveMaxStock {
                item_id: item.item_id.clone(),
                projected,
                max: item.max_stock,
            });
        }
        let demand = item.expected_demand_before_expiry();
        if projected > demand + slack(demand) {
            violations.push(Violation::AboveExpiryDemand {
                item_id: item.item_id.clone(),
                projected,
                demand,
            });
        }
    }

    for group in table.suppliers() {
        let supplier = &group.supplier;
        let ordered = by_supplier
            .get(supplier.supplier_id.as_str())
            .copied()
            .unwrap_or(0.0);

        if ordered < supplier.min_pallets - slack(supplier.min_pallets) {
            violations.push(Violation::BelowMinPallets {
                supplier_id: supplier.supplier_id.clone(),
                ordered,
                min: supplier.min_pallets,
            });
        }
        if ordered > supplier.max_pallets + slack(supplier.max_pallets) {
            violations.push(Violation::AboveMaxPallets {
                supplier_id: supplier.supplier_id.clone(),
                ordered,
                max: supplier.max_pallets,
            });
        }
    }

    violations
}
