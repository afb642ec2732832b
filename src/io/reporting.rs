// src/io/reporting.rs

use crate::error::PlannerResult;
use crate::model::plan::PurchasePlan;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// One line of the output plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRecord {
    #[serde(rename = "ItemID")]
    pub item_id: String,
    #[serde(rename = "SupplierID")]
    pub supplier_id: String,
    #[serde(rename = "PalletsOrdered")]
    pub pallets_ordered: f64,
}

pub fn plan_records(plan: &PurchasePlan) -> Vec<PlanRecord> {
    plan.orders
        .iter()
        .map(|order| PlanRecord {
            item_id: order.item_id.clone(),
            supplier_id: order.supplier_id.clone(),
            pallets_ordered: order.rounded_pallets(),
        })
        .collect()
}

/// Writes the plan to a CSV file.
///
/// The header is written even when the plan is empty, so downstream
/// readers always see the expected columns.
pub fn write_purchasing_plan(path: &Path, plan: &PurchasePlan) -> PlannerResult<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    wtr.write_record(["ItemID", "SupplierID", "PalletsOrdered"])?;

    let records = plan_records(plan);
    for record in &records {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!(rows = records.len(), path = %path.display(), "Exported purchasing plan");
    Ok(records.len())
}

/// Pallets and spend per supplier, in order of first appearance in the plan.
pub fn supplier_breakdown(plan: &PurchasePlan) -> Vec<(String, f64, f64)> {
    let mut breakdown: Vec<(String, f64, f64)> = Vec::new();
    for order in &plan.orders {
        match breakdown.iter().position(|(id, _, _)| *id == order.supplier_id) {
            Some(i) => {
                breakdown[i].1 += order.pallets;
                breakdown[i].2 += order.cost();
            }
            None => breakdown.push((order.supplier_id.clone(), order.pallets, order.cost())),
        }
    }
    breakdown
}

/// Prints the cost analysis for a finished run.
pub fn print_cost_analysis(plan: &PurchasePlan) {
    println!("\n=== Cost Analysis ===");
    for (supplier, pallets, cost) in supplier_breakdown(plan) {
        println!("{}: {:.2} pallets, ${:.2}", supplier, pallets, cost);
    }
    println!("Total Pallets: {:.2}", plan.total_pallets());
    println!("Total Purchasing Cost: ${:.2}", plan.total_cost());
}
