// src/model/records.rs

use serde::{Deserialize, Serialize};

/// Units in one pallet, the ordering granularity.
pub const UNITS_PER_PALLET: u32 = 24;

/// One row of the items table.
///
/// Column names follow the input files exactly, including `Expiry (days)`.
/// Any additional columns in the file are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "ItemID")]
    pub item_id: String,
    #[serde(rename = "AverageDailySale")]
    pub average_daily_sale: f64,
    #[serde(rename = "Expiry (days)")]
    pub expiry_days: f64,
    #[serde(rename = "CurrentStock")]
    pub current_stock: f64,
    #[serde(rename = "MinStock")]
    pub min_stock: f64,
    #[serde(rename = "MaxStock")]
    pub max_stock: f64,
}

impl Item {
    /// Units expected to sell before a fresh batch expires.
    pub fn expected_demand_before_expiry(&self) -> f64 {
        self.average_daily_sale * self.expiry_days
    }

    /// The tightest upper bound on stock after ordering.
    pub fn stock_ceiling(&self) -> f64 {
        self.max_stock.min(self.expected_demand_before_expiry())
    }

    /// Units that must arrive for stock to reach `MinStock` (never negative).
    pub fn units_short(&self) -> f64 {
        (self.min_stock - self.current_stock).max(0.0)
    }
}

/// One row of the suppliers table.
/// Pallet bounds apply to the sum over every item sourced from the supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(rename = "SupplierID")]
    pub supplier_id: String,
    #[serde(rename = "MinPallets")]
    pub min_pallets: f64,
    #[serde(rename = "MaxPallets")]
    pub max_pallets: f64,
}

/// One row of the pricing table. Its presence makes the pair orderable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRecord {
    #[serde(rename = "ItemID")]
    pub item_id: String,
    #[serde(rename = "SupplierID")]
    pub supplier_id: String,
    #[serde(rename = "CostPerPallet")]
    pub cost_per_pallet: f64,
}
