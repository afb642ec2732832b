// src/model/plan.rs

use crate::model::table::PurchasingTable;

/// A nonzero order for one (item, supplier) pair, as returned by the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedOrder {
    pub item_id: String,
    pub supplier_id: String,
    pub pallets: f64,
    pub cost_per_pallet: f64,
}

impl PlannedOrder {
    pub fn cost(&self) -> f64 {
        self.pallets * self.cost_per_pallet
    }

    /// Pallet count as written to the output file.
    pub fn rounded_pallets(&self) -> f64 {
        round_to_cents(self.pallets)
    }
}

/// The solved purchasing plan. Orders keep the table's row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchasePlan {
    pub orders: Vec<PlannedOrder>,
}

impl PurchasePlan {
    /// Builds a plan from one solver value per table row, keeping values
    /// strictly above `zero_tolerance`.
    pub fn from_values(table: &PurchasingTable, values: &[f64], zero_tolerance: f64) -> Self {
        let orders = table
            .rows()
            .iter()
            .zip(values.iter().copied())
            .filter(|(_, pallets)| *pallets > zero_tolerance)
            .map(|(row, pallets)| PlannedOrder {
                item_id: table.item_of(row).item_id.clone(),
                supplier_id: table.supplier_of(row).supplier_id.clone(),
                pallets,
                cost_per_pallet: row.cost_per_pallet,
            })
            .collect();

        Self { orders }
    }

    /// Total cost, computed from unrounded pallet counts.
    pub fn total_cost(&self) -> f64 {
        self.orders.iter().map(PlannedOrder::cost).sum()
    }

    pub fn total_pallets(&self) -> f64 {
        self.orders.iter().map(|o| o.pallets).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Rounds to two decimals the way the exact binary value dictates: values
/// such as `2.675` (stored just below the midpoint) round down, and exact
/// midpoints such as `0.125` go to the even cent.
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let bits = value.to_bits();
    let biased_exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased_exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased_exponent - 1075)
    };

    // Whole numbers (and anything at or above 2^52) need no rounding.
    if exponent >= 0 {
        return value;
    }
    let shift = (-exponent) as u32;
    // |value| < 2^-66: far below half a cent.
    if shift >= 120 {
        return 0.0_f64.copysign(value);
    }

    // value * 100 = mantissa * 100 / 2^shift, computed exactly.
    let scaled = (mantissa as u128) * 100;
    let mut cents = scaled >> shift;
    let remainder = scaled - (cents << shift);
    let half = 1u128 << (shift - 1);
    if remainder > half || (remainder == half && cents & 1 == 1) {
        cents += 1;
    }

    (cents as f64 / 100.0).copysign(value)
}
