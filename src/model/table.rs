// src/model/table.rs

use crate::error::{PlannerError, PlannerResult};
use crate::model::records::{Item, PricingRecord, Supplier};
use std::collections::HashMap;
use tracing::{debug, warn};

/// A feasible (item, supplier) pair. Indices point into the table's
/// item and supplier groups.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRow {
    pub item: usize,
    pub supplier: usize,
    pub cost_per_pallet: f64,
}

/// An item together with the rows that source it.
#[derive(Debug, Clone)]
pub struct ItemGroup {
    pub item: Item,
    pub rows: Vec<usize>,
}

/// A supplier together with the rows it can fill.
#[derive(Debug, Clone)]
pub struct SupplierGroup {
    pub supplier: Supplier,
    pub rows: Vec<usize>,
}

/// The joined items x suppliers x pricing table, one row per orderable pair.
///
/// Rows keep pricing-file order. Groups keep first-appearance order, so
/// iterating them is deterministic for identical inputs.
#[derive(Debug, Clone, Default)]
pub struct PurchasingTable {
    rows: Vec<PlanRow>,
    items: Vec<ItemGroup>,
    suppliers: Vec<SupplierGroup>,
}

impl PurchasingTable {
    /// Joins the three input tables on `ItemID` and `SupplierID`.
    ///
    /// Pricing rows whose item or supplier is missing are dropped with a
    /// warning, or rejected when `strict` is set. Repeated IDs must carry
    /// identical attributes.
    pub fn join(
        items: Vec<Item>,
        suppliers: Vec<Supplier>,
        pricing: Vec<PricingRecord>,
        strict: bool,
    ) -> PlannerResult<Self> {
        check_finite(&items, &suppliers, &pricing)?;

        let items = dedup_items(items)?;
        let suppliers = dedup_suppliers(suppliers)?;
        let pricing = dedup_pricing(pricing)?;

        let mut table = PurchasingTable::default();
        let mut item_slots: HashMap<String, usize> = HashMap::new();
        let mut supplier_slots: HashMap<String, usize> = HashMap::new();
        let mut dropped = 0usize;

        for record in pricing {
            let item = match items.get(&record.item_id) {
                Some(item) => item,
                None if strict => {
                    return Err(PlannerError::UnknownItem {
                        item_id: record.item_id,
                        supplier_id: record.supplier_id,
                    })
                }
                None => {
                    warn!(item = %record.item_id, supplier = %record.supplier_id, "Dropping pricing row: unknown item");
                    dropped += 1;
                    continue;
                }
            };
            let supplier = match suppliers.get(&record.supplier_id) {
                Some(supplier) => supplier,
                None if strict => {
                    return Err(PlannerError::UnknownSupplier {
                        item_id: record.item_id,
                        supplier_id: record.supplier_id,
                    })
                }
                None => {
                    warn!(item = %record.item_id, supplier = %record.supplier_id, "Dropping pricing row: unknown supplier");
                    dropped += 1;
                    continue;
                }
            };

            let row_index = table.rows.len();

            let item_index = *item_slots.entry(record.item_id.clone()).or_insert_with(|| {
                table.items.push(ItemGroup {
                    item: item.clone(),
                    rows: Vec::new(),
                });
                table.items.len() - 1
            });
            table.items[item_index].rows.push(row_index);

            let supplier_index = *supplier_slots
                .entry(record.supplier_id.clone())
                .or_insert_with(|| {
                    table.suppliers.push(SupplierGroup {
                        supplier: supplier.clone(),
                        rows: Vec::new(),
                    });
                    table.suppliers.len() - 1
                });
            table.suppliers[supplier_index].rows.push(row_index);

            table.rows.push(PlanRow {
                item: item_index,
                supplier: supplier_index,
                cost_per_pallet: record.cost_per_pallet,
            });
        }

        for (id, item) in &items {
            if !item_slots.contains_key(id) {
                if item.units_short() > 0.0 {
                    warn!(item = %id, short = item.units_short(), "Item is below MinStock but has no priced supplier");
                } else {
                    debug!(item = %id, "Item has no priced supplier");
                }
            }
        }
        for (id, supplier) in &suppliers {
            if !supplier_slots.contains_key(id) && supplier.min_pallets > 0.0 {
                warn!(supplier = %id, min_pallets = supplier.min_pallets, "Supplier minimum ignored: no priced items");
            }
        }

        debug!(
            rows = table.rows.len(),
            items = table.items.len(),
            suppliers = table.suppliers.len(),
            dropped,
            "Joined purchasing table"
        );
        Ok(table)
    }

    pub fn rows(&self) -> &[PlanRow] {
        &self.rows
    }

    pub fn items(&self) -> &[ItemGroup] {
        &self.items
    }

    pub fn suppliers(&self) -> &[SupplierGroup] {
        &self.suppliers
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn item_of(&self, row: &PlanRow) -> &Item {
        &self.items[row.item].item
    }

    pub fn supplier_of(&self, row: &PlanRow) -> &Supplier {
        &self.suppliers[row.supplier].supplier
    }
}

// NaN slips through every comparison, so reject it before it becomes a bound.
fn check_finite(
    items: &[Item],
    suppliers: &[Supplier],
    pricing: &[PricingRecord],
) -> PlannerResult<()> {
    let non_finite = |table: &'static str, id: &str, field: &'static str| {
        PlannerError::NonFiniteValue {
            table,
            id: id.to_string(),
            field,
        }
    };

    for item in items {
        let fields = [
            ("AverageDailySale", item.average_daily_sale),
            ("Expiry (days)", item.expiry_days),
            ("CurrentStock", item.current_stock),
            ("MinStock", item.min_stock),
            ("MaxStock", item.max_stock),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(non_finite("items", &item.item_id, *field));
        }
    }
    for supplier in suppliers {
        let fields = [
            ("MinPallets", supplier.min_pallets),
            ("MaxPallets", supplier.max_pallets),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(non_finite("suppliers", &supplier.supplier_id, *field));
        }
    }
    for record in pricing {
        if !record.cost_per_pallet.is_finite() {
            let id = format!("{}/{}", record.item_id, record.supplier_id);
            return Err(non_finite("pricing", &id, "CostPerPallet"));
        }
    }
    Ok(())
}

fn dedup_items(items: Vec<Item>) -> PlannerResult<HashMap<String, Item>> {
    let mut seen: HashMap<String, Item> = HashMap::with_capacity(items.len());
    for item in items {
        match seen.get(&item.item_id) {
            Some(existing) if *existing == item => {
                warn!(item = %item.item_id, "Duplicate item row collapsed");
            }
            Some(_) => {
                return Err(PlannerError::ConflictingItem {
                    item_id: item.item_id,
                })
            }
            None => {
                seen.insert(item.item_id.clone(), item);
            }
        }
    }
    Ok(seen)
}

fn dedup_suppliers(suppliers: Vec<Supplier>) -> PlannerResult<HashMap<String, Supplier>> {
    let mut seen: HashMap<String, Supplier> = HashMap::with_capacity(suppliers.len());
    for supplier in suppliers {
        match seen.get(&supplier.supplier_id) {
            Some(existing) if *existing == supplier => {
                warn!(supplier = %supplier.supplier_id, "Duplicate supplier row collapsed");
            }
            Some(_) => {
                return Err(PlannerError::ConflictingSupplier {
                    supplier_id: supplier.supplier_id,
                })
            }
            None => {
                seen.insert(supplier.supplier_id.clone(), supplier);
            }
        }
    }
    Ok(seen)
}

// Keeps first-seen order; pricing order decides variable order.
fn dedup_pricing(pricing: Vec<PricingRecord>) -> PlannerResult<Vec<PricingRecord>> {
    let mut costs: HashMap<(String, String), f64> = HashMap::with_capacity(pricing.len());
    let mut unique = Vec::with_capacity(pricing.len());
    for record in pricing {
        let key = (record.item_id.clone(), record.supplier_id.clone());
        match costs.get(&key) {
            Some(&cost) if cost == record.cost_per_pallet => {
                warn!(item = %record.item_id, supplier = %record.supplier_id, "Duplicate pricing row collapsed");
            }
            Some(_) => {
                return Err(PlannerError::ConflictingPricing {
                    item_id: record.item_id,
                    supplier_id: record.supplier_id,
                })
            }
            None => {
                costs.insert(key, record.cost_per_pallet);
                unique.push(record);
            }
        }
    }
    Ok(unique)
}
