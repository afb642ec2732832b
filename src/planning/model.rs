// src/planning/model.rs

//! Translates a purchasing table into a linear program.
//!
//! One non-negative variable per table row (pallets ordered for that pair),
//! a cost objective to minimise, and two constraint families:
//!
//! - per item: `24 * Σx + CurrentStock` within `[MinStock, MaxStock]` and
//!   below `ExpectedDemandBeforeExpiry`
//! - per supplier: `Σx` within `[MinPallets, MaxPallets]`

use crate::model::table::PurchasingTable;
use crate::planning::config::PlannerConfig;
use good_lp::{constraint, variable, Constraint, Expression, ProblemVariables, Variable};

/// Which bound a constraint enforces. Kept alongside each constraint so
/// model dumps and diagnostics can name it.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundKind {
    MinStock { item_id: String },
    MaxStock { item_id: String },
    ExpiryDemand { item_id: String },
    MinPallets { supplier_id: String },
    MaxPallets { supplier_id: String },
}

pub struct PurchasingModel {
    vars: ProblemVariables,
    variables: Vec<Variable>,
    objective: Expression,
    constraints: Vec<Constraint>,
    bounds: Vec<BoundKind>,
}

/// A built model taken apart for a solver backend.
///
/// `variables[i]` is the pallet count of table row `i`; `bounds[j]` names
/// `constraints[j]`. The objective is to be minimised.
pub struct ModelParts {
    pub vars: ProblemVariables,
    pub variables: Vec<Variable>,
    pub objective: Expression,
    pub constraints: Vec<Constraint>,
    pub bounds: Vec<BoundKind>,
}

impl PurchasingModel {
    pub fn build(table: &PurchasingTable, config: &PlannerConfig) -> Self {
        let mut vars = ProblemVariables::new();
        let units = config.units_per_pallet();

        let variables: Vec<Variable> = table
            .rows()
            .iter()
            .map(|_| {
                let definition = variable().min(0);
                if config.integer_pallets {
                    vars.add(definition.integer())
                } else {
                    vars.add(definition)
                }
            })
            .collect();

        let mut objective = Expression::default();
        for (row, &x) in table.rows().iter().zip(&variables) {
            objective += x * row.cost_per_pallet;
        }

        let mut constraints = Vec::new();
        let mut bounds = Vec::new();

        for group in table.items() {
            let item = &group.item;
            let stock_after: Expression = group
                .rows
                .iter()
                .map(|&r| variables[r] * units)
                .sum::<Expression>()
                + item.current_stock;

            constraints.push(constraint::geq(stock_after.clone(), item.min_stock));
            bounds.push(BoundKind::MinStock {
                item_id: item.item_id.clone(),
            });
            constraints.push(constraint::leq(stock_after.clone(), item.max_stock));
            bounds.push(BoundKind::MaxStock {
                item_id: item.item_id.clone(),
            });
            constraints.push(constraint::leq(
                stock_after,
                item.expected_demand_before_expiry(),
            ));
            bounds.push(BoundKind::ExpiryDemand {
                item_id: item.item_id.clone(),
            });
        }

        for group in table.suppliers() {
            let supplier = &group.supplier;
            let pallets: Expression = group.rows.iter().map(|&r| variables[r]).sum();

            constraints.push(constraint::geq(pallets.clone(), supplier.min_pallets));
            bounds.push(BoundKind::MinPallets {
                supplier_id: supplier.supplier_id.clone(),
            });
            constraints.push(constraint::leq(pallets, supplier.max_pallets));
            bounds.push(BoundKind::MaxPallets {
                supplier_id: supplier.supplier_id.clone(),
            });
        }

        Self {
            vars,
            variables,
            objective,
            constraints,
            bounds,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn bounds(&self) -> &[BoundKind] {
        &self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn into_parts(self) -> ModelParts {
        ModelParts {
            vars: self.vars,
            variables: self.variables,
            objective: self.objective,
            constraints: self.constraints,
            bounds: self.bounds,
        }
    }
}
