// src/planning/engine.rs

use crate::error::{PlannerError, PlannerResult};
use crate::model::plan::PurchasePlan;
use crate::model::table::PurchasingTable;
use crate::planning::config::PlannerConfig;
use crate::planning::model::PurchasingModel;
use crate::planning::verify::verify_plan;
use crate::solver::traits::PlanSolver;
use tracing::{debug, info, warn};

/// Runs one planning pass: screen, build, solve, filter, verify.
#[derive(Debug)]
pub struct PurchasePlanner<S: PlanSolver> {
    config: PlannerConfig,
    solver: S,
}

impl<S: PlanSolver> PurchasePlanner<S> {
    pub fn new(config: PlannerConfig, solver: S) -> PlannerResult<Self> {
        config.validate()?;
        Ok(Self { config, solver })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn plan(&self, table: &PurchasingTable) -> PlannerResult<PurchasePlan> {
        screen_infeasible(table)?;

        let model = PurchasingModel::build(table, &self.config);
        info!(
            variables = model.num_variables(),
            constraints = model.num_constraints(),
            integer = self.config.integer_pallets,
            "Built purchasing model"
        );

        if model.is_empty() {
            warn!("No orderable (item, supplier) pairs; the plan is empty");
            return Ok(PurchasePlan::default());
        }

        let values = self.solver.solve(model)?;
        if values.len() != table.rows().len() {
            return Err(PlannerError::Solver {
                message: format!(
                    "expected {} values, solver returned {}",
                    table.rows().len(),
                    values.len()
                ),
            });
        }

        let plan = PurchasePlan::from_values(table, &values, self.config.zero_tolerance);

        let violations = verify_plan(
            table,
            &plan,
            self.config.units_per_pallet(),
            self.config.verify_tolerance,
        );
        if !violations.is_empty() {
            for violation in &violations {
                warn!(%violation, "Solved plan breaks a bound");
            }
            return Err(PlannerError::Solver {
                message: format!("solution violates {} bound(s)", violations.len()),
            });
        }

        debug!(orders = plan.orders.len(), cost = plan.total_cost(), "Plan verified");
        Ok(plan)
    }
}

/// Rejects models whose bounds contradict each other on their own,
/// naming the offending items and suppliers.
pub fn screen_infeasible(table: &PurchasingTable) -> PlannerResult<()> {
    let mut problems = Vec::new();

    for group in table.items() {
        let item = &group.item;
        if item.min_stock > item.stock_ceiling() {
            problems.push(format!(
                "item {} needs MinStock {} but may hold at most {} (MaxStock {}, demand before expiry {})",
                item.item_id,
                item.min_stock,
                item.stock_ceiling(),
                item.max_stock,
                item.expected_demand_before_expiry()
            ));
        } else if item.current_stock > item.stock_ceiling() {
            problems.push(format!(
                "item {} already holds {} units, above its ceiling of {}",
                item.item_id,
                item.current_stock,
                item.stock_ceiling()
            ));
        }
    }

    for group in table.suppliers() {
        let supplier = &group.supplier;
        if supplier.min_pallets > supplier.max_pallets {
            problems.push(format!(
                "supplier {} has MinPallets {} above MaxPallets {}",
                supplier.supplier_id, supplier.min_pallets, supplier.max_pallets
            ));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(PlannerError::Infeasible {
            reason: problems.join("; "),
        })
    }
}
