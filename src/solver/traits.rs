// src/solver/traits.rs

use crate::error::PlannerResult;
use crate::planning::model::PurchasingModel;
use std::fmt::Debug;

/// Solves a purchasing model.
///
/// Implementations return one value per model variable, in the order the
/// variables were created (which is the table's row order). Infeasible and
/// unbounded models must be reported as `PlannerError::Infeasible` and
/// `PlannerError::Unbounded`.
pub trait PlanSolver: Debug {
    fn solve(&self, model: PurchasingModel) -> PlannerResult<Vec<f64>>;
}
