// src/solver/implementations.rs

use crate::error::{PlannerError, PlannerResult};
use crate::planning::model::{ModelParts, PurchasingModel};
use crate::solver::traits::PlanSolver;
use good_lp::solvers::microlp::microlp;
use good_lp::{ResolutionError, Solution, SolverModel};
use std::time::Instant;
use tracing::debug;

/// Pure-Rust simplex / branch-and-bound backend.
#[derive(Debug, Clone, Default)]
pub struct MicroLpSolver {
    verbose: bool,
}

impl MicroLpSolver {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl PlanSolver for MicroLpSolver {
    fn solve(&self, model: PurchasingModel) -> PlannerResult<Vec<f64>> {
        let ModelParts {
            vars,
            variables,
            objective,
            constraints,
            bounds,
        } = model.into_parts();

        if self.verbose {
            for (index, bound) in bounds.iter().enumerate() {
                debug!(index, ?bound, "Constraint");
            }
        }

        let started = Instant::now();
        let solution = vars
            .minimise(objective)
            .using(microlp)
            .with_all(constraints)
            .solve()
            .map_err(from_resolution_error)?;

        if self.verbose {
            debug!(elapsed_ms = started.elapsed().as_millis() as u64, "microlp finished");
        }

        Ok(variables.iter().map(|&v| solution.value(v)).collect())
    }
}

fn from_resolution_error(err: ResolutionError) -> PlannerError {
    match err {
        ResolutionError::Infeasible => PlannerError::Infeasible {
            reason: "solver found no assignment satisfying every bound".to_string(),
        },
        ResolutionError::Unbounded => PlannerError::Unbounded,
        other => PlannerError::Solver {
            message: other.to_string(),
        },
    }
}
