// src/planning/config.rs

use crate::error::{PlannerError, PlannerResult};
use crate::model::records::UNITS_PER_PALLET;

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub units_per_pallet: u32,
    /// Order whole pallets only (MILP). Fractional pallets are allowed otherwise.
    pub integer_pallets: bool,
    /// Reject pricing rows that reference unknown items or suppliers.
    pub strict_join: bool,
    pub verbose: bool,
    /// Solved values at or below this are treated as zero.
    pub zero_tolerance: f64,
    /// Relative slack allowed when checking a solved plan against its bounds.
    pub verify_tolerance: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            units_per_pallet: UNITS_PER_PALLET,
            integer_pallets: false,
            strict_join: false,
            verbose: false,
            zero_tolerance: 1e-9,
            verify_tolerance: 1e-6,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> PlannerResult<()> {
        if self.units_per_pallet == 0 {
            return Err(PlannerError::InvalidConfig {
                field: "units_per_pallet must be positive".to_string(),
            });
        }
        if !(self.zero_tolerance >= 0.0) {
            return Err(PlannerError::InvalidConfig {
                field: "zero_tolerance must be non-negative".to_string(),
            });
        }
        if !(self.verify_tolerance >= 0.0) {
            return Err(PlannerError::InvalidConfig {
                field: "verify_tolerance must be non-negative".to_string(),
            });
        }
        Ok(())
    }

    pub fn units_per_pallet(&self) -> f64 {
        self.units_per_pallet as f64
    }
}
