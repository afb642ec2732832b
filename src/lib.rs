//! Cost-minimising purchasing plans.
//!
//! Reads items, suppliers and per-supplier pricing, builds a linear program
//! over pallets ordered per (item, supplier) pair, solves it, and writes the
//! nonzero orders back out.

pub mod error;
pub mod io;
pub mod model;
pub mod planning;
pub mod solver;

pub use error::{PlannerError, PlannerResult};
pub use model::plan::{PlannedOrder, PurchasePlan};
pub use model::table::PurchasingTable;
pub use planning::config::PlannerConfig;
pub use planning::engine::PurchasePlanner;
pub use solver::implementations::MicroLpSolver;
pub use solver::traits::PlanSolver;
