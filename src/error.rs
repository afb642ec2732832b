// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Pricing row references unknown item '{item_id}' (supplier '{supplier_id}')")]
    UnknownItem {
        item_id: String,
        supplier_id: String,
    },

    #[error("Pricing row references unknown supplier '{supplier_id}' (item '{item_id}')")]
    UnknownSupplier {
        item_id: String,
        supplier_id: String,
    },

    #[error("Item '{item_id}' appears more than once with different attributes")]
    ConflictingItem { item_id: String },

    #[error("Supplier '{supplier_id}' appears more than once with different attributes")]
    ConflictingSupplier { supplier_id: String },

    #[error("Pair ('{item_id}', '{supplier_id}') is priced more than once with different costs")]
    ConflictingPricing {
        item_id: String,
        supplier_id: String,
    },

    #[error("{table} row '{id}' has a non-finite {field}")]
    NonFiniteValue {
        table: &'static str,
        id: String,
        field: &'static str,
    },

    #[error("Invalid configuration: {field}")]
    InvalidConfig { field: String },

    #[error("Model is infeasible: {reason}")]
    Infeasible { reason: String },

    #[error("Model is unbounded")]
    Unbounded,

    #[error("Solver failed: {message}")]
    Solver { message: String },
}

pub type PlannerResult<T> = Result<T, PlannerError>;
