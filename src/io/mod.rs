pub mod inputs;
pub mod reporting;
pub mod sample;
