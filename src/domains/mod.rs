// Domain modules
pub mod dashboard;
pub mod engine;
