// Engine handlers module
pub mod engine_handler;

pub use engine_handler::*;
