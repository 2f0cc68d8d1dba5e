// Shared module
pub mod config;
pub mod database;
pub mod errors;
pub mod logging;
pub mod services;
pub mod utils;

pub use config::*;
pub use database::*;
pub use errors::*;
pub use services::*;
pub use utils::*;
