// Shared errors
pub mod command_error;
pub mod config_error;

pub use command_error::*;
pub use config_error::*;
