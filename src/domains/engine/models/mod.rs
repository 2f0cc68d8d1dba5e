// Engine domain models
pub mod command;
pub mod equity;
pub mod event;
pub mod status;

pub use command::*;
pub use equity::*;
pub use event::*;
pub use status::*;
