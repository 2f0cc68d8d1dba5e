pub mod backoff;
pub mod command_sender;
pub mod connection;
pub mod dispatcher;
pub mod engine_client;
pub mod supervisor;

pub use backoff::*;
pub use command_sender::*;
pub use connection::*;
pub use dispatcher::*;
pub use engine_client::*;
pub use supervisor::*;
