// Engine state repositories (one per table)
pub mod account_repository;
pub mod connection_status_repository;
pub mod equity_snapshot_repository;
pub mod order_repository;
pub mod position_repository;
pub mod trade_repository;

pub use account_repository::*;
pub use connection_status_repository::*;
pub use equity_snapshot_repository::*;
pub use order_repository::*;
pub use position_repository::*;
pub use trade_repository::*;
