pub mod connection;
pub mod memory_store;
pub mod pg_store;
pub mod repositories;
pub mod store;

pub use connection::*;
pub use memory_store::*;
pub use pg_store::*;
pub use store::*;

use std::sync::Arc;

use anyhow::Result;

use crate::shared::config::{AppConfig, StoreBackend};

/// 설정에 맞는 저장소 생성 (Postgres는 마이그레이션까지 실행)
/// Build the configured store
pub async fn connect_store(config: &AppConfig) -> Result<Arc<dyn EngineStore>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let db = Database::new(&config.database_url).await?;
            db.initialize().await?;
            tracing::info!("Using PostgreSQL store");
            Ok(Arc::new(PgEngineStore::new(db)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, state is lost on restart");
            Ok(Arc::new(MemoryEngineStore::new()))
        }
    }
}
