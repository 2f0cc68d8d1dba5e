use anyhow::Result;
use async_trait::async_trait;

use super::connection::Database;
use super::repositories::{
    AccountRepository, ConnectionStatusRepository, EquitySnapshotRepository, OrderRepository,
    PositionRepository, TradeRepository,
};
use super::store::EngineStore;
use crate::domains::engine::models::EquitySnapshot;
use crate::shared::utils::Document;

/// PostgreSQL 엔진 저장소
/// PostgreSQL-backed engine store, one repository per table
#[derive(Clone)]
pub struct PgEngineStore {
    db: Database,
}

impl PgEngineStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EngineStore for PgEngineStore {
    async fn merge_order(&self, client_id: &str, doc: Document) -> Result<()> {
        let repo = OrderRepository::new(self.db.pool().clone());
        repo.merge(client_id, &doc).await
    }

    async fn insert_trade(&self, doc: Document) -> Result<()> {
        let repo = TradeRepository::new(self.db.pool().clone());
        repo.create(&doc).await
    }

    async fn replace_account(&self, account_id: &str, doc: Document) -> Result<()> {
        let repo = AccountRepository::new(self.db.pool().clone());
        repo.replace(account_id, &doc).await
    }

    async fn insert_equity_snapshot(&self, snapshot: &EquitySnapshot) -> Result<()> {
        let repo = EquitySnapshotRepository::new(self.db.pool().clone());
        repo.create(snapshot).await
    }

    async fn delete_positions(&self, account_id: &str) -> Result<u64> {
        let repo = PositionRepository::new(self.db.pool().clone());
        repo.delete_by_account(account_id).await
    }

    async fn insert_positions(&self, account_id: &str, docs: Vec<Document>) -> Result<()> {
        let repo = PositionRepository::new(self.db.pool().clone());
        repo.create_many(account_id, &docs).await
    }

    async fn replace_connection_status(
        &self,
        account_id: &str,
        source: &str,
        doc: Document,
    ) -> Result<()> {
        let repo = ConnectionStatusRepository::new(self.db.pool().clone());
        repo.replace(account_id, source, &doc).await
    }

    async fn clear_positions(&self) -> Result<u64> {
        let repo = PositionRepository::new(self.db.pool().clone());
        repo.delete_all().await
    }

    async fn find_account(&self, account_id: Option<&str>) -> Result<Option<Document>> {
        let repo = AccountRepository::new(self.db.pool().clone());
        repo.find(account_id).await
    }

    async fn list_account_ids(&self) -> Result<Vec<String>> {
        let repo = AccountRepository::new(self.db.pool().clone());
        repo.list_ids().await
    }

    async fn list_accounts(&self) -> Result<Vec<Document>> {
        let repo = AccountRepository::new(self.db.pool().clone());
        repo.list().await
    }

    async fn list_connection_statuses(&self, account_id: Option<&str>) -> Result<Vec<Document>> {
        let repo = ConnectionStatusRepository::new(self.db.pool().clone());
        repo.get_all(account_id).await
    }

    async fn equity_history(
        &self,
        account_id: Option<&str>,
        limit: i64,
    ) -> Result<Vec<EquitySnapshot>> {
        let repo = EquitySnapshotRepository::new(self.db.pool().clone());
        repo.get_history(account_id, limit).await
    }

    async fn latest_equity(&self) -> Result<Option<EquitySnapshot>> {
        let repo = EquitySnapshotRepository::new(self.db.pool().clone());
        repo.get_latest().await
    }

    async fn list_orders(&self, account_id: Option<&str>, limit: i64) -> Result<Vec<Document>> {
        let repo = OrderRepository::new(self.db.pool().clone());
        repo.get_recent(account_id, limit).await
    }

    async fn list_trades(&self, account_id: Option<&str>, limit: i64) -> Result<Vec<Document>> {
        let repo = TradeRepository::new(self.db.pool().clone());
        repo.get_recent(account_id, limit).await
    }

    async fn list_positions(&self, account_id: Option<&str>) -> Result<Vec<Document>> {
        let repo = PositionRepository::new(self.db.pool().clone());
        repo.get_all(account_id).await
    }
}
