use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domains::dashboard::models::{
    AccountView, ConnectionStatusView, OrderView, PositionView, TradeView,
};
use crate::domains::engine::models::EquitySnapshot;
use crate::shared::database::EngineStore;

/// 목록 조회 기본 개수
pub const DEFAULT_LIST_LIMIT: i64 = 100;
/// 자산 기록 기본 개수
pub const DEFAULT_EQUITY_LIMIT: i64 = 500;
/// 목록 조회 최대 개수
pub const MAX_LIST_LIMIT: i64 = 5000;

/// limit 정규화 (없으면 기본값, 1..=MAX_LIST_LIMIT 범위로 제한)
pub fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, MAX_LIST_LIMIT)
}

/// 대시보드 조회 서비스
/// Read-only projections over the engine store
#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn EngineStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn EngineStore>) -> Self {
        Self { store }
    }

    /// 계좌 요약 조회
    ///
    /// account_id가 없으면 아무 계좌 하나, 찾지 못하면 "N/A" + 0
    pub async fn get_account(&self, account_id: Option<&str>) -> Result<AccountView> {
        let account = self
            .store
            .find_account(account_id)
            .await
            .context("Failed to load account")?;

        Ok(account
            .as_ref()
            .map(AccountView::from)
            .unwrap_or_else(AccountView::missing))
    }

    pub async fn list_account_ids(&self) -> Result<Vec<String>> {
        self.store
            .list_account_ids()
            .await
            .context("Failed to load account ids")
    }

    pub async fn list_connection_statuses(
        &self,
        account_id: Option<&str>,
    ) -> Result<Vec<ConnectionStatusView>> {
        let docs = self
            .store
            .list_connection_statuses(account_id)
            .await
            .context("Failed to load connection statuses")?;

        Ok(docs.iter().map(ConnectionStatusView::from).collect())
    }

    /// 자산 기록 (최신 limit건을 시간 오름차순으로)
    pub async fn equity_history(
        &self,
        account_id: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<EquitySnapshot>> {
        let limit = clamp_limit(limit, DEFAULT_EQUITY_LIMIT);
        let mut history = self
            .store
            .equity_history(account_id, limit)
            .await
            .context("Failed to load equity history")?;

        // 차트용으로 시간 순서로 뒤집기
        history.reverse();
        Ok(history)
    }

    pub async fn latest_equity(&self) -> Result<Option<EquitySnapshot>> {
        self.store
            .latest_equity()
            .await
            .context("Failed to load latest equity")
    }

    pub async fn list_orders(
        &self,
        account_id: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<OrderView>> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT);
        let docs = self
            .store
            .list_orders(account_id, limit)
            .await
            .context("Failed to load orders")?;

        Ok(docs.iter().map(OrderView::from).collect())
    }

    pub async fn list_trades(
        &self,
        account_id: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<TradeView>> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT);
        let docs = self
            .store
            .list_trades(account_id, limit)
            .await
            .context("Failed to load trades")?;

        Ok(docs.iter().map(TradeView::from).collect())
    }

    pub async fn list_positions(&self, account_id: Option<&str>) -> Result<Vec<PositionView>> {
        let docs = self
            .store
            .list_positions(account_id)
            .await
            .context("Failed to load positions")?;

        Ok(docs.iter().map(PositionView::from).collect())
    }
}
