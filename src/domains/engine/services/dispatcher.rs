use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::domains::engine::models::{EngineEvent, EquitySnapshot, PositionRecord};
use crate::shared::database::EngineStore;
use crate::shared::utils::Document;

/// 엔진 이벤트 디스패처
/// Applies each inbound event to the store
///
/// 메시지 하나에 규칙 하나만 적용합니다.
/// 실패는 로그로 남기고 다음 메시지로 넘어갑니다 (연결은 유지).
#[derive(Clone)]
pub struct EventDispatcher {
    store: Arc<dyn EngineStore>,
}

impl EventDispatcher {
    pub fn new(store: Arc<dyn EngineStore>) -> Self {
        Self { store }
    }

    /// 텍스트 프레임 처리 (에러는 로그만)
    pub async fn handle_message(&self, text: &str) {
        let event = EngineEvent::decode(text);
        let kind = event.kind();

        if let Err(e) = self.apply(event).await {
            tracing::error!(kind, error = ?e, "Failed to apply engine event");
        }
    }

    /// 이벤트 한 개 적용
    /// Apply one event
    pub async fn apply(&self, event: EngineEvent) -> Result<()> {
        match event {
            EngineEvent::OrderUpdate { client_id, doc } => {
                tracing::debug!(kind = "rtn", %client_id, "Order update");
                self.store.merge_order(&client_id, doc).await
            }
            EngineEvent::Trade { doc } => {
                tracing::debug!(kind = "trade", "Trade");
                self.store.insert_trade(doc).await
            }
            EngineEvent::Account { account_id, doc } => {
                tracing::debug!(kind = "account", %account_id, "Account update");
                let snapshot = EquitySnapshot::from_account_event(&account_id, &doc, Utc::now());
                self.store.replace_account(&account_id, doc).await?;
                self.store.insert_equity_snapshot(&snapshot).await
            }
            EngineEvent::PositionSnapshot { positions, skipped } => {
                if skipped > 0 {
                    tracing::warn!(kind = "pos_snapshot", skipped, "Skipped position records without symbol");
                }
                self.reconcile_positions(positions).await
            }
            EngineEvent::Status { account_id, source, doc } => {
                tracing::debug!(kind = "status", %account_id, %source, "Connection status");
                self.store
                    .replace_connection_status(&account_id, &source, doc)
                    .await
            }
            EngineEvent::Tick => Ok(()),
            EngineEvent::Unrecognized { kind } => {
                tracing::warn!(kind = kind.as_deref().unwrap_or("<missing>"), "Dropped unrecognized engine message");
                Ok(())
            }
            EngineEvent::Malformed { reason } => {
                tracing::warn!(%reason, "Dropped malformed engine message");
                Ok(())
            }
        }
    }

    /// 포지션 스냅샷 반영
    ///
    /// 스냅샷에 있는 계정만 삭제 후 재삽입합니다.
    /// 스냅샷에 없는 계정의 포지션은 그대로 남습니다.
    async fn reconcile_positions(&self, positions: Vec<PositionRecord>) -> Result<()> {
        for (account_id, docs) in group_positions_by_account(positions) {
            let count = docs.len();
            let deleted = self
                .store
                .delete_positions(&account_id)
                .await
                .with_context(|| format!("Failed to clear positions of {}", account_id))?;
            self.store
                .insert_positions(&account_id, docs)
                .await
                .with_context(|| format!("Failed to insert positions of {}", account_id))?;

            tracing::debug!(kind = "pos_snapshot", %account_id, deleted, inserted = count, "Positions replaced");
        }
        Ok(())
    }
}

/// account_id별로 포지션 묶기 (입력 순서 유지)
pub fn group_positions_by_account(positions: Vec<PositionRecord>) -> BTreeMap<String, Vec<Document>> {
    let mut grouped: BTreeMap<String, Vec<Document>> = BTreeMap::new();
    for record in positions {
        grouped.entry(record.account_id).or_default().push(record.doc);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(account_id: &str, symbol: &str) -> PositionRecord {
        let serde_json::Value::Object(doc) = json!({"account_id": account_id, "symbol": symbol}) else {
            unreachable!()
        };
        PositionRecord {
            account_id: account_id.to_string(),
            symbol: symbol.to_string(),
            doc,
        }
    }

    #[test]
    fn test_group_positions_by_account() {
        let grouped = group_positions_by_account(vec![
            record("acc2", "rb2410"),
            record("acc1", "ag2412"),
            record("acc2", "cu2501"),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["acc1"].len(), 1);
        let symbols: Vec<_> = grouped["acc2"].iter().map(|d| d["symbol"].clone()).collect();
        assert_eq!(symbols, vec![json!("rb2410"), json!("cu2501")]);
    }
}
