use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;

use super::store::EngineStore;
use crate::domains::engine::models::EquitySnapshot;
use crate::shared::utils::{Document, DocumentExt};

// =====================================================
// MemoryEngineStore - 메모리 저장소
// =====================================================
// PgEngineStore와 같은 의미를 가진 인메모리 구현
// STORE_BACKEND=memory 또는 테스트에서 사용
//
// 모든 컬렉션은 삽입 순서를 유지하는 Vec입니다.
// 주문은 병합될 때마다 update_seq가 증가해서 "최근 업데이트순" 정렬에 사용됩니다.
// =====================================================

#[derive(Debug)]
struct OrderEntry {
    client_id: String,
    doc: Document,
    update_seq: u64,
}

#[derive(Debug, Default)]
struct Collections {
    accounts: Vec<(String, Document)>,
    equity_snapshots: Vec<EquitySnapshot>,
    orders: Vec<OrderEntry>,
    trades: Vec<Document>,
    positions: Vec<(String, Document)>,
    connection_statuses: Vec<((String, String), Document)>,
    next_order_seq: u64,
}

/// 인메모리 엔진 저장소
/// In-memory engine store
#[derive(Debug, Default)]
pub struct MemoryEngineStore {
    inner: Mutex<Collections>,
}

impl MemoryEngineStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_account(doc: &Document, account_id: Option<&str>) -> bool {
    match account_id {
        None => true,
        Some(id) => doc.key_text("account_id").as_deref() == Some(id),
    }
}

fn clamp(limit: i64) -> usize {
    limit.max(0) as usize
}

#[async_trait]
impl EngineStore for MemoryEngineStore {
    async fn merge_order(&self, client_id: &str, doc: Document) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.next_order_seq += 1;
        let seq = inner.next_order_seq;

        match inner.orders.iter_mut().find(|o| o.client_id == client_id) {
            Some(entry) => {
                for (key, value) in doc {
                    entry.doc.insert(key, value);
                }
                entry.update_seq = seq;
            }
            None => inner.orders.push(OrderEntry {
                client_id: client_id.to_string(),
                doc,
                update_seq: seq,
            }),
        }
        Ok(())
    }

    async fn insert_trade(&self, doc: Document) -> Result<()> {
        self.inner.lock().trades.push(doc);
        Ok(())
    }

    async fn replace_account(&self, account_id: &str, doc: Document) -> Result<()> {
        let mut inner = self.inner.lock();
        match inner.accounts.iter_mut().find(|(id, _)| id == account_id) {
            Some((_, existing)) => *existing = doc,
            None => inner.accounts.push((account_id.to_string(), doc)),
        }
        Ok(())
    }

    async fn insert_equity_snapshot(&self, snapshot: &EquitySnapshot) -> Result<()> {
        self.inner.lock().equity_snapshots.push(snapshot.clone());
        Ok(())
    }

    async fn delete_positions(&self, account_id: &str) -> Result<u64> {
        let mut inner = self.inner.lock();
        let before = inner.positions.len();
        inner.positions.retain(|(id, _)| id != account_id);
        Ok((before - inner.positions.len()) as u64)
    }

    async fn insert_positions(&self, account_id: &str, docs: Vec<Document>) -> Result<()> {
        let mut inner = self.inner.lock();
        inner
            .positions
            .extend(docs.into_iter().map(|doc| (account_id.to_string(), doc)));
        Ok(())
    }

    async fn replace_connection_status(
        &self,
        account_id: &str,
        source: &str,
        doc: Document,
    ) -> Result<()> {
        let mut inner = self.inner.lock();
        let existing = inner
            .connection_statuses
            .iter_mut()
            .find(|((id, src), _)| id == account_id && src == source);
        match existing {
            Some((_, existing)) => *existing = doc,
            None => inner
                .connection_statuses
                .push(((account_id.to_string(), source.to_string()), doc)),
        }
        Ok(())
    }

    async fn clear_positions(&self) -> Result<u64> {
        let mut inner = self.inner.lock();
        let count = inner.positions.len() as u64;
        inner.positions.clear();
        Ok(count)
    }

    async fn find_account(&self, account_id: Option<&str>) -> Result<Option<Document>> {
        let inner = self.inner.lock();
        let found = match account_id {
            Some(account_id) => inner.accounts.iter().find(|(id, _)| id == account_id),
            None => inner.accounts.first(),
        };
        Ok(found.map(|(_, doc)| doc.clone()))
    }

    async fn list_account_ids(&self) -> Result<Vec<String>> {
        Ok(self.inner.lock().accounts.iter().map(|(id, _)| id.clone()).collect())
    }

    async fn list_accounts(&self) -> Result<Vec<Document>> {
        Ok(self.inner.lock().accounts.iter().map(|(_, doc)| doc.clone()).collect())
    }

    async fn list_connection_statuses(&self, account_id: Option<&str>) -> Result<Vec<Document>> {
        let inner = self.inner.lock();
        Ok(inner
            .connection_statuses
            .iter()
            .filter(|((id, _), _)| account_id.is_none_or(|wanted| id == wanted))
            .map(|(_, doc)| doc.clone())
            .collect())
    }

    async fn equity_history(
        &self,
        account_id: Option<&str>,
        limit: i64,
    ) -> Result<Vec<EquitySnapshot>> {
        let inner = self.inner.lock();
        let mut history: Vec<EquitySnapshot> = inner
            .equity_snapshots
            .iter()
            .filter(|s| account_id.is_none_or(|wanted| s.account_id == wanted))
            .cloned()
            .collect();
        // 같은 시각이면 나중에 추가된 것이 더 최신
        history.reverse();
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        history.truncate(clamp(limit));
        Ok(history)
    }

    async fn latest_equity(&self) -> Result<Option<EquitySnapshot>> {
        let inner = self.inner.lock();
        Ok(inner
            .equity_snapshots
            .iter()
            .max_by_key(|s| s.timestamp)
            .cloned())
    }

    async fn list_orders(&self, account_id: Option<&str>, limit: i64) -> Result<Vec<Document>> {
        let inner = self.inner.lock();
        let mut orders: Vec<&OrderEntry> = inner
            .orders
            .iter()
            .filter(|o| matches_account(&o.doc, account_id))
            .collect();
        orders.sort_by(|a, b| b.update_seq.cmp(&a.update_seq));
        Ok(orders
            .into_iter()
            .take(clamp(limit))
            .map(|o| o.doc.clone())
            .collect())
    }

    async fn list_trades(&self, account_id: Option<&str>, limit: i64) -> Result<Vec<Document>> {
        let inner = self.inner.lock();
        Ok(inner
            .trades
            .iter()
            .rev()
            .filter(|doc| matches_account(doc, account_id))
            .take(clamp(limit))
            .cloned()
            .collect())
    }

    async fn list_positions(&self, account_id: Option<&str>) -> Result<Vec<Document>> {
        let inner = self.inner.lock();
        Ok(inner
            .positions
            .iter()
            .filter(|(id, _)| account_id.is_none_or(|wanted| id == wanted))
            .map(|(_, doc)| doc.clone())
            .collect())
    }
}
