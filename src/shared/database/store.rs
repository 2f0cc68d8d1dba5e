use anyhow::Result;
use async_trait::async_trait;

use crate::domains::engine::models::EquitySnapshot;
use crate::shared::utils::Document;

// =====================================================
// EngineStore - 엔진 상태 저장소
// =====================================================
// 컬렉션: account, equity_snapshots, orders, trades, positions, connection_status
//
// 구현체:
// - PgEngineStore: PostgreSQL (JSONB 문서)
// - MemoryEngineStore: 프로세스 메모리 (개발/테스트)
//
// 각 메서드는 자체적으로 원자적입니다.
// 여러 메서드를 묶는 트랜잭션은 없습니다 (포지션 삭제 → 삽입 포함).
// =====================================================

/// 엔진 상태 저장소
/// Persisted engine state
#[async_trait]
pub trait EngineStore: Send + Sync {
    // ---------- 쓰기 (디스패처) ----------

    /// 주문 문서 병합 (없으면 생성, 있으면 최상위 필드 덮어쓰기)
    async fn merge_order(&self, client_id: &str, doc: Document) -> Result<()>;

    /// 체결 추가
    async fn insert_trade(&self, doc: Document) -> Result<()>;

    /// 계좌 문서 교체 (없으면 생성)
    async fn replace_account(&self, account_id: &str, doc: Document) -> Result<()>;

    /// 자산 스냅샷 추가
    async fn insert_equity_snapshot(&self, snapshot: &EquitySnapshot) -> Result<()>;

    /// 계정의 포지션 전부 삭제, 삭제 건수 반환
    async fn delete_positions(&self, account_id: &str) -> Result<u64>;

    /// 포지션 일괄 추가
    async fn insert_positions(&self, account_id: &str, docs: Vec<Document>) -> Result<()>;

    /// 연결 상태 문서 교체 (없으면 생성)
    async fn replace_connection_status(
        &self,
        account_id: &str,
        source: &str,
        doc: Document,
    ) -> Result<()>;

    /// 모든 포지션 삭제 (관리용)
    async fn clear_positions(&self) -> Result<u64>;

    // ---------- 읽기 (대시보드) ----------

    /// 계좌 조회 (None이면 아무 계좌 하나)
    async fn find_account(&self, account_id: Option<&str>) -> Result<Option<Document>>;

    async fn list_account_ids(&self) -> Result<Vec<String>>;

    async fn list_accounts(&self) -> Result<Vec<Document>>;

    async fn list_connection_statuses(&self, account_id: Option<&str>) -> Result<Vec<Document>>;

    /// 자산 기록 (최신순, 최대 limit건)
    async fn equity_history(&self, account_id: Option<&str>, limit: i64)
        -> Result<Vec<EquitySnapshot>>;

    /// 가장 최근 자산 기록 (모든 계정 중)
    async fn latest_equity(&self) -> Result<Option<EquitySnapshot>>;

    /// 주문 목록 (최근 업데이트순)
    async fn list_orders(&self, account_id: Option<&str>, limit: i64) -> Result<Vec<Document>>;

    /// 체결 목록 (최근 추가순)
    async fn list_trades(&self, account_id: Option<&str>, limit: i64) -> Result<Vec<Document>>;

    async fn list_positions(&self, account_id: Option<&str>) -> Result<Vec<Document>>;
}
