use anyhow::{Context, Result};
use sqlx::{PgPool, Row};

use crate::domains::engine::models::EquitySnapshot;

/// 자산 기록 레포지토리 (추가 전용)
/// Append-only equity snapshots
pub struct EquitySnapshotRepository {
    pool: PgPool,
}

impl EquitySnapshotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 스냅샷 추가
    /// Append snapshot
    pub async fn create(&self, snapshot: &EquitySnapshot) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO equity_snapshots (account_id, recorded_at, balance, available, pnl)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&snapshot.account_id)
        .bind(snapshot.timestamp)
        .bind(snapshot.balance)
        .bind(snapshot.available)
        .bind(snapshot.pnl)
        .execute(&self.pool)
        .await
        .context("Failed to create equity snapshot")?;

        Ok(())
    }

    /// 자산 기록 조회 (최신순)
    /// Get equity history, newest first
    pub async fn get_history(&self, account_id: Option<&str>, limit: i64) -> Result<Vec<EquitySnapshot>> {
        let rows = sqlx::query(
            r#"
            SELECT account_id, recorded_at, balance, available, pnl
            FROM equity_snapshots
            WHERE ($1::TEXT IS NULL OR account_id = $1)
            ORDER BY recorded_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(account_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch equity history")?;

        Ok(rows.iter().map(|r| self.row_to_snapshot(r)).collect())
    }

    /// 가장 최근 스냅샷
    pub async fn get_latest(&self) -> Result<Option<EquitySnapshot>> {
        let row = sqlx::query(
            r#"
            SELECT account_id, recorded_at, balance, available, pnl
            FROM equity_snapshots
            ORDER BY recorded_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch latest equity snapshot")?;

        Ok(row.map(|r| self.row_to_snapshot(&r)))
    }

    fn row_to_snapshot(&self, row: &sqlx::postgres::PgRow) -> EquitySnapshot {
        EquitySnapshot {
            account_id: row.get("account_id"),
            timestamp: row.get("recorded_at"),
            balance: row.get("balance"),
            available: row.get("available"),
            pnl: row.get("pnl"),
        }
    }
}
