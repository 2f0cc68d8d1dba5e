use anyhow::{Context, Result};
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::shared::utils::{Document, DocumentExt};

/// 포지션 레포지토리
/// Position documents, replaced per account on every snapshot
pub struct PositionRepository {
    pool: PgPool,
}

impl PositionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 계정의 포지션 전부 삭제
    /// Delete every position of one account
    pub async fn delete_by_account(&self, account_id: &str) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM positions
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .execute(&self.pool)
        .await
        .context("Failed to delete positions")?;

        Ok(result.rows_affected())
    }

    /// 포지션 일괄 추가 (하나의 트랜잭션)
    /// Bulk insert positions in one transaction
    pub async fn create_many(&self, account_id: &str, docs: &[Document]) -> Result<()> {
        if docs.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin position transaction")?;

        for doc in docs {
            sqlx::query(
                r#"
                INSERT INTO positions (account_id, symbol, doc)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(account_id)
            .bind(doc.text("symbol"))
            .bind(Json(doc))
            .execute(&mut *tx)
            .await
            .context("Failed to insert position")?;
        }

        tx.commit().await.context("Failed to commit positions")?;
        Ok(())
    }

    /// 모든 포지션 삭제
    pub async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM positions")
            .execute(&self.pool)
            .await
            .context("Failed to clear positions")?;

        Ok(result.rows_affected())
    }

    pub async fn get_all(&self, account_id: Option<&str>) -> Result<Vec<Document>> {
        let rows = sqlx::query(
            r#"
            SELECT doc
            FROM positions
            WHERE ($1::TEXT IS NULL OR account_id = $1)
            ORDER BY id ASC
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch positions")?;

        Ok(rows.iter().map(|r| r.get::<Json<Document>, _>("doc").0).collect())
    }
}
