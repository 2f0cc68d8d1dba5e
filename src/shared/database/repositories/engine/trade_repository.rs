use anyhow::{Context, Result};
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::shared::utils::Document;

/// 체결 레포지토리 (추가 전용)
/// Append-only trade documents
pub struct TradeRepository {
    pool: PgPool,
}

impl TradeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, doc: &Document) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO trades (doc, received_at)
            VALUES ($1, NOW())
            "#,
        )
        .bind(Json(doc))
        .execute(&self.pool)
        .await
        .context("Failed to create trade")?;

        Ok(())
    }

    /// 체결 목록 (최근 추가순)
    pub async fn get_recent(&self, account_id: Option<&str>, limit: i64) -> Result<Vec<Document>> {
        let rows = sqlx::query(
            r#"
            SELECT doc
            FROM trades
            WHERE ($1::TEXT IS NULL OR doc->>'account_id' = $1)
            ORDER BY id DESC
            LIMIT $2
            "#,
        )
        .bind(account_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch trades")?;

        Ok(rows.iter().map(|r| r.get::<Json<Document>, _>("doc").0).collect())
    }
}
