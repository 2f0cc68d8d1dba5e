use anyhow::{Context, Result};
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::shared::utils::Document;

/// 연결 상태 레포지토리
/// Connection status documents keyed by (account_id, source)
pub struct ConnectionStatusRepository {
    pool: PgPool,
}

impl ConnectionStatusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn replace(&self, account_id: &str, source: &str, doc: &Document) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO connection_status (account_id, source, doc, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (account_id, source)
            DO UPDATE SET doc = EXCLUDED.doc, updated_at = NOW()
            "#,
        )
        .bind(account_id)
        .bind(source)
        .bind(Json(doc))
        .execute(&self.pool)
        .await
        .context("Failed to replace connection status")?;

        Ok(())
    }

    pub async fn get_all(&self, account_id: Option<&str>) -> Result<Vec<Document>> {
        let rows = sqlx::query(
            r#"
            SELECT doc
            FROM connection_status
            WHERE ($1::TEXT IS NULL OR account_id = $1)
            ORDER BY account_id ASC, source ASC
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch connection statuses")?;

        Ok(rows.iter().map(|r| r.get::<Json<Document>, _>("doc").0).collect())
    }
}
