use anyhow::{Context, Result};
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::shared::utils::Document;

/// 주문 문서 레포지토리
/// Order documents keyed by client_id
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 주문 병합
    /// Insert, or overlay the new top-level fields on the stored document
    pub async fn merge(&self, client_id: &str, doc: &Document) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO orders (client_id, doc, updated_at)
            VALUES ($1, $2, clock_timestamp())
            ON CONFLICT (client_id)
            DO UPDATE SET doc = orders.doc || EXCLUDED.doc, updated_at = clock_timestamp()
            "#,
        )
        .bind(client_id)
        .bind(Json(doc))
        .execute(&self.pool)
        .await
        .context("Failed to merge order")?;

        Ok(())
    }

    /// 주문 목록 (최근 업데이트순)
    pub async fn get_recent(&self, account_id: Option<&str>, limit: i64) -> Result<Vec<Document>> {
        let rows = sqlx::query(
            r#"
            SELECT doc
            FROM orders
            WHERE ($1::TEXT IS NULL OR doc->>'account_id' = $1)
            ORDER BY updated_at DESC
            LIMIT $2
            "#,
        )
        .bind(account_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch orders")?;

        Ok(rows.iter().map(|r| r.get::<Json<Document>, _>("doc").0).collect())
    }
}
