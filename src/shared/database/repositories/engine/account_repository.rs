use anyhow::{Context, Result};
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::shared::utils::Document;

/// 계좌 문서 레포지토리
/// Account documents, one per account_id
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 계좌 문서 교체 (없으면 생성)
    /// Insert or replace the account document
    pub async fn replace(&self, account_id: &str, doc: &Document) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO account (account_id, doc, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            ON CONFLICT (account_id)
            DO UPDATE SET doc = EXCLUDED.doc, updated_at = NOW()
            "#,
        )
        .bind(account_id)
        .bind(Json(doc))
        .execute(&self.pool)
        .await
        .context("Failed to replace account")?;

        Ok(())
    }

    /// 계좌 조회 (account_id가 None이면 가장 먼저 생성된 계좌)
    pub async fn find(&self, account_id: Option<&str>) -> Result<Option<Document>> {
        let row = sqlx::query(
            r#"
            SELECT doc
            FROM account
            WHERE ($1::TEXT IS NULL OR account_id = $1)
            ORDER BY created_at ASC, account_id ASC
            LIMIT 1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch account")?;

        Ok(row.map(|r| self.row_to_doc(&r)))
    }

    pub async fn list_ids(&self) -> Result<Vec<String>> {
        let rows = sqlx::query(
            r#"
            SELECT account_id
            FROM account
            ORDER BY created_at ASC, account_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch account ids")?;

        Ok(rows.iter().map(|r| r.get("account_id")).collect())
    }

    pub async fn list(&self) -> Result<Vec<Document>> {
        let rows = sqlx::query(
            r#"
            SELECT doc
            FROM account
            ORDER BY created_at ASC, account_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch accounts")?;

        Ok(rows.iter().map(|r| self.row_to_doc(r)).collect())
    }

    fn row_to_doc(&self, row: &sqlx::postgres::PgRow) -> Document {
        row.get::<Json<Document>, _>("doc").0
    }
}
