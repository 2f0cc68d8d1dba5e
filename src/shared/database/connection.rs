use anyhow::{Context, Result};
use sqlx::PgPool;

// 데이터베이스 연결 풀
// Database connection pool for PostgreSQL
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    // 데이터베이스 연결 생성
    // db_url: PostgreSQL 연결 문자열 (예: "postgresql://localhost/hft_db")
    pub async fn new(db_url: &str) -> Result<Self> {
        let pool = PgPool::connect(db_url)
            .await
            .context("Failed to connect to database")?;

        Ok(Self { pool })
    }

    // 연결 풀 반환
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // 마이그레이션 실행
    // migrations/ 폴더의 모든 .sql 파일을 순서대로 실행
    pub async fn initialize(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(self.pool())
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database migrations completed");
        Ok(())
    }
}
