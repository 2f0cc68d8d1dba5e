use axum::{routing::get, Router};

use crate::shared::services::AppState;

use super::handlers;

/// 엔진 라우터 생성
/// Create engine router
///
/// - `GET /api/engine/status` - 엔진 연결 상태
pub fn create_engine_router() -> Router<AppState> {
    Router::new().route("/status", get(handlers::get_engine_status))
}
