use axum::{
    routing::{delete, get},
    Router,
};

use crate::shared::services::AppState;

use super::handlers;

// =====================================================
// Dashboard 라우터
// =====================================================
// 각 라우터는 src/routes/mod.rs에서 /api/<name> 아래에 연결됩니다.
// =====================================================

/// - `GET /api/account` - 계좌 요약
/// - `GET /api/account/list` - 계정 ID 목록
/// - `GET /api/account/status` - 연결 상태
pub fn create_account_router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_account))
        .route("/list", get(handlers::get_account_list))
        .route("/status", get(handlers::get_account_status))
}

/// - `GET /api/equity/history` - 자산 기록
/// - `GET /api/equity/latest` - 최신 자산
pub fn create_equity_router() -> Router<AppState> {
    Router::new()
        .route("/history", get(handlers::get_equity_history))
        .route("/latest", get(handlers::get_latest_equity))
}

/// - `GET    /api/orders` - 주문 목록
/// - `POST   /api/orders` - 주문 전송
/// - `DELETE /api/orders/:client_id` - 주문 취소
pub fn create_order_router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_orders).post(handlers::place_order))
        .route("/:client_id", delete(handlers::cancel_order))
}

/// - `GET /api/trades` - 체결 목록
pub fn create_trade_router() -> Router<AppState> {
    Router::new().route("/", get(handlers::get_trades))
}

/// - `GET /api/positions` - 포지션 목록
pub fn create_position_router() -> Router<AppState> {
    Router::new().route("/", get(handlers::get_positions))
}
