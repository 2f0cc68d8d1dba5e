// Routes module: 라우팅 설정
// 역할: 모든 도메인의 라우터를 조합
// Routes module: combines all domain routers

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::shared::services::AppState;

use crate::domains::dashboard::routes::{
    create_account_router, create_equity_router, create_order_router, create_position_router,
    create_trade_router,
};
use crate::domains::engine::routes::create_engine_router;

/// Create main router (combines all domain routers)
/// 메인 라우터 생성 (모든 도메인 라우터 조합)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .nest("/api/account", create_account_router())
        .nest("/api/equity", create_equity_router())
        .nest("/api/orders", create_order_router())
        .nest("/api/trades", create_trade_router())
        .nest("/api/positions", create_position_router())
        .nest("/api/engine", create_engine_router())
}

/// 서버 상태 확인
async fn root() -> Json<Value> {
    Json(json!({ "message": "HFT-UI Backend API is running" }))
}
