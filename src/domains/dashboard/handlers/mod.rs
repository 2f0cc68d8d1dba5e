// Dashboard handlers module
// 대시보드 핸들러 모듈

pub mod account_handler;
pub mod equity_handler;
pub mod order_handler;
pub mod position_handler;
pub mod trade_handler;

pub use account_handler::*;
pub use equity_handler::*;
pub use order_handler::*;
pub use position_handler::*;
pub use trade_handler::*;

use axum::{http::StatusCode, Json};

/// 저장소 에러 → 500 응답
fn internal_error(what: &str, e: anyhow::Error) -> (StatusCode, Json<serde_json::Value>) {
    tracing::error!(error = ?e, "{}", what);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": format!("{}: {}", what, e)
        })),
    )
}
