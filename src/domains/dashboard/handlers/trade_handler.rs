// Dashboard Trade Handler
// 체결 조회 핸들러 (읽기 전용)

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use super::internal_error;
use super::order_handler::ListQuery;
use crate::domains::dashboard::models::TradeView;
use crate::shared::services::AppState;

/// 체결 목록 (최근 추가순)
/// List trades, newest first
#[utoipa::path(
    get,
    path = "/api/trades",
    params(ListQuery),
    responses(
        (status = 200, description = "Trades", body = Vec<TradeView>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Trades"
)]
pub async fn get_trades(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<TradeView>>, (StatusCode, Json<serde_json::Value>)> {
    let trades = app_state
        .dashboard_state
        .dashboard_service
        .list_trades(query.account_id.as_deref(), query.limit)
        .await
        .map_err(|e| internal_error("Failed to fetch trades", e))?;

    Ok(Json(trades))
}
