// Dashboard Position Handler
// 포지션 조회 핸들러

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use super::account_handler::AccountQuery;
use super::internal_error;
use crate::domains::dashboard::models::PositionView;
use crate::shared::services::AppState;

/// 포지션 목록
/// List positions
#[utoipa::path(
    get,
    path = "/api/positions",
    params(AccountQuery),
    responses(
        (status = 200, description = "Positions", body = Vec<PositionView>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Positions"
)]
pub async fn get_positions(
    State(app_state): State<AppState>,
    Query(query): Query<AccountQuery>,
) -> Result<Json<Vec<PositionView>>, (StatusCode, Json<serde_json::Value>)> {
    let positions = app_state
        .dashboard_state
        .dashboard_service
        .list_positions(query.account_id.as_deref())
        .await
        .map_err(|e| internal_error("Failed to fetch positions", e))?;

    Ok(Json(positions))
}
