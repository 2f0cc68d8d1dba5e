// Dashboard Equity Handler
// 자산 곡선 핸들러

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::internal_error;
use crate::domains::engine::models::EquitySnapshot;
use crate::shared::services::AppState;

/// 자산 기록 쿼리 파라미터
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct EquityHistoryQuery {
    /// 최대 조회 개수 (기본: 500, 최대: 5000)
    #[serde(default)]
    pub limit: Option<i64>,

    #[serde(default)]
    pub account_id: Option<String>,
}

/// 자산 기록 조회
/// Get equity history
///
/// 최신 `limit`건을 가져와 시간 오름차순으로 반환합니다 (차트용).
#[utoipa::path(
    get,
    path = "/api/equity/history",
    params(EquityHistoryQuery),
    responses(
        (status = 200, description = "Equity snapshots, oldest first", body = Vec<EquitySnapshot>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Equity"
)]
pub async fn get_equity_history(
    State(app_state): State<AppState>,
    Query(query): Query<EquityHistoryQuery>,
) -> Result<Json<Vec<EquitySnapshot>>, (StatusCode, Json<serde_json::Value>)> {
    let history = app_state
        .dashboard_state
        .dashboard_service
        .equity_history(query.account_id.as_deref(), query.limit)
        .await
        .map_err(|e| internal_error("Failed to fetch equity history", e))?;

    Ok(Json(history))
}

/// 최신 자산 기록 (없으면 null)
/// Get latest equity snapshot
#[utoipa::path(
    get,
    path = "/api/equity/latest",
    responses(
        (status = 200, description = "Latest snapshot or null", body = EquitySnapshot),
        (status = 500, description = "Internal server error")
    ),
    tag = "Equity"
)]
pub async fn get_latest_equity(
    State(app_state): State<AppState>,
) -> Result<Json<Option<EquitySnapshot>>, (StatusCode, Json<serde_json::Value>)> {
    let latest = app_state
        .dashboard_state
        .dashboard_service
        .latest_equity()
        .await
        .map_err(|e| internal_error("Failed to fetch latest equity", e))?;

    Ok(Json(latest))
}
