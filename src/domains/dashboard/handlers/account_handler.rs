// Dashboard Account Handler
// 계좌 조회 핸들러

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::internal_error;
use crate::domains::dashboard::models::{AccountView, ConnectionStatusView};
use crate::shared::services::AppState;

/// 계정 필터 쿼리 파라미터
/// Optional account filter
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct AccountQuery {
    /// 계정 ID (없으면 전체)
    #[serde(default)]
    pub account_id: Option<String>,
}

/// 계좌 요약 조회
/// Get account summary
///
/// account_id가 없으면 아무 계좌 하나를 반환하고,
/// 찾지 못하면 account_id "N/A"와 0 값을 반환합니다.
#[utoipa::path(
    get,
    path = "/api/account",
    params(AccountQuery),
    responses(
        (status = 200, description = "Account summary", body = AccountView),
        (status = 500, description = "Internal server error")
    ),
    tag = "Account"
)]
pub async fn get_account(
    State(app_state): State<AppState>,
    Query(query): Query<AccountQuery>,
) -> Result<Json<AccountView>, (StatusCode, Json<serde_json::Value>)> {
    let account = app_state
        .dashboard_state
        .dashboard_service
        .get_account(query.account_id.as_deref())
        .await
        .map_err(|e| internal_error("Failed to fetch account", e))?;

    Ok(Json(account))
}

/// 계정 ID 목록
/// List account ids
#[utoipa::path(
    get,
    path = "/api/account/list",
    responses(
        (status = 200, description = "Account ids", body = Vec<String>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Account"
)]
pub async fn get_account_list(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<String>>, (StatusCode, Json<serde_json::Value>)> {
    let ids = app_state
        .dashboard_state
        .dashboard_service
        .list_account_ids()
        .await
        .map_err(|e| internal_error("Failed to fetch account list", e))?;

    Ok(Json(ids))
}

/// 엔진 ↔ 거래소 연결 상태
/// Engine-to-venue connection statuses
#[utoipa::path(
    get,
    path = "/api/account/status",
    params(AccountQuery),
    responses(
        (status = 200, description = "Connection statuses", body = Vec<ConnectionStatusView>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Account"
)]
pub async fn get_account_status(
    State(app_state): State<AppState>,
    Query(query): Query<AccountQuery>,
) -> Result<Json<Vec<ConnectionStatusView>>, (StatusCode, Json<serde_json::Value>)> {
    let statuses = app_state
        .dashboard_state
        .dashboard_service
        .list_connection_statuses(query.account_id.as_deref())
        .await
        .map_err(|e| internal_error("Failed to fetch connection status", e))?;

    Ok(Json(statuses))
}
