// Dashboard Order Handler
// 주문 조회 / 전송 / 취소 핸들러

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use super::internal_error;
use crate::domains::dashboard::models::{CommandAccepted, OrderView};
use crate::domains::engine::models::SendOutcome;
use crate::shared::services::AppState;
use crate::shared::utils::Document;

/// 주문/체결 목록 쿼리 파라미터
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ListQuery {
    /// 최대 조회 개수 (기본: 100, 최대: 5000)
    #[serde(default)]
    pub limit: Option<i64>,

    #[serde(default)]
    pub account_id: Option<String>,
}

/// 주문 취소 쿼리 파라미터
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct CancelOrderQuery {
    /// 종목 코드 (예: "rb2410")
    pub symbol: String,

    #[serde(default)]
    pub account_id: Option<String>,
}

fn engine_unavailable() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "error": "Engine not connected" })),
    )
}

/// 주문 목록 (최근 업데이트순)
/// List orders, most recently updated first
#[utoipa::path(
    get,
    path = "/api/orders",
    params(ListQuery),
    responses(
        (status = 200, description = "Orders", body = Vec<OrderView>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Orders"
)]
pub async fn get_orders(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<OrderView>>, (StatusCode, Json<serde_json::Value>)> {
    let orders = app_state
        .dashboard_state
        .dashboard_service
        .list_orders(query.account_id.as_deref(), query.limit)
        .await
        .map_err(|e| internal_error("Failed to fetch orders", e))?;

    Ok(Json(orders))
}

/// 주문 전송
/// Forward an order to the engine
///
/// 요청 본문의 필드를 그대로 엔진에 전달합니다 (`action`은 항상 "order").
#[utoipa::path(
    post,
    path = "/api/orders",
    responses(
        (status = 200, description = "Order sent to engine", body = CommandAccepted),
        (status = 503, description = "Engine not connected")
    ),
    tag = "Orders"
)]
pub async fn place_order(
    State(app_state): State<AppState>,
    Json(fields): Json<Document>,
) -> Result<Json<CommandAccepted>, (StatusCode, Json<serde_json::Value>)> {
    let outcome = app_state.engine_client.send_order(fields).await?;

    match outcome {
        SendOutcome::Sent => Ok(Json(CommandAccepted::new("Order sent to engine"))),
        SendOutcome::Unavailable => Err(engine_unavailable()),
    }
}

/// 주문 취소
/// Forward a cancel request to the engine
///
/// 경로: DELETE /api/orders/:client_id?symbol=&account_id=
#[utoipa::path(
    delete,
    path = "/api/orders/{client_id}",
    params(
        ("client_id" = String, Path, description = "Order client id (integer)"),
        CancelOrderQuery
    ),
    responses(
        (status = 200, description = "Cancel request sent to engine", body = CommandAccepted),
        (status = 400, description = "Invalid client id"),
        (status = 503, description = "Engine not connected")
    ),
    tag = "Orders"
)]
pub async fn cancel_order(
    State(app_state): State<AppState>,
    Path(client_id): Path<String>,
    Query(query): Query<CancelOrderQuery>,
) -> Result<Json<CommandAccepted>, (StatusCode, Json<serde_json::Value>)> {
    let outcome = app_state
        .engine_client
        .cancel_order(&client_id, &query.symbol, query.account_id.as_deref())
        .await?;

    match outcome {
        SendOutcome::Sent => Ok(Json(CommandAccepted::new("Cancel request sent to engine"))),
        SendOutcome::Unavailable => Err(engine_unavailable()),
    }
}
