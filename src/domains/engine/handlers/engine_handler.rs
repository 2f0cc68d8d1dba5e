// Engine Handler
// 엔진 연결 상태 핸들러

use axum::{extract::State, Json};

use crate::domains::engine::models::EngineStatusResponse;
use crate::domains::engine::services::SupervisorState;
use crate::shared::services::AppState;

/// 엔진 연결 상태 조회
/// Get engine connection status
///
/// 경로: GET /api/engine/status
#[utoipa::path(
    get,
    path = "/api/engine/status",
    responses(
        (status = 200, description = "Engine connection status", body = EngineStatusResponse)
    ),
    tag = "Engine"
)]
pub async fn get_engine_status(State(app_state): State<AppState>) -> Json<EngineStatusResponse> {
    let state = app_state.engine_client.state();
    let generation = match state {
        SupervisorState::Connected { generation } => Some(generation),
        _ => None,
    };

    Json(EngineStatusResponse {
        state: state.as_str().to_string(),
        generation,
        engine_url: app_state.engine_client.ws_url().to_string(),
    })
}
