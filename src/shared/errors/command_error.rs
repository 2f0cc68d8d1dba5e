use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

/// 엔진 명령 관련 에러
/// Errors raised while building an engine command
///
/// "엔진 미연결"은 에러가 아니라 `SendOutcome::Unavailable` 값으로 반환됩니다.
#[derive(Error, Debug)]
pub enum CommandError {
    /// client_id가 정수가 아님 (엔진은 18자리 정수를 요구)
    /// client_id is not an integer
    #[error("Invalid client_id format: {client_id}")]
    InvalidClientId { client_id: String },

    /// 명령 직렬화 실패
    /// Failed to encode command
    #[error("Failed to encode engine command: {0}")]
    Encode(#[from] serde_json::Error),
}

/// CommandError를 HTTP 응답으로 변환
impl From<CommandError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: CommandError) -> Self {
        let status = match &err {
            CommandError::InvalidClientId { .. } => StatusCode::BAD_REQUEST,
            CommandError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
