use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 엔진 연결 상태 응답
/// Engine connection status response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EngineStatusResponse {
    /// "disconnected" | "connecting" | "connected"
    #[schema(example = "connected")]
    pub state: String,

    /// 현재 연결 세대 (연결 안 됨이면 None)
    #[schema(example = 1)]
    pub generation: Option<u64>,

    #[schema(example = "ws://localhost:8888")]
    pub engine_url: String,
}
