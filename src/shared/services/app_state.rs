use std::sync::Arc;

use crate::domains::dashboard::services::DashboardState;
use crate::domains::engine::services::{EngineClient, EngineClientConfig};
use crate::shared::database::EngineStore;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
///
/// 저장소는 엔진 클라이언트(쓰기)와 대시보드(읽기)가 함께 사용합니다.
#[derive(Clone)]
pub struct AppState {
    /// 엔진 상태 저장소 (공유)
    pub store: Arc<dyn EngineStore>,
    /// 엔진 연결 (start()는 main에서 호출)
    pub engine_client: EngineClient,
    pub dashboard_state: DashboardState,
}

impl AppState {
    /// 모든 도메인 State를 초기화하고 조합
    pub fn new(store: Arc<dyn EngineStore>, engine_config: EngineClientConfig) -> Self {
        let engine_client = EngineClient::new(engine_config, store.clone());
        let dashboard_state = DashboardState::new(store.clone());

        Self {
            store,
            engine_client,
            dashboard_state,
        }
    }
}
