// Dashboard domain state
// 대시보드 도메인 상태
use std::sync::Arc;

use crate::domains::dashboard::services::DashboardService;
use crate::shared::database::EngineStore;

/// Dashboard domain state
#[derive(Clone)]
pub struct DashboardState {
    pub dashboard_service: DashboardService,
}

impl DashboardState {
    pub fn new(store: Arc<dyn EngineStore>) -> Self {
        Self {
            dashboard_service: DashboardService::new(store),
        }
    }
}
