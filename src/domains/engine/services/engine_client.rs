use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::backoff::ReconnectBackoff;
use super::command_sender::CommandSender;
use super::connection::{ConnectionState, SharedConnection};
use super::dispatcher::EventDispatcher;
use super::supervisor::{ConnectionSupervisor, SupervisorState};
use crate::domains::engine::models::SendOutcome;
use crate::shared::database::EngineStore;
use crate::shared::errors::CommandError;
use crate::shared::utils::Document;

/// 엔진 클라이언트 설정
#[derive(Debug, Clone)]
pub struct EngineClientConfig {
    /// ws:// 또는 wss:// 주소
    pub ws_url: String,
    pub reconnect_delay: Duration,
    pub reconnect_max_delay: Duration,
}

/// 엔진 클라이언트
/// Engine client facade
///
/// 역할:
/// - 연결 감독자(Supervisor) 태스크 시작
/// - 주문/취소 명령 전송
/// - 연결 상태 조회
///
/// 복제해서 여러 핸들러에서 공유합니다 (내부는 모두 Arc).
#[derive(Clone)]
pub struct EngineClient {
    config: EngineClientConfig,
    connection: SharedConnection,
    dispatcher: EventDispatcher,
    sender: CommandSender,
    state_tx: Arc<watch::Sender<SupervisorState>>,
    started: Arc<AtomicBool>,
}

impl EngineClient {
    pub fn new(config: EngineClientConfig, store: Arc<dyn EngineStore>) -> Self {
        let connection = ConnectionState::shared();
        let (state_tx, _) = watch::channel(SupervisorState::Disconnected);

        Self {
            config,
            sender: CommandSender::new(connection.clone()),
            dispatcher: EventDispatcher::new(store),
            connection,
            state_tx: Arc::new(state_tx),
            started: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 감독자 태스크 시작 (한 번만 가능)
    /// Spawn the supervisor task; abort the handle to stop it
    pub fn start(&self) -> Result<JoinHandle<()>> {
        if self.started.swap(true, Ordering::SeqCst) {
            bail!("Engine client already started");
        }

        let supervisor = ConnectionSupervisor::new(
            self.config.ws_url.clone(),
            self.connection.clone(),
            self.dispatcher.clone(),
            ReconnectBackoff::new(self.config.reconnect_delay, self.config.reconnect_max_delay),
            self.state_tx.clone(),
        );

        tracing::info!(url = %self.config.ws_url, "Starting engine client");
        Ok(tokio::spawn(supervisor.run()))
    }

    pub async fn send_order(&self, fields: Document) -> Result<SendOutcome, CommandError> {
        self.sender.send_order(fields).await
    }

    pub async fn cancel_order(
        &self,
        client_id: &str,
        symbol: &str,
        account_id: Option<&str>,
    ) -> Result<SendOutcome, CommandError> {
        self.sender.cancel_order(client_id, symbol, account_id).await
    }

    /// 현재 감독자 상태
    pub fn state(&self) -> SupervisorState {
        *self.state_tx.borrow()
    }

    /// 상태 변경 구독
    pub fn subscribe(&self) -> watch::Receiver<SupervisorState> {
        self.state_tx.subscribe()
    }

    pub fn ws_url(&self) -> &str {
        &self.config.ws_url
    }
}
