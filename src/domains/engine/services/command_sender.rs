use crate::domains::engine::models::{EngineCommand, SendOutcome};
use crate::shared::errors::CommandError;
use crate::shared::utils::Document;

use super::connection::SharedConnection;

/// 엔진 명령 전송기
/// Writes one command frame on the current connection
///
/// 재시도/큐잉 없음. 연결이 없으면 바로 `Unavailable`.
#[derive(Clone)]
pub struct CommandSender {
    connection: SharedConnection,
}

impl CommandSender {
    pub fn new(connection: SharedConnection) -> Self {
        Self { connection }
    }

    /// 주문 전송
    pub async fn send_order(&self, fields: Document) -> Result<SendOutcome, CommandError> {
        self.send(EngineCommand::order(fields)).await
    }

    /// 주문 취소 전송
    ///
    /// client_id 검증은 연결 상태와 상관없이 먼저 수행합니다.
    pub async fn cancel_order(
        &self,
        client_id: &str,
        symbol: &str,
        account_id: Option<&str>,
    ) -> Result<SendOutcome, CommandError> {
        let command = EngineCommand::cancel(client_id, symbol, account_id)?;
        self.send(command).await
    }

    async fn send(&self, command: EngineCommand) -> Result<SendOutcome, CommandError> {
        let frame = command.to_frame()?;
        let action = command.action();

        let mut connection = self.connection.lock().await;
        let generation = connection.generation();

        match connection.send_text(frame).await {
            Ok(true) => {
                tracing::info!(action, generation, "Command sent to engine");
                Ok(SendOutcome::Sent)
            }
            Ok(false) => {
                tracing::warn!(action, "Engine not connected, command dropped");
                Ok(SendOutcome::Unavailable)
            }
            Err(e) => {
                // 읽기 쪽에서 끊김을 감지하고 재연결합니다
                tracing::error!(action, generation, error = %e, "Failed to write command to engine");
                Ok(SendOutcome::Unavailable)
            }
        }
    }
}
