use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::stream::SplitStream;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use super::backoff::ReconnectBackoff;
use super::connection::SharedConnection;
use super::dispatcher::EventDispatcher;

type EngineStream = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// 연결 감독자 상태
/// Observable supervisor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    /// 대기 중 (다음 연결 시도 전)
    Disconnected,
    /// 연결 시도 중
    Connecting,
    /// 연결됨
    Connected { generation: u64 },
}

impl SupervisorState {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected { .. } => "connected",
        }
    }
}

/// 엔진 연결 감독자
/// Connection supervisor
///
/// 상태 흐름:
/// ```text
/// Disconnected → Connecting ─성공→ Connected(gen) ─끊김→ Disconnected → (대기) → Connecting …
///                          └실패→ Disconnected → (대기) → Connecting …
/// ```
///
/// - 연결 성공 시 쓰기 절반을 공유 ConnectionState에 게시
/// - 끊기면 게시를 회수하고 backoff만큼 대기 후 재시도
/// - 종료 조건 없음 (태스크 abort로만 멈춤)
pub struct ConnectionSupervisor {
    url: String,
    connection: SharedConnection,
    dispatcher: EventDispatcher,
    backoff: ReconnectBackoff,
    state_tx: Arc<watch::Sender<SupervisorState>>,
}

impl ConnectionSupervisor {
    pub fn new(
        url: String,
        connection: SharedConnection,
        dispatcher: EventDispatcher,
        backoff: ReconnectBackoff,
        state_tx: Arc<watch::Sender<SupervisorState>>,
    ) -> Self {
        Self {
            url,
            connection,
            dispatcher,
            backoff,
            state_tx,
        }
    }

    /// 감독 루프 (반환하지 않음)
    pub async fn run(mut self) {
        loop {
            self.set_state(SupervisorState::Connecting);
            tracing::info!(url = %self.url, "Connecting to engine");

            match connect_async(self.url.as_str()).await {
                Ok((ws_stream, _response)) => {
                    let (sink, stream) = ws_stream.split();
                    let generation = self.connection.lock().await.publish(sink);

                    self.backoff.reset();
                    self.set_state(SupervisorState::Connected { generation });
                    tracing::info!(generation, "Connected to engine");

                    self.read_until_closed(stream, generation).await;

                    // 게시 회수 후 쓰기 절반 정리
                    let retracted = self.connection.lock().await.retract();
                    drop(retracted);
                    tracing::warn!(generation, "Engine connection lost");
                }
                Err(e) => {
                    tracing::warn!(url = %self.url, error = %e, "Failed to connect to engine");
                }
            }

            self.set_state(SupervisorState::Disconnected);
            let delay = self.backoff.next_delay();
            tracing::info!(delay_ms = delay.as_millis() as u64, "Reconnecting to engine after delay");
            tokio::time::sleep(delay).await;
        }
    }

    /// 한 세대의 수신 루프 (도착 순서대로 처리)
    async fn read_until_closed(&self, mut stream: EngineStream, generation: u64) {
        while let Some(message) = stream.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    self.dispatcher.handle_message(&text).await;
                }
                Ok(Message::Binary(bytes)) => match String::from_utf8(bytes) {
                    Ok(text) => self.dispatcher.handle_message(&text).await,
                    Err(_) => {
                        tracing::warn!(generation, "Dropped non UTF-8 binary frame");
                    }
                },
                Ok(Message::Close(frame)) => {
                    tracing::info!(generation, ?frame, "Engine closed the connection");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(generation, error = %e, "Engine stream error");
                    break;
                }
            }
        }
    }

    fn set_state(&self, state: SupervisorState) {
        self.state_tx.send_replace(state);
    }
}
