use std::sync::Arc;

use futures_util::SinkExt;
use futures_util::stream::SplitSink;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

/// 엔진 WebSocket의 쓰기 절반
pub type EngineSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Supervisor와 CommandSender가 공유하는 연결 상태
pub type SharedConnection = Arc<Mutex<ConnectionState>>;

/// 현재 연결 (있다면)과 세대 번호
/// The currently published write handle, if any
///
/// - Supervisor만 `publish` / `retract` 호출
/// - CommandSender는 `send_text`로 한 프레임만 기록
#[derive(Default)]
pub struct ConnectionState {
    sink: Option<EngineSink>,
    generation: u64,
}

impl ConnectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedConnection {
        Arc::new(Mutex::new(Self::new()))
    }

    /// 새 연결 게시, 새 세대 번호 반환 (1부터 시작)
    pub fn publish(&mut self, sink: EngineSink) -> u64 {
        self.generation += 1;
        self.sink = Some(sink);
        self.generation
    }

    /// 연결 회수 (이후 전송은 Unavailable)
    pub fn retract(&mut self) -> Option<EngineSink> {
        self.sink.take()
    }

    /// 마지막으로 게시된 세대 번호 (연결 전이면 0)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 텍스트 프레임 한 개 기록
    ///
    /// 연결이 없으면 `Ok(false)`, 기록했으면 `Ok(true)`
    pub async fn send_text(
        &mut self,
        frame: String,
    ) -> Result<bool, tokio_tungstenite::tungstenite::Error> {
        match self.sink.as_mut() {
            Some(sink) => {
                sink.send(Message::Text(frame)).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
