// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: 모든 통합 테스트에서 공통으로 사용하는 셋업 함수 제공
//
// - StubEngine: 127.0.0.1 임의 포트에서 동작하는 가짜 엔진 (WebSocket 서버)
// - MemoryEngineStore 기반 저장소
// - 비동기 조건 대기 헬퍼
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let mut engine = StubEngine::start().await;
//     let (client, store, supervisor) = start_client(&engine.url).await;
//     let mut ws = engine.next_connection().await;
//     // 테스트 코드...
//     supervisor.abort();
// }
// ```
// =====================================================

#![allow(dead_code)]

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async, WebSocketStream};

use dashboard_server::domains::engine::services::{
    EngineClient, EngineClientConfig, SupervisorState,
};
use dashboard_server::shared::database::MemoryEngineStore;
use dashboard_server::shared::utils::Document;

/// 테스트 대기 최대 시간
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// 테스트용 재연결 대기 시간
pub const TEST_RECONNECT_DELAY: Duration = Duration::from_millis(50);

/// 엔진 쪽 WebSocket 연결
pub type EngineSide = WebSocketStream<TcpStream>;

/// 가짜 엔진 서버
pub struct StubEngine {
    pub url: String,
    connections: mpsc::UnboundedReceiver<EngineSide>,
    accept_task: JoinHandle<()>,
}

impl StubEngine {
    /// 임의 포트에서 시작
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub engine");
        Self::serve(listener)
    }

    /// 지정한 주소에서 시작 (재연결 테스트용)
    pub async fn start_at(addr: &str) -> Self {
        let listener = TcpListener::bind(addr)
            .await
            .expect("Failed to bind stub engine");
        Self::serve(listener)
    }

    fn serve(listener: TcpListener) -> Self {
        let addr = listener.local_addr().expect("Failed to read local addr");
        let (tx, rx) = mpsc::unbounded_channel();

        let accept_task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                if let Ok(ws) = accept_async(stream).await {
                    if tx.send(ws).is_err() {
                        break;
                    }
                }
            }
        });

        Self {
            url: format!("ws://{}", addr),
            connections: rx,
            accept_task,
        }
    }

    /// 다음 클라이언트 연결 대기
    pub async fn next_connection(&mut self) -> EngineSide {
        tokio::time::timeout(TEST_TIMEOUT, self.connections.recv())
            .await
            .expect("Timed out waiting for client connection")
            .expect("Stub engine stopped")
    }
}

impl Drop for StubEngine {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

/// 사용 중이지 않은 로컬 주소 (바인드 후 바로 해제)
pub async fn unused_local_addr() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    drop(listener);
    addr.to_string()
}

/// 엔진 → 클라이언트 메시지 전송
pub async fn send_json(ws: &mut EngineSide, value: Value) {
    ws.send(Message::Text(value.to_string()))
        .await
        .expect("Failed to send from stub engine");
}

/// 클라이언트 → 엔진 다음 텍스트 프레임
pub async fn recv_json(ws: &mut EngineSide) -> Value {
    loop {
        let message = tokio::time::timeout(TEST_TIMEOUT, ws.next())
            .await
            .expect("Timed out waiting for command frame")
            .expect("Connection closed")
            .expect("WebSocket error");

        if let Message::Text(text) = message {
            return serde_json::from_str(&text).expect("Command frame is not JSON");
        }
    }
}

pub fn test_client_config(url: &str) -> EngineClientConfig {
    EngineClientConfig {
        ws_url: url.to_string(),
        reconnect_delay: TEST_RECONNECT_DELAY,
        reconnect_max_delay: TEST_RECONNECT_DELAY,
    }
}

/// 메모리 저장소 + 엔진 클라이언트 생성 후 감독자 시작
pub async fn start_client(url: &str) -> (EngineClient, Arc<MemoryEngineStore>, JoinHandle<()>) {
    let store = Arc::new(MemoryEngineStore::new());
    let client = EngineClient::new(test_client_config(url), store.clone());
    let supervisor = client.start().expect("Failed to start engine client");
    (client, store, supervisor)
}

/// 감독자가 특정 세대로 연결될 때까지 대기
pub async fn wait_for_generation(client: &EngineClient, generation: u64) {
    let mut rx = client.subscribe();
    tokio::time::timeout(
        TEST_TIMEOUT,
        rx.wait_for(|state| *state == SupervisorState::Connected { generation }),
    )
    .await
    .expect("Timed out waiting for connection")
    .expect("Supervisor state channel closed");
}

/// 조건이 참이 될 때까지 반복 확인
pub async fn eventually<F, Fut>(what: &str, mut check: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + TEST_TIMEOUT;
    loop {
        if check().await {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            panic!("Timed out waiting for: {}", what);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// json! 객체 → Document
pub fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected JSON object, got {}", other),
    }
}
