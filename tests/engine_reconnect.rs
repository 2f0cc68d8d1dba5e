// =====================================================
// 엔진 재연결 통합 테스트
// =====================================================

mod common;
use common::*;

use std::time::Instant;

use serde_json::json;

use dashboard_server::domains::engine::models::SendOutcome;
use dashboard_server::domains::engine::services::SupervisorState;
use dashboard_server::shared::database::EngineStore;
use dashboard_server::shared::utils::DocumentExt;

/// 테스트: 끊기면 재연결하고 새 세대에서 이어서 처리 (이전 메시지 재처리 없음)
#[tokio::test]
async fn test_reconnect_resumes_on_new_generation() {
    let mut engine = StubEngine::start().await;
    let (client, store, supervisor) = start_client(&engine.url).await;

    // 1세대
    let mut first = engine.next_connection().await;
    wait_for_generation(&client, 1).await;
    send_json(&mut first, json!({"type": "trade", "trade_id": "t1"})).await;

    let store_ref = store.clone();
    eventually("first trade applied", move || {
        let store = store_ref.clone();
        async move { store.list_trades(None, 10).await.unwrap().len() == 1 }
    })
    .await;

    first.close(None).await.expect("Failed to close connection");
    drop(first);

    // 2세대
    let mut second = engine.next_connection().await;
    wait_for_generation(&client, 2).await;
    send_json(&mut second, json!({"type": "trade", "trade_id": "t2"})).await;

    let store_ref = store.clone();
    eventually("second trade applied", move || {
        let store = store_ref.clone();
        async move { store.list_trades(None, 10).await.unwrap().len() == 2 }
    })
    .await;

    let ids: Vec<String> = store
        .list_trades(None, 10)
        .await
        .unwrap()
        .iter()
        .map(|t| t.text("trade_id"))
        .collect();
    assert_eq!(ids, vec!["t2".to_string(), "t1".to_string()]);

    // 새 연결로 명령 전송
    let outcome = client.cancel_order("1", "rb2410", None).await.unwrap();
    assert_eq!(outcome, SendOutcome::Sent);
    assert_eq!(recv_json(&mut second).await["client_id"], 1);

    supervisor.abort();
}

/// 테스트: 첫 연결 실패 후 엔진이 뜨면 연결됨
#[tokio::test]
async fn test_initial_connect_failure_then_success() {
    let addr = unused_local_addr().await;
    let url = format!("ws://{}", addr);
    let (client, _store, supervisor) = start_client(&url).await;

    // 엔진이 없는 동안은 전송 불가
    let mut rx = client.subscribe();
    tokio::time::timeout(TEST_TIMEOUT, rx.wait_for(|s| *s == SupervisorState::Disconnected))
        .await
        .expect("Timed out waiting for failed attempt")
        .expect("State channel closed");
    let outcome = client.send_order(doc(json!({"symbol": "rb2410"}))).await.unwrap();
    assert_eq!(outcome, SendOutcome::Unavailable);

    // 몇 번의 실패한 시도가 지나가도록 대기
    tokio::time::sleep(TEST_RECONNECT_DELAY * 3).await;
    assert!(!client.state().is_connected());

    let mut engine = StubEngine::start_at(&addr).await;
    let _ws = engine.next_connection().await;
    wait_for_generation(&client, 1).await;

    assert!(client.state().is_connected());

    supervisor.abort();
}

/// 테스트: 연결이 끊긴 뒤 재연결 지연 이후에 다시 연결
#[tokio::test]
async fn test_reconnect_waits_for_delay() {
    let mut engine = StubEngine::start().await;
    let (client, _store, supervisor) = start_client(&engine.url).await;

    let mut first = engine.next_connection().await;
    wait_for_generation(&client, 1).await;

    let closed_at = Instant::now();
    first.close(None).await.expect("Failed to close connection");
    drop(first);

    let _second = engine.next_connection().await;
    let elapsed = closed_at.elapsed();
    assert!(
        elapsed >= TEST_RECONNECT_DELAY,
        "reconnected after {:?}, expected at least {:?}",
        elapsed,
        TEST_RECONNECT_DELAY
    );
    wait_for_generation(&client, 2).await;

    supervisor.abort();
}

/// 테스트: close 프레임 없이 TCP가 끊겨도 재연결
#[tokio::test]
async fn test_abrupt_drop_reconnects() {
    let mut engine = StubEngine::start().await;
    let (client, store, supervisor) = start_client(&engine.url).await;

    let first = engine.next_connection().await;
    wait_for_generation(&client, 1).await;

    // close 핸드셰이크 없이 소켓만 해제
    drop(first);

    let mut second = engine.next_connection().await;
    wait_for_generation(&client, 2).await;

    send_json(&mut second, json!({"type": "trade", "trade_id": "t1"})).await;
    let store_ref = store.clone();
    eventually("trade applied on new generation", move || {
        let store = store_ref.clone();
        async move { store.list_trades(None, 10).await.unwrap().len() == 1 }
    })
    .await;

    supervisor.abort();
}
