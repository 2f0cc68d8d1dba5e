// =====================================================
// 엔진 이벤트 반영 통합 테스트
// =====================================================

mod common;
use common::*;

use std::sync::Arc;

use serde_json::json;

use dashboard_server::domains::engine::services::EventDispatcher;
use dashboard_server::shared::database::{EngineStore, MemoryEngineStore};
use dashboard_server::shared::utils::DocumentExt;

fn setup() -> (EventDispatcher, Arc<MemoryEngineStore>) {
    let store = Arc::new(MemoryEngineStore::new());
    (EventDispatcher::new(store.clone()), store)
}

async fn handle(dispatcher: &EventDispatcher, value: serde_json::Value) {
    dispatcher.handle_message(&value.to_string()).await;
}

/// 테스트: 스냅샷에 있는 계정의 포지션은 스냅샷과 정확히 같아짐
#[tokio::test]
async fn test_position_snapshot_replaces_account_positions() {
    let (dispatcher, store) = setup();

    handle(&dispatcher, json!({
        "type": "pos_snapshot",
        "data": [
            {"account_id": "acc1", "symbol": "rb2410", "long_td": 1},
            {"account_id": "acc1", "symbol": "ag2412", "short_td": 2},
            {"account_id": "acc2", "symbol": "cu2501", "long_yd": 3}
        ]
    }))
    .await;

    handle(&dispatcher, json!({
        "type": "pos_snapshot",
        "data": [
            {"account_id": "acc1", "symbol": "rb2410", "long_td": 5}
        ]
    }))
    .await;

    let acc1 = store.list_positions(Some("acc1")).await.unwrap();
    assert_eq!(acc1.len(), 1);
    assert_eq!(acc1[0].text("symbol"), "rb2410");
    assert_eq!(acc1[0].integer("long_td"), 5);

    // acc2는 두 번째 스냅샷에 없으므로 이전 포지션 유지
    let acc2 = store.list_positions(Some("acc2")).await.unwrap();
    assert_eq!(acc2.len(), 1);
    assert_eq!(acc2[0].text("symbol"), "cu2501");
}

/// 테스트: account_id가 없는 포지션은 "default" 계정으로
#[tokio::test]
async fn test_position_snapshot_defaults_account_and_skips_missing_symbol() {
    let (dispatcher, store) = setup();

    handle(&dispatcher, json!({
        "type": "pos_snapshot",
        "data": [
            {"symbol": "rb2410", "long_td": 1},
            {"long_td": 9}
        ]
    }))
    .await;

    let positions = store.list_positions(Some("default")).await.unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].text("account_id"), "default");
    assert_eq!(store.list_positions(None).await.unwrap().len(), 1);
}

/// 테스트: 빈 스냅샷은 아무것도 지우지 않음
#[tokio::test]
async fn test_empty_position_snapshot_is_noop() {
    let (dispatcher, store) = setup();

    handle(&dispatcher, json!({
        "type": "pos_snapshot",
        "data": [{"account_id": "acc1", "symbol": "rb2410"}]
    }))
    .await;
    handle(&dispatcher, json!({"type": "pos_snapshot", "data": []})).await;
    handle(&dispatcher, json!({"type": "pos_snapshot"})).await;

    assert_eq!(store.list_positions(Some("acc1")).await.unwrap().len(), 1);
}

/// 테스트: account 이벤트마다 자산 기록 1건, 계좌 문서는 마지막 이벤트로 교체
#[tokio::test]
async fn test_account_event_replaces_account_and_appends_equity() {
    let (dispatcher, store) = setup();

    handle(&dispatcher, json!({
        "type": "account", "account_id": "acc1",
        "balance": 1000.0, "available": 900.0, "margin": 100.0, "pnl": 5.0
    }))
    .await;
    handle(&dispatcher, json!({
        "type": "account", "account_id": "acc1",
        "balance": 1100.0, "available": "950.5"
    }))
    .await;

    let account = store.find_account(Some("acc1")).await.unwrap().unwrap();
    assert_eq!(account.number("balance"), 1100.0);
    assert!(account.get("margin").is_none(), "account document should be replaced, not merged");

    let history = store.equity_history(Some("acc1"), 10).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].balance, 1100.0);
    assert_eq!(history[0].available, 950.5);
    assert_eq!(history[0].pnl, 0.0);
    assert_eq!(history[1].balance, 1000.0);
}

#[tokio::test]
async fn test_account_event_without_id_uses_default() {
    let (dispatcher, store) = setup();

    handle(&dispatcher, json!({"type": "account", "balance": 1.0})).await;

    assert_eq!(store.list_account_ids().await.unwrap(), vec!["default".to_string()]);
    assert_eq!(store.latest_equity().await.unwrap().unwrap().account_id, "default");
}

/// 테스트: 같은 client_id의 rtn A → B는 B가 A 위에 병합
#[tokio::test]
async fn test_order_updates_merge_by_client_id() {
    let (dispatcher, store) = setup();

    handle(&dispatcher, json!({
        "type": "rtn", "client_id": 100000000000000001i64,
        "symbol": "rb2410", "status": "submitted", "limit_price": 3550.0
    }))
    .await;
    handle(&dispatcher, json!({
        "type": "rtn", "client_id": "100000000000000001",
        "status": "filled", "volume_traded": 1
    }))
    .await;

    let orders = store.list_orders(None, 10).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].text("status"), "filled");
    assert_eq!(orders[0].text("symbol"), "rb2410");
    assert_eq!(orders[0].number("limit_price"), 3550.0);
    assert_eq!(orders[0].integer("volume_traded"), 1);
}

#[tokio::test]
async fn test_trades_are_appended() {
    let (dispatcher, store) = setup();

    for trade_id in ["t1", "t2"] {
        handle(&dispatcher, json!({
            "type": "trade", "account_id": "acc1", "trade_id": trade_id, "price": 1.0
        }))
        .await;
    }

    let trades = store.list_trades(Some("acc1"), 10).await.unwrap();
    assert_eq!(trades.len(), 2);
    // 최근 추가순
    assert_eq!(trades[0].text("trade_id"), "t2");
}

#[tokio::test]
async fn test_status_defaults_and_replaces() {
    let (dispatcher, store) = setup();

    handle(&dispatcher, json!({"type": "status", "code": 1, "msg": "connecting"})).await;
    handle(&dispatcher, json!({"type": "status", "code": 0, "msg": "connected"})).await;
    handle(&dispatcher, json!({"type": "status", "source": "MD", "code": 0})).await;

    let statuses = store.list_connection_statuses(Some("default")).await.unwrap();
    assert_eq!(statuses.len(), 2);

    let ctp = statuses
        .iter()
        .find(|s| s.text("source") == "CTP")
        .expect("CTP status missing");
    assert_eq!(ctp.text("msg"), "connected");
}

/// 테스트: 잘못된 메시지는 버려지고 다음 메시지는 정상 처리
#[tokio::test]
async fn test_bad_messages_are_dropped() {
    let (dispatcher, store) = setup();

    dispatcher.handle_message("not json").await;
    dispatcher.handle_message("[1, 2, 3]").await;
    handle(&dispatcher, json!({"type": "heartbeat"})).await;
    handle(&dispatcher, json!({"symbol": "rb2410"})).await;
    handle(&dispatcher, json!({"type": "rtn", "status": "missing id"})).await;
    handle(&dispatcher, json!({"type": "pos_snapshot", "data": "oops"})).await;
    handle(&dispatcher, json!({"type": "tick", "symbol": "rb2410", "last": 3550.0})).await;

    assert!(store.list_orders(None, 10).await.unwrap().is_empty());
    assert!(store.list_positions(None).await.unwrap().is_empty());

    handle(&dispatcher, json!({"type": "trade", "trade_id": "t1"})).await;
    assert_eq!(store.list_trades(None, 10).await.unwrap().len(), 1);
}

/// 테스트: WebSocket으로 받은 메시지가 도착 순서대로 반영됨
#[tokio::test]
async fn test_events_from_live_connection_are_applied_in_order() {
    let mut engine = StubEngine::start().await;
    let (client, store, supervisor) = start_client(&engine.url).await;

    let mut ws = engine.next_connection().await;
    wait_for_generation(&client, 1).await;

    send_json(&mut ws, json!({"type": "rtn", "client_id": 7, "status": "a"})).await;
    send_json(&mut ws, json!({"type": "rtn", "client_id": 7, "status": "b"})).await;
    send_json(&mut ws, json!({"type": "account", "account_id": "acc1", "balance": 10.0})).await;

    let store_ref = store.clone();
    eventually("account event applied", move || {
        let store = store_ref.clone();
        async move { store.find_account(Some("acc1")).await.unwrap().is_some() }
    })
    .await;

    let orders = store.list_orders(None, 10).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].text("status"), "b");

    supervisor.abort();
}
