use serde_json::Value;

use crate::shared::utils::{Document, DocumentExt};

// =====================================================
// EngineEvent - 엔진 수신 메시지
// =====================================================
// 엔진이 보내는 모든 메시지는 `type` 필드로 구분됩니다.
//
// | type         | 의미                 |
// |--------------|----------------------|
// | rtn          | 주문 상태 업데이트   |
// | trade        | 체결                 |
// | account      | 계좌 자금            |
// | pos_snapshot | 포지션 전체 스냅샷   |
// | status       | 엔진 ↔ 거래소 연결 상태 |
// | tick         | 시세 (저장 안 함)    |
//
// 디코딩은 실패하지 않습니다. 잘못된 메시지는 `Malformed`,
// 모르는 타입은 `Unrecognized`로 분류되어 디스패처가 로그만 남깁니다.
// =====================================================

/// status 이벤트에 source가 없을 때 기본값
pub const DEFAULT_STATUS_SOURCE: &str = "CTP";

/// 포지션 스냅샷의 한 항목
/// One record of a position snapshot, with its keys resolved
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRecord {
    pub account_id: String,
    pub symbol: String,
    /// 원본 문서 (account_id는 해석된 값으로 기록됨)
    pub doc: Document,
}

/// 엔진 수신 메시지
/// Inbound engine message, classified by its `type` tag
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// `rtn`: client_id 기준으로 주문 문서에 병합
    OrderUpdate { client_id: String, doc: Document },

    /// `trade`: 체결 내역 추가
    Trade { doc: Document },

    /// `account`: 계좌 문서 교체 + 자산 스냅샷 추가
    Account { account_id: String, doc: Document },

    /// `pos_snapshot`: 계정별 포지션 전체 교체
    /// `skipped` = symbol이 없어서 버린 항목 수
    PositionSnapshot { positions: Vec<PositionRecord>, skipped: usize },

    /// `status`: (account_id, source) 기준 연결 상태 교체
    Status { account_id: String, source: String, doc: Document },

    /// `tick`: 저장하지 않음
    Tick,

    /// type이 없거나 알 수 없는 메시지
    Unrecognized { kind: Option<String> },

    /// JSON이 아니거나 필수 필드가 없는 메시지
    Malformed { reason: String },
}

impl EngineEvent {
    /// 텍스트 프레임 디코딩
    /// Decode one text frame
    pub fn decode(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(doc)) => Self::from_document(doc),
            Ok(_) => Self::Malformed {
                reason: "message is not a JSON object".to_string(),
            },
            Err(e) => Self::Malformed {
                reason: format!("invalid JSON: {}", e),
            },
        }
    }

    /// 디코딩된 JSON 객체 분류
    /// Classify an already decoded JSON object
    pub fn from_document(mut doc: Document) -> Self {
        let kind = match doc.get("type") {
            Some(Value::String(kind)) => kind.clone(),
            _ => return Self::Unrecognized { kind: None },
        };

        match kind.as_str() {
            "rtn" => match doc.key_text("client_id") {
                Some(client_id) => Self::OrderUpdate { client_id, doc },
                None => Self::Malformed {
                    reason: "rtn event without client_id".to_string(),
                },
            },
            "trade" => Self::Trade { doc },
            "account" => {
                let account_id = doc.account_id();
                doc.insert("account_id".to_string(), Value::String(account_id.clone()));
                Self::Account { account_id, doc }
            }
            "pos_snapshot" => Self::decode_position_snapshot(&doc),
            "status" => {
                let account_id = doc.account_id();
                let source = doc
                    .key_text("source")
                    .unwrap_or_else(|| DEFAULT_STATUS_SOURCE.to_string());
                doc.insert("account_id".to_string(), Value::String(account_id.clone()));
                doc.insert("source".to_string(), Value::String(source.clone()));
                Self::Status { account_id, source, doc }
            }
            "tick" => Self::Tick,
            _ => Self::Unrecognized { kind: Some(kind) },
        }
    }

    /// 로그용 이벤트 이름
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OrderUpdate { .. } => "rtn",
            Self::Trade { .. } => "trade",
            Self::Account { .. } => "account",
            Self::PositionSnapshot { .. } => "pos_snapshot",
            Self::Status { .. } => "status",
            Self::Tick => "tick",
            Self::Unrecognized { .. } => "unrecognized",
            Self::Malformed { .. } => "malformed",
        }
    }

    fn decode_position_snapshot(doc: &Document) -> Self {
        let items = match doc.get("data") {
            None | Some(Value::Null) => {
                return Self::PositionSnapshot { positions: Vec::new(), skipped: 0 };
            }
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Self::Malformed {
                    reason: "pos_snapshot data is not a list".to_string(),
                };
            }
        };

        let mut positions = Vec::with_capacity(items.len());
        let mut skipped = 0;

        for item in items {
            let Value::Object(record) = item else {
                skipped += 1;
                continue;
            };
            // symbol이 없는 항목만 버리고 나머지는 계속 처리
            let symbol = match record.get("symbol") {
                Some(Value::String(symbol)) if !symbol.is_empty() => symbol.clone(),
                _ => {
                    skipped += 1;
                    continue;
                }
            };

            let account_id = record.account_id();
            let mut doc = record.clone();
            doc.insert("account_id".to_string(), Value::String(account_id.clone()));

            positions.push(PositionRecord { account_id, symbol, doc });
        }

        Self::PositionSnapshot { positions, skipped }
    }
}
