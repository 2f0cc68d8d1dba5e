use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::shared::utils::{Document, DocumentExt};

/// 계좌를 찾지 못했을 때 표시하는 account_id
pub const MISSING_ACCOUNT_ID: &str = "N/A";

/// 계좌 요약
/// Account summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AccountView {
    #[schema(example = "acc1")]
    pub account_id: String,
    #[schema(example = 1000000.0)]
    pub balance: f64,
    #[schema(example = 850000.0)]
    pub available: f64,
    #[schema(example = 150000.0)]
    pub margin: f64,
    #[schema(example = 1250.5)]
    pub pnl: f64,
}

impl AccountView {
    /// 계좌가 없을 때 응답 ("N/A" + 0)
    pub fn missing() -> Self {
        Self {
            account_id: MISSING_ACCOUNT_ID.to_string(),
            balance: 0.0,
            available: 0.0,
            margin: 0.0,
            pnl: 0.0,
        }
    }
}

impl From<&Document> for AccountView {
    fn from(doc: &Document) -> Self {
        Self {
            account_id: doc.text("account_id"),
            balance: doc.number("balance"),
            available: doc.number("available"),
            margin: doc.number("margin"),
            pnl: doc.number("pnl"),
        }
    }
}

/// 엔진 ↔ 거래소 연결 상태
/// Engine-to-venue connection status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConnectionStatusView {
    pub account_id: String,
    #[schema(example = "CTP")]
    pub source: String,
    /// 엔진이 보낸 값 그대로 (숫자 또는 문자열)
    #[schema(value_type = Object)]
    pub code: Value,
    pub msg: String,
}

impl From<&Document> for ConnectionStatusView {
    fn from(doc: &Document) -> Self {
        Self {
            account_id: doc.text("account_id"),
            source: doc.text("source"),
            code: doc
                .get("code")
                .cloned()
                .unwrap_or_else(|| Value::String(String::new())),
            msg: doc.text("msg"),
        }
    }
}
