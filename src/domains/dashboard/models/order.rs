use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::shared::utils::{Document, DocumentExt};

/// 주문 조회 응답
/// Order view
///
/// 엔진 버전에 따라 필드 이름이 다르므로 여러 후보 키를 순서대로 확인합니다.
/// - limit_price ← limit_price / price
/// - volume_total ← volume_total / vol_total
/// - volume_traded ← volume_traded / vol_traded
/// - msg ← msg / status_msg
/// - insert_time ← timestamp / insert_time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderView {
    pub account_id: String,
    #[schema(example = "100000000000000001")]
    pub client_id: String,
    pub order_ref: String,
    #[schema(example = "rb2410")]
    pub symbol: String,
    pub direction: String,
    pub offset: String,
    pub status: String,
    pub limit_price: f64,
    pub volume_total: i64,
    pub volume_traded: i64,
    pub msg: String,
    /// 엔진이 보낸 시각 (문자열 또는 숫자, 없으면 "")
    #[schema(value_type = Object)]
    pub insert_time: Value,
}

impl From<&Document> for OrderView {
    fn from(doc: &Document) -> Self {
        Self {
            account_id: doc.text("account_id"),
            client_id: doc.text("client_id"),
            order_ref: doc.text("order_ref"),
            symbol: doc.text("symbol"),
            direction: doc.text("direction"),
            offset: doc.text("offset"),
            status: doc.text("status"),
            limit_price: doc.first_nonzero_number(&["limit_price", "price"]),
            volume_total: doc.first_nonzero_integer(&["volume_total", "vol_total"]),
            volume_traded: doc.first_nonzero_integer(&["volume_traded", "vol_traded"]),
            msg: doc.first_non_empty_text(&["msg", "status_msg"]),
            insert_time: doc.first_present(&["timestamp", "insert_time"]),
        }
    }
}

/// 주문 전송/취소 결과
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommandAccepted {
    #[schema(example = "success")]
    pub status: String,
    #[schema(example = "Order sent to engine")]
    pub message: String,
}

impl CommandAccepted {
    pub fn new(message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
        }
    }
}
