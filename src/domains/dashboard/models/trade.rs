use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::shared::utils::{Document, DocumentExt};

/// 체결 조회 응답
/// Trade view (trade_time ← timestamp / trade_time)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TradeView {
    pub account_id: String,
    pub client_id: String,
    #[schema(example = "rb2410")]
    pub symbol: String,
    pub direction: String,
    pub offset: String,
    pub price: f64,
    pub volume: i64,
    #[schema(value_type = Object)]
    pub trade_time: Value,
    pub order_ref: String,
    pub trade_id: String,
}

impl From<&Document> for TradeView {
    fn from(doc: &Document) -> Self {
        Self {
            account_id: doc.text("account_id"),
            client_id: doc.text("client_id"),
            symbol: doc.text("symbol"),
            direction: doc.text("direction"),
            offset: doc.text("offset"),
            price: doc.number("price"),
            volume: doc.integer("volume"),
            trade_time: doc.first_present(&["timestamp", "trade_time"]),
            order_ref: doc.text("order_ref"),
            trade_id: doc.text("trade_id"),
        }
    }
}
