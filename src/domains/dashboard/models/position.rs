use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::shared::utils::{Document, DocumentExt};

/// 포지션 조회 응답
/// Position view
///
/// 총 수량은 엔진이 `long_total` / `short_total`을 보냈으면 그 값을,
/// 아니면 당일(td) + 전일(yd) 합계를 사용합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PositionView {
    pub account_id: String,
    #[schema(example = "rb2410")]
    pub symbol: String,
    pub symbol_id: i64,
    pub long_td: i64,
    pub long_yd: i64,
    pub long_total: i64,
    pub long_price: f64,
    pub long_pnl: f64,
    pub short_td: i64,
    pub short_yd: i64,
    pub short_total: i64,
    pub short_price: f64,
    pub short_pnl: f64,
    pub pnl: f64,
}

fn total_or_sum(doc: &Document, total_key: &str, td: i64, yd: i64) -> i64 {
    match doc.get(total_key) {
        None | Some(Value::Null) => td.saturating_add(yd),
        Some(_) => doc.integer(total_key),
    }
}

impl From<&Document> for PositionView {
    fn from(doc: &Document) -> Self {
        let long_td = doc.integer("long_td");
        let long_yd = doc.integer("long_yd");
        let short_td = doc.integer("short_td");
        let short_yd = doc.integer("short_yd");

        let symbol = match doc.text("symbol") {
            s if s.is_empty() => "Unknown".to_string(),
            s => s,
        };

        Self {
            account_id: doc.text("account_id"),
            symbol,
            symbol_id: doc.integer("symbol_id"),
            long_td,
            long_yd,
            long_total: total_or_sum(doc, "long_total", long_td, long_yd),
            long_price: doc.number("long_price"),
            long_pnl: doc.number("long_pnl"),
            short_td,
            short_yd,
            short_total: total_or_sum(doc, "short_total", short_td, short_yd),
            short_price: doc.number("short_price"),
            short_pnl: doc.number("short_pnl"),
            pnl: doc.number("pnl"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_totals_default_to_td_plus_yd() {
        let view = PositionView::from(&doc(json!({
            "account_id": "acc1",
            "symbol": "rb2410",
            "long_td": 2,
            "long_yd": 3,
            "short_td": 1,
            "short_total": 7
        })));

        assert_eq!(view.long_total, 5);
        // 엔진이 보낸 total이 우선
        assert_eq!(view.short_total, 7);
        assert_eq!(view.short_yd, 0);
    }

    #[test]
    fn test_null_total_falls_back_to_sum() {
        let view = PositionView::from(&doc(json!({"long_td": 1, "long_yd": 1, "long_total": null})));
        assert_eq!(view.long_total, 2);
        assert_eq!(view.symbol, "Unknown");
    }

    /// 테스트: td + yd 합계는 오버플로 없이 포화
    #[test]
    fn test_sum_saturates_on_overflow() {
        let view = PositionView::from(&doc(json!({
            "long_td": i64::MAX,
            "long_yd": 1,
            "short_td": i64::MIN,
            "short_yd": -1
        })));
        assert_eq!(view.long_total, i64::MAX);
        assert_eq!(view.short_total, i64::MIN);
    }
}
