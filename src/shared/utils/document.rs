use serde_json::{Map, Value};

// =====================================================
// Document 헬퍼
// =====================================================
// 역할: 엔진이 보내는 스키마 없는 JSON 객체를 다루는 공통 함수
//
// 엔진 페이로드는 필드가 빠지거나 타입이 섞여서 올 수 있으므로
// (예: client_id가 숫자 또는 문자열), 모든 조회는 기본값으로 떨어집니다.
// =====================================================

/// 엔진 JSON 문서
/// Schemaless JSON document as sent by the engine
pub type Document = Map<String, Value>;

/// account_id가 없을 때 사용하는 기본 계정
/// Account key used when an event omits `account_id`
pub const DEFAULT_ACCOUNT_ID: &str = "default";

/// Document 필드 조회 확장
/// Field accessors with sane defaults
pub trait DocumentExt {
    /// 필드를 문자열로 (없으면 "")
    fn text(&self, key: &str) -> String;

    /// 키로 쓸 수 있는 값 (비어있지 않은 문자열 또는 숫자)
    /// Value usable as a store key: non-empty string or number
    fn key_text(&self, key: &str) -> Option<String>;

    /// 숫자 필드 (없거나 숫자가 아니면 0.0)
    fn number(&self, key: &str) -> f64;

    /// 정수 필드 (실수는 버림, 없으면 0)
    fn integer(&self, key: &str) -> i64;

    /// 여러 후보 키 중 0이 아닌 첫 숫자
    fn first_nonzero_number(&self, keys: &[&str]) -> f64;

    /// 여러 후보 키 중 0이 아닌 첫 정수
    fn first_nonzero_integer(&self, keys: &[&str]) -> i64;

    /// 여러 후보 키 중 비어있지 않은 첫 문자열
    fn first_non_empty_text(&self, keys: &[&str]) -> String;

    /// 여러 후보 키 중 "값이 있는" 첫 원본 값 (없으면 "")
    /// First truthy raw value among `keys`, or `""`
    fn first_present(&self, keys: &[&str]) -> Value;

    /// account_id 해석 (없거나 비어있으면 "default")
    /// Resolve the account key, defaulting to [`DEFAULT_ACCOUNT_ID`]
    fn account_id(&self) -> String;
}

impl DocumentExt for Document {
    fn text(&self, key: &str) -> String {
        match self.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    fn key_text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn number(&self, key: &str) -> f64 {
        self.get(key).map(value_as_f64).unwrap_or(0.0)
    }

    fn integer(&self, key: &str) -> i64 {
        self.get(key).map(value_as_i64).unwrap_or(0)
    }

    fn first_nonzero_number(&self, keys: &[&str]) -> f64 {
        keys.iter()
            .map(|key| self.number(key))
            .find(|n| *n != 0.0)
            .unwrap_or(0.0)
    }

    fn first_nonzero_integer(&self, keys: &[&str]) -> i64 {
        keys.iter()
            .map(|key| self.integer(key))
            .find(|n| *n != 0)
            .unwrap_or(0)
    }

    fn first_non_empty_text(&self, keys: &[&str]) -> String {
        keys.iter()
            .map(|key| self.text(key))
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    }

    fn first_present(&self, keys: &[&str]) -> Value {
        keys.iter()
            .filter_map(|key| self.get(*key))
            .find(|value| is_truthy(value))
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()))
    }

    fn account_id(&self) -> String {
        self.key_text("account_id")
            .unwrap_or_else(|| DEFAULT_ACCOUNT_ID.to_string())
    }
}

fn value_as_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn value_as_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    #[test]
    fn test_account_id_defaults() {
        assert_eq!(doc(json!({})).account_id(), "default");
        assert_eq!(doc(json!({"account_id": null})).account_id(), "default");
        assert_eq!(doc(json!({"account_id": ""})).account_id(), "default");
        assert_eq!(doc(json!({"account_id": "acc1"})).account_id(), "acc1");
        assert_eq!(doc(json!({"account_id": 8001})).account_id(), "8001");
    }

    #[test]
    fn test_numeric_fields() {
        let d = doc(json!({"balance": 1200.5, "volume": "7", "long_td": 3.9, "bad": [1]}));
        assert_eq!(d.number("balance"), 1200.5);
        assert_eq!(d.number("missing"), 0.0);
        assert_eq!(d.integer("volume"), 7);
        assert_eq!(d.integer("long_td"), 3);
        assert_eq!(d.integer("bad"), 0);
    }

    /// 테스트: 필드 이름 호환 (limit_price → price)
    #[test]
    fn test_fallback_chains() {
        let d = doc(json!({"limit_price": 0, "price": 3550.0, "msg": "", "status_msg": "queued"}));
        assert_eq!(d.first_nonzero_number(&["limit_price", "price"]), 3550.0);
        assert_eq!(d.first_non_empty_text(&["msg", "status_msg"]), "queued");
        assert_eq!(d.first_present(&["timestamp", "insert_time"]), json!(""));
    }

    #[test]
    fn test_text_renders_numbers() {
        let d = doc(json!({"client_id": 123456789012345678i64, "status": 3}));
        assert_eq!(d.text("client_id"), "123456789012345678");
        assert_eq!(d.text("status"), "3");
        assert_eq!(d.text("missing"), "");
    }
}
