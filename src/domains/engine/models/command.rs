use serde::Serialize;

use crate::shared::errors::CommandError;
use crate::shared::utils::Document;

/// 엔진으로 보내는 명령
/// Outbound engine command, tagged by `action`
///
/// ```json
/// {"action": "order", "symbol": "rb2410", "price": 3550.0, ...}
/// {"action": "cancel", "client_id": 123, "account_id": "acc1", "symbol": "rb2410"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum EngineCommand {
    /// 주문: 호출자가 보낸 필드를 그대로 전달
    Order(Document),

    /// 주문 취소
    Cancel {
        /// 엔진 프로토콜상 18자리 정수
        client_id: i64,
        account_id: Option<String>,
        symbol: String,
    },
}

impl EngineCommand {
    /// 주문 명령 생성
    ///
    /// 호출자가 `action` 키를 넣어도 무시하고 항상 "order"로 보냅니다.
    pub fn order(mut fields: Document) -> Self {
        fields.remove("action");
        Self::Order(fields)
    }

    /// 취소 명령 생성 (client_id 정수 검증)
    /// Build a cancel command; `client_id` must parse as an integer
    ///
    /// `i64` 범위를 벗어난 값(`i64::MAX` 초과)도 `InvalidClientId`로 거부합니다.
    pub fn cancel(
        client_id: &str,
        symbol: &str,
        account_id: Option<&str>,
    ) -> Result<Self, CommandError> {
        let parsed = client_id
            .trim()
            .parse::<i64>()
            .map_err(|_| CommandError::InvalidClientId {
                client_id: client_id.to_string(),
            })?;

        Ok(Self::Cancel {
            client_id: parsed,
            account_id: account_id.map(String::from),
            symbol: symbol.to_string(),
        })
    }

    /// 명령 이름 (로그용)
    pub fn action(&self) -> &'static str {
        match self {
            Self::Order(_) => "order",
            Self::Cancel { .. } => "cancel",
        }
    }

    /// 텍스트 프레임으로 직렬화
    pub fn to_frame(&self) -> Result<String, CommandError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// 명령 전송 결과
/// Result of a send attempt; "not connected" is a value, not an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// 현재 연결에 한 번 기록됨
    Sent,
    /// 연결 없음 (또는 쓰기 실패), 아무것도 보내지 않음
    Unavailable,
}

impl SendOutcome {
    pub fn is_sent(self) -> bool {
        matches!(self, Self::Sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn frame_value(command: &EngineCommand) -> Value {
        serde_json::from_str(&command.to_frame().unwrap()).unwrap()
    }

    #[test]
    fn test_cancel_envelope() {
        let command = EngineCommand::cancel("123", "rb2410", Some("acc1")).unwrap();
        assert_eq!(
            frame_value(&command),
            json!({"action": "cancel", "client_id": 123, "account_id": "acc1", "symbol": "rb2410"})
        );
    }

    #[test]
    fn test_cancel_without_account_sends_null() {
        let command = EngineCommand::cancel(" 100000000000000001 ", "ag2412", None).unwrap();
        assert_eq!(
            frame_value(&command),
            json!({"action": "cancel", "client_id": 100000000000000001i64, "account_id": null, "symbol": "ag2412"})
        );
    }

    #[test]
    fn test_cancel_rejects_non_integer_client_id() {
        for bad in ["abc", "", "12.5", "1e3", "9223372036854775808"] {
            let err = EngineCommand::cancel(bad, "rb2410", None).unwrap_err();
            assert!(matches!(err, CommandError::InvalidClientId { .. }), "{bad:?} should be rejected");
        }
    }

    /// 테스트: 호출자의 action 키는 덮어쓸 수 없음
    #[test]
    fn test_order_envelope_keeps_fixed_action() {
        let fields = json!({"action": "cancel", "symbol": "rb2410", "price": 3550.0, "volume": 1});
        let Value::Object(fields) = fields else { unreachable!() };

        let command = EngineCommand::order(fields);
        assert_eq!(
            frame_value(&command),
            json!({"action": "order", "symbol": "rb2410", "price": 3550.0, "volume": 1})
        );
    }
}
