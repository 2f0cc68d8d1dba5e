use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::utils::{Document, DocumentExt};

// =====================================================
// EquitySnapshot 모델
// =====================================================
// account 이벤트 하나당 한 건씩 추가되는 자산 기록 (수정/삭제 없음)
// 자산 곡선(equity history) 조회의 원본 데이터
// =====================================================

/// 자산 스냅샷
/// Append-only equity record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EquitySnapshot {
    #[schema(example = "acc1")]
    pub account_id: String,

    /// 기록 시각 (서버 수신 시각)
    pub timestamp: DateTime<Utc>,

    #[schema(example = 1000000.0)]
    pub balance: f64,

    #[schema(example = 850000.0)]
    pub available: f64,

    #[schema(example = 1250.5)]
    pub pnl: f64,
}

impl EquitySnapshot {
    /// account 이벤트에서 스냅샷 생성 (숫자 필드가 없으면 0.0)
    pub fn from_account_event(account_id: &str, doc: &Document, timestamp: DateTime<Utc>) -> Self {
        Self {
            account_id: account_id.to_string(),
            timestamp,
            balance: doc.number("balance"),
            available: doc.number("available"),
            pnl: doc.number("pnl"),
        }
    }
}
