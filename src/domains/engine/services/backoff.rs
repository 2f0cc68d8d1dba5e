use std::time::Duration;

/// 재연결 대기 정책
/// Reconnect delay policy
///
/// 실패할 때마다 대기 시간을 두 배로 늘리고 `max`에서 멈춥니다.
/// `initial == max`이면 고정 대기 (기본 5초).
/// 연결에 성공하면 `reset`으로 처음 값으로 돌아갑니다.
#[derive(Debug, Clone)]
pub struct ReconnectBackoff {
    initial: Duration,
    max: Duration,
    current: Duration,
}

impl ReconnectBackoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        let max = max.max(initial);
        Self {
            initial,
            max,
            current: initial,
        }
    }

    /// 이번 대기 시간을 반환하고 다음 값을 준비
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = self.current.saturating_mul(2).min(self.max);
        delay
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}
