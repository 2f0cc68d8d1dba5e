//! 로깅 초기화
//! Logging setup
//!
//! - `RUST_LOG`: tracing 필터 (기본값 `info`)
//! - `LOG_FORMAT`: `compact` (기본값) 또는 `pretty`

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// 전역 tracing subscriber 설치
/// Install the global tracing subscriber
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let format = std::env::var("LOG_FORMAT").unwrap_or_default();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true);

    let result = match format.as_str() {
        "pretty" => builder.pretty().try_init(),
        _ => builder.compact().try_init(),
    };

    result.map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}
