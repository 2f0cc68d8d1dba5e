use std::path::PathBuf;
use thiserror::Error;

/// 설정 로딩 에러
/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 설정 파일 읽기 실패
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 설정 파일 JSON 파싱 실패
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 잘못된 설정 값
    /// Invalid value for a configuration key
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
