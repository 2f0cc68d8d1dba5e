use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::domains::engine::services::EngineClientConfig;
use crate::shared::errors::ConfigError;

// =====================================================
// AppConfig - 애플리케이션 설정
// =====================================================
// 우선순위 (낮음 → 높음):
//   1. 기본값
//   2. 환경 변수 (.env 포함, dotenvy로 로드)
//   3. config.json (APP_CONFIG_FILE로 경로 변경 가능)
//
// config.json의 키는 환경 변수 이름과 동일합니다.
// 예: { "ENGINE_WS_URL": "ws://10.0.0.5:8888" }
// =====================================================

const DEFAULT_PROJECT_NAME: &str = "HFT-UI";
const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/hft_db";
const DEFAULT_ENGINE_WS_URL: &str = "ws://localhost:8888";
const DEFAULT_RECONNECT_DELAY_SECS: u64 = 5;
const DEFAULT_CONFIG_FILE: &str = "config.json";

/// 저장소 종류
/// Persisted store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL (운영)
    Postgres,
    /// 프로세스 메모리 (개발/테스트)
    Memory,
}

/// CORS 허용 Origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

/// 애플리케이션 설정
/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub project_name: String,
    pub server_addr: SocketAddr,
    pub database_url: String,
    pub store_backend: StoreBackend,
    /// 엔진 WebSocket 주소 (ws:// 또는 wss://)
    pub engine_ws_url: String,
    /// 재연결 대기 시간 (기본 5초)
    pub reconnect_delay: Duration,
    /// 재연결 대기 상한 (기본값 = reconnect_delay → 고정 대기)
    pub reconnect_max_delay: Duration,
    pub cors_origins: CorsOrigins,
}

impl AppConfig {
    /// 환경 변수 + config.json에서 설정 로드
    /// Load configuration from the environment and the optional JSON file
    pub fn load() -> Result<Self, ConfigError> {
        // .env가 없어도 정상 (운영 환경은 실제 환경 변수 사용)
        let _ = dotenvy::dotenv();

        let path = std::env::var("APP_CONFIG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        let overrides = read_overrides(&path)?;

        Self::from_sources(|key| std::env::var(key).ok(), &overrides)
    }

    /// 설정 소스에서 AppConfig 생성
    ///
    /// `env`는 환경 변수 조회 함수, `overrides`는 config.json 값 (env보다 우선)
    pub fn from_sources(
        env: impl Fn(&str) -> Option<String>,
        overrides: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let lookup = |key: &str| overrides.get(key).cloned().or_else(|| env(key));

        let project_name = lookup("PROJECT_NAME").unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());

        let server_addr_raw = lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());
        let server_addr = server_addr_raw
            .parse::<SocketAddr>()
            .map_err(|e| invalid("SERVER_ADDR", &server_addr_raw, e.to_string()))?;

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let store_backend = match lookup("STORE_BACKEND").as_deref().map(str::to_ascii_lowercase) {
            None => StoreBackend::Postgres,
            Some(ref v) if v == "postgres" || v == "postgresql" => StoreBackend::Postgres,
            Some(ref v) if v == "memory" => StoreBackend::Memory,
            Some(v) => return Err(invalid("STORE_BACKEND", &v, "expected 'postgres' or 'memory'")),
        };

        let engine_ws_url = lookup("ENGINE_WS_URL").unwrap_or_else(|| DEFAULT_ENGINE_WS_URL.to_string());
        validate_ws_url(&engine_ws_url)?;

        let reconnect_delay = match lookup("ENGINE_RECONNECT_DELAY_SECS") {
            Some(raw) => parse_secs("ENGINE_RECONNECT_DELAY_SECS", &raw)?,
            None => Duration::from_secs(DEFAULT_RECONNECT_DELAY_SECS),
        };
        let reconnect_max_delay = match lookup("ENGINE_RECONNECT_MAX_DELAY_SECS") {
            Some(raw) => parse_secs("ENGINE_RECONNECT_MAX_DELAY_SECS", &raw)?,
            None => reconnect_delay,
        };
        if reconnect_max_delay < reconnect_delay {
            return Err(invalid(
                "ENGINE_RECONNECT_MAX_DELAY_SECS",
                &reconnect_max_delay.as_secs().to_string(),
                "must not be smaller than ENGINE_RECONNECT_DELAY_SECS",
            ));
        }

        let cors_origins = match lookup("CORS_ALLOW_ORIGIN") {
            None => CorsOrigins::Any,
            Some(raw) if raw.trim() == "*" => CorsOrigins::Any,
            Some(raw) => CorsOrigins::List(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            ),
        };

        Ok(Self {
            project_name,
            server_addr,
            database_url,
            store_backend,
            engine_ws_url,
            reconnect_delay,
            reconnect_max_delay,
            cors_origins,
        })
    }

    /// 엔진 클라이언트 설정
    pub fn engine_client_config(&self) -> EngineClientConfig {
        EngineClientConfig {
            ws_url: self.engine_ws_url.clone(),
            reconnect_delay: self.reconnect_delay,
            reconnect_max_delay: self.reconnect_max_delay,
        }
    }
}

/// config.json 읽기 (파일이 없으면 빈 맵)
fn read_overrides(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let values: serde_json::Map<String, Value> =
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    values
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => Ok((key, s)),
            Value::Number(n) => Ok((key, n.to_string())),
            Value::Bool(b) => Ok((key, b.to_string())),
            other => Err(invalid(&key, &other.to_string(), "expected a string, number or boolean")),
        })
        .collect()
}

fn validate_ws_url(raw: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw).map_err(|e| invalid("ENGINE_WS_URL", raw, e.to_string()))?;
    match url.scheme() {
        "ws" | "wss" => Ok(()),
        scheme => Err(invalid("ENGINE_WS_URL", raw, format!("unsupported scheme '{}'", scheme))),
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(key, raw, e.to_string()))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(invalid(key, raw, "must be a positive number of seconds"));
    }
    Ok(Duration::from_secs_f64(secs))
}

fn invalid(key: &str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}
