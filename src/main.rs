use axum::http::{HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use dashboard_server::domains::dashboard::handlers::{
    AccountQuery, CancelOrderQuery, EquityHistoryQuery, ListQuery,
};
use dashboard_server::domains::dashboard::models::*;
use dashboard_server::domains::engine::models::{EngineStatusResponse, EquitySnapshot};
use dashboard_server::routes::create_router;
use dashboard_server::shared::config::{AppConfig, CorsOrigins};
use dashboard_server::shared::database::connect_store;
use dashboard_server::shared::logging::init_logging;
use dashboard_server::shared::services::AppState;

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        dashboard_server::domains::dashboard::handlers::account_handler::get_account,
        dashboard_server::domains::dashboard::handlers::account_handler::get_account_list,
        dashboard_server::domains::dashboard::handlers::account_handler::get_account_status,
        dashboard_server::domains::dashboard::handlers::equity_handler::get_equity_history,
        dashboard_server::domains::dashboard::handlers::equity_handler::get_latest_equity,
        dashboard_server::domains::dashboard::handlers::order_handler::get_orders,
        dashboard_server::domains::dashboard::handlers::order_handler::place_order,
        dashboard_server::domains::dashboard::handlers::order_handler::cancel_order,
        dashboard_server::domains::dashboard::handlers::trade_handler::get_trades,
        dashboard_server::domains::dashboard::handlers::position_handler::get_positions,
        dashboard_server::domains::engine::handlers::engine_handler::get_engine_status
    ),
    components(schemas(
        AccountView,
        ConnectionStatusView,
        OrderView,
        TradeView,
        PositionView,
        CommandAccepted,
        EquitySnapshot,
        EngineStatusResponse,
        AccountQuery,
        ListQuery,
        EquityHistoryQuery,
        CancelOrderQuery
    )),
    tags(
        (name = "Account", description = "Account summary and connection status"),
        (name = "Equity", description = "Equity curve"),
        (name = "Orders", description = "Orders, order entry and cancellation"),
        (name = "Trades", description = "Trade fills"),
        (name = "Positions", description = "Positions"),
        (name = "Engine", description = "Engine connection")
    ),
    info(
        title = "HFT-UI Backend API",
        description = "Dashboard API over a live trading engine connection",
        version = "1.0.0"
    )
)]
struct ApiDoc;

/// CORS 설정
///
/// "*"이면 모든 Origin 허용 (credentials 없음),
/// 목록이면 해당 Origin만 허용 (credentials 허용)
fn build_cors(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsOrigins::List(list) => {
            let origins: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(%origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    // 설정 로드 (.env → 환경 변수 → config.json)
    let config = AppConfig::load().expect("Failed to load configuration");

    init_logging().expect("Failed to initialize logging");

    // 저장소 연결 (Postgres는 마이그레이션까지)
    let store = connect_store(&config)
        .await
        .expect("Failed to initialize store");

    // AppState 생성 (모든 Service 초기화)
    let app_state = AppState::new(store, config.engine_client_config());

    // 엔진 연결 감독자 시작 (백그라운드)
    let supervisor = app_state
        .engine_client
        .start()
        .expect("Failed to start engine client");

    let cors = build_cors(&config.cors_origins);

    // Router 생성
    let app = Router::new()
        .merge(create_router())
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi())
        )
        .layer(cors)
        .with_state(app_state);

    let listener = TcpListener::bind(config.server_addr)
        .await
        .expect("Failed to bind server address");

    tracing::info!(
        project = %config.project_name,
        addr = %config.server_addr,
        engine = %config.engine_ws_url,
        "Server running"
    );
    tracing::info!("Swagger UI available at http://{}/swagger-ui", config.server_addr);

    // 서버 실행 (Ctrl-C까지)
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
    }

    supervisor.abort();
    tracing::info!("Engine client stopped");
}
