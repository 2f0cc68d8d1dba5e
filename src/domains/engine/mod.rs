// Engine domain module
// 엔진 연결 (수신 이벤트 반영 + 주문/취소 전송)
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::*;
