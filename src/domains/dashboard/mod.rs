// Dashboard domain module
// 대시보드 조회 + 주문 전송 API
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::*;
