// Shared utilities
// 공통 유틸리티

pub mod document;

pub use document::*;
