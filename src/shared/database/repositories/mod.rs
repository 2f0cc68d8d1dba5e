// All repositories module
pub mod engine;

// Re-export all repositories for convenience
pub use engine::*;
