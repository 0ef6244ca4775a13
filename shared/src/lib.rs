//! Shared utilities and common types for the TokenGate server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from environment variables
//! - Common response structures

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{AuthConfig, DatabaseConfig, ServerConfig};
pub use types::ErrorResponse;
