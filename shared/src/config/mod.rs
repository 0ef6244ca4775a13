//! Configuration modules for the TokenGate server

pub mod auth;
pub mod database;
pub mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;
