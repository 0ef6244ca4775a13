//! # TokenGate Infrastructure
//!
//! Concrete implementations of the core repository and verifier traits:
//! MySQL persistence for users and the revocation ledger, and bcrypt
//! password verification.

pub mod database;
pub mod security;

pub use database::connection::create_pool;
pub use database::mysql::{MySqlInvalidTokenRepository, MySqlUserRepository};
pub use security::BcryptPasswordVerifier;
