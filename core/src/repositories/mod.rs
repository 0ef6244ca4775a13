//! Repository interfaces for persistence collaborators.

pub mod invalid_token;
pub mod user;

pub use invalid_token::{InvalidTokenRepository, MockInvalidTokenRepository};
pub use user::{MockUserRepository, UserRepository};
