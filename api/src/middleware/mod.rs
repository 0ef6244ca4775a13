//! HTTP middleware for the API layer.

pub mod auth;
pub mod cors;

pub use auth::{AuthContext, BearerAuth, BearerTokenVerifier, OptionalAuth};
pub use cors::create_cors;
