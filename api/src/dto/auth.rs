use serde::{Deserialize, Serialize};
use validator::Validate;

use tg_core::domain::entities::token::Token;

/// Body of POST /api/v1/auth/login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Body of POST /api/v1/auth/refresh
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Body of POST /api/v1/auth/logout
///
/// Logout invalidates a specific token pair, so both tokens travel in the
/// request rather than being inferred from the bearer header.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogoutRequest {
    #[validate(length(min = 1))]
    pub access_token: String,
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Token pair returned by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub access_token_expires_at: i64,
    pub refresh_token: String,
}

impl From<Token> for TokenResponse {
    fn from(token: Token) -> Self {
        Self {
            access_token: token.access_token,
            access_token_expires_at: token.access_token_expires_at,
            refresh_token: token.refresh_token,
        }
    }
}

/// Confirmation body returned by logout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}
