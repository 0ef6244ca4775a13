//! Error taxonomy for token and authentication operations.
//!
//! Every variant is terminal for the presented credential; none of them is
//! eligible for caller-side retry. Retryable failures travel as
//! `DomainError::Infrastructure` instead.

use tg_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Token lifecycle errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// The embedded expiry is strictly before the current time
    #[error("Token has expired")]
    Expired,

    /// The wire format could not be decoded
    #[error("Invalid token format")]
    Malformed,

    /// The signature does not verify against the public key
    #[error("Token signature verification failed")]
    InvalidSignature,

    /// The token id is present in the revocation ledger
    #[error("Token has already been invalidated")]
    AlreadyInvalidated,

    /// Signing failed while minting a token
    #[error("Token generation failed")]
    GenerationFailed,

    /// The signing key pair could not be loaded at startup
    #[error("Failed to load signing keys: {message}")]
    KeyLoad { message: String },

    /// A claim the operation relies on is absent or unusable
    #[error("Missing required claim: {claim}")]
    MissingClaim { claim: String },
}

/// Authentication flow errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("User status not valid: {status}")]
    UserStatusNotValid { status: String },

    #[error("Password not valid")]
    PasswordNotValid,
}

impl TokenError {
    /// Stable error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::Malformed => "TOKEN_MALFORMED",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::AlreadyInvalidated => "TOKEN_ALREADY_INVALIDATED",
            TokenError::GenerationFailed => "TOKEN_GENERATION_FAILED",
            TokenError::KeyLoad { .. } => "KEY_LOAD_FAILED",
            TokenError::MissingClaim { .. } => "MISSING_CLAIM",
        }
    }
}

impl AuthError {
    /// Stable error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::UserStatusNotValid { .. } => "USER_STATUS_NOT_VALID",
            AuthError::PasswordNotValid => "PASSWORD_NOT_VALID",
        }
    }
}

impl From<&TokenError> for ErrorResponse {
    fn from(err: &TokenError) -> Self {
        ErrorResponse::new(err.error_code(), err)
    }
}

impl From<&AuthError> for ErrorResponse {
    fn from(err: &AuthError) -> Self {
        ErrorResponse::new(err.error_code(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_codes() {
        assert_eq!(TokenError::Expired.error_code(), "TOKEN_EXPIRED");
        assert_eq!(
            TokenError::AlreadyInvalidated.error_code(),
            "TOKEN_ALREADY_INVALIDATED"
        );
    }

    #[test]
    fn test_error_response_conversion() {
        let response: ErrorResponse = (&TokenError::Expired).into();

        assert_eq!(response.error, "TOKEN_EXPIRED");
        assert_eq!(response.message, "Token has expired");
    }

    #[test]
    fn test_auth_error_message_carries_status() {
        let err = AuthError::UserStatusNotValid {
            status: "SUSPENDED".to_string(),
        };

        assert!(err.to_string().contains("SUSPENDED"));
    }
}
