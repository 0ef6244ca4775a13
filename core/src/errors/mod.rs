//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors
///
/// Every fallible operation in the core returns one of these. Infrastructure
/// failures (storage unreachable) are a separate variant from the token
/// taxonomy: a failed revocation lookup is neither "revoked" nor "valid" and
/// must stay retryable for the caller.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("infrastructure error: {message}")]
    Infrastructure { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for storage-layer failures
    pub fn infrastructure(message: impl Into<String>) -> Self {
        DomainError::Infrastructure {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
