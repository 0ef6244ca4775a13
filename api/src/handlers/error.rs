//! Mapping from domain errors to HTTP responses.

use actix_web::HttpResponse;

use tg_core::errors::{AuthError, DomainError, TokenError};
use tg_shared::types::response::ErrorResponse;

/// Convert a domain error into the appropriate HTTP rejection
///
/// Every taxonomy error maps to a client-facing status; infrastructure
/// failures are the only 5xx class and never leak backend details.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Token(token_error) => handle_token_error(token_error),
        DomainError::Auth(auth_error) => handle_auth_error(auth_error),
        DomainError::Infrastructure { message } => {
            tracing::error!(message = %message, "infrastructure error");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "INTERNAL_ERROR",
                "An internal error occurred",
            ))
        }
    }
}

fn handle_token_error(error: &TokenError) -> HttpResponse {
    let body = ErrorResponse::from(error);

    match error {
        TokenError::Expired
        | TokenError::Malformed
        | TokenError::InvalidSignature
        | TokenError::MissingClaim { .. } => HttpResponse::Unauthorized().json(body),
        TokenError::AlreadyInvalidated => HttpResponse::BadRequest().json(body),
        TokenError::GenerationFailed | TokenError::KeyLoad { .. } => {
            tracing::error!(error = %error, "token subsystem failure");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn handle_auth_error(error: &AuthError) -> HttpResponse {
    let body = ErrorResponse::from(error);

    match error {
        AuthError::UserNotFound => HttpResponse::NotFound().json(body),
        AuthError::UserStatusNotValid { .. } | AuthError::PasswordNotValid => {
            HttpResponse::BadRequest().json(body)
        }
    }
}
