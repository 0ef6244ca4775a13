use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{RefreshTokenRequest, TokenResponse};
use crate::handlers::error::handle_domain_error;

use tg_core::repositories::{InvalidTokenRepository, UserRepository};
use tg_core::services::auth::PasswordVerifier;
use tg_shared::types::response::ErrorResponse;

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Mints a new access token against a still-valid refresh token. The
/// response carries the SAME refresh token back; refresh tokens are only
/// re-verified on use, not rotated.
///
/// # Errors
/// - 400 Bad Request: refresh token already invalidated, or user not active
/// - 401 Unauthorized: expired, malformed or tampered refresh token
/// - 404 Not Found: the user record no longer exists
pub async fn refresh_token<U, I, P>(
    state: web::Data<AppState<U, I, P>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    I: InvalidTokenRepository + 'static,
    P: PasswordVerifier + 'static,
{
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::new("VALIDATION_ERROR", errors));
    }

    match state
        .refresh_service
        .refresh_token(&request.refresh_token)
        .await
    {
        Ok(token) => HttpResponse::Ok().json(TokenResponse::from(token)),
        Err(error) => handle_domain_error(&error),
    }
}
