use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{LogoutRequest, LogoutResponse};
use crate::handlers::error::handle_domain_error;

use tg_core::repositories::{InvalidTokenRepository, UserRepository};
use tg_core::services::auth::PasswordVerifier;
use tg_shared::types::response::ErrorResponse;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Invalidates the given token pair. Calling it again with the same pair
/// fails: logout is idempotent-with-error, never silently repeated.
///
/// # Errors
/// - 400 Bad Request: the pair was already invalidated
/// - 401 Unauthorized: a token failed signature or expiry verification
pub async fn logout<U, I, P>(
    state: web::Data<AppState<U, I, P>>,
    request: web::Json<LogoutRequest>,
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
        .logout_service
        .logout(&request.access_token, &request.refresh_token)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}
