use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{LoginRequest, TokenResponse};
use crate::handlers::error::handle_domain_error;

use tg_core::repositories::{InvalidTokenRepository, UserRepository};
use tg_core::services::auth::PasswordVerifier;
use tg_shared::types::response::ErrorResponse;

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Exchanges email and password for a fresh token pair.
///
/// # Errors
/// - 400 Bad Request: invalid request body or wrong password
/// - 404 Not Found: no user with the given email
pub async fn login<U, I, P>(
    state: web::Data<AppState<U, I, P>>,
    request: web::Json<LoginRequest>,
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
        .login_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(token) => HttpResponse::Ok().json(TokenResponse::from(token)),
        Err(error) => handle_domain_error(&error),
    }
}
