//! Authentication route handlers
//!
//! - login: credential exchange for a fresh token pair
//! - refresh: access token renewal against a valid refresh token
//! - logout: invalidation of a token pair

pub mod login;
pub mod logout;
pub mod refresh;

pub use login::login;
pub use logout::logout;
pub use refresh::refresh_token;

use std::sync::Arc;

use tg_core::repositories::{InvalidTokenRepository, UserRepository};
use tg_core::services::auth::{LoginService, LogoutService, PasswordVerifier, RefreshService};

/// Shared application state injected into the auth handlers
pub struct AppState<U, I, P>
where
    U: UserRepository,
    I: InvalidTokenRepository,
    P: PasswordVerifier,
{
    pub login_service: Arc<LoginService<U, I, P>>,
    pub refresh_service: Arc<RefreshService<U, I>>,
    pub logout_service: Arc<LogoutService<I>>,
}

impl<U, I, P> Clone for AppState<U, I, P>
where
    U: UserRepository,
    I: InvalidTokenRepository,
    P: PasswordVerifier,
{
    fn clone(&self) -> Self {
        Self {
            login_service: self.login_service.clone(),
            refresh_service: self.refresh_service.clone(),
            logout_service: self.logout_service.clone(),
        }
    }
}
