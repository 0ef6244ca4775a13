//! Login flow: credential check followed by token pair issuance.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::token::Token;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::invalid_token::InvalidTokenRepository;
use crate::repositories::user::UserRepository;
use crate::services::token::TokenService;

use super::password::PasswordVerifier;

/// Authenticates a user by email and password and issues a token pair
pub struct LoginService<U, I, P>
where
    U: UserRepository,
    I: InvalidTokenRepository,
    P: PasswordVerifier,
{
    user_repository: Arc<U>,
    token_service: Arc<TokenService<I>>,
    password_verifier: Arc<P>,
}

impl<U, I, P> LoginService<U, I, P>
where
    U: UserRepository,
    I: InvalidTokenRepository,
    P: PasswordVerifier,
{
    /// Creates a new login service
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<I>>,
        password_verifier: Arc<P>,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            password_verifier,
        }
    }

    /// Verifies the credentials and issues a fresh token pair
    ///
    /// # Returns
    ///
    /// * `Ok(Token)` - Credentials valid; a new pair was issued
    /// * `Err(UserNotFound)` - No user with the given email
    /// * `Err(PasswordNotValid)` - The password does not match
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<Token> {
        info!(email = %email, "login attempt");

        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.password_verifier.verify(password, &user.password_hash)? {
            warn!(email = %email, "login failed: password mismatch");
            return Err(AuthError::PasswordNotValid.into());
        }

        info!(user_id = %user.id, "login successful");
        self.token_service.issue_pair(&user.to_claims())
    }
}
