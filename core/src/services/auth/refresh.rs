//! Refresh flow: re-derives claims from the current user record.

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::token::Token;
use crate::errors::{AuthError, DomainResult, TokenError};
use crate::repositories::invalid_token::InvalidTokenRepository;
use crate::repositories::user::UserRepository;
use crate::services::token::TokenService;

/// Exchanges a valid refresh token for a new access token
///
/// The user id is the only value trusted from the refresh token itself; the
/// claims of the new access token come from the user record as it is NOW, so
/// role or status changes since login take effect on the next refresh.
pub struct RefreshService<U, I>
where
    U: UserRepository,
    I: InvalidTokenRepository,
{
    user_repository: Arc<U>,
    token_service: Arc<TokenService<I>>,
}

impl<U, I> RefreshService<U, I>
where
    U: UserRepository,
    I: InvalidTokenRepository,
{
    /// Creates a new refresh service
    pub fn new(user_repository: Arc<U>, token_service: Arc<TokenService<I>>) -> Self {
        Self {
            user_repository,
            token_service,
        }
    }

    /// Verifies the refresh token and mints a new access token
    ///
    /// # Returns
    ///
    /// * `Ok(Token)` - New access token paired with the SAME refresh token
    /// * `Err(Expired | InvalidSignature | Malformed)` - The refresh token
    ///   failed verification
    /// * `Err(AlreadyInvalidated)` - The refresh token was revoked by logout
    /// * `Err(UserNotFound)` - The user record no longer exists
    /// * `Err(UserStatusNotValid)` - The account is no longer active
    pub async fn refresh_token(&self, refresh_token: &str) -> DomainResult<Token> {
        debug!("token refresh request received");

        let claims = self.token_service.verify(refresh_token)?;
        debug!(refresh_token_id = %claims.jti, "refresh token verified");

        let user_id = Uuid::parse_str(claims.user_id()).map_err(|_| TokenError::MissingClaim {
            claim: "userId".to_string(),
        })?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "user not found for refresh token");
                AuthError::UserNotFound
            })?;

        if !user.is_active() {
            warn!(user_id = %user.id, status = %user.user_status, "user status not valid");
            return Err(AuthError::UserStatusNotValid {
                status: user.user_status.to_string(),
            }
            .into());
        }

        info!(user_id = %user.id, "generating new access token");
        self.token_service
            .refresh(refresh_token, &user.to_claims())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::User;
    use crate::errors::DomainError;
    use crate::repositories::invalid_token::MockInvalidTokenRepository;
    use crate::repositories::user::MockUserRepository;
    use crate::test_support::{suspended_user, test_token_service, test_user};

    struct Fixture {
        users: MockUserRepository,
        token_service: Arc<TokenService<MockInvalidTokenRepository>>,
        service: RefreshService<MockUserRepository, MockInvalidTokenRepository>,
    }

    fn fixture() -> Fixture {
        let users = MockUserRepository::new();
        let token_service = Arc::new(test_token_service());
        let service = RefreshService::new(Arc::new(users.clone()), token_service.clone());

        Fixture {
            users,
            token_service,
            service,
        }
    }

    async fn issued_pair_for(fx: &Fixture, user: &User) -> Token {
        fx.users.save(user.clone()).await;
        fx.token_service.issue_pair(&user.to_claims()).unwrap()
    }

    #[tokio::test]
    async fn test_refresh_returns_new_access_and_same_refresh() {
        let fx = fixture();
        let user = test_user();
        let pair = issued_pair_for(&fx, &user).await;

        let refreshed = fx.service.refresh_token(&pair.refresh_token).await.unwrap();

        assert_ne!(refreshed.access_token, pair.access_token);
        assert_eq!(refreshed.refresh_token, pair.refresh_token);
    }

    #[tokio::test]
    async fn test_refresh_claims_come_from_current_user_record() {
        let fx = fixture();
        let mut user = test_user();
        let pair = issued_pair_for(&fx, &user).await;

        // the user record changed after login
        user.first_name = "Janet".to_string();
        fx.users.save(user.clone()).await;

        let refreshed = fx.service.refresh_token(&pair.refresh_token).await.unwrap();
        let claims = fx.token_service.verify(&refreshed.access_token).unwrap();

        assert_eq!(claims.user.first_name.as_deref(), Some("Janet"));
    }

    #[tokio::test]
    async fn test_refresh_for_suspended_user_fails() {
        let fx = fixture();
        let mut user = test_user();
        let pair = issued_pair_for(&fx, &user).await;

        user.user_status = suspended_user().user_status;
        fx.users.save(user).await;

        match fx.service.refresh_token(&pair.refresh_token).await {
            Err(DomainError::Auth(AuthError::UserStatusNotValid { status })) => {
                assert_eq!(status, "SUSPENDED");
            }
            other => panic!("expected UserStatusNotValid, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_refresh_for_deleted_user_fails() {
        let fx = fixture();
        let user = test_user();
        // issue a pair without saving the user
        let pair = fx.token_service.issue_pair(&user.to_claims()).unwrap();

        match fx.service.refresh_token(&pair.refresh_token).await {
            Err(DomainError::Auth(AuthError::UserNotFound)) => {}
            other => panic!("expected UserNotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_refresh_with_revoked_token_fails() {
        let fx = fixture();
        let user = test_user();
        let pair = issued_pair_for(&fx, &user).await;

        let refresh_id = fx.token_service.token_id(&pair.refresh_token).unwrap();
        fx.token_service.invalidate(&[refresh_id]).await.unwrap();

        match fx.service.refresh_token(&pair.refresh_token).await {
            Err(DomainError::Token(TokenError::AlreadyInvalidated)) => {}
            other => panic!("expected AlreadyInvalidated, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_refresh_with_malformed_token_fails() {
        let fx = fixture();

        match fx.service.refresh_token("garbage").await {
            Err(DomainError::Token(TokenError::Malformed)) => {}
            other => panic!("expected Malformed, got {:?}", other.map(|_| ())),
        }
    }
}
