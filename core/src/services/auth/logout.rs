//! Logout flow: verified, atomic invalidation of a token pair.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::invalid_token::InvalidTokenRepository;
use crate::services::token::TokenService;

/// Invalidates an access/refresh token pair as a logout operation
///
/// Both tokens must verify and neither may already be invalidated; a second
/// logout of the same pair fails with `AlreadyInvalidated` rather than
/// silently succeeding. Partial logout is never possible: the two ids enter
/// the ledger in one atomic call or not at all.
pub struct LogoutService<I: InvalidTokenRepository> {
    token_service: Arc<TokenService<I>>,
}

impl<I: InvalidTokenRepository> LogoutService<I> {
    /// Creates a new logout service
    pub fn new(token_service: Arc<TokenService<I>>) -> Self {
        Self { token_service }
    }

    /// Verifies and invalidates the token pair
    ///
    /// The access token's revocation status is checked before the refresh
    /// token's. The final ledger insert reports how many ids it newly
    /// recorded; anything short of both means a concurrent logout won the
    /// race, and this call fails the same way a late sequential one would.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Both ids are now in the ledger, recorded by this call
    /// * `Err(Expired | InvalidSignature | Malformed)` - A token failed
    ///   verification; nothing was invalidated
    /// * `Err(AlreadyInvalidated)` - The pair (or part of it) was already
    ///   logged out
    pub async fn logout(&self, access_token: &str, refresh_token: &str) -> DomainResult<()> {
        info!("logout request received");

        let access_claims = self.token_service.verify(access_token)?;
        let refresh_claims = self.token_service.verify(refresh_token)?;
        debug!(
            access_token_id = %access_claims.jti,
            refresh_token_id = %refresh_claims.jti,
            "logout tokens verified"
        );

        // access token status is checked first, then the refresh token
        self.token_service
            .check_invalidated(&access_claims.jti)
            .await?;
        self.token_service
            .check_invalidated(&refresh_claims.jti)
            .await?;

        let token_ids = [access_claims.jti, refresh_claims.jti];
        let recorded = self.token_service.invalidate(&token_ids).await?;

        if recorded < token_ids.len() as u64 {
            warn!("concurrent logout already invalidated this pair");
            return Err(DomainError::Token(TokenError::AlreadyInvalidated));
        }

        info!(
            access_token_id = %token_ids[0],
            refresh_token_id = %token_ids[1],
            "tokens invalidated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::invalid_token::{InvalidTokenRepository, MockInvalidTokenRepository};
    use crate::test_support::{test_claims, test_codec, test_token_service};

    fn logout_fixture() -> (
        Arc<TokenService<MockInvalidTokenRepository>>,
        LogoutService<MockInvalidTokenRepository>,
    ) {
        let token_service = Arc::new(test_token_service());
        let logout = LogoutService::new(token_service.clone());
        (token_service, logout)
    }

    #[tokio::test]
    async fn test_logout_invalidates_both_ids() {
        let (token_service, logout) = logout_fixture();
        let pair = token_service.issue_pair(&test_claims()).unwrap();

        logout
            .logout(&pair.access_token, &pair.refresh_token)
            .await
            .unwrap();

        let access_id = token_service.token_id(&pair.access_token).unwrap();
        let refresh_id = token_service.token_id(&pair.refresh_token).unwrap();
        assert!(token_service.check_invalidated(&access_id).await.is_err());
        assert!(token_service.check_invalidated(&refresh_id).await.is_err());
    }

    #[tokio::test]
    async fn test_second_logout_fails_with_already_invalidated() {
        let (token_service, logout) = logout_fixture();
        let pair = token_service.issue_pair(&test_claims()).unwrap();

        logout
            .logout(&pair.access_token, &pair.refresh_token)
            .await
            .unwrap();

        match logout.logout(&pair.access_token, &pair.refresh_token).await {
            Err(DomainError::Token(TokenError::AlreadyInvalidated)) => {}
            other => panic!("expected AlreadyInvalidated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_logout_with_malformed_access_token_invalidates_nothing() {
        let (token_service, logout) = logout_fixture();
        let pair = token_service.issue_pair(&test_claims()).unwrap();

        match logout.logout("garbage", &pair.refresh_token).await {
            Err(DomainError::Token(TokenError::Malformed)) => {}
            other => panic!("expected Malformed, got {:?}", other),
        }

        // the valid refresh token must remain usable
        let refresh_id = token_service.token_id(&pair.refresh_token).unwrap();
        assert!(token_service.check_invalidated(&refresh_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_aborts_before_refresh_when_access_already_invalidated() {
        let (token_service, logout) = logout_fixture();
        let pair = token_service.issue_pair(&test_claims()).unwrap();

        let access_id = token_service.token_id(&pair.access_token).unwrap();
        token_service.invalidate(&[access_id]).await.unwrap();

        match logout.logout(&pair.access_token, &pair.refresh_token).await {
            Err(DomainError::Token(TokenError::AlreadyInvalidated)) => {}
            other => panic!("expected AlreadyInvalidated, got {:?}", other),
        }

        // the refresh token was never touched
        let refresh_id = token_service.token_id(&pair.refresh_token).unwrap();
        assert!(token_service.check_invalidated(&refresh_id).await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_logout_has_exactly_one_winner() {
        let keys_codec = test_codec();
        let ledger = MockInvalidTokenRepository::new();
        let token_service = Arc::new(TokenService::new(keys_codec, ledger.clone()));
        let pair = token_service.issue_pair(&test_claims()).unwrap();

        let first = {
            let logout = LogoutService::new(token_service.clone());
            let (access, refresh) = (pair.access_token.clone(), pair.refresh_token.clone());
            tokio::spawn(async move { logout.logout(&access, &refresh).await })
        };
        let second = {
            let logout = LogoutService::new(token_service.clone());
            let (access, refresh) = (pair.access_token.clone(), pair.refresh_token.clone());
            tokio::spawn(async move { logout.logout(&access, &refresh).await })
        };

        let results = [first.await.unwrap(), second.await.unwrap()];

        let successes = results.iter().filter(|r| r.is_ok()).count();
        let already_invalidated = results
            .iter()
            .filter(|r| {
                matches!(
                    r,
                    Err(DomainError::Token(TokenError::AlreadyInvalidated))
                )
            })
            .count();

        assert_eq!(successes, 1);
        assert_eq!(already_invalidated, 1);

        // the ledger holds both ids exactly once
        assert_eq!(ledger.len().await, 2);
        let access_id = token_service.token_id(&pair.access_token).unwrap();
        let refresh_id = token_service.token_id(&pair.refresh_token).unwrap();
        assert!(ledger.is_invalidated(&access_id).await.unwrap());
        assert!(ledger.is_invalidated(&refresh_id).await.unwrap());
    }
}
