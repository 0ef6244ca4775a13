//! The token authority: the only component that mints tokens.

use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::entities::token::{Claims, Token, TokenKind, UserClaims};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::invalid_token::InvalidTokenRepository;

use super::codec::TokenCodec;

/// Issues, refreshes and verifies token pairs
///
/// Composes the codec with the revocation ledger. Verification by itself
/// never consults the ledger; revocation checking is an explicit separate
/// step so callers choose whether a given token use requires it.
pub struct TokenService<I: InvalidTokenRepository> {
    codec: TokenCodec,
    invalid_tokens: I,
}

impl<I: InvalidTokenRepository> TokenService<I> {
    /// Creates a new token authority
    pub fn new(codec: TokenCodec, invalid_tokens: I) -> Self {
        Self {
            codec,
            invalid_tokens,
        }
    }

    /// Issues an access/refresh token pair from one claims snapshot
    ///
    /// Both tokens share the issuance instant; each gets its own id. This is
    /// the entry point after a successful login.
    pub fn issue_pair(&self, claims: &UserClaims) -> DomainResult<Token> {
        let issued_at = Utc::now();

        let access = self.codec.issue_at(claims, TokenKind::Access, issued_at)?;
        let refresh = self.codec.issue_at(claims, TokenKind::Refresh, issued_at)?;

        debug!(
            access_token_id = %access.token_id,
            refresh_token_id = %refresh.token_id,
            "issued token pair"
        );

        Ok(Token::new(access.token, access.expires_at, refresh.token))
    }

    /// Mints a new access token against a still-valid refresh token
    ///
    /// The refresh token is re-verified (signature, expiry, revocation) and
    /// then REUSED: refresh tokens are not rotated on use, only re-checked.
    /// The new access token is built from the supplied claims, which callers
    /// derive from the current user record rather than the login snapshot.
    pub async fn refresh(&self, refresh_token: &str, claims: &UserClaims) -> DomainResult<Token> {
        let refresh_claims = self.verify(refresh_token)?;
        self.check_invalidated(&refresh_claims.jti).await?;

        let access = self.codec.issue(claims, TokenKind::Access)?;

        debug!(
            access_token_id = %access.token_id,
            refresh_token_id = %refresh_claims.jti,
            "minted access token against existing refresh token"
        );

        Ok(Token::new(
            access.token,
            access.expires_at,
            refresh_token.to_string(),
        ))
    }

    /// Verifies signature and expiry of a token and returns its claims
    ///
    /// Does NOT consult the revocation ledger.
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        let data = self.codec.parse(token)?;
        self.codec.check_expiry(&data.claims)?;
        Ok(data.claims)
    }

    /// Fails if the given token id is present in the revocation ledger
    ///
    /// Ledger failures propagate as infrastructure errors; an unreachable
    /// ledger is never treated as either "revoked" or "valid".
    pub async fn check_invalidated(&self, token_id: &str) -> DomainResult<()> {
        if self.invalid_tokens.is_invalidated(token_id).await? {
            warn!(token_id = %token_id, "token already invalidated");
            return Err(DomainError::Token(TokenError::AlreadyInvalidated));
        }
        Ok(())
    }

    /// Records token ids in the revocation ledger
    ///
    /// Returns the number of ids newly recorded by this call.
    pub async fn invalidate(&self, token_ids: &[String]) -> DomainResult<u64> {
        self.invalid_tokens.invalidate_tokens(token_ids).await
    }

    /// Extracts the id of a signature-verified token
    pub fn token_id(&self, token: &str) -> DomainResult<String> {
        self.codec.token_id(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_claims, test_token_service};

    #[tokio::test]
    async fn test_issue_pair_and_verify() {
        let service = test_token_service();
        let claims = test_claims();

        let token = service.issue_pair(&claims).unwrap();

        let access_claims = service.verify(&token.access_token).unwrap();
        assert_eq!(access_claims.user, claims);
        assert_eq!(access_claims.exp, token.access_token_expires_at);

        let refresh_claims = service.verify(&token.refresh_token).unwrap();
        assert_eq!(refresh_claims.user.user_id, claims.user_id);
        assert_eq!(refresh_claims.user.email, None);
    }

    #[tokio::test]
    async fn test_pair_tokens_have_distinct_ids() {
        let service = test_token_service();
        let token = service.issue_pair(&test_claims()).unwrap();

        let access_id = service.token_id(&token.access_token).unwrap();
        let refresh_id = service.token_id(&token.refresh_token).unwrap();

        assert_ne!(access_id, refresh_id);
    }

    #[tokio::test]
    async fn test_refresh_reuses_the_refresh_token() {
        let service = test_token_service();
        let claims = test_claims();

        let original = service.issue_pair(&claims).unwrap();
        let refreshed = service
            .refresh(&original.refresh_token, &claims)
            .await
            .unwrap();

        // new access token, same refresh token string
        assert_ne!(refreshed.access_token, original.access_token);
        assert_eq!(refreshed.refresh_token, original.refresh_token);
        assert_ne!(
            service.token_id(&refreshed.access_token).unwrap(),
            service.token_id(&original.access_token).unwrap()
        );
    }

    #[tokio::test]
    async fn test_refresh_uses_supplied_claims() {
        let service = test_token_service();
        let mut claims = test_claims();

        let original = service.issue_pair(&claims).unwrap();

        // the user record changed between login and refresh
        claims.first_name = Some("Janet".to_string());
        let refreshed = service
            .refresh(&original.refresh_token, &claims)
            .await
            .unwrap();

        let access_claims = service.verify(&refreshed.access_token).unwrap();
        assert_eq!(access_claims.user.first_name.as_deref(), Some("Janet"));
    }

    #[tokio::test]
    async fn test_refresh_of_invalidated_token_fails() {
        let service = test_token_service();
        let claims = test_claims();

        let token = service.issue_pair(&claims).unwrap();
        let refresh_id = service.token_id(&token.refresh_token).unwrap();
        service.invalidate(&[refresh_id]).await.unwrap();

        match service.refresh(&token.refresh_token, &claims).await {
            Err(DomainError::Token(TokenError::AlreadyInvalidated)) => {}
            other => panic!("expected AlreadyInvalidated, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_refresh_with_garbage_token_fails() {
        let service = test_token_service();

        match service.refresh("garbage", &test_claims()).await {
            Err(DomainError::Token(TokenError::Malformed)) => {}
            other => panic!("expected Malformed, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_unreachable_ledger_surfaces_as_infrastructure_error() {
        use crate::repositories::invalid_token::InvalidTokenRepository;
        use crate::test_support::test_codec;
        use async_trait::async_trait;

        struct UnreachableLedger;

        #[async_trait]
        impl InvalidTokenRepository for UnreachableLedger {
            async fn invalidate_tokens(&self, _token_ids: &[String]) -> DomainResult<u64> {
                Err(DomainError::infrastructure("ledger unreachable"))
            }

            async fn is_invalidated(&self, _token_id: &str) -> DomainResult<bool> {
                Err(DomainError::infrastructure("ledger unreachable"))
            }
        }

        let service = TokenService::new(test_codec(), UnreachableLedger);
        let token = service.issue_pair(&test_claims()).unwrap();

        // a failed revocation lookup is neither "revoked" nor "valid"
        match service.refresh(&token.refresh_token, &test_claims()).await {
            Err(DomainError::Infrastructure { .. }) => {}
            other => panic!("expected Infrastructure, got {:?}", other.map(|_| ())),
        }
        match service.check_invalidated("any-id").await {
            Err(DomainError::Infrastructure { .. }) => {}
            other => panic!("expected Infrastructure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_verify_does_not_consult_the_ledger() {
        let service = test_token_service();
        let token = service.issue_pair(&test_claims()).unwrap();

        let access_id = service.token_id(&token.access_token).unwrap();
        service.invalidate(&[access_id.clone()]).await.unwrap();

        // verification still succeeds; revocation is a separate explicit step
        assert!(service.verify(&token.access_token).is_ok());
        match service.check_invalidated(&access_id).await {
            Err(DomainError::Token(TokenError::AlreadyInvalidated)) => {}
            other => panic!("expected AlreadyInvalidated, got {:?}", other),
        }
    }
}
