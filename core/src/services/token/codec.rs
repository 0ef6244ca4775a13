//! Signed-token wire codec: encoding, signing, parsing and expiry policy.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenKind, UserClaims, TOKEN_HEADER_TYPE};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;
use super::keys::Rs256KeyPair;

/// Result of signing a single token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The signed wire token
    pub token: String,
    /// The freshly generated token id embedded as `jti`
    pub token_id: String,
    /// Absolute expiry (epoch seconds)
    pub expires_at: i64,
}

/// Produces and parses signed wire tokens
///
/// Owns no state beyond the key material and configured lifetimes; every
/// operation is a pure function over them, safe for unlimited concurrent
/// callers. `parse` verifies the signature only; expiry is a separate policy
/// step, so signature failures and time-bound failures stay distinguishable.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: TokenServiceConfig,
}

impl TokenCodec {
    /// Creates a codec over the given key pair and lifetimes
    pub fn new(keys: Rs256KeyPair, config: TokenServiceConfig) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        // expiry is checked by check_expiry, not by the decoder
        validation.validate_exp = false;
        validation.required_spec_claims = std::collections::HashSet::new();

        Self {
            encoding_key: keys.encoding_key().clone(),
            decoding_key: keys.decoding_key().clone(),
            validation,
            config,
        }
    }

    /// Signs a token of the given kind from the supplied claims
    ///
    /// A fresh UUID becomes the token id, issued-at is the current time and
    /// expiry is `now + lifetime(kind)`. Refresh tokens embed only the user
    /// id claim; access tokens embed the full claims set.
    pub fn issue(&self, claims: &UserClaims, kind: TokenKind) -> Result<IssuedToken, DomainError> {
        self.issue_at(claims, kind, Utc::now())
    }

    /// Signs a token with an explicit issued-at instant
    ///
    /// Pair issuance uses this so both tokens share one claims snapshot and
    /// one issuance time.
    pub(crate) fn issue_at(
        &self,
        claims: &UserClaims,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, DomainError> {
        let lifetime = match kind {
            TokenKind::Access => Duration::minutes(self.config.access_token_expire_minutes),
            TokenKind::Refresh => Duration::days(self.config.refresh_token_expire_days),
        };
        let expires_at = issued_at + lifetime;

        let user = match kind {
            TokenKind::Access => claims.clone(),
            TokenKind::Refresh => claims.to_identity_only(),
        };

        let payload = Claims {
            jti: Uuid::new_v4().to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            user,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.typ = Some(TOKEN_HEADER_TYPE.to_string());

        let token = encode(&header, &payload, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))?;

        Ok(IssuedToken {
            token,
            token_id: payload.jti,
            expires_at: payload.exp,
        })
    }

    /// Parses a wire token, verifying its signature with the public key
    ///
    /// # Returns
    ///
    /// * `Ok(TokenData)` - Header and claims of a signature-verified token
    /// * `Err(InvalidSignature)` - The signature does not verify
    /// * `Err(Malformed)` - The wire format cannot be decoded
    pub fn parse(&self, token: &str) -> Result<TokenData<Claims>, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    DomainError::Token(TokenError::InvalidSignature)
                }
                _ => DomainError::Token(TokenError::Malformed),
            }
        })
    }

    /// Applies the expiry policy to parsed claims
    ///
    /// A token is expired only when its expiry is strictly before now.
    pub fn check_expiry(&self, claims: &Claims) -> Result<(), DomainError> {
        if claims.is_expired() {
            return Err(DomainError::Token(TokenError::Expired));
        }
        Ok(())
    }

    /// Extracts the token id from a signature-verified token
    pub fn token_id(&self, token: &str) -> Result<String, DomainError> {
        Ok(self.parse(token)?.claims.jti)
    }
}
