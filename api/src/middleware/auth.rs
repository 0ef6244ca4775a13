//! Bearer authentication middleware protecting API endpoints.
//!
//! For every inbound request carrying a bearer credential the middleware
//! verifies the token, checks the revocation ledger and injects an
//! authenticated principal into the request extensions. A request without a
//! bearer credential passes through anonymous; a request whose credential
//! fails any step of the chain is rejected and never proceeds as anonymous.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use tg_core::domain::entities::token::Claims;
use tg_core::domain::entities::user::UserType;
use tg_core::errors::{DomainError, TokenError};
use tg_core::repositories::InvalidTokenRepository;
use tg_core::services::token::TokenService;

use crate::handlers::error::handle_domain_error;

/// Verification seam the middleware depends on
///
/// Mirrors the two explicit steps of request authentication: signature and
/// expiry verification, then the revocation ledger check.
#[async_trait]
pub trait BearerTokenVerifier: Send + Sync {
    /// Verify signature and expiry, returning the claims
    fn verify(&self, token: &str) -> Result<Claims, DomainError>;

    /// Fail if the token id is present in the revocation ledger
    async fn check_invalidated(&self, token_id: &str) -> Result<(), DomainError>;
}

#[async_trait]
impl<I: InvalidTokenRepository> BearerTokenVerifier for TokenService<I> {
    fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        TokenService::verify(self, token)
    }

    async fn check_invalidated(&self, token_id: &str) -> Result<(), DomainError> {
        TokenService::check_invalidated(self, token_id).await
    }
}

/// Authenticated principal injected into request extensions
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User id extracted from the claims
    pub user_id: Uuid,
    /// User type, used for authorization decisions downstream
    pub user_type: Option<UserType>,
    /// Id of the presented token
    pub token_id: String,
}

impl AuthContext {
    /// Builds a principal from verified claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = Uuid::parse_str(claims.user_id()).map_err(|_| {
            DomainError::Token(TokenError::MissingClaim {
                claim: "userId".to_string(),
            })
        })?;

        Ok(Self {
            user_id,
            user_type: claims.user.user_type,
            token_id: claims.jti,
        })
    }
}

/// Bearer authentication middleware factory
pub struct BearerAuth {
    verifier: Arc<dyn BearerTokenVerifier>,
}

impl BearerAuth {
    /// Creates the middleware over a token verifier
    pub fn new(verifier: Arc<dyn BearerTokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
        }))
    }
}

/// Bearer authentication middleware service
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn BearerTokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = self.verifier.clone();

        Box::pin(async move {
            // no bearer credential: the request proceeds anonymous
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    return service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
            };

            match authenticate(verifier.as_ref(), &token).await {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    tracing::debug!(error = %error, "bearer authentication rejected");
                    let response = handle_domain_error(&error).map_into_right_body();
                    Ok(req.into_response(response))
                }
            }
        })
    }
}

/// Runs the full authentication chain for one bearer token
async fn authenticate(
    verifier: &dyn BearerTokenVerifier,
    token: &str,
) -> Result<AuthContext, DomainError> {
    let claims = verifier.verify(token)?;
    verifier.check_invalidated(&claims.jti).await?;
    AuthContext::from_claims(claims)
}

/// Extracts the bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}
