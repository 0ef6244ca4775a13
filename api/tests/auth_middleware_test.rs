//! Integration tests for the bearer authentication middleware.

mod common;

use actix_web::{test, web, App, HttpResponse};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use tg_api::middleware::auth::{BearerAuth, OptionalAuth};
use tg_core::domain::entities::token::{Claims, UserClaims};

/// Echoes whether the request carries an authenticated principal.
async fn whoami(auth: OptionalAuth) -> HttpResponse {
    match auth.0 {
        Some(context) => HttpResponse::Ok().json(serde_json::json!({
            "authenticated": true,
            "user_id": context.user_id.to_string(),
        })),
        None => HttpResponse::Ok().json(serde_json::json!({
            "authenticated": false,
        })),
    }
}

macro_rules! whoami_app {
    ($token_service:expr) => {
        test::init_service(
            App::new()
                .wrap(BearerAuth::new($token_service.clone()))
                .route("/whoami", web::get().to(whoami)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_request_without_credential_is_anonymous() {
    let token_service = common::test_token_service();
    let app = whoami_app!(token_service);

    let req = test::TestRequest::get().uri("/whoami").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["authenticated"], false);
}

#[actix_web::test]
async fn test_non_bearer_scheme_is_anonymous() {
    let token_service = common::test_token_service();
    let app = whoami_app!(token_service);

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["authenticated"], false);
}

#[actix_web::test]
async fn test_valid_token_authenticates_the_request() {
    let token_service = common::test_token_service();
    let user = common::seeded_user_repository("hunter2-hunter2").await.1;
    let pair = token_service.issue_pair(&user.to_claims()).unwrap();

    let app = whoami_app!(token_service);

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user_id"], user.id.to_string());
}

#[actix_web::test]
async fn test_garbage_token_is_rejected() {
    let token_service = common::test_token_service();
    let app = whoami_app!(token_service);

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_invalidated_token_is_rejected() {
    let token_service = common::test_token_service();
    let user = common::seeded_user_repository("hunter2-hunter2").await.1;
    let pair = token_service.issue_pair(&user.to_claims()).unwrap();

    let access_id = token_service.token_id(&pair.access_token).unwrap();
    token_service.invalidate(&[access_id]).await.unwrap();

    let app = whoami_app!(token_service);

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // a presented-but-revoked credential never falls back to anonymous
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_expired_token_is_rejected() {
    let token_service = common::test_token_service();

    // hand-sign a token that expired an hour ago
    let now = Utc::now().timestamp();
    let claims = Claims {
        jti: "expired-token".to_string(),
        iat: now - 7200,
        exp: now - 3600,
        user: UserClaims::identity_only(uuid::Uuid::new_v4().to_string()),
    };
    let key = EncodingKey::from_rsa_pem(common::TEST_PRIVATE_KEY_PEM.as_bytes()).unwrap();
    let token = encode(&Header::new(Algorithm::RS256), &claims, &key).unwrap();

    let app = whoami_app!(token_service);

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_tampered_token_is_rejected() {
    let token_service = common::test_token_service();
    let user = common::seeded_user_repository("hunter2-hunter2").await.1;
    let pair = token_service.issue_pair(&user.to_claims()).unwrap();

    let mut tampered = pair.access_token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let app = whoami_app!(token_service);

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", format!("Bearer {}", tampered)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}
