use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use tg_api::middleware::auth::{BearerAuth, BearerTokenVerifier};
use tg_api::middleware::cors::create_cors;
use tg_api::routes::auth::AppState;
use tg_api::routes;
use tg_core::services::auth::{LoginService, LogoutService, RefreshService};
use tg_core::services::token::{Rs256KeyPair, TokenCodec, TokenService, TokenServiceConfig};
use tg_infra::{create_pool, BcryptPasswordVerifier, MySqlInvalidTokenRepository, MySqlUserRepository};
use tg_shared::config::{AuthConfig, DatabaseConfig, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("starting TokenGate API server");

    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env();
    let auth_config = AuthConfig::from_env();

    // malformed keys are fatal at startup, never a per-request failure
    let keys = Rs256KeyPair::from_files(
        &auth_config.private_key_path,
        &auth_config.public_key_path,
    )
    .context("failed to load token signing keys")?;

    let pool = create_pool(&database_config)
        .await
        .context("failed to create database connection pool")?;

    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let invalid_tokens = MySqlInvalidTokenRepository::new(pool.clone());

    let codec = TokenCodec::new(keys, TokenServiceConfig::from(&auth_config));
    let token_service = Arc::new(TokenService::new(codec, invalid_tokens));

    let state = AppState {
        login_service: Arc::new(LoginService::new(
            user_repository.clone(),
            token_service.clone(),
            Arc::new(BcryptPasswordVerifier::new()),
        )),
        refresh_service: Arc::new(RefreshService::new(
            user_repository.clone(),
            token_service.clone(),
        )),
        logout_service: Arc::new(LogoutService::new(token_service.clone())),
    };
    let verifier: Arc<dyn BearerTokenVerifier> = token_service;

    let bind_address = server_config.bind_address();
    info!(bind_address = %bind_address, "server binding");

    let workers = server_config.workers;
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(BearerAuth::new(verifier.clone()))
            .wrap(create_cors())
            .app_data(web::Data::new(state.clone()))
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api/v1/auth")
                    .route(
                        "/login",
                        web::post().to(routes::auth::login::<
                            MySqlUserRepository,
                            MySqlInvalidTokenRepository,
                            BcryptPasswordVerifier,
                        >),
                    )
                    .route(
                        "/refresh",
                        web::post().to(routes::auth::refresh_token::<
                            MySqlUserRepository,
                            MySqlInvalidTokenRepository,
                            BcryptPasswordVerifier,
                        >),
                    )
                    .route(
                        "/logout",
                        web::post().to(routes::auth::logout::<
                            MySqlUserRepository,
                            MySqlInvalidTokenRepository,
                            BcryptPasswordVerifier,
                        >),
                    ),
            )
    })
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {}", bind_address))?;

    if workers > 0 {
        server = server.workers(workers);
    }

    server.run().await?;
    Ok(())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "tokengate-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
