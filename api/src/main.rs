use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use tg_api::{create_app, telemetry, AppState};
use tg_core::clock::{Clock, SystemClock};
use tg_core::services::{
    AuthService, RetryExecutor, RetryPolicy, RevocationJanitor, TokenAuthority,
    TokenAuthorityConfig,
};
use tg_infra::{
    default_classifier, BcryptHasher, DatabasePool, EnvSecretProvider, PgCredentialStore,
    PgRevocationStore,
};
use tg_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("loading configuration")?;
    telemetry::init_tracing(&config.logging)?;

    info!(environment = %config.environment, "Starting Token Guard API server");

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("connecting to database")?;
    if config.database.run_migrations {
        pool.run_migrations().await.context("applying migrations")?;
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let secrets = EnvSecretProvider::from_config(&config.auth.jwt);
    let authority = TokenAuthority::new(
        TokenAuthorityConfig::from_jwt_config(&config.auth.jwt)?,
        &secrets,
        clock.clone(),
    )
    .with_context(|| format!("loading signing key from {}", secrets.var_name()))?
    .with_span(tracing::info_span!("token_authority"));

    let executor = RetryExecutor::new(default_classifier()).with_span(tracing::info_span!("retry"));
    let policy = RetryPolicy::from(&config.retry);

    let credentials = Arc::new(PgCredentialStore::new(pool.get_pool().clone()));
    let revocations = Arc::new(PgRevocationStore::new(pool.get_pool().clone()));

    let auth_service = AuthService::new(
        credentials,
        revocations.clone(),
        Arc::new(BcryptHasher::default()),
        Arc::new(authority),
        clock.clone(),
    )
    .with_retry(executor.clone(), policy.clone())
    .with_lookup_failure(config.revocation.lookup_failure)
    .with_span(tracing::info_span!("auth_service"));

    let janitor = RevocationJanitor::new(revocations, clock)
        .with_interval(Duration::from_secs(config.revocation.sweep_interval_secs))
        .with_retry(executor, policy)
        .with_span(tracing::info_span!("revocation_janitor"))
        .start()?;

    let state = web::Data::new(
        AppState::new(Arc::new(auth_service)).with_database(pool.clone()),
    );

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(state.clone()))
        .shutdown_timeout(config.server.shutdown_timeout);
    // Zero keeps actix's default of one worker per core
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let server = server
        .disable_signals()
        .bind(&bind_address)
        .with_context(|| format!("binding {}", bind_address))?
        .run();

    let server_handle = server.handle();
    let server_task = actix_web::rt::spawn(server);

    tokio::signal::ctrl_c().await.context("waiting for shutdown signal")?;
    info!("Shutdown signal received");

    server_handle.stop(true).await;
    server_task.await.context("joining HTTP server")??;

    janitor.shutdown().await?;
    pool.close().await;

    info!("Token Guard API server stopped");
    Ok(())
}
