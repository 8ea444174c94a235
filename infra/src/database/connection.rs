//! PostgreSQL pool shared by the credential and revocation stores

use log::LevelFilter;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use std::time::Duration;

use tg_shared::DatabaseConfig;

use crate::InfrastructureError;

/// Pool handle; clones share the same connections
#[derive(Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool, holding one connection warm
    ///
    /// ```no_run
    /// # async fn open() -> Result<(), tg_infra::InfrastructureError> {
    /// let config = tg_shared::DatabaseConfig::new("postgres://guard@localhost/token_guard");
    /// let pool = tg_infra::DatabasePool::new(config).await?;
    /// pool.run_migrations().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        let connect_options = Self::connect_options(&config)?;

        let pool = Self::pool_options(&config)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Could not open database pool");
                InfrastructureError::Database(e)
            })?;

        tracing::info!(
            max_connections = config.max_connections,
            "Database pool ready"
        );
        Ok(Self { pool })
    }

    /// Parse the URL; statements log at debug, slow ones at warn
    pub(crate) fn connect_options(
        config: &DatabaseConfig,
    ) -> Result<PgConnectOptions, InfrastructureError> {
        let options = PgConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        Ok(options
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(
                LevelFilter::Warn,
                Duration::from_millis(config.slow_query_threshold),
            ))
    }

    pub(crate) fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round trip `SELECT 1`
    pub async fn ping(&self) -> Result<(), InfrastructureError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| {
                tracing::warn!(error = %e, "Database ping failed");
                InfrastructureError::Database(e)
            })
    }

    /// Wait for checked-out connections to return, then close them all
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }

    /// Apply the embedded migrations creating `users_auth` and `token_blacklist`
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Database migrations failed");
                InfrastructureError::Migration(e)
            })?;

        tracing::info!("Database migrations applied");
        Ok(())
    }
}
