//! Database connection management.
//!
//! The [`Database`] owns the process-wide PostgreSQL pool. The pool is
//! created lazily: the first request to observe a missing or unhealthy pool
//! reconnects, and the probe-connect-assign sequence is one critical section
//! so concurrent requests can never race to open two pools.

use shared::models::Measurement;
use shared::query::{QuerySpec, SqlValue};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

/// Upper bound on the configurable connection timeout, in seconds.
const CONNECT_TIMEOUT_MAX: u64 = 120;

/// Database configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// The database endpoint.
    pub host: String,
    /// The database username.
    pub user: String,
    /// The database password.
    pub password: String,
    /// The port the database listens on.
    pub port: u16,
    /// The connection timeout in seconds.
    pub connect_timeout: u64,
}

impl DatabaseConfig {
    /// Load database configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PULSE_DB_HOST`: Database endpoint (required)
    /// - `PULSE_DB_USER`: Database user (required)
    /// - `PULSE_DB_PASS`: Database password (required)
    /// - `PULSE_DB_PORT`: Database port (default: 5432)
    /// - `PULSE_DB_CONNECT_TIMEOUT`: Connection timeout in seconds
    ///   (default: 10, capped at 120)
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable if a required value is missing
    /// or an optional value does not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        let required = |name: &str| {
            std::env::var(name)
                .map_err(|_| anyhow::anyhow!("'{name}' is a required environment variable"))
        };

        let port = std::env::var("PULSE_DB_PORT")
            .ok()
            .map(|p| p.parse::<u16>())
            .transpose()?
            .unwrap_or(5432);

        let connect_timeout = std::env::var("PULSE_DB_CONNECT_TIMEOUT")
            .ok()
            .map(|t| t.parse::<u64>())
            .transpose()?
            .unwrap_or(10)
            .min(CONNECT_TIMEOUT_MAX);

        Ok(Self {
            host: required("PULSE_DB_HOST")?,
            user: required("PULSE_DB_USER")?,
            password: required("PULSE_DB_PASS")?,
            port,
            connect_timeout,
        })
    }

    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database("postgres")
    }
}

/// A failure in the connection layer or during query execution.
///
/// None of these messages carry SQL text or credentials; diagnostics are
/// logged server-side where the failure occurs.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database could not be reached or refused the credentials.
    #[error("failed to connect to database")]
    Connect(#[source] sqlx::Error),

    /// An established connection stopped answering pings.
    #[error("database ping failed")]
    Ping(#[source] sqlx::Error),

    /// The driver rejected or failed an issued query.
    #[error("query execution failed")]
    Query(#[source] sqlx::Error),

    /// A result row failed to scan into its record shape.
    #[error(transparent)]
    Load(#[from] shared::models::LoadError),
}

impl DbError {
    /// Whether this failure is a connectivity problem rather than a query
    /// or materialization problem.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connect(_) | Self::Ping(_))
    }
}

/// The process-wide database handle with lazy reconnect.
pub struct Database {
    config: DatabaseConfig,
    pool: Mutex<Option<PgPool>>,
}

impl Database {
    /// Creates an unconnected database handle. No connection is attempted
    /// until the first [`probe`](Self::probe).
    #[must_use]
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: Mutex::new(None),
        }
    }

    /// Checks the connection, establishing it if necessary.
    ///
    /// If a pool exists it is pinged; a failed ping discards the pool and a
    /// single reconnect is attempted. The whole check-connect-assign
    /// sequence holds the pool lock, so concurrent callers serialize here
    /// and exactly one of them performs the reconnect.
    ///
    /// # Errors
    ///
    /// Returns a [`DbError`] if no healthy connection can be established.
    pub async fn probe(&self) -> Result<PgPool, DbError> {
        let mut slot = self.pool.lock().await;

        if let Some(pool) = slot.as_ref() {
            match ping(pool).await {
                Ok(()) => return Ok(pool.clone()),
                Err(err) => {
                    tracing::warn!(error = %err, "database ping failed, reconnecting");
                    *slot = None;
                }
            }
        } else {
            tracing::info!("database connection has not been established, connecting");
        }

        // Retried exactly once per request: a second failure surfaces.
        let pool = self.connect().await?;
        tracing::info!("database connection successfully established");
        *slot = Some(pool.clone());
        Ok(pool)
    }

    /// Opens a new pool and validates it with a ping before returning.
    async fn connect(&self) -> Result<PgPool, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(self.config.connect_timeout))
            .connect_with(self.config.connect_options())
            .await
            .map_err(DbError::Connect)?;

        if let Err(err) = ping(&pool).await {
            pool.close().await;
            return Err(DbError::Ping(err));
        }
        Ok(pool)
    }

    /// Executes a query specification and materializes its rows.
    ///
    /// Fails fast on the first row that does not scan; rows already
    /// materialized are discarded with the request.
    ///
    /// # Errors
    ///
    /// Returns a [`DbError`] on connectivity, execution, or row scan
    /// failure. The failing SQL is logged here and never propagated to the
    /// client.
    pub async fn fetch(&self, spec: &QuerySpec) -> Result<Vec<Measurement>, DbError> {
        let pool = self.probe().await?;

        let (sql, args) = spec.to_sql();
        let mut query = sqlx::query(&sql);
        for arg in &args {
            query = match arg {
                SqlValue::Int(v) => query.bind(*v),
                SqlValue::Float(v) => query.bind(*v),
            };
        }

        let rows = query.fetch_all(&pool).await.map_err(|err| {
            tracing::error!(%sql, error = %err, "query execution failed");
            DbError::Query(err)
        })?;

        let dataset = spec.dataset();
        rows.iter()
            .map(|row| dataset.load_row(row, spec.simple()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into)
    }
}

async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> DatabaseConfig {
        DatabaseConfig {
            host: "localhost".to_string(),
            user: "pulse".to_string(),
            password: "pulse_dev".to_string(),
            port: 5432,
            connect_timeout: 10,
        }
    }

    #[test]
    fn test_database_creation_does_not_connect() {
        // Construction must stay lazy; the first probe connects.
        let _db = Database::new(test_config());
    }

    #[test]
    fn test_connect_options_carry_config() {
        let options = test_config().connect_options();
        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_username(), "pulse");
    }

    #[test]
    fn test_connectivity_classification() {
        assert!(DbError::Connect(sqlx::Error::PoolClosed).is_connectivity());
        assert!(DbError::Ping(sqlx::Error::PoolClosed).is_connectivity());
        assert!(!DbError::Query(sqlx::Error::PoolClosed).is_connectivity());
    }
}
