//! Store configuration loaded via OrthoConfig.
//!
//! Values come from `USER_ITEMS_*` environment variables, configuration files,
//! or command-line flags. Every field is optional; accessors supply defaults.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::RetryPolicy;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_CONNECTION_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 50;
const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 60_000;

/// Errors raised when settings cannot be turned into runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// No database URL was configured.
    #[error("USER_ITEMS_DATABASE_URL must be set")]
    MissingDatabaseUrl,
}

/// Connection, pool, and retry settings for the association store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_ITEMS")]
pub struct StoreSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept warm.
    pub pool_min_idle: Option<u32>,
    /// How long a checkout waits for a free connection, in milliseconds.
    pub connection_timeout_ms: Option<u64>,
    /// Total attempts per operation, including the first.
    pub retry_max_attempts: Option<u32>,
    /// Delay before the first retry, in milliseconds.
    pub retry_base_delay_ms: Option<u64>,
    /// Default per-operation deadline, in milliseconds.
    pub operation_timeout_ms: Option<u64>,
}

impl StoreSettings {
    /// Return the configured pool size, falling back to the default.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Return the configured idle floor, clamped to the pool size.
    pub fn pool_min_idle(&self) -> u32 {
        self.pool_min_idle
            .unwrap_or(DEFAULT_POOL_MIN_IDLE)
            .min(self.pool_max_size())
    }

    /// Return the configured checkout timeout.
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_millis(
            self.connection_timeout_ms
                .unwrap_or(DEFAULT_CONNECTION_TIMEOUT_MS),
        )
    }

    /// Return the default per-operation deadline.
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(
            self.operation_timeout_ms
                .unwrap_or(DEFAULT_OPERATION_TIMEOUT_MS),
        )
    }

    /// Build the pool configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when no URL is configured.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let url = self
            .database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)?;
        Ok(PoolConfig::new(url)
            .with_max_size(self.pool_max_size())
            .with_min_idle(Some(self.pool_min_idle()))
            .with_connection_timeout(self.connection_timeout()))
    }

    /// Build the retry policy.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self
                .retry_max_attempts
                .unwrap_or(DEFAULT_RETRY_MAX_ATTEMPTS)
                .max(1),
            base_delay: Duration::from_millis(
                self.retry_base_delay_ms
                    .unwrap_or(DEFAULT_RETRY_BASE_DELAY_MS),
            ),
            ..RetryPolicy::default()
        }
    }
}
