//! Storage configuration read from the environment.

use std::time::Duration;

const DEFAULT_DB_PATH: &str = "./db/piggybank.db";
const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub db_path: String,
    pub pool_size: u32,
    pub busy_timeout: Duration,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
        }
    }
}

impl StorageConfig {
    /// Reads `PIGGYBANK_DB_PATH` (falling back to `DATABASE_URL`),
    /// `PIGGYBANK_DB_POOL_SIZE` and `PIGGYBANK_DB_BUSY_TIMEOUT_MS`, loading a
    /// `.env` file first when present. Unparsable numbers fall back to their
    /// defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let db_path = std::env::var("PIGGYBANK_DB_PATH")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .unwrap_or_else(|_| DEFAULT_DB_PATH.into());
        let pool_size: u32 = std::env::var("PIGGYBANK_DB_POOL_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_POOL_SIZE);
        let busy_timeout_ms: u64 = std::env::var("PIGGYBANK_DB_BUSY_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_BUSY_TIMEOUT_MS);
        Self {
            db_path,
            pool_size,
            busy_timeout: Duration::from_millis(busy_timeout_ms),
        }
    }

    pub fn with_db_path(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }
}
