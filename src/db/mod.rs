//! Database connection and repositories

pub mod members;
pub mod schema_sync;
pub mod seed;
pub mod teams;

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use members::MemberRepository;
pub use teams::TeamRepository;

use crate::query::MemberQueries;

/// In-memory SQLite URL
pub const MEMORY_URL: &str = "sqlite::memory:";

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database wrapper from an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new database connection pool.
    ///
    /// File databases are created when missing. Foreign keys are enforced.
    /// In-memory URLs are routed to [`Database::connect_in_memory`].
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        if is_memory_url(url) {
            return Self::connect_in_memory().await;
        }

        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database URL: {url}"))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to {url}"))?;

        tracing::info!(url = %url, max_connections, "Database connected");
        Ok(Self { pool })
    }

    /// Open a private in-memory database.
    ///
    /// Every SQLite in-memory connection is its own database, so the pool
    /// holds exactly one connection that is never reaped.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str(MEMORY_URL)?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory database")?;

        tracing::debug!("In-memory database opened");
        Ok(Self { pool })
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get a member repository
    pub fn members(&self) -> MemberRepository {
        MemberRepository::new(self.pool.clone())
    }

    /// Get a team repository
    pub fn teams(&self) -> TeamRepository {
        TeamRepository::new(self.pool.clone())
    }

    /// Get the query handle
    pub fn queries(&self) -> MemberQueries {
        MemberQueries::new(self.pool.clone())
    }

    /// Check connectivity
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_memory_url(url: &str) -> bool {
    url == MEMORY_URL || url == "sqlite://:memory:" || url == ":memory:"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_urls() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url(":memory:"));
        assert!(!is_memory_url("sqlite:roster.db"));
    }
}
