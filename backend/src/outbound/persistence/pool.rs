//! Async connection pool for Diesel PostgreSQL connections.
//!
//! Thin wrapper over `diesel-async` + `bb8`. Checkout is scoped per
//! data-access call: a repository acquires a connection at the start of an
//! operation and the pool reclaims it when the guard drops, on every exit
//! path.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

const MAX_CONNECTIONS: u32 = 10;
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while building the pool or checking out a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// The pool itself could not be constructed.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },

    /// No connection could be checked out within the timeout.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },
}

/// Connection pool handle shared by the repository adapters.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build a pool for the given database URL.
    pub async fn connect(database_url: &str) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let inner = Pool::builder()
            .max_size(MAX_CONNECTIONS)
            .connection_timeout(CHECKOUT_TIMEOUT)
            .build(manager)
            .await
            .map_err(|err| PoolError::Build {
                message: err.to_string(),
            })?;
        Ok(Self { inner })
    }

    /// Check out a connection.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner.get().await.map_err(|err| PoolError::Checkout {
            message: err.to_string(),
        })
    }
}
