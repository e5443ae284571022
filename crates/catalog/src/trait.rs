// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Collaborator traits
//!
//! The catalog layer does not talk to a database driver directly. It consumes
//! a [`ConnectionPool`] that hands out [`PoolConnection`]s, and reports
//! failures to an [`ErrorSink`]. The PostgreSQL implementation lives in
//! [`crate::live_postgres`]; tests plug in in-memory doubles.

use crate::error::{CatalogError, DriverError};
use crate::metadata::Row;

/// A pool of database connections
///
/// # Examples
///
/// ```rust,ignore
/// let mut conn = pool.acquire().await?;
/// let rows = conn.execute("SELECT 1 AS one", &[], "probe_one").await;
/// conn.release();
/// ```
#[async_trait::async_trait]
pub trait ConnectionPool: Send + Sync {
    /// Check a connection out of the pool
    ///
    /// Every successful call must be matched by exactly one
    /// [`PoolConnection::release`].
    async fn acquire(&self) -> Result<Box<dyn PoolConnection>, DriverError>;

    /// Close the pool and all idle connections
    async fn close(&self);
}

/// A connection checked out of a [`ConnectionPool`]
#[async_trait::async_trait]
pub trait PoolConnection: Send {
    /// Run one statement with positionally bound parameters (`$1`, `$2`, ...)
    ///
    /// `statement_name` is a stable label for the statement shape. Engines may
    /// use it to cache the prepared plan; it has no other meaning.
    async fn execute(
        &mut self,
        text: &str,
        params: &[&str],
        statement_name: &str,
    ) -> Result<Vec<Row>, DriverError>;

    /// Return the connection to its pool
    fn release(self: Box<Self>);
}

/// Destination for errors logged by the query executor
pub trait ErrorSink: Send + Sync {
    fn error(&self, message: &str, cause: &CatalogError);
}

/// [`ErrorSink`] that forwards to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn error(&self, message: &str, cause: &CatalogError) {
        tracing::error!(error = %cause, "{}", message);
    }
}
