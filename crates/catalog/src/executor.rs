// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Query executor
//!
//! Runs one statement per call on a freshly acquired connection and sorts
//! every failure into one of two classes:
//!
//! - [`CatalogError::ConnectionFailed`] when no connection could be acquired
//! - [`CatalogError::QueryFailed`] when the statement or row decoding failed
//!
//! Each failure is reported once to the [`ErrorSink`] and then returned to
//! the caller unchanged. The acquired connection goes back to the pool
//! exactly once on every path.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult, DriverError};
use crate::metadata::Row;
use crate::queries::Statement;
use crate::r#trait::{ConnectionPool, ErrorSink, PoolConnection};

/// Message logged when a connection cannot be acquired
pub const CONNECTION_ERROR_MESSAGE: &str = "Failed to acquire database connection";

/// Message logged when a statement fails on an acquired connection
pub const QUERY_ERROR_MESSAGE: &str = "Failed to execute catalog query";

/// Executes catalog statements against a [`ConnectionPool`]
#[derive(Clone)]
pub struct QueryExecutor {
    pool: Arc<dyn ConnectionPool>,
    sink: Arc<dyn ErrorSink>,
}

impl std::fmt::Debug for QueryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryExecutor").finish_non_exhaustive()
    }
}

impl QueryExecutor {
    pub fn new(pool: Arc<dyn ConnectionPool>, sink: Arc<dyn ErrorSink>) -> Self {
        Self { pool, sink }
    }

    pub fn pool(&self) -> &Arc<dyn ConnectionPool> {
        &self.pool
    }

    /// Run `statement` and decode every row into `T`
    pub async fn run<T: DeserializeOwned>(
        &self,
        statement: &Statement,
        params: &[&str],
    ) -> CatalogResult<Vec<T>> {
        self.execute(&statement.text, params, statement.name).await
    }

    /// Run one statement with positional parameters
    ///
    /// Rows are returned in the order the engine produced them.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        text: &str,
        params: &[&str],
        statement_name: &str,
    ) -> CatalogResult<Vec<T>> {
        let mut checkout = Checkout::default();
        let conn = match self.pool.acquire().await {
            Ok(conn) => checkout.hold(conn),
            Err(err) => {
                let err = CatalogError::ConnectionFailed(err.to_string());
                self.sink.error(CONNECTION_ERROR_MESSAGE, &err);
                return Err(err);
            }
        };

        let result = conn
            .execute(text, params, statement_name)
            .await
            .and_then(decode_rows::<T>);
        checkout.release();

        match result {
            Ok(rows) => {
                debug!(statement = statement_name, rows = rows.len(), "catalog query completed");
                Ok(rows)
            }
            Err(err) => {
                let err = CatalogError::QueryFailed(format!("{}: {}", statement_name, err));
                self.sink.error(QUERY_ERROR_MESSAGE, &err);
                Err(err)
            }
        }
    }
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, DriverError> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(serde_json::Value::Object(row)).map_err(DriverError::from)
        })
        .collect()
}

/// A checked-out connection that is released exactly once
///
/// Released explicitly on the normal path, or on drop if the call is
/// cancelled or unwinds while the statement is in flight.
#[derive(Default)]
struct Checkout {
    conn: Option<Box<dyn PoolConnection>>,
}

impl Checkout {
    /// Take ownership of `conn` and lend it out for the statement
    fn hold(&mut self, conn: Box<dyn PoolConnection>) -> &mut (dyn PoolConnection + 'static) {
        &mut **self.conn.insert(conn)
    }

    fn release(&mut self) {
        if let Some(conn) = self.conn.take() {
            conn.release();
        }
    }
}

impl Drop for Checkout {
    fn drop(&mut self) {
        self.release();
    }
}
