// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for Catalog operations
//!
//! This module defines the error types used throughout the catalog layer.
//!
//! [`DriverError`] is what the connection pool and its connections report.
//! Only the [`QueryExecutor`](crate::executor::QueryExecutor) turns it into a
//! [`CatalogError`], deciding whether the failure happened while acquiring a
//! connection or while executing a statement.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur during Catalog operations
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum CatalogError {
    /// Malformed constructor input, such as a blank database name
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Requested catalog is neither the system catalog nor an existing schema
    #[error("Invalid catalog '{0}': not the system catalog or an existing schema")]
    InvalidCatalog(String),

    /// Failed to obtain a working connection from the pool
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed after a connection was obtained
    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    /// Invalid catalog configuration
    #[error("Invalid catalog configuration: {0}")]
    ConfigurationError(String),
}

impl CatalogError {
    /// Whether this error was raised while acquiring a connection
    pub fn is_connection_error(&self) -> bool {
        matches!(self, CatalogError::ConnectionFailed(_))
    }

    /// Whether this error was raised while executing a statement
    pub fn is_query_error(&self) -> bool {
        matches!(self, CatalogError::QueryFailed(_))
    }
}

/// Raw failure reported by a pool or a pooled connection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DriverError {
    message: String,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(feature = "postgresql")]
impl From<sqlx::Error> for DriverError {
    fn from(err: sqlx::Error) -> Self {
        DriverError::new(err.to_string())
    }
}

impl From<serde_json::Error> for DriverError {
    fn from(err: serde_json::Error) -> Self {
        DriverError::new(format!("failed to decode row: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(CatalogError::ConnectionFailed("refused".into()).is_connection_error());
        assert!(!CatalogError::ConnectionFailed("refused".into()).is_query_error());
        assert!(CatalogError::QueryFailed("syntax".into()).is_query_error());
        assert!(!CatalogError::InvalidCatalog("x".into()).is_query_error());
    }

    #[test]
    fn test_invalid_catalog_display() {
        let msg = CatalogError::InvalidCatalog("does_not_exist".to_string()).to_string();
        assert!(msg.contains("does_not_exist"));
    }

    #[test]
    fn test_driver_error_from_json() {
        let err = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let driver: DriverError = err.into();
        assert!(driver.message().starts_with("failed to decode row"));
    }
}
