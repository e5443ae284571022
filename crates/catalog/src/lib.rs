// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog Introspect
//!
//! Read-only access to the catalog metadata of a PostgreSQL database:
//! schemas, tables, columns, domains, composite types, their attributes and
//! `pg_type` descriptors, returned as typed rows.
//!
//! ## Architecture
//!
//! - [`QueryExecutor`]: runs one statement per connection checkout and
//!   classifies failures as connection or query errors
//! - [`CatalogService`]: bound to one database; catalog-wide queries
//! - [`SchemaService`]: bound to one schema; tables, types, attributes, columns
//! - [`TableService`]: bound to one table; columns
//! - [`enrich_array_dimensions`]: adds array dimensions to column rows
//!
//! The database itself is reached through the [`ConnectionPool`] trait;
//! [`PgConnectionPool`] implements it with sqlx.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_introspect::{CatalogError, CatalogService};
//!
//! async fn print_columns(catalog: &CatalogService) -> Result<(), CatalogError> {
//!     let schema = catalog.schema("public");
//!     for column in schema.table("users").list_columns().await? {
//!         println!("{:?} {:?} {:?}", column.column_name, column.data_type, column.array_dimension);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod enrich;
pub mod error;
pub mod executor;
#[cfg(feature = "postgresql")]
pub mod live_postgres;
pub mod metadata;
pub mod queries;
pub mod schema;
pub mod table;
pub mod r#trait;

// Re-exports
pub use catalog::CatalogService;
pub use config::{IntrospectConfig, PoolConfig};
pub use enrich::enrich_array_dimensions;
pub use error::{CatalogError, CatalogResult, DriverError};
pub use executor::{CONNECTION_ERROR_MESSAGE, QUERY_ERROR_MESSAGE, QueryExecutor};
#[cfg(feature = "postgresql")]
pub use live_postgres::{PgConnectionPool, PgPoolConnection};
pub use metadata::{
    ArrayColumnProbe, Attribute, Column, Domain, Row, Schema, Table, TypeDescriptor,
    UserDefinedType,
};
pub use schema::SchemaService;
pub use table::TableService;
pub use r#trait::{ConnectionPool, ErrorSink, PoolConnection, TracingSink};
