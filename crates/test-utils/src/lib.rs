// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for catalog-introspect
//!
//! This crate provides common testing components including:
//! - A mock connection pool answering catalog statements from memory
//! - An error sink that records what the executor logs
//! - Catalog fixtures and sample data

pub mod fixtures;
pub mod mock_pool;
pub mod recording_sink;

// Re-exports for convenience
pub use fixtures::{MockCatalogBuilder, STANDARD_DATABASE};
pub use mock_pool::{ExecutedStatement, MockCatalog, MockPool};
pub use recording_sink::{LoggedError, RecordingSink};

/// Install a `tracing` subscriber for tests, filtered by `RUST_LOG`
///
/// Safe to call from every test; only the first call installs it.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
