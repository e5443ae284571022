// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error sink that records what the executor logs

use std::sync::Mutex;

use catalog_introspect::{CatalogError, ErrorSink};

/// One `error(message, cause)` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedError {
    pub message: String,
    pub cause: CatalogError,
}

/// [`ErrorSink`] that keeps every call for later assertions
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<LoggedError>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls, in order
    pub fn calls(&self) -> Vec<LoggedError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of calls logged with exactly `message`
    pub fn count(&self, message: &str) -> usize {
        self.calls().iter().filter(|c| c.message == message).count()
    }

    pub fn is_empty(&self) -> bool {
        self.calls().is_empty()
    }
}

impl ErrorSink for RecordingSink {
    fn error(&self, message: &str, cause: &CatalogError) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(LoggedError {
                message: message.to_string(),
                cause: cause.clone(),
            });
    }
}
