//! Custom error types for the common library
//!
//! This module defines the error reported by the in-memory stores used
//! throughout the application.

use std::fmt::Display;

use thiserror::Error;

/// Custom error type for in-memory store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A writer panicked while holding the store lock
    #[error("Store lock poisoned: {0}")]
    Poisoned(String),
}

impl StoreError {
    /// Wrap a lock poisoning error
    pub fn poisoned(err: impl Display) -> Self {
        StoreError::Poisoned(err.to_string())
    }
}
