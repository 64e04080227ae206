//! Error types for prefstore
//!
//! This module defines all error types used throughout the workspace.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::value::Kind;
use std::io;
use thiserror::Error;

/// Result type alias for prefstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for prefstore
#[derive(Debug, Error)]
pub enum Error {
    /// The stored entry has a different physical kind than the accessor used
    #[error("Type mismatch for '{name}': expected {expected}, found {actual}")]
    TypeMismatch {
        /// Entry name
        name: String,
        /// Kind the accessor reads
        expected: Kind,
        /// Kind actually stored
        actual: Kind,
    },

    /// Stored text could not be decoded into the requested type
    #[error("Decode error for '{name}': {reason}")]
    Decode {
        /// Entry name
        name: String,
        /// Codec or enum lookup failure
        reason: String,
    },

    /// A value could not be encoded for storage
    #[error("Encode error: {0}")]
    Encode(String),

    /// Malformed arguments (odd-length name/value list, bad config value)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Programming error: a second binding to a store, or similar misuse
    #[error("Illegal use: {0}")]
    IllegalUse(String),

    /// The underlying store failed to load or apply
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Build a `TypeMismatch` for `name`
    pub fn type_mismatch(name: impl Into<String>, expected: Kind, actual: Kind) -> Self {
        Error::TypeMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }

    /// Build a `Decode` error for `name`
    pub fn decode(name: impl Into<String>, reason: impl ToString) -> Self {
        Error::Decode {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Build an `InvalidArgument` error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Error::InvalidArgument(reason.into())
    }

    /// Build a `Storage` error
    pub fn storage(reason: impl Into<String>) -> Self {
        Error::Storage(reason.into())
    }

    /// True for `TypeMismatch`
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }

    /// True for `Decode`
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }
}
