//! Core traits for the flat storage medium
//!
//! This module defines the `FlatStore` trait that enables swapping the
//! settings medium (in-memory, file-backed, platform-provided) without
//! breaking the typed facade built on top of it.

use std::fmt;

use crate::batch::WriteBatch;
use crate::error::Result;
use crate::value::Value;

/// Process-wide identity of a storage medium
///
/// Two handles with the same `StoreId` address the same entries. The facade
/// uses it to enforce a single live binding per medium.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreId(String);

impl StoreId {
    /// Create an identity from any descriptive string
    pub fn new(id: impl Into<String>) -> Self {
        StoreId(id.into())
    }

    /// Get the identity as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flat, string-keyed storage medium
///
/// Holds entries of the five physical kinds. Implementations must be
/// read-after-write consistent within a process and apply each
/// [`WriteBatch`] atomically.
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync).
pub trait FlatStore: Send + Sync {
    /// Identity of the medium behind this handle
    fn id(&self) -> StoreId;

    /// Get the current value of `name`
    ///
    /// Returns None if the entry doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn get(&self, name: &str) -> Result<Option<Value>>;

    /// Check whether `name` exists
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.get(name)?.is_some())
    }

    /// All present names, sorted
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn names(&self) -> Result<Vec<String>>;

    /// Apply a batch atomically
    ///
    /// After `Ok(())` every mutation of the batch is visible; after an error
    /// none of them is.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium fails to persist the batch.
    fn apply(&self, batch: WriteBatch) -> Result<()>;
}

impl<S: FlatStore + ?Sized> FlatStore for Box<S> {
    fn id(&self) -> StoreId {
        (**self).id()
    }

    fn get(&self, name: &str) -> Result<Option<Value>> {
        (**self).get(name)
    }

    fn contains(&self, name: &str) -> Result<bool> {
        (**self).contains(name)
    }

    fn names(&self) -> Result<Vec<String>> {
        (**self).names()
    }

    fn apply(&self, batch: WriteBatch) -> Result<()> {
        (**self).apply(batch)
    }
}

impl<S: FlatStore + ?Sized> FlatStore for std::sync::Arc<S> {
    fn id(&self) -> StoreId {
        (**self).id()
    }

    fn get(&self, name: &str) -> Result<Option<Value>> {
        (**self).get(name)
    }

    fn contains(&self, name: &str) -> Result<bool> {
        (**self).contains(name)
    }

    fn names(&self) -> Result<Vec<String>> {
        (**self).names()
    }

    fn apply(&self, batch: WriteBatch) -> Result<()> {
        (**self).apply(batch)
    }
}
