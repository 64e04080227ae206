//! Fault injection for the flat store contract
//!
//! `FaultyStore` wraps a [`MemoryStore`] and can be armed to fail the next
//! apply after a given number of mutations have been staged. It models a
//! medium that is interrupted halfway through a batch and must therefore
//! discard the whole batch.
//!
//! # Example
//!
//! ```ignore
//! use prefstore_storage::testing::FaultyStore;
//!
//! let store = FaultyStore::new();
//! store.fail_after(2); // third staged mutation triggers the fault
//! assert!(store.apply(batch_of_three).is_err());
//! assert!(store.inner().is_empty());
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use prefstore_core::{Error, FlatStore, Result, StoreId, Value, WriteBatch};

use crate::memory::MemoryStore;

const DISARMED: usize = usize::MAX;

/// Memory store that can be told to fail mid-batch
#[derive(Debug)]
pub struct FaultyStore {
    inner: MemoryStore,
    fail_after: AtomicUsize,
    applied: AtomicUsize,
    failed: AtomicUsize,
}

impl FaultyStore {
    /// Create a disarmed store
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_after: AtomicUsize::new(DISARMED),
            applied: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    /// Fail the next apply once `mutations` mutations have been staged
    ///
    /// The fault fires once and then disarms itself.
    pub fn fail_after(&self, mutations: usize) {
        self.fail_after.store(mutations, Ordering::SeqCst);
    }

    /// Cancel a pending fault
    pub fn disarm(&self) {
        self.fail_after.store(DISARMED, Ordering::SeqCst);
    }

    /// Number of applies that committed
    pub fn applied_batches(&self) -> usize {
        self.applied.load(Ordering::SeqCst)
    }

    /// Number of applies that were interrupted
    pub fn failed_batches(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    /// The wrapped store
    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl Default for FaultyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FlatStore for FaultyStore {
    fn id(&self) -> StoreId {
        StoreId::new(format!("faulty:{}", self.inner.id()))
    }

    fn get(&self, name: &str) -> Result<Option<Value>> {
        self.inner.get(name)
    }

    fn names(&self) -> Result<Vec<String>> {
        self.inner.names()
    }

    fn apply(&self, batch: WriteBatch) -> Result<()> {
        let limit = self.fail_after.swap(DISARMED, Ordering::SeqCst);
        if limit == DISARMED || limit >= batch.len() {
            self.applied.fetch_add(1, Ordering::SeqCst);
            return self.inner.apply(batch);
        }

        // The fault hits before anything reaches the inner store
        self.failed.fetch_add(1, Ordering::SeqCst);
        Err(Error::storage(format!(
            "injected fault after {} of {} mutations; batch discarded",
            limit,
            batch.len()
        )))
    }
}
