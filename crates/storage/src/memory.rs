//! MemoryStore: process-local flat store
//!
//! This module implements the FlatStore trait using:
//! - `BTreeMap<String, Value>` so `names()` comes back sorted for free
//! - `parking_lot::RwLock` for thread-safe access
//!
//! A batch is applied under a single write lock, so concurrent readers see
//! either none or all of it.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use prefstore_core::{FlatStore, Mutation, Result, StoreId, Value, WriteBatch};

static NEXT_MEMORY_ID: AtomicU64 = AtomicU64::new(1);

/// Apply a batch to a map in place
///
/// Clear first (if requested), then mutations in order.
pub(crate) fn apply_to(entries: &mut BTreeMap<String, Value>, batch: WriteBatch) {
    let (clear, mutations) = batch.into_parts();
    if clear {
        entries.clear();
    }
    for mutation in mutations {
        match mutation {
            Mutation::Put { name, value } => {
                entries.insert(name, value);
            }
            Mutation::Remove { name } => {
                entries.remove(&name);
            }
        }
    }
}

/// In-memory flat store
///
/// Every `MemoryStore` is its own medium with a unique [`StoreId`]; share
/// one between owners through `Arc<MemoryStore>`.
#[derive(Debug)]
pub struct MemoryStore {
    id: u64,
    entries: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::with_entries(BTreeMap::new())
    }

    /// Create a store pre-populated with `entries`
    pub fn with_entries(entries: BTreeMap<String, Value>) -> Self {
        Self {
            id: NEXT_MEMORY_ID.fetch_add(1, Ordering::Relaxed),
            entries: RwLock::new(entries),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Copy of every entry
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.entries.read().clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FlatStore for MemoryStore {
    fn id(&self) -> StoreId {
        StoreId::new(format!("memory:{}", self.id))
    }

    fn get(&self, name: &str) -> Result<Option<Value>> {
        Ok(self.entries.read().get(name).cloned())
    }

    fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.entries.read().contains_key(name))
    }

    fn names(&self) -> Result<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }

    fn apply(&self, batch: WriteBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let mut entries = self.entries.write();
        apply_to(&mut entries, batch);
        Ok(())
    }
}
