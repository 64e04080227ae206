//! Global binding registry for single-owner stores
//!
//! Ensures at most one live `Prefs` is bound to a given storage medium.
//! A binding is released when the `Prefs` holding it is dropped.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashSet;

use prefstore_core::{Error, Result, StoreId};

// =============================================================================
// Global Binding Registry
// =============================================================================
//
// Two facades over the same medium would each believe they own the version
// entries and the one-shot update report. The registry turns that mistake
// into an IllegalUse error at construction time.
//
// Uses parking_lot::Mutex instead of std::sync::Mutex to avoid cascading
// panics from mutex poisoning.

/// Global set of stores with a live binding
static BOUND_STORES: Lazy<Mutex<HashSet<StoreId>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// Exclusive claim on one store, released on drop
#[derive(Debug)]
pub(crate) struct Binding {
    id: StoreId,
}

impl Binding {
    /// Claim `id`
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalUse`] if another live binding holds `id`.
    pub(crate) fn acquire(id: StoreId) -> Result<Self> {
        let mut bound = BOUND_STORES.lock();
        if !bound.insert(id.clone()) {
            return Err(Error::IllegalUse(format!(
                "store '{}' is already bound to a live Prefs instance; share it through a PrefsGate instead",
                id
            )));
        }
        Ok(Self { id })
    }

    /// Store this binding holds
    pub(crate) fn id(&self) -> &StoreId {
        &self.id
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        BOUND_STORES.lock().remove(&self.id);
    }
}

/// Whether some live `Prefs` is bound to `id`
pub fn is_bound(id: &StoreId) -> bool {
    BOUND_STORES.lock().contains(id)
}
