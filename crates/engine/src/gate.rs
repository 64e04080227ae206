//! Lazily-initialized shared access to one `Prefs`
//!
//! A `PrefsGate` can live in a `static`. The first successful
//! [`get_or_open`](PrefsGate::get_or_open) stores the instance; every caller
//! afterwards gets a reference to the same one. Concurrent first callers race
//! safely: the opener runs for exactly one of them.

use once_cell::sync::OnceCell;

use prefstore_core::{JsonCodec, Result};

use crate::prefs::Prefs;

/// Holder for a process-wide `Prefs`
///
/// ```ignore
/// static PREFS: PrefsGate<FileStore> = PrefsGate::new();
///
/// let prefs = PREFS.get_or_open(|| Prefs::open_dir("data"))?;
/// ```
pub struct PrefsGate<S, C = JsonCodec> {
    cell: OnceCell<Prefs<S, C>>,
}

impl<S, C> PrefsGate<S, C> {
    /// Empty gate
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// The instance, if one has been opened
    pub fn get(&self) -> Option<&Prefs<S, C>> {
        self.cell.get()
    }

    /// The instance, opening it with `open` on first use
    ///
    /// A failed `open` leaves the gate empty; the next call tries again.
    pub fn get_or_open<F>(&self, open: F) -> Result<&Prefs<S, C>>
    where
        F: FnOnce() -> Result<Prefs<S, C>>,
    {
        self.cell.get_or_try_init(open)
    }

    /// True once an instance has been opened
    pub fn is_open(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<S, C> Default for PrefsGate<S, C> {
    fn default() -> Self {
        Self::new()
    }
}
