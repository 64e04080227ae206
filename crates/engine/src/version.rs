//! Version tracking: one-shot report of an application version change
//!
//! ## State machine
//!
//! ```text
//!   Unset ──open──▶ Fresh(previous, current) ──check_update──▶ Consumed { current }
//!                                                                  │   ▲
//!                                                                  └───┘ check_update
//! ```
//!
//! `Unset` is the time before a `Prefs` exists; there is no tracker to ask.
//! The first `check_update` after open reports the real pair; every later
//! call reports `(current, current)`.
//!
//! The version is persisted as an ordinary `Int` entry under a reserved name.

use parking_lot::Mutex;
use tracing::info;

use prefstore_core::{Error, FlatStore, Kind, Result, Value, Versions, WriteBatch};

/// Reserved entry holding the application version of the last run
pub const APP_VERSION_KEY: &str = "__APP_VERSION_CODE";

/// Sentinel for "no version stored"
pub(crate) const NO_VERSION: i32 = -1;

/// Read a version entry, `NO_VERSION` if absent
pub(crate) fn stored_version<S: FlatStore + ?Sized>(store: &S, key: &str) -> Result<i32> {
    match store.get(key)? {
        None => Ok(NO_VERSION),
        Some(Value::Int(v)) => Ok(v),
        Some(other) => Err(Error::type_mismatch(key, Kind::Int, other.kind())),
    }
}

/// Write a version entry
pub(crate) fn persist_version<S: FlatStore + ?Sized>(store: &S, key: &str, version: i32) -> Result<()> {
    let mut batch = WriteBatch::new();
    batch.put_int(key, version);
    store.apply(batch)
}

/// Reject versions that collide with the "absent" sentinel
pub(crate) fn validate_version(version: i32) -> Result<()> {
    if version < 0 {
        return Err(Error::invalid_argument(format!(
            "version must be non-negative, got {}",
            version
        )));
    }
    Ok(())
}

/// Observable state of the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionState {
    /// Versions computed at open, not yet reported
    Fresh(Versions),
    /// Reported once; only the current version is retained
    Consumed {
        /// Version of the current run
        current: i32,
    },
}

/// One-shot version change detector
#[derive(Debug)]
pub struct VersionTracker {
    state: Mutex<VersionState>,
}

impl VersionTracker {
    /// Compare the stored version with `current` and persist `current`
    ///
    /// A store that never held a version reports `(current, current)`: the
    /// first run is never an update.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if the reserved entry is not an `Int`, or the
    /// store's error if persisting fails.
    pub fn initialize<S: FlatStore + ?Sized>(store: &S, current: i32) -> Result<Self> {
        validate_version(current)?;
        let previous = stored_version(store, APP_VERSION_KEY)?;
        if previous != current {
            persist_version(store, APP_VERSION_KEY, current)?;
        }

        let versions = if previous < 0 {
            Versions::unchanged(current)
        } else {
            Versions::new(previous, current)
        };
        if previous >= 0 && previous != current {
            info!(previous, current, "Application version changed");
        }
        Ok(Self::fresh(versions))
    }

    /// Tracker in the `Fresh` state
    pub fn fresh(versions: Versions) -> Self {
        Self {
            state: Mutex::new(VersionState::Fresh(versions)),
        }
    }

    /// Current state
    pub fn state(&self) -> VersionState {
        *self.state.lock()
    }

    /// Report the versions, consuming the change
    pub fn check_update(&self) -> Versions {
        let mut state = self.state.lock();
        match *state {
            VersionState::Fresh(versions) => {
                *state = VersionState::Consumed {
                    current: versions.current(),
                };
                versions
            }
            VersionState::Consumed { current } => Versions::unchanged(current),
        }
    }
}
