//! Storage-schema migrations driven by a drive version
//!
//! The drive version is tracked independently of the application version
//! under its own reserved entry. It describes the layout of the stored
//! settings, so a migration can run when the layout changes even if the
//! application version did not.

use tracing::{info, warn};

use prefstore_core::{Codec, FlatStore, Result, Versions};

use crate::prefs::Prefs;
use crate::version::{persist_version, stored_version, validate_version};

/// Reserved entry holding the drive version of the last run
pub const DRIVE_VERSION_KEY: &str = "__PREFS_DRIVE_VERSION__";

impl<S: FlatStore, C: Codec> Prefs<S, C> {
    /// Run `migrate` against the previously recorded drive version
    ///
    /// If some drive version was recorded before, `migrate` is called once
    /// with `(self, previous, version)`, also when the two are equal. A store
    /// that never recorded one only gets `version` written.
    ///
    /// The new version is persisted before `migrate` runs, so the migration
    /// observes it under [`DRIVE_VERSION_KEY`]. If `migrate` fails, the
    /// previous version is written back and the migration is offered again
    /// on the next run.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a negative version, the error returned by
    /// `migrate`, or a store error.
    pub fn drive_upgrade<F>(&self, version: i32, migrate: F) -> Result<Versions>
    where
        F: FnOnce(&Self, i32, i32) -> Result<()>,
    {
        validate_version(version)?;
        let previous = stored_version(&self.store, DRIVE_VERSION_KEY)?;

        if previous != version {
            persist_version(&self.store, DRIVE_VERSION_KEY, version)?;
            info!(previous, current = version, "Drive version recorded");
        }

        if previous >= 0 {
            if let Err(e) = migrate(self, previous, version) {
                warn!(previous, current = version, error = %e, "Drive upgrade failed");
                if previous != version {
                    let restored = persist_version(&self.store, DRIVE_VERSION_KEY, previous);
                    if let Err(restore) = restored {
                        warn!(previous, error = %restore, "Failed to restore drive version");
                    }
                }
                return Err(e);
            }
        }

        Ok(if previous >= 0 {
            Versions::new(previous, version)
        } else {
            Versions::unchanged(version)
        })
    }
}
