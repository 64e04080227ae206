//! Typed settings engine for prefstore
//!
//! This crate layers the caller-facing facade over a `FlatStore`:
//! - Prefs: typed reads, atomic writes, counters, delete and format
//! - BatchWriter: chained writes committed in one apply
//! - VersionTracker: one-shot application version change report
//! - drive_upgrade: storage-schema migrations keyed on a drive version
//! - PrefsGate: lazily-opened process-wide instance
//! - PrefsConfig: `prefstore.toml` in the data directory
//!
//! One store has at most one live `Prefs`; a second binding fails with
//! `IllegalUse`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod config;
pub mod gate;
pub mod prefs;
pub mod registry;
pub mod upgrade;
pub mod version;

pub use batch::BatchWriter;
pub use config::{PrefsConfig, CONFIG_FILE_NAME};
pub use gate::PrefsGate;
pub use prefs::Prefs;
pub use registry::is_bound;
pub use upgrade::DRIVE_VERSION_KEY;
pub use version::{VersionState, VersionTracker, APP_VERSION_KEY};
