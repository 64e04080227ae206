//! prefstore - typed settings on top of a flat key-value store
//!
//! prefstore stores booleans, ints, floats, longs and strings under names in
//! a flat store, and anything richer as encoded text. Reads are type-exact,
//! multi-entry writes are atomic, and a one-shot version report tells the
//! application when it has been upgraded since the last run.
//!
//! # Quick Start
//!
//! ```ignore
//! use prefstore::Prefs;
//!
//! // Open (or create) the settings kept in a directory
//! let prefs = prefstore::open("data")?;
//!
//! prefs.write("user", "ada")?;
//! prefs.write_all([("launches", 1), ("seen_intro", 0)])?;
//!
//! let user = prefs.read_string("user")?;
//! let tags: Option<Vec<String>> = prefs.read("tags")?;
//!
//! if prefs.check_update().is_updated() {
//!     // show release notes
//! }
//! ```
//!
//! # Architecture
//!
//! - `prefstore-core`: values, batches, the `FlatStore` and `Codec` traits, errors
//! - `prefstore-storage`: `MemoryStore`, `FileStore` and fault injection
//! - `prefstore-engine`: the `Prefs` facade, version tracking, gate and config

use std::path::Path;

pub use prefstore_core::{
    pref_enum, Codec, Error, FlatStore, JsonCodec, Kind, Mutation, PrefEnum, Result, StoreId,
    Value, Versions, WriteBatch, WriteValue,
};
pub use prefstore_engine::{
    is_bound, BatchWriter, Prefs, PrefsConfig, PrefsGate, VersionState, APP_VERSION_KEY,
    CONFIG_FILE_NAME, DRIVE_VERSION_KEY,
};
pub use prefstore_storage::{testing, Durability, FileStore, MemoryStore};

/// Open the settings kept in `dir`
///
/// Creates `dir` and a default `prefstore.toml` on first use, then opens the
/// settings file named there with the configured durability and application
/// version.
pub fn open(dir: impl AsRef<Path>) -> Result<Prefs<FileStore>> {
    Prefs::open_dir(dir)
}
