//! Typed accessor over a flat store
//!
//! `Prefs` is the facade callers use: it checks physical kinds on read,
//! routes structured values through a [`Codec`], lowers every write into a
//! single [`WriteBatch`], and owns the version tracker for its store.
//!
//! ## Read semantics
//!
//! | Accessor | Absent | Same kind | Other kind |
//! |----------|--------|-----------|------------|
//! | `read_int` and friends | zero value | value | `TypeMismatch` |
//! | `read_*_or` | caller default | value | `TypeMismatch` |
//! | `read_string` / `read::<T>` | `None` | value | `TypeMismatch` |
//!
//! An entry holding the empty string reads through `read::<T>` as a blank
//! `T` when one can be constructed (empty set, list, map, or all-default
//! struct) and as `None` otherwise.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use prefstore_core::{
    Codec, Error, FlatStore, JsonCodec, Kind, PrefEnum, Result, Value, Versions, WriteBatch,
    WriteValue,
};
use prefstore_storage::FileStore;

use crate::batch::lower;
use crate::config::PrefsConfig;
use crate::registry::Binding;
use crate::upgrade::DRIVE_VERSION_KEY;
use crate::version::{VersionState, VersionTracker, APP_VERSION_KEY};

/// Typed settings facade bound to one store
///
/// At most one `Prefs` can be live for a given store at a time; share it
/// through a [`PrefsGate`](crate::PrefsGate) or by reference.
pub struct Prefs<S, C = JsonCodec> {
    pub(crate) store: S,
    pub(crate) codec: C,
    versions: VersionTracker,
    _binding: Binding,
}

impl<S: FlatStore> Prefs<S, JsonCodec> {
    /// Bind to `store` with the JSON codec
    ///
    /// `app_version` is compared with the version recorded by the previous
    /// run; see [`check_update`](Self::check_update).
    ///
    /// # Errors
    ///
    /// Returns `IllegalUse` if another live `Prefs` is bound to the same
    /// store, `InvalidArgument` for a negative version, and any store error
    /// raised while recording the version.
    pub fn open(store: S, app_version: i32) -> Result<Self> {
        Self::open_with_codec(store, JsonCodec, app_version)
    }
}

impl Prefs<FileStore, JsonCodec> {
    /// Open the settings kept in `dir`
    ///
    /// Reads (or creates) `prefstore.toml` in `dir`, opens the settings file
    /// it names with its durability mode, and reports its `app_version`.
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let config = PrefsConfig::load_or_init(dir)?;
        let store = config.open_file_store(dir)?;
        Self::open(store, config.app_version)
    }
}

impl<S: FlatStore, C: Codec> Prefs<S, C> {
    /// Bind to `store` using `codec` for structured values
    pub fn open_with_codec(store: S, codec: C, app_version: i32) -> Result<Self> {
        let binding = Binding::acquire(store.id())?;
        let versions = VersionTracker::initialize(&store, app_version)?;
        debug!(store = %binding.id(), app_version, "Bound prefs to store");
        Ok(Self {
            store,
            codec,
            versions,
            _binding: binding,
        })
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The codec used for structured values
    pub fn codec(&self) -> &C {
        &self.codec
    }

    // ========================================================================
    // Primitive reads
    // ========================================================================

    fn read_kind<T>(
        &self,
        name: &str,
        expected: Kind,
        extract: impl FnOnce(Value) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.store.get(name)? {
            None => Ok(None),
            Some(value) => {
                let actual = value.kind();
                extract(value)
                    .map(Some)
                    .ok_or_else(|| Error::type_mismatch(name, expected, actual))
            }
        }
    }

    /// Boolean under `name`, `false` if absent
    pub fn read_bool(&self, name: &str) -> Result<bool> {
        self.read_bool_or(name, false)
    }

    /// Boolean under `name`, `default` if absent
    pub fn read_bool_or(&self, name: &str, default: bool) -> Result<bool> {
        Ok(self
            .read_kind(name, Kind::Bool, |v| v.as_bool())?
            .unwrap_or(default))
    }

    /// Int under `name`, `0` if absent
    pub fn read_int(&self, name: &str) -> Result<i32> {
        self.read_int_or(name, 0)
    }

    /// Int under `name`, `default` if absent
    pub fn read_int_or(&self, name: &str, default: i32) -> Result<i32> {
        Ok(self
            .read_kind(name, Kind::Int, |v| v.as_int())?
            .unwrap_or(default))
    }

    /// Float under `name`, `0.0` if absent
    pub fn read_float(&self, name: &str) -> Result<f32> {
        self.read_float_or(name, 0.0)
    }

    /// Float under `name`, `default` if absent
    pub fn read_float_or(&self, name: &str, default: f32) -> Result<f32> {
        Ok(self
            .read_kind(name, Kind::Float, |v| v.as_float())?
            .unwrap_or(default))
    }

    /// Long under `name`, `0` if absent
    pub fn read_long(&self, name: &str) -> Result<i64> {
        self.read_long_or(name, 0)
    }

    /// Long under `name`, `default` if absent
    pub fn read_long_or(&self, name: &str, default: i64) -> Result<i64> {
        Ok(self
            .read_kind(name, Kind::Long, |v| v.as_long())?
            .unwrap_or(default))
    }

    /// String under `name`, `None` if absent
    pub fn read_string(&self, name: &str) -> Result<Option<String>> {
        self.read_kind(name, Kind::String, Value::into_string)
    }

    /// String under `name`, `default` if absent
    pub fn read_string_or(&self, name: &str, default: &str) -> Result<String> {
        Ok(self
            .read_string(name)?
            .unwrap_or_else(|| default.to_string()))
    }

    // ========================================================================
    // Structured reads
    // ========================================================================

    /// Decode the structured value under `name` as `T`
    ///
    /// Returns `Ok(None)` if the entry is absent, or if it holds the empty
    /// string and `T` cannot be built blank.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the entry is not a string, `Decode` if its text is
    /// not a valid encoding of `T`.
    pub fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let Some(text) = self.read_string(name)? else {
            return Ok(None);
        };
        if text.is_empty() {
            let blank = self.codec.decode_blank::<T>();
            debug!(name = %name, constructed = blank.is_some(), "Blank construction for empty entry");
            return Ok(blank);
        }
        self.codec.decode(name, &text).map(Some)
    }

    /// Set of strings under `name`
    pub fn read_string_set(&self, name: &str) -> Result<Option<HashSet<String>>> {
        self.read(name)
    }

    /// Set of ints under `name`
    pub fn read_int_set(&self, name: &str) -> Result<Option<HashSet<i32>>> {
        self.read(name)
    }

    /// List of strings under `name`
    pub fn read_string_list(&self, name: &str) -> Result<Option<Vec<String>>> {
        self.read(name)
    }

    /// List of ints under `name`
    pub fn read_int_list(&self, name: &str) -> Result<Option<Vec<i32>>> {
        self.read(name)
    }

    /// String-to-string map under `name`
    pub fn read_string_map(&self, name: &str) -> Result<Option<HashMap<String, String>>> {
        self.read(name)
    }

    /// String-to-int map under `name`
    pub fn read_int_map(&self, name: &str) -> Result<Option<HashMap<String, i32>>> {
        self.read(name)
    }

    /// Enum variant stored by name under `name`, `default` if absent
    ///
    /// # Errors
    ///
    /// `Decode` if the stored name matches no variant of `E`.
    pub fn read_enum<E: PrefEnum>(&self, name: &str, default: E) -> Result<E> {
        match self.read_string(name)? {
            None => Ok(default),
            Some(stored) => E::from_name(&stored).ok_or_else(|| {
                Error::decode(
                    name,
                    format!(
                        "'{}' is not a variant of {}",
                        stored,
                        std::any::type_name::<E>()
                    ),
                )
            }),
        }
    }

    /// True if every name in `names` is present
    pub fn contains(&self, names: &[&str]) -> Result<bool> {
        for name in names {
            if !self.store.contains(name)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// All present names, sorted
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names = self.store.names()?;
        names.sort();
        Ok(names)
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Encode `value` with this instance's codec
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<WriteValue> {
        self.codec.encode(value).map(WriteValue::Encoded)
    }

    /// Write one entry
    ///
    /// `WriteValue::Remove` (or `None` for an `Option`) removes the entry.
    pub fn write(&self, name: impl Into<String>, value: impl Into<WriteValue>) -> Result<()> {
        let mut batch = WriteBatch::new();
        lower(&mut batch, name.into(), value.into());
        self.store.apply(batch)
    }

    /// Write a structured value under `name`
    pub fn write_object<T: Serialize + ?Sized>(
        &self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<()> {
        let encoded = self.encode(value)?;
        self.write(name, encoded)
    }

    /// Write an enum variant by name
    pub fn write_enum<E: PrefEnum>(&self, name: impl Into<String>, value: &E) -> Result<()> {
        self.write(name, WriteValue::from_enum(value))
    }

    /// Write every pair in one atomic apply
    pub fn write_all<I, N, V>(&self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<WriteValue>,
    {
        let mut batch = WriteBatch::new();
        for (name, value) in pairs {
            lower(&mut batch, name.into(), value.into());
        }
        self.apply(batch)
    }

    /// Write a flat `name, value, name, value, ...` argument list atomically
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the list has an odd length or a name position
    /// does not hold a string. Nothing is written in either case.
    pub fn write_flat(&self, args: Vec<WriteValue>) -> Result<()> {
        if args.len() % 2 != 0 {
            return Err(Error::invalid_argument(format!(
                "expected name/value pairs, got {} arguments",
                args.len()
            )));
        }

        let mut batch = WriteBatch::new();
        let mut args = args.into_iter().enumerate();
        while let (Some((position, name)), Some((_, value))) = (args.next(), args.next()) {
            match name {
                WriteValue::Str(name) => lower(&mut batch, name, value),
                other => {
                    return Err(Error::invalid_argument(format!(
                        "argument {} must be an entry name, got {:?}",
                        position, other
                    )))
                }
            }
        }
        self.apply(batch)
    }

    /// Add one to the int under `name` (or `default` if absent)
    ///
    /// Saturates at `i32::MAX`. Not atomic with respect to other writers.
    pub fn increment(&self, name: &str, default: i32) -> Result<i32> {
        let next = self.read_int_or(name, default)?.saturating_add(1);
        self.write(name, next)?;
        Ok(next)
    }

    /// Subtract one from the int under `name` (or `default` if absent)
    ///
    /// Saturates at `i32::MIN`. Not atomic with respect to other writers.
    pub fn decrement(&self, name: &str, default: i32) -> Result<i32> {
        let next = self.read_int_or(name, default)?.saturating_sub(1);
        self.write(name, next)?;
        Ok(next)
    }

    /// Remove every entry in `names` in one apply
    pub fn delete(&self, names: &[&str]) -> Result<()> {
        let mut batch = WriteBatch::new();
        for name in names {
            batch.remove(*name);
        }
        self.apply(batch)
    }

    /// Remove every entry, keeping the recorded versions
    pub fn format(&self) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.clear();
        for key in [APP_VERSION_KEY, DRIVE_VERSION_KEY] {
            if let Some(value) = self.store.get(key)? {
                batch.put(key, value);
            }
        }
        debug!(store = %self.store.id(), "Formatting store");
        self.store.apply(batch)
    }

    pub(crate) fn apply(&self, batch: WriteBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        debug!(store = %self.store.id(), mutations = batch.len(), "Applying batch");
        self.store.apply(batch)
    }

    // ========================================================================
    // Versions
    // ========================================================================

    /// Report the application version change, once
    ///
    /// The first call after open returns `(previous, current)`; later calls
    /// return `(current, current)`.
    pub fn check_update(&self) -> Versions {
        self.versions.check_update()
    }

    /// State of the version tracker
    pub fn version_state(&self) -> VersionState {
        self.versions.state()
    }
}

impl<S: FlatStore, C> fmt::Debug for Prefs<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prefs")
            .field("store", &self.store.id())
            .field("versions", &self.versions.state())
            .finish_non_exhaustive()
    }
}
