//! FileStore: durable settings file
//!
//! The whole store lives in one JSON file mapping each name to its tagged
//! physical value:
//!
//! ```json
//! {
//!   "hello": { "type": "string", "value": "Hello world!" },
//!   "times": { "type": "int", "value": 2 }
//! }
//! ```
//!
//! Entries are held in memory behind a `parking_lot::RwLock`. Every apply
//! stages the batch on a copy, persists the copy with write-(fsync)-rename,
//! and only then swaps it in. A failed persist leaves both the file and the
//! in-memory view untouched.
//!
//! Non-finite floats have no JSON representation; a batch carrying one is
//! rejected with `InvalidArgument` before anything is staged.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use prefstore_core::{Error, FlatStore, Mutation, Result, StoreId, Value, WriteBatch};

use crate::memory::apply_to;

/// How hard an apply works to reach the disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Durability {
    /// Write a temp file and rename it over the old one
    ///
    /// Atomic with respect to crashes of this process; the OS may still lose
    /// the last apply on power failure.
    #[default]
    Standard,
    /// Like `Standard`, plus fsync of the file and its directory
    Always,
}

/// Flat store persisted to a single JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    id: StoreId,
    durability: Durability,
    entries: RwLock<BTreeMap<String, Value>>,
}

impl FileStore {
    /// Open (or create) the settings file at `path`
    ///
    /// A missing file opens as an empty store; the file is only created by
    /// the first apply. The parent directory is created if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the file exists but is not a valid
    /// settings file, and [`Error::Io`] if it cannot be read.
    pub fn open(path: impl AsRef<Path>, durability: Durability) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let file_name = path
            .file_name()
            .ok_or_else(|| Error::invalid_argument(format!("'{}' is not a file path", path.display())))?;
        let canonical = fs::canonicalize(&parent)?.join(file_name);

        let entries = Self::load(&path)?;
        info!(path = %canonical.display(), entries = entries.len(), "Opened settings file");

        Ok(Self {
            id: StoreId::new(format!("file:{}", canonical.display())),
            path: canonical,
            durability,
            entries: RwLock::new(entries),
        })
    }

    fn load(path: &Path) -> Result<BTreeMap<String, Value>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            Error::storage(format!(
                "Failed to parse settings file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Path of the settings file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durability mode used by `apply`
    pub fn durability(&self) -> Durability {
        self.durability
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    /// Write `bytes` to `temp_path` and rename it over the settings file
    fn replace_with_temp(&self, temp_path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(temp_path)?;
        file.write_all(bytes)?;
        if self.durability == Durability::Always {
            file.sync_all()?;
        }
        drop(file);

        fs::rename(temp_path, &self.path)
    }

    /// Write `entries` to disk using write-(fsync)-rename
    fn persist(&self, entries: &BTreeMap<String, Value>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| Error::storage(format!("Failed to serialize settings: {}", e)))?;

        let temp_path = self.temp_path();
        if let Err(e) = self.replace_with_temp(&temp_path, &bytes) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        if self.durability == Durability::Always {
            if let Some(parent) = self.path.parent() {
                File::open(parent)?.sync_all()?;
            }
        }
        Ok(())
    }
}

fn non_finite_float(batch: &WriteBatch) -> Option<&str> {
    batch.mutations().iter().find_map(|m| match m {
        Mutation::Put {
            name,
            value: Value::Float(f),
        } if !f.is_finite() => Some(name.as_str()),
        _ => None,
    })
}

impl FlatStore for FileStore {
    fn id(&self) -> StoreId {
        self.id.clone()
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
        if let Some(name) = non_finite_float(&batch) {
            return Err(Error::invalid_argument(format!(
                "'{}': non-finite floats cannot be stored in a settings file",
                name
            )));
        }
        let mutations = batch.len();
        let mut entries = self.entries.write();
        let mut staged = entries.clone();
        apply_to(&mut staged, batch);

        if let Err(e) = self.persist(&staged) {
            warn!(path = %self.path.display(), error = %e, "Settings apply failed, nothing written");
            return Err(e);
        }
        *entries = staged;
        debug!(path = %self.path.display(), mutations, "Applied batch");
        Ok(())
    }
}
