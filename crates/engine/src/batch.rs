//! Chained batch writer
//!
//! Collects writes of any kind and applies them to the store in one atomic
//! apply on [`BatchWriter::commit`]. Dropping a writer without committing
//! discards it; the store is never touched before commit.

use serde::Serialize;

use prefstore_core::{Codec, FlatStore, PrefEnum, Result, WriteBatch, WriteValue};

use crate::prefs::Prefs;

/// Lower one `WriteValue` into `batch`
pub(crate) fn lower(batch: &mut WriteBatch, name: String, value: WriteValue) {
    match value.into_physical() {
        Some(value) => batch.put(name, value),
        None => batch.remove(name),
    };
}

/// Pending writes against one `Prefs`
#[must_use = "a batch writer does nothing until committed"]
pub struct BatchWriter<'a, S, C> {
    prefs: &'a Prefs<S, C>,
    batch: WriteBatch,
}

impl<S: FlatStore, C: Codec> Prefs<S, C> {
    /// Start a batch of writes
    ///
    /// ```ignore
    /// prefs.batch()
    ///     .write("user", "ada")
    ///     .write("age", 36)
    ///     .delete("stale")
    ///     .commit()?;
    /// ```
    pub fn batch(&self) -> BatchWriter<'_, S, C> {
        BatchWriter {
            prefs: self,
            batch: WriteBatch::new(),
        }
    }
}

impl<'a, S: FlatStore, C: Codec> BatchWriter<'a, S, C> {
    /// Queue a write
    pub fn write(mut self, name: impl Into<String>, value: impl Into<WriteValue>) -> Self {
        lower(&mut self.batch, name.into(), value.into());
        self
    }

    /// Queue a structured value, encoding it now
    ///
    /// An encoding failure abandons the whole batch.
    pub fn write_object<T: Serialize + ?Sized>(
        self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<Self> {
        let encoded = self.prefs.encode(value)?;
        Ok(self.write(name, encoded))
    }

    /// Queue an enum variant by name
    pub fn write_enum<E: PrefEnum>(self, name: impl Into<String>, value: &E) -> Self {
        self.write(name, WriteValue::from_enum(value))
    }

    /// Queue a removal
    pub fn delete(mut self, name: impl Into<String>) -> Self {
        self.batch.remove(name);
        self
    }

    /// Number of queued mutations
    pub fn len(&self) -> usize {
        self.batch.len()
    }

    /// True if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// Apply every queued write at once
    pub fn commit(self) -> Result<()> {
        self.prefs.apply(self.batch)
    }
}
