//! WriteBatch: an ordered set of mutations applied atomically
//!
//! A batch is what a settings editor accumulates between "begin edit" and
//! "apply". Stores must make the whole batch visible at once or not at all.
//!
//! ## Ordering
//!
//! - If `clear()` was requested, the store is wiped first, regardless of
//!   when `clear()` was called on the batch
//! - Mutations are then applied in insertion order, so the last write to a
//!   name wins

use crate::value::Value;

/// A single change to one entry
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Insert or overwrite `name`
    Put {
        /// Entry name
        name: String,
        /// Physical value
        value: Value,
    },
    /// Remove `name` (no-op if absent)
    Remove {
        /// Entry name
        name: String,
    },
}

impl Mutation {
    /// Name this mutation targets
    pub fn name(&self) -> &str {
        match self {
            Mutation::Put { name, .. } | Mutation::Remove { name } => name,
        }
    }
}

/// Ordered mutations plus an optional clear, applied as one unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    clear: bool,
    mutations: Vec<Mutation>,
}

impl WriteBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a physical value
    pub fn put(&mut self, name: impl Into<String>, value: Value) -> &mut Self {
        self.mutations.push(Mutation::Put {
            name: name.into(),
            value,
        });
        self
    }

    /// Put a boolean
    pub fn put_bool(&mut self, name: impl Into<String>, value: bool) -> &mut Self {
        self.put(name, Value::Bool(value))
    }

    /// Put a 32-bit integer
    pub fn put_int(&mut self, name: impl Into<String>, value: i32) -> &mut Self {
        self.put(name, Value::Int(value))
    }

    /// Put a 32-bit float
    pub fn put_float(&mut self, name: impl Into<String>, value: f32) -> &mut Self {
        self.put(name, Value::Float(value))
    }

    /// Put a 64-bit integer
    pub fn put_long(&mut self, name: impl Into<String>, value: i64) -> &mut Self {
        self.put(name, Value::Long(value))
    }

    /// Put a string
    pub fn put_string(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.put(name, Value::String(value.into()))
    }

    /// Remove an entry
    pub fn remove(&mut self, name: impl Into<String>) -> &mut Self {
        self.mutations.push(Mutation::Remove { name: name.into() });
        self
    }

    /// Wipe every entry before the mutations are applied
    pub fn clear(&mut self) -> &mut Self {
        self.clear = true;
        self
    }

    /// Whether this batch wipes the store first
    pub fn clears(&self) -> bool {
        self.clear
    }

    /// Mutations in application order
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Number of mutations (the clear flag is not counted)
    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    /// True when applying this batch would change nothing
    pub fn is_empty(&self) -> bool {
        !self.clear && self.mutations.is_empty()
    }

    /// Consume into (clear flag, mutations)
    pub fn into_parts(self) -> (bool, Vec<Mutation>) {
        (self.clear, self.mutations)
    }
}
