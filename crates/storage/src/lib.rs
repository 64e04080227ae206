//! Storage layer for prefstore
//!
//! This crate implements the flat settings medium behind the `FlatStore`
//! trait:
//! - MemoryStore: BTreeMap with RwLock, process-local
//! - FileStore: durable JSON settings file with write-fsync-rename applies
//! - testing::FaultyStore: fault injection for the atomic-apply contract
//!
//! Every store applies a `WriteBatch` all-or-nothing.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod file;
pub mod memory;
pub mod testing;

pub use file::{Durability, FileStore};
pub use memory::MemoryStore;
