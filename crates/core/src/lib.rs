//! Core types and traits for prefstore
//!
//! This crate defines the foundational types used throughout the system:
//! - Value / Kind: the five physical kinds a flat store holds
//! - WriteValue: closed variant type handed to the write path
//! - WriteBatch / Mutation: ordered mutations applied atomically
//! - FlatStore / StoreId: the storage medium abstraction
//! - Codec / JsonCodec: structured values to and from text
//! - PrefEnum: enums stored by symbolic name
//! - Versions: (previous, current) version pair
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod codec;
pub mod enums;
pub mod error;
pub mod traits;
pub mod value;
pub mod versions;
pub mod write_value;

// Re-export commonly used types and traits
pub use batch::{Mutation, WriteBatch};
pub use codec::{Codec, JsonCodec};
pub use enums::PrefEnum;
pub use error::{Error, Result};
pub use traits::{FlatStore, StoreId};
pub use value::{Kind, Value};
pub use versions::Versions;
pub use write_value::WriteValue;
