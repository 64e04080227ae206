//! Codec: structured values to and from text
//!
//! Anything that is not one of the five physical kinds is stored as a string
//! produced by a [`Codec`]. The Rust type requested at read time is the type
//! descriptor: `decode::<HashMap<String, Person>>` decodes nested generic
//! shapes without any runtime type token.
//!
//! ## Blank construction
//!
//! An entry holding the empty string is "present but empty". `decode_blank`
//! tries to build the requested type out of nothing: first from an empty
//! sequence (sets, lists), then from an empty map (maps, structs whose fields
//! all carry serde defaults). Types that can be built neither way yield `None`.

use serde::de::value::{Error as ValueError, MapDeserializer, SeqDeserializer};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

/// Text codec for structured values
pub trait Codec: Send + Sync {
    /// Encode `value` to text
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if the value cannot be represented.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String>;

    /// Decode `text` into `T`
    ///
    /// `name` is the entry being decoded, used for error context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if `text` is not a valid encoding of `T`.
    fn decode<T: DeserializeOwned>(&self, name: &str, text: &str) -> Result<T>;

    /// Build an empty `T`, if `T` can be built out of nothing
    fn decode_blank<T: DeserializeOwned>(&self) -> Option<T> {
        let empty_seq = SeqDeserializer::<_, ValueError>::new(std::iter::empty::<()>());
        if let Ok(value) = T::deserialize(empty_seq) {
            return Some(value);
        }
        let empty_map = MapDeserializer::<_, ValueError>::new(std::iter::empty::<((), ())>());
        T::deserialize(empty_map).ok()
    }
}

/// JSON codec backed by `serde_json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        serde_json::to_string(value).map_err(|e| Error::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, name: &str, text: &str) -> Result<T> {
        serde_json::from_str(text).map_err(|e| Error::decode(name, e))
    }
}
