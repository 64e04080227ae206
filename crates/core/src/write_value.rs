//! WriteValue: what a caller hands to the write path
//!
//! The write path dispatches on the variant, never on how the entry will
//! later be read:
//!
//! | Variant | Stored as |
//! |---------|-----------|
//! | `Remove` | entry removed |
//! | `Bool` / `Int` / `Float` / `Long` / `Str` | matching physical kind |
//! | `EnumName` | `String` holding the variant name |
//! | `Encoded` | `String` holding the codec output |
//!
//! Primitives are never routed through the codec, so a primitive read stays
//! type-exact.

use crate::enums::PrefEnum;
use crate::value::Value;

/// A value to be written under one name
#[derive(Debug, Clone, PartialEq)]
pub enum WriteValue {
    /// Remove the entry
    Remove,
    /// Boolean
    Bool(bool),
    /// 32-bit integer
    Int(i32),
    /// 32-bit float
    Float(f32),
    /// 64-bit integer
    Long(i64),
    /// Plain string
    Str(String),
    /// Symbolic name of an enum variant
    EnumName(String),
    /// Codec output for a structured value
    Encoded(String),
}

impl WriteValue {
    /// Store an enum by its variant name
    pub fn from_enum<E: PrefEnum>(value: &E) -> Self {
        WriteValue::EnumName(value.name().to_string())
    }

    /// Physical value this lowers to, or None for `Remove`
    pub fn into_physical(self) -> Option<Value> {
        match self {
            WriteValue::Remove => None,
            WriteValue::Bool(b) => Some(Value::Bool(b)),
            WriteValue::Int(i) => Some(Value::Int(i)),
            WriteValue::Float(f) => Some(Value::Float(f)),
            WriteValue::Long(l) => Some(Value::Long(l)),
            WriteValue::Str(s) | WriteValue::EnumName(s) | WriteValue::Encoded(s) => {
                Some(Value::String(s))
            }
        }
    }

    /// True for `Remove`
    pub fn is_remove(&self) -> bool {
        matches!(self, WriteValue::Remove)
    }
}

impl From<bool> for WriteValue {
    fn from(b: bool) -> Self {
        WriteValue::Bool(b)
    }
}

impl From<i32> for WriteValue {
    fn from(i: i32) -> Self {
        WriteValue::Int(i)
    }
}

impl From<f32> for WriteValue {
    fn from(f: f32) -> Self {
        WriteValue::Float(f)
    }
}

impl From<i64> for WriteValue {
    fn from(l: i64) -> Self {
        WriteValue::Long(l)
    }
}

impl From<&str> for WriteValue {
    fn from(s: &str) -> Self {
        WriteValue::Str(s.to_string())
    }
}

impl From<String> for WriteValue {
    fn from(s: String) -> Self {
        WriteValue::Str(s)
    }
}

impl From<Value> for WriteValue {
    fn from(v: Value) -> Self {
        match v {
            Value::Bool(b) => WriteValue::Bool(b),
            Value::Int(i) => WriteValue::Int(i),
            Value::Float(f) => WriteValue::Float(f),
            Value::Long(l) => WriteValue::Long(l),
            Value::String(s) => WriteValue::Str(s),
        }
    }
}

impl<T: Into<WriteValue>> From<Option<T>> for WriteValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => WriteValue::Remove,
        }
    }
}
