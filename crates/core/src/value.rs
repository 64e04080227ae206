//! Physical value types for prefstore
//!
//! This module defines:
//! - Value: the five physical kinds a flat settings store holds natively
//! - Kind: the tag of a physical kind, used in type-mismatch errors
//!
//! ## Physical Value Model
//!
//! A flat store knows exactly five kinds of value:
//! - Bool, Int (32-bit), Float (32-bit), Long (64-bit), String
//!
//! Anything richer (sets, lists, maps, records, enums) is stored as a
//! `String` holding its encoding. The store carries no type information
//! beyond these five kinds.
//!
//! ### Type Rules
//!
//! - No implicit coercions: `Int(1)` is not `Long(1)`, and is never read back as one
//! - Different kinds are NEVER equal
//! - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical kind of a stored entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Boolean
    Bool,
    /// 32-bit signed integer
    Int,
    /// 32-bit floating point
    Float,
    /// 64-bit signed integer
    Long,
    /// UTF-8 string (also carries every encoded value)
    String,
}

impl Kind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Long => "long",
            Kind::String => "string",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value as the flat store physically holds it
///
/// The serialized form is adjacently tagged so that the kind survives a
/// trip through a text file: `{"type": "int", "value": 42}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    /// Boolean value
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point (IEEE-754)
    Float(f32),
    /// 64-bit signed integer
    Long(i64),
    /// UTF-8 string
    String(String),
}

// Custom PartialEq implementation for IEEE-754 float semantics
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// Physical kind of this value
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Long(_) => Kind::Long,
            Value::String(_) => Kind::String,
        }
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i32 if this is an Int value
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f32 if this is a Float value
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as i64 if this is a Long value
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(l) => Some(*l),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Consume into a String if this is a String value
    pub fn into_string(self) -> Option<String> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f)
    }
}

impl From<i64> for Value {
    fn from(l: i64) -> Self {
        Value::Long(l)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
