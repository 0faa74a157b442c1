//! Attribute values for Dynamap
//!
//! This module defines:
//! - AttributeValue: tagged enum for every storable attribute type
//!
//! ## Value Model
//!
//! The enum has exactly 10 variants:
//! - Null, Bool, Int, Float, String, Binary, StringSet, IntSet, List, Map
//!
//! ### Type Rules
//!
//! - No implicit type coercions
//! - `Int(1) != Float(1.0)` - different variants are NEVER equal
//! - `Binary` is not `String`
//! - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//! - Sets are ordered and deduplicated (`BTreeSet`)
//! - Maps are string-keyed and ordered (`BTreeMap`), so iteration and
//!   serialization are deterministic

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Canonical attribute value for all Dynamap surfaces
///
/// Every record attribute, wire-level item field, and expression value is an
/// `AttributeValue`. The variant set mirrors what hash/range stores accept:
/// scalars, binary blobs, homogeneous sets, and nested lists/maps.
///
/// ## Type Equality
///
/// Different variants are NEVER equal, even when they contain the same
/// "value": `Int(1) != Float(1.0)`, `Binary(b"x") != String("x")`.
/// Float equality follows IEEE-754 semantics (`NaN != NaN`, `-0.0 == 0.0`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Raw bytes
    Binary(Vec<u8>),
    /// Ordered, deduplicated set of strings
    StringSet(BTreeSet<String>),
    /// Ordered, deduplicated set of integers
    IntSet(BTreeSet<i64>),
    /// Ordered list of values
    List(Vec<AttributeValue>),
    /// String-keyed, ordered mapping
    Map(BTreeMap<String, AttributeValue>),
}

// Custom PartialEq implementation for IEEE-754 float semantics
impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttributeValue::Null, AttributeValue::Null) => true,
            (AttributeValue::Bool(a), AttributeValue::Bool(b)) => a == b,
            (AttributeValue::Int(a), AttributeValue::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (AttributeValue::Float(a), AttributeValue::Float(b)) => a == b,
            (AttributeValue::String(a), AttributeValue::String(b)) => a == b,
            (AttributeValue::Binary(a), AttributeValue::Binary(b)) => a == b,
            (AttributeValue::StringSet(a), AttributeValue::StringSet(b)) => a == b,
            (AttributeValue::IntSet(a), AttributeValue::IntSet(b)) => a == b,
            (AttributeValue::List(a), AttributeValue::List(b)) => a == b,
            (AttributeValue::Map(a), AttributeValue::Map(b)) => a == b,
            // Different variants are NEVER equal
            _ => false,
        }
    }
}

impl AttributeValue {
    /// Get the variant name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Null => "Null",
            AttributeValue::Bool(_) => "Bool",
            AttributeValue::Int(_) => "Int",
            AttributeValue::Float(_) => "Float",
            AttributeValue::String(_) => "String",
            AttributeValue::Binary(_) => "Binary",
            AttributeValue::StringSet(_) => "StringSet",
            AttributeValue::IntSet(_) => "IntSet",
            AttributeValue::List(_) => "List",
            AttributeValue::Map(_) => "Map",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Check if this is a scalar usable as a key attribute
    ///
    /// Key attributes must be `String`, `Int`, `Float`, or `Binary`.
    pub fn is_key_scalar(&self) -> bool {
        matches!(
            self,
            AttributeValue::String(_)
                | AttributeValue::Int(_)
                | AttributeValue::Float(_)
                | AttributeValue::Binary(_)
        )
    }

    /// Check if this is an empty string
    ///
    /// Empty strings are dropped by put-item sanitization.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, AttributeValue::String(s) if s.is_empty())
    }

    /// Check if this is an empty set
    ///
    /// Empty sets are dropped by put-item sanitization.
    pub fn is_empty_set(&self) -> bool {
        match self {
            AttributeValue::StringSet(s) => s.is_empty(),
            AttributeValue::IntSet(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &[u8] if this is a Binary value
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            AttributeValue::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// Get as &BTreeSet<String> if this is a StringSet value
    pub fn as_string_set(&self) -> Option<&BTreeSet<String>> {
        match self {
            AttributeValue::StringSet(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &BTreeSet<i64> if this is an IntSet value
    pub fn as_int_set(&self) -> Option<&BTreeSet<i64>> {
        match self {
            AttributeValue::IntSet(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &[AttributeValue] if this is a List value
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(l) => Some(l),
            _ => None,
        }
    }

    /// Get as &BTreeMap if this is a Map value
    pub fn as_map(&self) -> Option<&BTreeMap<String, AttributeValue>> {
        match self {
            AttributeValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Int(i)
    }
}

impl From<i32> for AttributeValue {
    fn from(i: i32) -> Self {
        AttributeValue::Int(i as i64)
    }
}

impl From<f64> for AttributeValue {
    fn from(f: f64) -> Self {
        AttributeValue::Float(f)
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(b: Vec<u8>) -> Self {
        AttributeValue::Binary(b)
    }
}

impl From<&[u8]> for AttributeValue {
    fn from(b: &[u8]) -> Self {
        AttributeValue::Binary(b.to_vec())
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(l: Vec<AttributeValue>) -> Self {
        AttributeValue::List(l)
    }
}

impl From<BTreeMap<String, AttributeValue>> for AttributeValue {
    fn from(m: BTreeMap<String, AttributeValue>) -> Self {
        AttributeValue::Map(m)
    }
}

impl From<BTreeSet<String>> for AttributeValue {
    fn from(s: BTreeSet<String>) -> Self {
        AttributeValue::StringSet(s)
    }
}

impl From<BTreeSet<i64>> for AttributeValue {
    fn from(s: BTreeSet<i64>) -> Self {
        AttributeValue::IntSet(s)
    }
}

impl From<()> for AttributeValue {
    fn from(_: ()) -> Self {
        AttributeValue::Null
    }
}
