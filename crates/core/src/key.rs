//! Primary key validation for Dynamap
//!
//! A record is addressed by a mandatory hash key and an optional range key.
//! Key values must be non-empty scalars (`String`, `Int`, `Float`, or
//! `Binary`). Validation is total: every malformed key maps to a typed
//! `KeyError`, never to a panic.

use crate::schema::TableSchema;
use crate::value::AttributeValue;
use std::collections::BTreeMap;
use thiserror::Error;

/// Validate a single key attribute value
///
/// This is the primary validation function for addressing keys. It enforces:
/// non-null, scalar variant, non-empty string/binary content.
///
/// # Examples
///
/// ```
/// use dynamap_core::key::validate_key_value;
/// use dynamap_core::AttributeValue;
///
/// assert!(validate_key_value(&AttributeValue::String("user-1".into())).is_ok());
/// assert!(validate_key_value(&AttributeValue::Int(42)).is_ok());
///
/// assert!(validate_key_value(&AttributeValue::Null).is_err());
/// assert!(validate_key_value(&AttributeValue::String(String::new())).is_err());
/// ```
pub fn validate_key_value(value: &AttributeValue) -> Result<(), KeyError> {
    if value.is_null() {
        return Err(KeyError::Null);
    }
    if !value.is_key_scalar() {
        return Err(KeyError::NotScalar {
            type_name: value.type_name(),
        });
    }
    if value.is_empty_text() {
        return Err(KeyError::EmptyString);
    }
    if matches!(value, AttributeValue::Binary(b) if b.is_empty()) {
        return Err(KeyError::EmptyBinary);
    }
    Ok(())
}

/// Key validation errors
#[derive(Debug, Error, PartialEq)]
pub enum KeyError {
    /// Key value is null
    #[error("key value cannot be null")]
    Null,

    /// Key value is not a scalar variant
    #[error("key value must be a scalar, got {type_name}")]
    NotScalar {
        /// Variant name of the offending value
        type_name: &'static str,
    },

    /// Key value is an empty string
    #[error("key value cannot be an empty string")]
    EmptyString,

    /// Key value is an empty binary blob
    #[error("key value cannot be empty binary")]
    EmptyBinary,
}

/// Addressing key for one record: hash key plus optional range key
///
/// A `PrimaryKey` carries values only; the attribute *names* come from the
/// table schema when the key is rendered into a wire-level key map.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryKey {
    /// Hash key value
    pub hash: AttributeValue,
    /// Range key value, when the schema defines one
    pub range: Option<AttributeValue>,
}

impl PrimaryKey {
    /// Create a hash-only key
    pub fn hash_only(hash: impl Into<AttributeValue>) -> Self {
        Self {
            hash: hash.into(),
            range: None,
        }
    }

    /// Create a composite hash + range key
    pub fn with_range(
        hash: impl Into<AttributeValue>,
        range: impl Into<AttributeValue>,
    ) -> Self {
        Self {
            hash: hash.into(),
            range: Some(range.into()),
        }
    }

    /// Validate the key values themselves (not schema completeness)
    pub fn validate(&self) -> Result<(), KeyError> {
        validate_key_value(&self.hash)?;
        if let Some(range) = &self.range {
            validate_key_value(range)?;
        }
        Ok(())
    }

    /// Render the key as a wire-level attribute map for the given schema
    ///
    /// The range entry is only emitted when both the schema defines a range
    /// key and this key carries a range value; completeness checks belong to
    /// action registration, not to rendering.
    pub fn to_attribute_map(&self, schema: &TableSchema) -> BTreeMap<String, AttributeValue> {
        let mut map = BTreeMap::new();
        map.insert(schema.hash_key_name().to_string(), self.hash.clone());
        if let (Some(name), Some(value)) = (schema.range_key_name(), &self.range) {
            map.insert(name.to_string(), value.clone());
        }
        map
    }
}
