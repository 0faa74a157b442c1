//! Table schema metadata
//!
//! A `TableSchema` names the table, its hash key attribute, an optional
//! range key attribute, and whether the mapper maintains `created_at` /
//! `updated_at` timestamps for records of this table. Write actions consult
//! the schema for key completeness checks and for wire-level addressing.

use crate::config::MapperConfig;
use serde::{Deserialize, Serialize};

/// Attribute name used for the creation timestamp
pub const CREATED_AT: &str = "created_at";

/// Attribute name used for the last-modification timestamp
pub const UPDATED_AT: &str = "updated_at";

/// Schema metadata for one mapped table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    name: String,
    hash_key: String,
    range_key: Option<String>,
    timestamps: bool,
}

impl TableSchema {
    /// Create a hash-only schema with timestamps disabled
    pub fn new(name: impl Into<String>, hash_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hash_key: hash_key.into(),
            range_key: None,
            timestamps: false,
        }
    }

    /// Add a range key attribute
    pub fn with_range_key(mut self, range_key: impl Into<String>) -> Self {
        self.range_key = Some(range_key.into());
        self
    }

    /// Enable timestamp maintenance for this table
    pub fn with_timestamps(mut self) -> Self {
        self.timestamps = true;
        self
    }

    /// Logical table name
    pub fn table_name(&self) -> &str {
        &self.name
    }

    /// Physical table name after applying the configured prefix
    pub fn physical_table_name(&self, config: &MapperConfig) -> String {
        match &config.table_prefix {
            Some(prefix) => format!("{}{}", prefix, self.name),
            None => self.name.clone(),
        }
    }

    /// Hash key attribute name
    pub fn hash_key_name(&self) -> &str {
        &self.hash_key
    }

    /// Range key attribute name, if the table has one
    pub fn range_key_name(&self) -> Option<&str> {
        self.range_key.as_deref()
    }

    /// Whether this table has a composite key
    pub fn has_range_key(&self) -> bool {
        self.range_key.is_some()
    }

    /// Whether the mapper maintains created_at/updated_at for this table
    pub fn timestamps_enabled(&self) -> bool {
        self.timestamps
    }

    /// Whether `attribute` is one of the identity attributes
    ///
    /// Identity attributes are never rewritten by update expressions.
    pub fn is_key_attribute(&self, attribute: &str) -> bool {
        attribute == self.hash_key || self.range_key.as_deref() == Some(attribute)
    }
}
