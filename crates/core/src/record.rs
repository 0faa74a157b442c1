//! Record: a typed entity with dirty tracking
//!
//! A record carries its table schema, an attribute map, and the snapshot of
//! attributes as last persisted. The snapshot drives dirty tracking: a
//! record loaded from the store starts clean, a freshly built record is
//! "new" (no snapshot), and `changed_attributes` reports exactly the
//! attributes whose current value differs from the snapshot.

use crate::key::PrimaryKey;
use crate::schema::TableSchema;
use crate::value::AttributeValue;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One mapped record
///
/// Invariant: a persisted record of a range-keyed table has both key
/// attributes present and non-null before any write action is built; action
/// registration enforces this.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Arc<TableSchema>,
    attributes: BTreeMap<String, AttributeValue>,
    /// Snapshot of attributes as last persisted; `None` means never persisted
    persisted: Option<BTreeMap<String, AttributeValue>>,
}

impl Record {
    /// Build a new, never-persisted record
    pub fn new(schema: Arc<TableSchema>) -> Self {
        Self {
            schema,
            attributes: BTreeMap::new(),
            persisted: None,
        }
    }

    /// Build a record as loaded from the store (clean, persisted)
    pub fn from_persisted(
        schema: Arc<TableSchema>,
        attributes: BTreeMap<String, AttributeValue>,
    ) -> Self {
        Self {
            schema,
            persisted: Some(attributes.clone()),
            attributes,
        }
    }

    /// The record's table schema
    pub fn schema(&self) -> &Arc<TableSchema> {
        &self.schema
    }

    /// Whether this record has never been persisted
    pub fn is_new(&self) -> bool {
        self.persisted.is_none()
    }

    /// Current attribute map
    pub fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }

    /// Get one attribute
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Set one attribute
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Current hash key value, treating `Null` as absent
    pub fn hash_key(&self) -> Option<&AttributeValue> {
        self.attributes
            .get(self.schema.hash_key_name())
            .filter(|v| !v.is_null())
    }

    /// Current range key value, treating `Null` as absent
    ///
    /// Returns `None` for hash-only schemas.
    pub fn range_key(&self) -> Option<&AttributeValue> {
        let name = self.schema.range_key_name()?;
        self.attributes.get(name).filter(|v| !v.is_null())
    }

    /// The record's addressing key, when complete for its schema
    pub fn primary_key(&self) -> Option<PrimaryKey> {
        let hash = self.hash_key()?.clone();
        if self.schema.has_range_key() {
            let range = self.range_key()?.clone();
            Some(PrimaryKey {
                hash,
                range: Some(range),
            })
        } else {
            Some(PrimaryKey { hash, range: None })
        }
    }

    /// Attributes whose current value differs from the persisted snapshot
    ///
    /// For a new record this is every attribute. Ordering is lexicographic
    /// by attribute name, so downstream placeholder assignment is
    /// deterministic. Key attributes are NOT excluded here; update-expression
    /// synthesis owns that exclusion.
    pub fn changed_attributes(&self) -> BTreeMap<String, AttributeValue> {
        match &self.persisted {
            None => self.attributes.clone(),
            Some(snapshot) => self
                .attributes
                .iter()
                .filter(|(name, value)| snapshot.get(*name) != Some(*value))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        }
    }

    /// Whether any attribute differs from the persisted snapshot
    pub fn is_dirty(&self) -> bool {
        match &self.persisted {
            None => true,
            Some(snapshot) => snapshot != &self.attributes,
        }
    }

    /// Mark the current attribute state as persisted, clearing dirty state
    pub fn mark_persisted(&mut self) {
        self.persisted = Some(self.attributes.clone());
    }
}
