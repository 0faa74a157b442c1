//! Attribute dumping contract
//!
//! Dumping translates a record's attribute map into the representation the
//! store accepts. Custom codecs (custom scalar types, compressed blobs)
//! plug in behind `AttributeDumper`; the default `IdentityDumper` passes
//! values through unchanged, which is correct for the canonical
//! `AttributeValue` model.

use crate::error::Result;
use crate::schema::TableSchema;
use crate::value::AttributeValue;
use std::collections::BTreeMap;

/// Translates record attributes into storable values
pub trait AttributeDumper: Send + Sync {
    /// Dump a full attribute map for the given schema
    fn dump_attributes(
        &self,
        attributes: &BTreeMap<String, AttributeValue>,
        schema: &TableSchema,
    ) -> Result<BTreeMap<String, AttributeValue>>;
}

/// Pass-through dumper for the canonical value model
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityDumper;

impl AttributeDumper for IdentityDumper {
    fn dump_attributes(
        &self,
        attributes: &BTreeMap<String, AttributeValue>,
        _schema: &TableSchema,
    ) -> Result<BTreeMap<String, AttributeValue>> {
        Ok(attributes.clone())
    }
}
