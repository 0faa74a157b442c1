//! Put-item sanitization
//!
//! Before a create/save put is built, the dumped item is sanitized:
//!
//! - empty sets and empty strings are dropped entirely (never sent as null)
//! - `Null` values are dropped unless `MapperConfig::store_nulls` is set
//! - nested maps are sanitized recursively
//!
//! Sanitization is a pure function over `(config, item)`; the null policy
//! comes from the explicit configuration, never from ambient state.

use dynamap_core::{AttributeValue, MapperConfig};
use std::collections::BTreeMap;

/// Sanitize a dumped item for a put operation
pub fn sanitize_item(
    config: &MapperConfig,
    item: BTreeMap<String, AttributeValue>,
) -> BTreeMap<String, AttributeValue> {
    item.into_iter()
        .filter_map(|(name, value)| sanitize_value(config, value).map(|value| (name, value)))
        .collect()
}

fn sanitize_value(config: &MapperConfig, value: AttributeValue) -> Option<AttributeValue> {
    if value.is_empty_set() || value.is_empty_text() {
        return None;
    }
    match value {
        AttributeValue::Null if !config.store_nulls => None,
        AttributeValue::Map(map) => Some(AttributeValue::Map(sanitize_item(config, map))),
        other => Some(other),
    }
}
