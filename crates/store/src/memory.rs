//! In-memory reference store
//!
//! `InMemoryStore` implements `StoreClient` against mutex-guarded tables.
//! It honors the two contracts the write subsystem depends on:
//!
//! - **Atomicity**: every condition in the request is validated first; only
//!   when all hold are the operations applied, all under one lock guard.
//! - **Condition checks**: `attribute_not_exists(..)` on a put fails when an
//!   item with the same key already exists, and the error reports the index
//!   and expression of the first failing operation.
//!
//! Tables must be registered before use so the store knows each table's key
//! attribute names, mirroring server-side table metadata.

use crate::client::{StoreClient, StoreError, StoreResult};
use crate::request::{Item, TransactionRequest, UpdateOperation, WireOperation};
use dynamap_core::AttributeValue;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

/// Key attribute metadata for one registered table
#[derive(Debug, Clone)]
struct TableMeta {
    hash_key: String,
    range_key: Option<String>,
}

#[derive(Debug, Default)]
struct TableState {
    meta: Option<TableMeta>,
    items: HashMap<String, Item>,
}

/// Mutex-guarded in-memory store honoring atomic conditional writes
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<HashMap<String, TableState>>,
}

impl InMemoryStore {
    /// Create an empty store with no registered tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table's key schema
    pub fn create_table(
        &self,
        table_name: impl Into<String>,
        hash_key: impl Into<String>,
        range_key: Option<&str>,
    ) {
        let mut tables = self.tables.lock();
        let state = tables.entry(table_name.into()).or_default();
        state.meta = Some(TableMeta {
            hash_key: hash_key.into(),
            range_key: range_key.map(str::to_string),
        });
    }

    /// Fetch a stored item by key values
    pub fn get_item(
        &self,
        table_name: &str,
        hash: &AttributeValue,
        range: Option<&AttributeValue>,
    ) -> Option<Item> {
        let tables = self.tables.lock();
        let state = tables.get(table_name)?;
        state.items.get(&encode_key(hash, range)).cloned()
    }

    /// Number of items currently stored in a table
    pub fn item_count(&self, table_name: &str) -> usize {
        let tables = self.tables.lock();
        tables.get(table_name).map_or(0, |state| state.items.len())
    }
}

/// Canonical storage key from key attribute values
///
/// `Debug` formatting of `AttributeValue` is deterministic (ordered sets
/// and maps), which makes it a sufficient canonical encoding here.
fn encode_key(hash: &AttributeValue, range: Option<&AttributeValue>) -> String {
    match range {
        Some(range) => format!("{:?}|{:?}", hash, range),
        None => format!("{:?}", hash),
    }
}

/// Extract the key values named by `meta` from an attribute map
fn key_of(meta: &TableMeta, attributes: &Item) -> StoreResult<String> {
    let hash = attributes
        .get(&meta.hash_key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| {
            StoreError::Rejected(format!("item missing hash key attribute '{}'", meta.hash_key))
        })?;
    let range = match &meta.range_key {
        Some(name) => Some(attributes.get(name).filter(|v| !v.is_null()).ok_or_else(
            || StoreError::Rejected(format!("item missing range key attribute '{}'", name)),
        )?),
        None => None,
    };
    Ok(encode_key(hash, range))
}

/// Parse a `SET` expression into resolved attribute assignments
///
/// Only the expression grammar the mapper generates is accepted:
/// `SET <alias> = <placeholder>, ...`.
fn parse_assignments(op: &UpdateOperation) -> StoreResult<Vec<(String, AttributeValue)>> {
    let body = op
        .update_expression
        .strip_prefix("SET ")
        .ok_or_else(|| StoreError::Rejected("unsupported update expression".to_string()))?;

    let mut assignments = Vec::new();
    for assignment in body.split(", ") {
        let (alias, placeholder) = assignment
            .split_once(" = ")
            .ok_or_else(|| StoreError::Rejected("malformed update expression".to_string()))?;

        let attribute = match &op.expression_attribute_names {
            Some(names) => names
                .get(alias)
                .ok_or_else(|| {
                    StoreError::Rejected(format!("unresolved name alias '{}'", alias))
                })?
                .clone(),
            None => alias.to_string(),
        };
        let value = op
            .expression_attribute_values
            .get(placeholder)
            .ok_or_else(|| {
                StoreError::Rejected(format!("unresolved value placeholder '{}'", placeholder))
            })?
            .clone();
        assignments.push((attribute, value));
    }
    Ok(assignments)
}

/// One fully validated operation, ready to apply infallibly
enum Planned {
    Put {
        table: String,
        storage_key: String,
        item: Item,
    },
    Merge {
        table: String,
        storage_key: String,
        base: Item,
        assignments: Vec<(String, AttributeValue)>,
    },
    Remove {
        table: String,
        storage_key: String,
    },
}

impl StoreClient for InMemoryStore {
    fn transact_write(&self, request: &TransactionRequest) -> StoreResult<()> {
        let mut tables = self.tables.lock();

        // Phase 1: validate every operation and plan its effect. Nothing is
        // mutated until the whole request has passed.
        let mut planned = Vec::with_capacity(request.len());
        for (index, op) in request.operations().iter().enumerate() {
            let state = tables.get(op.table_name()).ok_or_else(|| {
                StoreError::Rejected(format!("unknown table '{}'", op.table_name()))
            })?;
            let meta = state.meta.as_ref().ok_or_else(|| {
                StoreError::Rejected(format!("unknown table '{}'", op.table_name()))
            })?;

            let storage_key = match op {
                WireOperation::Put(put) => key_of(meta, &put.item)?,
                WireOperation::Update(update) => key_of(meta, &update.key)?,
                WireOperation::Delete(delete) => key_of(meta, &delete.key)?,
            };

            if let Some(expression) = op.condition_expression() {
                if !expression.contains("attribute_not_exists") {
                    return Err(StoreError::Rejected(format!(
                        "unsupported condition expression '{}'",
                        expression
                    )));
                }
                if state.items.contains_key(&storage_key) {
                    debug!(
                        target: "dynamap::store",
                        table = op.table_name(),
                        index,
                        "condition check failed"
                    );
                    return Err(StoreError::ConditionCheckFailed {
                        index,
                        expression: expression.to_string(),
                    });
                }
            }

            planned.push(match op {
                WireOperation::Put(put) => Planned::Put {
                    table: put.table_name.clone(),
                    storage_key,
                    item: put.item.clone(),
                },
                WireOperation::Update(update) => Planned::Merge {
                    table: update.table_name.clone(),
                    storage_key,
                    base: update.key.clone(),
                    assignments: parse_assignments(update)?,
                },
                WireOperation::Delete(delete) => Planned::Remove {
                    table: delete.table_name.clone(),
                    storage_key,
                },
            });
        }

        // Phase 2: apply the plan under the same guard; nothing can fail.
        for change in planned {
            match change {
                Planned::Put {
                    table,
                    storage_key,
                    item,
                } => {
                    let state = tables.get_mut(&table).expect("validated in phase 1");
                    state.items.insert(storage_key, item);
                }
                Planned::Merge {
                    table,
                    storage_key,
                    base,
                    assignments,
                } => {
                    let state = tables.get_mut(&table).expect("validated in phase 1");
                    let item = state.items.entry(storage_key).or_insert(base);
                    for (attribute, value) in assignments {
                        item.insert(attribute, value);
                    }
                }
                Planned::Remove { table, storage_key } => {
                    let state = tables.get_mut(&table).expect("validated in phase 1");
                    state.items.remove(&storage_key);
                }
            }
        }

        Ok(())
    }
}
