//! Wire-level transaction request model
//!
//! A `TransactionRequest` is an ordered sequence of `put`/`update`/`delete`
//! operations, each tagged with its table name and addressing key. It is
//! built fresh for every coordinator execution and submitted exactly once;
//! the store applies the whole sequence or none of it.
//!
//! Serialized shape (externally tagged, snake_case):
//!
//! ```text
//! { "put":    { "item": {..}, "table_name": "..", "condition_expression": ".." } }
//! { "update": { "key": {..}, "table_name": "..", "update_expression": "..",
//!               "expression_attribute_values": {..},
//!               "expression_attribute_names": {..} } }
//! { "delete": { "key": {..}, "table_name": ".." } }
//! ```

use dynamap_core::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A full wire-level item, string-keyed and ordered
pub type Item = BTreeMap<String, AttributeValue>;

/// One wire-level item operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireOperation {
    /// Write a full item, optionally guarded by a condition expression
    Put(PutOperation),
    /// Apply an update expression to one keyed item
    Update(UpdateOperation),
    /// Delete one keyed item
    Delete(DeleteOperation),
}

impl WireOperation {
    /// Operation name for logging
    pub fn name(&self) -> &'static str {
        match self {
            WireOperation::Put(_) => "put",
            WireOperation::Update(_) => "update",
            WireOperation::Delete(_) => "delete",
        }
    }

    /// Target table of this operation
    pub fn table_name(&self) -> &str {
        match self {
            WireOperation::Put(op) => &op.table_name,
            WireOperation::Update(op) => &op.table_name,
            WireOperation::Delete(op) => &op.table_name,
        }
    }

    /// Condition expression attached to this operation, if any
    pub fn condition_expression(&self) -> Option<&str> {
        match self {
            WireOperation::Put(op) => op.condition_expression.as_deref(),
            _ => None,
        }
    }
}

/// Full-item write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PutOperation {
    /// Complete item to write, key attributes included
    pub item: Item,
    /// Target table
    pub table_name: String,
    /// Store-side precondition, e.g. `attribute_not_exists(id)`
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub condition_expression: Option<String>,
}

/// Expression-based partial update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateOperation {
    /// Addressing key attributes
    pub key: Item,
    /// Target table
    pub table_name: String,
    /// Generated `SET ...` expression
    pub update_expression: String,
    /// Value placeholder map (`:_s0` -> dumped value)
    pub expression_attribute_values: Item,
    /// Name alias map (`#_n0` -> real attribute name)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expression_attribute_names: Option<BTreeMap<String, String>>,
}

/// Keyed delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteOperation {
    /// Addressing key attributes
    pub key: Item,
    /// Target table
    pub table_name: String,
}

/// Ordered sequence of wire operations submitted as one atomic unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    operations: Vec<WireOperation>,
}

impl TransactionRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one operation, preserving submission order
    pub fn push(&mut self, operation: WireOperation) {
        self.operations.push(operation);
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the request carries no operations
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// The operations in submission order
    pub fn operations(&self) -> &[WireOperation] {
        &self.operations
    }
}
