//! Delete-by-primary-key action
//!
//! Deletes an item addressed by an explicit key, with no model instance
//! involved: no validators, no hooks, and a `Deleted` outcome carrying
//! nothing. The supplied key must be complete for the schema; an
//! incomplete key fails registration before any network call.

use super::{ActionOutcome, ActionState, TxnEnv};
use dynamap_core::{validate_key_value, Error, PrimaryKey, Result, TableSchema};
use dynamap_store::{DeleteOperation, WireOperation};
use std::sync::Arc;

/// Delete one item by explicit primary key
#[derive(Debug)]
pub struct DeleteByKeyAction {
    schema: Arc<TableSchema>,
    key: PrimaryKey,
    state: ActionState,
}

impl DeleteByKeyAction {
    /// Build a delete action for the given schema and key
    pub fn new(schema: Arc<TableSchema>, key: PrimaryKey) -> Self {
        Self {
            schema,
            key,
            state: ActionState::Pending,
        }
    }

    /// The supplied key
    pub fn key(&self) -> &PrimaryKey {
        &self.key
    }

    pub(crate) fn state(&self) -> ActionState {
        self.state
    }

    pub(crate) fn register(&mut self, _env: &TxnEnv<'_>) -> Result<()> {
        if validate_key_value(&self.key.hash).is_err() {
            return Err(Error::MissingHashKey {
                table: self.schema.table_name().to_string(),
            });
        }
        if self.schema.has_range_key() {
            match &self.key.range {
                Some(range) if validate_key_value(range).is_ok() => {}
                _ => {
                    return Err(Error::MissingRangeKey {
                        table: self.schema.table_name().to_string(),
                    })
                }
            }
        }
        self.state = ActionState::Registered;
        Ok(())
    }

    pub(crate) fn wire_operation(&self, env: &TxnEnv<'_>) -> Result<WireOperation> {
        Ok(WireOperation::Delete(DeleteOperation {
            key: self.key.to_attribute_map(&self.schema),
            table_name: self.schema.physical_table_name(env.config),
        }))
    }

    pub(crate) fn complete(&mut self) {
        self.state = ActionState::Committed;
    }

    pub(crate) fn rollback(&mut self) {
        self.state = ActionState::RolledBack;
    }

    pub(crate) fn into_outcome(self) -> ActionOutcome {
        ActionOutcome::Deleted
    }
}
