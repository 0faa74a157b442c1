//! Write actions
//!
//! An action is the per-record unit of work inside a transaction: a tagged
//! variant over create, save (insert-or-update), destroy, and
//! delete-by-primary-key. Each action owns exactly one target record or
//! explicit key plus an immutable options bag, and moves through the
//! lifecycle `Pending -> Registered | Aborted -> Committed | RolledBack`.
//!
//! An aborted action never contributes a wire operation and never runs
//! completion hooks. A skipped action (save with nothing to write) is
//! excluded from the wire request but still reports success.

mod create;
mod delete_key;
mod destroy;
mod save;

pub use create::CreateAction;
pub use delete_key::DeleteByKeyAction;
pub use destroy::DestroyAction;
pub use save::SaveAction;

use crate::options::ActionOptions;
use chrono::Utc;
use dynamap_core::{
    AttributeDumper, AttributeValue, Error, KeyGenerator, Lifecycle, MapperConfig, PrimaryKey,
    Record, Result, TableSchema, CREATED_AT, UPDATED_AT,
};
use dynamap_store::WireOperation;
use std::sync::Arc;

/// Lifecycle state of one action within its transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    /// Collected, not yet registered
    Pending,
    /// Registration succeeded; eligible for the wire request
    Registered,
    /// Registration aborted; excluded from the request and from commit hooks
    Aborted,
    /// The whole transaction committed
    Committed,
    /// The store rejected the transaction
    RolledBack,
}

/// Observable per-action result surfaced to the caller
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The record was created
    Created(Record),
    /// A create aborted; carries the record for inspection
    NotCreated(Record),
    /// Whether a save actually committed (`false` means it aborted)
    Saved(bool),
    /// The record was destroyed
    Destroyed(Record),
    /// A destroy aborted; carries the record for inspection
    NotDestroyed(Record),
    /// A delete-by-key committed (no model instance involved)
    Deleted,
}

impl ActionOutcome {
    /// Whether the action took (or trivially skipped) its effect
    pub fn succeeded(&self) -> bool {
        match self {
            ActionOutcome::Created(_) | ActionOutcome::Destroyed(_) | ActionOutcome::Deleted => {
                true
            }
            ActionOutcome::Saved(committed) => *committed,
            ActionOutcome::NotCreated(_) | ActionOutcome::NotDestroyed(_) => false,
        }
    }

    /// The record carried by this outcome, if any
    pub fn record(&self) -> Option<&Record> {
        match self {
            ActionOutcome::Created(record)
            | ActionOutcome::NotCreated(record)
            | ActionOutcome::Destroyed(record)
            | ActionOutcome::NotDestroyed(record) => Some(record),
            ActionOutcome::Saved(_) | ActionOutcome::Deleted => None,
        }
    }
}

/// Shared collaborators handed to actions by the coordinator
pub(crate) struct TxnEnv<'a> {
    pub config: &'a MapperConfig,
    pub keygen: &'a dyn KeyGenerator,
    pub dumper: &'a dyn AttributeDumper,
}

/// One write action: a tagged variant over the four operations
#[derive(Debug)]
pub enum WriteAction {
    /// Insert a new record, guarded against overwriting an existing one
    Create(CreateAction),
    /// Insert-or-update a record
    Save(SaveAction),
    /// Delete a record through its in-memory instance
    Destroy(DestroyAction),
    /// Delete by explicit primary key, no model instance involved
    DeleteByKey(DeleteByKeyAction),
}

impl WriteAction {
    /// Build a create action with default lifecycle and options
    pub fn create(record: Record) -> Self {
        WriteAction::Create(CreateAction::new(
            record,
            Lifecycle::new(),
            ActionOptions::new(),
        ))
    }

    /// Build a save action with default lifecycle and options
    pub fn save(record: Record) -> Self {
        WriteAction::Save(SaveAction::new(
            record,
            Lifecycle::new(),
            ActionOptions::new(),
        ))
    }

    /// Build a destroy action with default lifecycle and options
    pub fn destroy(record: Record) -> Self {
        WriteAction::Destroy(DestroyAction::new(
            record,
            Lifecycle::new(),
            ActionOptions::new(),
        ))
    }

    /// Build a delete-by-key action
    pub fn delete_key(schema: Arc<TableSchema>, key: PrimaryKey) -> Self {
        WriteAction::DeleteByKey(DeleteByKeyAction::new(schema, key))
    }

    /// Variant name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            WriteAction::Create(_) => "create",
            WriteAction::Save(_) => "save",
            WriteAction::Destroy(_) => "destroy",
            WriteAction::DeleteByKey(_) => "delete_by_key",
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ActionState {
        match self {
            WriteAction::Create(a) => a.state(),
            WriteAction::Save(a) => a.state(),
            WriteAction::Destroy(a) => a.state(),
            WriteAction::DeleteByKey(a) => a.state(),
        }
    }

    /// Whether registration aborted this action
    pub fn is_aborted(&self) -> bool {
        self.state() == ActionState::Aborted
    }

    /// Whether this action is an elided no-op
    pub fn is_skip(&self) -> bool {
        match self {
            WriteAction::Save(a) => a.is_skip(),
            _ => false,
        }
    }

    /// Run preconditions, before hooks, and state transitions
    ///
    /// Called exactly once per action per commit. Key-incompleteness errors
    /// always propagate; validation/hook aborts propagate only under
    /// `raise_on_failure`, otherwise the action silently moves to `Aborted`.
    pub(crate) fn register(&mut self, env: &TxnEnv<'_>) -> Result<()> {
        match self {
            WriteAction::Create(a) => a.register(env),
            WriteAction::Save(a) => a.register(env),
            WriteAction::Destroy(a) => a.register(env),
            WriteAction::DeleteByKey(a) => a.register(env),
        }
    }

    /// Pure translation into one wire operation
    ///
    /// `None` for aborted and skipped actions.
    pub(crate) fn wire_operation(&self, env: &TxnEnv<'_>) -> Result<Option<WireOperation>> {
        if self.is_aborted() || self.is_skip() {
            return Ok(None);
        }
        match self {
            WriteAction::Create(a) => a.wire_operation(env).map(Some),
            WriteAction::Save(a) => a.wire_operation(env),
            WriteAction::Destroy(a) => a.wire_operation(env).map(Some),
            WriteAction::DeleteByKey(a) => a.wire_operation(env).map(Some),
        }
    }

    /// Commit-phase hook: mark persisted, run after hooks
    pub(crate) fn complete(&mut self) {
        match self {
            WriteAction::Create(a) => a.complete(),
            WriteAction::Save(a) => a.complete(),
            WriteAction::Destroy(a) => a.complete(),
            WriteAction::DeleteByKey(a) => a.complete(),
        }
    }

    /// Rollback-phase hook after the store rejected the transaction
    pub(crate) fn rollback(&mut self) {
        match self {
            WriteAction::Create(a) => a.rollback(),
            WriteAction::Save(a) => a.rollback(),
            WriteAction::Destroy(a) => a.rollback(),
            WriteAction::DeleteByKey(a) => a.rollback(),
        }
    }

    /// Consume the action into its observable outcome
    pub fn into_outcome(self) -> ActionOutcome {
        match self {
            WriteAction::Create(a) => a.into_outcome(),
            WriteAction::Save(a) => a.into_outcome(),
            WriteAction::Destroy(a) => a.into_outcome(),
            WriteAction::DeleteByKey(a) => a.into_outcome(),
        }
    }
}

/// Current instant as epoch milliseconds
pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Touch policy for inserts: set updated_at, set created_at unless present
pub(crate) fn touch_for_insert(record: &mut Record) {
    let now = now_millis();
    let created_present = record.get(CREATED_AT).map_or(false, |v| !v.is_null());
    if !created_present {
        record.set(CREATED_AT, AttributeValue::Int(now));
    }
    record.set(UPDATED_AT, AttributeValue::Int(now));
}

/// Touch policy for updates: set updated_at only
pub(crate) fn touch_for_update(record: &mut Record) {
    record.set(UPDATED_AT, AttributeValue::Int(now_millis()));
}

/// Registration-time check that a record's addressing key is complete
///
/// Key-incompleteness is a structural caller bug and always raises,
/// independent of `raise_on_failure`.
pub(crate) fn require_complete_key(record: &Record) -> Result<()> {
    let schema = record.schema();
    if record.hash_key().is_none() {
        return Err(Error::MissingHashKey {
            table: schema.table_name().to_string(),
        });
    }
    if schema.has_range_key() && record.range_key().is_none() {
        return Err(Error::MissingRangeKey {
            table: schema.table_name().to_string(),
        });
    }
    Ok(())
}

/// The condition expression guarding a create against overwrites
pub(crate) fn not_exists_condition(schema: &TableSchema) -> String {
    match schema.range_key_name() {
        Some(range) => format!(
            "attribute_not_exists({}) AND attribute_not_exists({})",
            schema.hash_key_name(),
            range
        ),
        None => format!("attribute_not_exists({})", schema.hash_key_name()),
    }
}
