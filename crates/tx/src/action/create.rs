//! Create action
//!
//! Inserts a new record as a `put` guarded by `attribute_not_exists` over
//! the key attributes, so a concurrent create of the same key fails the
//! whole transaction instead of silently overwriting.
//!
//! Registration order: before-create hooks, then hash key generation (when
//! absent), then validators, then the timestamp touch. Key preconditions
//! are always satisfied by construction: a missing hash key is generated,
//! never rejected.

use super::{not_exists_condition, touch_for_insert, ActionOutcome, ActionState, TxnEnv};
use crate::options::ActionOptions;
use crate::sanitize::sanitize_item;
use dynamap_core::{Error, HookOutcome, HookPhase, Lifecycle, Record, Result};
use dynamap_store::{PutOperation, WireOperation};

/// Insert a new record, guarded against duplicate creation
#[derive(Debug)]
pub struct CreateAction {
    record: Record,
    lifecycle: Lifecycle,
    options: ActionOptions,
    state: ActionState,
}

impl CreateAction {
    /// Build a create action over one record
    pub fn new(record: Record, lifecycle: Lifecycle, options: ActionOptions) -> Self {
        Self {
            record,
            lifecycle,
            options,
            state: ActionState::Pending,
        }
    }

    /// The target record
    pub fn record(&self) -> &Record {
        &self.record
    }

    pub(crate) fn state(&self) -> ActionState {
        self.state
    }

    pub(crate) fn register(&mut self, env: &TxnEnv<'_>) -> Result<()> {
        if self
            .lifecycle
            .run_hooks(HookPhase::BeforeCreate, &mut self.record)
            == HookOutcome::Abort
        {
            self.state = ActionState::Aborted;
            if self.options.raise_on_failure {
                return Err(Error::RecordNotSaved);
            }
            return Ok(());
        }

        if self.record.hash_key().is_none() {
            let hash_name = self.record.schema().hash_key_name().to_string();
            self.record.set(hash_name, env.keygen.new_key());
        }

        if !self.options.skip_validation {
            if let Err(failure) = self.lifecycle.validate(&self.record) {
                self.state = ActionState::Aborted;
                if self.options.raise_on_failure {
                    return Err(Error::DocumentNotValid {
                        record: Box::new(self.record.clone()),
                        source: failure,
                    });
                }
                return Ok(());
            }
        }

        if self.record.schema().timestamps_enabled() && self.options.touch_timestamps {
            touch_for_insert(&mut self.record);
        }

        self.state = ActionState::Registered;
        Ok(())
    }

    pub(crate) fn wire_operation(&self, env: &TxnEnv<'_>) -> Result<WireOperation> {
        let schema = self.record.schema();
        let dumped = env.dumper.dump_attributes(self.record.attributes(), schema)?;
        Ok(WireOperation::Put(PutOperation {
            item: sanitize_item(env.config, dumped),
            table_name: schema.physical_table_name(env.config),
            condition_expression: Some(not_exists_condition(schema)),
        }))
    }

    pub(crate) fn complete(&mut self) {
        self.record.mark_persisted();
        self.lifecycle
            .run_hooks(HookPhase::AfterCreate, &mut self.record);
        self.state = ActionState::Committed;
    }

    pub(crate) fn rollback(&mut self) {
        self.lifecycle
            .run_hooks(HookPhase::Rollback, &mut self.record);
        self.state = ActionState::RolledBack;
    }

    pub(crate) fn into_outcome(self) -> ActionOutcome {
        if self.state == ActionState::Aborted {
            ActionOutcome::NotCreated(self.record)
        } else {
            ActionOutcome::Created(self.record)
        }
    }
}
