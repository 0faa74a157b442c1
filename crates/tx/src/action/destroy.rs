//! Destroy action
//!
//! Deletes a record through its in-memory instance. The record must be
//! fully addressable at registration; a before-destroy hook may abort the
//! action, in which case the observable outcome is `NotDestroyed`.

use super::{require_complete_key, ActionOutcome, ActionState, TxnEnv};
use crate::options::ActionOptions;
use dynamap_core::{Error, HookOutcome, HookPhase, Lifecycle, Record, Result};
use dynamap_store::{DeleteOperation, WireOperation};

/// Delete one record through its instance
#[derive(Debug)]
pub struct DestroyAction {
    record: Record,
    lifecycle: Lifecycle,
    options: ActionOptions,
    state: ActionState,
}

impl DestroyAction {
    /// Build a destroy action over one record
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

    pub(crate) fn register(&mut self, _env: &TxnEnv<'_>) -> Result<()> {
        require_complete_key(&self.record)?;

        if self
            .lifecycle
            .run_hooks(HookPhase::BeforeDestroy, &mut self.record)
            == HookOutcome::Abort
        {
            self.state = ActionState::Aborted;
            if self.options.raise_on_failure {
                return Err(Error::RecordNotDestroyed);
            }
            return Ok(());
        }

        self.state = ActionState::Registered;
        Ok(())
    }

    pub(crate) fn wire_operation(&self, env: &TxnEnv<'_>) -> Result<WireOperation> {
        let schema = self.record.schema();
        let key = self.record.primary_key().ok_or_else(|| Error::MissingHashKey {
            table: schema.table_name().to_string(),
        })?;
        Ok(WireOperation::Delete(DeleteOperation {
            key: key.to_attribute_map(schema),
            table_name: schema.physical_table_name(env.config),
        }))
    }

    pub(crate) fn complete(&mut self) {
        self.lifecycle
            .run_hooks(HookPhase::AfterDestroy, &mut self.record);
        self.state = ActionState::Committed;
    }

    pub(crate) fn rollback(&mut self) {
        self.lifecycle
            .run_hooks(HookPhase::Rollback, &mut self.record);
        self.state = ActionState::RolledBack;
    }

    pub(crate) fn into_outcome(self) -> ActionOutcome {
        if self.state == ActionState::Aborted {
            ActionOutcome::NotDestroyed(self.record)
        } else {
            ActionOutcome::Destroyed(self.record)
        }
    }
}
