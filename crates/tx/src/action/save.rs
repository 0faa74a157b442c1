//! Save action (insert-or-update)
//!
//! A save on a never-persisted record becomes an unconditioned `put`
//! (last-writer-wins upsert). A save on a persisted record becomes an
//! `update` whose `SET` expression covers exactly the changed non-key
//! attributes; with nothing changed, the action is elided entirely and
//! still reports success.
//!
//! The skip decision is taken before the timestamp touch, so an untouched
//! record never emits a timestamp-only update.

use super::{
    require_complete_key, touch_for_insert, touch_for_update, ActionOutcome, ActionState, TxnEnv,
};
use crate::expression::synthesize_update;
use crate::options::ActionOptions;
use crate::sanitize::sanitize_item;
use dynamap_core::{Error, HookOutcome, HookPhase, Lifecycle, Record, Result};
use dynamap_store::{PutOperation, UpdateOperation, WireOperation};

/// Insert-or-update one record
#[derive(Debug)]
pub struct SaveAction {
    record: Record,
    lifecycle: Lifecycle,
    options: ActionOptions,
    state: ActionState,
    skip: bool,
}

impl SaveAction {
    /// Build a save action over one record
    pub fn new(record: Record, lifecycle: Lifecycle, options: ActionOptions) -> Self {
        Self {
            record,
            lifecycle,
            options,
            state: ActionState::Pending,
            skip: false,
        }
    }

    /// The target record
    pub fn record(&self) -> &Record {
        &self.record
    }

    pub(crate) fn state(&self) -> ActionState {
        self.state
    }

    pub(crate) fn is_skip(&self) -> bool {
        self.skip
    }

    pub(crate) fn register(&mut self, _env: &TxnEnv<'_>) -> Result<()> {
        // A persisted record must be fully addressable before anything else.
        if !self.record.is_new() {
            require_complete_key(&self.record)?;
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

        if self
            .lifecycle
            .run_hooks(HookPhase::BeforeSave, &mut self.record)
            == HookOutcome::Abort
        {
            self.state = ActionState::Aborted;
            if self.options.raise_on_failure {
                return Err(Error::RecordNotSaved);
            }
            return Ok(());
        }

        let touch = self.record.schema().timestamps_enabled() && self.options.touch_timestamps;

        if self.record.is_new() {
            if touch {
                touch_for_insert(&mut self.record);
            }
        } else {
            let schema = self.record.schema().clone();
            let has_changes = self
                .record
                .changed_attributes()
                .keys()
                .any(|name| !schema.is_key_attribute(name));
            if !has_changes {
                self.skip = true;
                self.state = ActionState::Registered;
                return Ok(());
            }
            if touch {
                touch_for_update(&mut self.record);
            }
        }

        self.state = ActionState::Registered;
        Ok(())
    }

    pub(crate) fn wire_operation(&self, env: &TxnEnv<'_>) -> Result<Option<WireOperation>> {
        let schema = self.record.schema();

        if self.record.is_new() {
            let dumped = env.dumper.dump_attributes(self.record.attributes(), schema)?;
            return Ok(Some(WireOperation::Put(PutOperation {
                item: sanitize_item(env.config, dumped),
                table_name: schema.physical_table_name(env.config),
                condition_expression: None,
            })));
        }

        let changed = self.record.changed_attributes();
        let dumped = env.dumper.dump_attributes(&changed, schema)?;
        let expression = match synthesize_update(&dumped, schema) {
            Some(expression) => expression,
            None => return Ok(None),
        };
        let key = self.record.primary_key().ok_or_else(|| Error::MissingHashKey {
            table: schema.table_name().to_string(),
        })?;

        Ok(Some(WireOperation::Update(UpdateOperation {
            key: key.to_attribute_map(schema),
            table_name: schema.physical_table_name(env.config),
            update_expression: expression.expression,
            expression_attribute_values: expression.values,
            expression_attribute_names: Some(expression.names),
        })))
    }

    pub(crate) fn complete(&mut self) {
        if !self.skip {
            self.record.mark_persisted();
            self.lifecycle
                .run_hooks(HookPhase::AfterSave, &mut self.record);
        }
        self.state = ActionState::Committed;
    }

    pub(crate) fn rollback(&mut self) {
        self.lifecycle
            .run_hooks(HookPhase::Rollback, &mut self.record);
        self.state = ActionState::RolledBack;
    }

    pub(crate) fn into_outcome(self) -> ActionOutcome {
        ActionOutcome::Saved(self.state != ActionState::Aborted)
    }
}
