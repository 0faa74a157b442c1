//! Transaction coordinator
//!
//! `TransactionWrite` collects write actions, drives their lifecycle in
//! registration order, builds one batched wire request, submits it to the
//! store client exactly once, and reports a per-action outcome to the
//! caller.
//!
//! State machine:
//!
//! - `Collecting` -> `Committed` (store accepted, or nothing to submit)
//! - `Collecting` -> `RegistrationFailed` (an action raised during
//!   registration; no wire request was built, the store was never called)
//! - `Collecting` -> `RolledBack` (the store rejected the submission;
//!   rollback hooks ran, nothing was marked persisted)
//!
//! Completion hooks never run before the store confirms success; rollback
//! hooks never run before the store confirms failure. The submission is the
//! single blocking point of the whole flow.

use crate::action::{ActionOutcome, TxnEnv, WriteAction};
use crate::options::ActionOptions;
use dynamap_core::{
    AttributeDumper, Error, IdentityDumper, KeyGenerator, Lifecycle, MapperConfig, PrimaryKey,
    Record, Result, TableSchema, UuidKeys,
};
use dynamap_store::{StoreClient, StoreError, TransactionRequest};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Terminal and intermediate states of one coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Accepting actions; `commit` has not run
    Collecting,
    /// An action raised during registration; the store was never contacted
    RegistrationFailed,
    /// The whole batch was applied (possibly trivially, with no operations)
    Committed,
    /// The store rejected the batch; rollback hooks ran
    RolledBack,
}

/// Coordinates one atomic write transaction
///
/// The coordinator exclusively owns its registered actions; no action is
/// shared across transactions. A coordinator is single-threaded by
/// construction; concurrent transactions are independent instances.
pub struct TransactionWrite {
    store: Arc<dyn StoreClient>,
    config: MapperConfig,
    keygen: Arc<dyn KeyGenerator>,
    dumper: Arc<dyn AttributeDumper>,
    actions: Vec<WriteAction>,
    status: TransactionStatus,
}

impl TransactionWrite {
    /// Create a coordinator with default configuration, UUID key generation,
    /// and identity dumping
    pub fn new(store: Arc<dyn StoreClient>) -> Self {
        Self {
            store,
            config: MapperConfig::default(),
            keygen: Arc::new(UuidKeys),
            dumper: Arc::new(IdentityDumper),
            actions: Vec::new(),
            status: TransactionStatus::Collecting,
        }
    }

    /// Replace the mapper configuration
    pub fn with_config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the key generation strategy
    pub fn with_key_generator(mut self, keygen: Arc<dyn KeyGenerator>) -> Self {
        self.keygen = keygen;
        self
    }

    /// Replace the attribute dumper
    pub fn with_dumper(mut self, dumper: Arc<dyn AttributeDumper>) -> Self {
        self.dumper = dumper;
        self
    }

    /// Current coordinator state
    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Number of collected actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether no actions were collected
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn ensure_collecting(&self) -> Result<()> {
        if self.status != TransactionStatus::Collecting {
            return Err(Error::InvalidState(format!(
                "transaction already finished with status {:?}",
                self.status
            )));
        }
        Ok(())
    }

    /// Collect a prepared action
    pub fn add(&mut self, action: WriteAction) -> Result<()> {
        self.ensure_collecting()?;
        debug!(target: "dynamap::txn", kind = action.kind(), "action collected");
        self.actions.push(action);
        Ok(())
    }

    /// Collect a create with default lifecycle and options
    pub fn create(&mut self, record: Record) -> Result<()> {
        self.add(WriteAction::create(record))
    }

    /// Collect a create with explicit lifecycle and options
    pub fn create_with(
        &mut self,
        record: Record,
        lifecycle: Lifecycle,
        options: ActionOptions,
    ) -> Result<()> {
        self.add(WriteAction::Create(crate::action::CreateAction::new(
            record, lifecycle, options,
        )))
    }

    /// Collect a save with default lifecycle and options
    pub fn save(&mut self, record: Record) -> Result<()> {
        self.add(WriteAction::save(record))
    }

    /// Collect a save with explicit lifecycle and options
    pub fn save_with(
        &mut self,
        record: Record,
        lifecycle: Lifecycle,
        options: ActionOptions,
    ) -> Result<()> {
        self.add(WriteAction::Save(crate::action::SaveAction::new(
            record, lifecycle, options,
        )))
    }

    /// Collect a destroy with default lifecycle and options
    pub fn destroy(&mut self, record: Record) -> Result<()> {
        self.add(WriteAction::destroy(record))
    }

    /// Collect a destroy with explicit lifecycle and options
    pub fn destroy_with(
        &mut self,
        record: Record,
        lifecycle: Lifecycle,
        options: ActionOptions,
    ) -> Result<()> {
        self.add(WriteAction::Destroy(crate::action::DestroyAction::new(
            record, lifecycle, options,
        )))
    }

    /// Collect a delete-by-primary-key
    pub fn delete_key(&mut self, schema: Arc<TableSchema>, key: PrimaryKey) -> Result<()> {
        self.add(WriteAction::delete_key(schema, key))
    }

    /// Register, execute, and finish the transaction
    ///
    /// Runs `on_registration` on every action in registration order; any
    /// raised error fails the whole registration before a wire request
    /// exists. Surviving actions are translated into one request and
    /// submitted atomically. An empty request after filtering commits
    /// trivially without contacting the store.
    ///
    /// Returns one outcome per collected action, preserving registration
    /// order (aborted and skipped actions included).
    pub fn commit(&mut self) -> Result<Vec<ActionOutcome>> {
        self.ensure_collecting()?;

        let env = TxnEnv {
            config: &self.config,
            keygen: &*self.keygen,
            dumper: &*self.dumper,
        };

        // Registering: validation and before hooks, in order, no network.
        for action in &mut self.actions {
            if let Err(error) = action.register(&env) {
                self.status = TransactionStatus::RegistrationFailed;
                warn!(
                    target: "dynamap::txn",
                    kind = action.kind(),
                    error = %error,
                    "registration failed"
                );
                return Err(error);
            }
        }

        // Executing: translate surviving actions into one ordered request.
        let mut request = TransactionRequest::new();
        for action in &self.actions {
            match action.wire_operation(&env) {
                Ok(Some(operation)) => request.push(operation),
                Ok(None) => {}
                Err(error) => {
                    self.status = TransactionStatus::RegistrationFailed;
                    return Err(error);
                }
            }
        }
        debug!(
            target: "dynamap::txn",
            actions = self.actions.len(),
            operations = request.len(),
            "transaction request built"
        );

        if !request.is_empty() {
            if let Err(store_error) = self.store.transact_write(&request) {
                for action in &mut self.actions {
                    if !action.is_aborted() {
                        action.rollback();
                    }
                }
                self.status = TransactionStatus::RolledBack;
                warn!(
                    target: "dynamap::txn",
                    error = %store_error,
                    "transaction rolled back"
                );
                return Err(store_failure(store_error));
            }
        }

        // Committed: completion hooks in registration order.
        for action in &mut self.actions {
            if !action.is_aborted() {
                action.complete();
            }
        }
        self.status = TransactionStatus::Committed;
        info!(
            target: "dynamap::txn",
            operations = request.len(),
            "transaction committed"
        );

        let actions = std::mem::take(&mut self.actions);
        Ok(actions.into_iter().map(WriteAction::into_outcome).collect())
    }
}

/// Convert a store failure into the caller-facing error, annotated with the
/// condition expression that most likely caused it when available
fn store_failure(error: StoreError) -> Error {
    let failed_condition = match &error {
        StoreError::ConditionCheckFailed { expression, .. } => Some(expression.clone()),
        _ => None,
    };
    Error::Store {
        message: error.to_string(),
        failed_condition,
    }
}
