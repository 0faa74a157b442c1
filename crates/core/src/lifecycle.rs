//! Record lifecycle: validators and hook pipelines
//!
//! Hooks are explicit ordered pipelines of functions per phase. Each hook
//! returns `HookOutcome::Continue` or `HookOutcome::Abort`; the runner
//! short-circuits on the first abort. There is no implicit halt-chain
//! mechanism: aborting is a value, not a side channel.
//!
//! Validators run before any write reaches the wire. The first failing
//! validator wins; its `ValidationError` is carried inside
//! `Error::DocumentNotValid` together with the offending record.

use crate::record::Record;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result of one hook invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// Continue with the next hook in the pipeline
    Continue,
    /// Stop the pipeline and abort the surrounding action
    Abort,
}

/// Lifecycle phases with hook pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    /// Before a create action builds its wire operation
    BeforeCreate,
    /// After the whole transaction committed, for create actions
    AfterCreate,
    /// Before a save action builds its wire operation
    BeforeSave,
    /// After the whole transaction committed, for save actions
    AfterSave,
    /// Before a destroy action builds its wire operation
    BeforeDestroy,
    /// After the whole transaction committed, for destroy actions
    AfterDestroy,
    /// After the store rejected the transaction
    Rollback,
}

/// One hook function
pub type Hook = Arc<dyn Fn(&mut Record) -> HookOutcome + Send + Sync>;

/// One validator function
pub type Validator = Arc<dyn Fn(&Record) -> Result<(), ValidationError> + Send + Sync>;

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{attribute} {message}")]
pub struct ValidationError {
    /// Attribute the failure is about
    pub attribute: String,
    /// Human-readable description, e.g. "must not be blank"
    pub message: String,
}

impl ValidationError {
    /// Create a validation failure for one attribute
    pub fn new(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            message: message.into(),
        }
    }
}

/// Validators plus per-phase hook pipelines for one model
///
/// Cloning is cheap: hooks and validators are shared `Arc`s.
#[derive(Clone, Default)]
pub struct Lifecycle {
    validators: Vec<Validator>,
    hooks: HashMap<HookPhase, Vec<Hook>>,
}

impl Lifecycle {
    /// An empty lifecycle: no validators, no hooks
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator
    pub fn validator(
        mut self,
        f: impl Fn(&Record) -> Result<(), ValidationError> + Send + Sync + 'static,
    ) -> Self {
        self.validators.push(Arc::new(f));
        self
    }

    /// Append a hook to the given phase's pipeline
    pub fn on(
        mut self,
        phase: HookPhase,
        f: impl Fn(&mut Record) -> HookOutcome + Send + Sync + 'static,
    ) -> Self {
        self.hooks.entry(phase).or_default().push(Arc::new(f));
        self
    }

    /// Run all validators in order; the first failure wins
    pub fn validate(&self, record: &Record) -> Result<(), ValidationError> {
        for validator in &self.validators {
            validator(record)?;
        }
        Ok(())
    }

    /// Run the phase's hook pipeline in order, short-circuiting on abort
    pub fn run_hooks(&self, phase: HookPhase, record: &mut Record) -> HookOutcome {
        if let Some(hooks) = self.hooks.get(&phase) {
            for hook in hooks {
                if hook(record) == HookOutcome::Abort {
                    return HookOutcome::Abort;
                }
            }
        }
        HookOutcome::Continue
    }

    /// Number of hooks registered for a phase
    pub fn hook_count(&self, phase: HookPhase) -> usize {
        self.hooks.get(&phase).map_or(0, Vec::len)
    }

    /// Number of registered validators
    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("validators", &self.validators.len())
            .field("hook_phases", &self.hooks.len())
            .finish()
    }
}
