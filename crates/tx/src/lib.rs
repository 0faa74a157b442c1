//! Transactional write subsystem for Dynamap
//!
//! This crate implements the write path:
//! - WriteAction: per-record create/save/destroy/delete-by-key variants
//! - ActionOptions: immutable per-action options bag
//! - Update-expression synthesis with uniform name/value aliasing
//! - Put-item sanitization driven by explicit configuration
//! - TransactionWrite: registration, atomic submission, commit/rollback

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod action;
pub mod coordinator;
pub mod expression;
pub mod options;
pub mod sanitize;

// Re-export commonly used types
pub use action::{
    ActionOutcome, ActionState, CreateAction, DeleteByKeyAction, DestroyAction, SaveAction,
    WriteAction,
};
pub use coordinator::{TransactionStatus, TransactionWrite};
pub use expression::{
    synthesize_update, UpdateExpression, NAME_ALIAS_PREFIX, VALUE_PLACEHOLDER_PREFIX,
};
pub use options::ActionOptions;
pub use sanitize::sanitize_item;
