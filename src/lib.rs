//! Dynamap - object mapper for hash/range-keyed NoSQL stores
//!
//! Dynamap maps typed records onto a hash/range-keyed store and commits
//! every write through an atomic transaction: actions are validated and
//! lifecycle-hooked locally, translated into one batched wire request, and
//! applied by the store as a unit or not at all.
//!
//! # Quick Start
//!
//! ```
//! use dynamap::{AttributeValue, InMemoryStore, Record, TableSchema, TransactionWrite};
//! use std::sync::Arc;
//!
//! # fn main() -> dynamap::Result<()> {
//! let schema = Arc::new(TableSchema::new("users", "id"));
//! let store = Arc::new(InMemoryStore::new());
//! store.create_table("users", "id", None);
//!
//! let mut record = Record::new(schema);
//! record.set("name", "alice");
//!
//! let mut txn = TransactionWrite::new(store);
//! txn.create(record)?;
//! let outcomes = txn.commit()?;
//! assert!(outcomes[0].succeeded());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The workspace splits into three layers: `dynamap-core` (values, keys,
//! schemas, records, lifecycle), `dynamap-store` (wire request model and
//! the atomic store client contract), and `dynamap-tx` (the four write
//! actions and the transaction coordinator). This crate re-exports the
//! public surface of all three.

// Re-export the public API
pub use dynamap_core::{
    validate_key_value, AttributeDumper, AttributeValue, Error, Hook, HookOutcome, HookPhase,
    IdentityDumper, KeyError, KeyGenerator, Lifecycle, MapperConfig, PrimaryKey, Record, Result,
    SequenceKeys, TableSchema, UuidKeys, ValidationError, Validator, CREATED_AT, UPDATED_AT,
};
pub use dynamap_store::{
    DeleteOperation, InMemoryStore, Item, PutOperation, StoreClient, StoreError, StoreResult,
    TransactionRequest, UpdateOperation, WireOperation,
};
pub use dynamap_tx::{
    sanitize_item, synthesize_update, ActionOptions, ActionOutcome, ActionState, CreateAction,
    DeleteByKeyAction, DestroyAction, SaveAction, TransactionStatus, TransactionWrite,
    UpdateExpression, WriteAction, NAME_ALIAS_PREFIX, VALUE_PLACEHOLDER_PREFIX,
};
