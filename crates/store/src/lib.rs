//! Store layer for Dynamap
//!
//! This crate defines the wire-level request model and the contract a store
//! adapter must honor:
//! - WireOperation / TransactionRequest: ordered put/update/delete batch
//! - StoreClient: single atomic submission, whole batch or nothing
//! - StoreError: condition/transport failure taxonomy
//! - InMemoryStore: reference client for tests and embedded use

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod client;
pub mod memory;
pub mod request;

// Re-export commonly used types and traits
pub use client::{StoreClient, StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use request::{
    DeleteOperation, Item, PutOperation, TransactionRequest, UpdateOperation, WireOperation,
};
