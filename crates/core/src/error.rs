//! Error types for Dynamap
//!
//! This module defines the caller-facing error taxonomy. Validation and
//! hook failures are detected during registration, before any network
//! call; store failures only occur during execution and always mean the
//! whole transaction rolled back. We use `thiserror` for automatic
//! `Display` and `Error` trait implementations.

use crate::key::KeyError;
use crate::lifecycle::ValidationError;
use crate::record::Record;
use thiserror::Error;

/// Result type alias for Dynamap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Caller-facing error taxonomy
#[derive(Debug, Error)]
pub enum Error {
    /// An action's addressing hash key is missing or null
    #[error("missing hash key for table '{table}'")]
    MissingHashKey {
        /// Logical table name
        table: String,
    },

    /// An action's addressing range key is missing on a range-keyed table
    #[error("missing range key for table '{table}'")]
    MissingRangeKey {
        /// Logical table name
        table: String,
    },

    /// Validation failed and raise-on-failure was requested
    ///
    /// Carries the invalid record for inspection.
    #[error("document not valid: {source}")]
    DocumentNotValid {
        /// The record that failed validation
        record: Box<Record>,
        /// The first failing validation
        #[source]
        source: ValidationError,
    },

    /// A before hook aborted a create/save and raise-on-failure was requested
    #[error("record not saved: a before hook aborted the operation")]
    RecordNotSaved,

    /// A before hook aborted a destroy and raise-on-failure was requested
    #[error("record not destroyed: a before hook aborted the operation")]
    RecordNotDestroyed,

    /// A supplied key value is malformed
    #[error("invalid key: {0}")]
    Key(#[from] KeyError),

    /// Attribute dumping failed while building a wire operation
    #[error("attribute dump failed: {0}")]
    Dump(String),

    /// Operation attempted in the wrong coordinator state
    #[error("invalid operation: {0}")]
    InvalidState(String),

    /// The store rejected the atomic submission; the transaction rolled back
    #[error("store rejected transaction: {message}")]
    Store {
        /// Store-reported failure description
        message: String,
        /// Condition expression that most likely caused the failure, when
        /// the store reported which operation's check failed
        failed_condition: Option<String>,
    },
}
