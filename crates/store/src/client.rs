//! Store client contract
//!
//! The coordinator hands a finished `TransactionRequest` to a `StoreClient`
//! exactly once per commit. The client must apply the whole request or none
//! of it; partial application is a contract violation. The call may block
//! on network I/O; it is the single suspension point of the write path.

use crate::request::TransactionRequest;
use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures reported by a store client
///
/// Any variant means the whole transaction was rejected; no operation in
/// the request was applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A condition expression evaluated to false
    #[error("condition check failed for operation {index}: {expression}")]
    ConditionCheckFailed {
        /// Index of the failing operation within the submitted request
        index: usize,
        /// The condition expression that did not hold
        expression: String,
    },

    /// The store rejected the request as malformed or unsupported
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// Transport-level failure (network, timeout, service error)
    #[error("transport error: {0}")]
    Transport(String),
}

/// Executes batched write requests atomically
pub trait StoreClient: Send + Sync {
    /// Submit the request as a single atomic unit
    ///
    /// Returns `Ok(())` only when every operation applied. On `Err`, no
    /// operation was applied.
    fn transact_write(&self, request: &TransactionRequest) -> StoreResult<()>;
}
