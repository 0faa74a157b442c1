//! Key generation strategy
//!
//! Create actions assign a hash key to records that reach registration
//! without one. The strategy is injectable so tests can supply
//! deterministic keys; production uses random UUIDs.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Generates fresh hash key values
pub trait KeyGenerator: Send + Sync {
    /// Produce a new, non-empty key string
    fn new_key(&self) -> String;
}

/// Random v4 UUID keys (production default)
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidKeys;

impl KeyGenerator for UuidKeys {
    fn new_key(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic sequential keys for tests: `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug)]
pub struct SequenceKeys {
    prefix: String,
    counter: AtomicU64,
}

impl SequenceKeys {
    /// Create a generator with the given prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl KeyGenerator for SequenceKeys {
    fn new_key(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}
