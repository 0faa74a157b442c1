//! Shared test utilities for the write transaction suite.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Once};

pub use dynamap::{
    ActionOptions, ActionOutcome, AttributeValue, Error, HookOutcome, HookPhase, InMemoryStore,
    Lifecycle, MapperConfig, PrimaryKey, Record, SequenceKeys, StoreClient, StoreError,
    StoreResult, TableSchema, TransactionRequest, TransactionStatus, TransactionWrite,
    ValidationError, WireOperation, CREATED_AT, UPDATED_AT,
};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

// ============================================================================
// RecordingStore - captures submitted requests for wire-shape assertions
// ============================================================================

/// Store client wrapper that records every submitted request before
/// delegating to the in-memory store.
pub struct RecordingStore {
    inner: InMemoryStore,
    requests: Mutex<Vec<TransactionRequest>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryStore::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn create_table(&self, table: &str, hash_key: &str, range_key: Option<&str>) {
        self.inner.create_table(table, hash_key, range_key);
    }

    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }

    /// Every request submitted so far, in submission order.
    pub fn requests(&self) -> Vec<TransactionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The single submitted request; panics if zero or several were sent.
    pub fn only_request(&self) -> TransactionRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one submission");
        requests.into_iter().next().unwrap()
    }
}

impl StoreClient for RecordingStore {
    fn transact_write(&self, request: &TransactionRequest) -> StoreResult<()> {
        self.requests.lock().unwrap().push(request.clone());
        self.inner.transact_write(request)
    }
}

/// Store client that rejects every submission with a transport error.
pub struct FailingStore;

impl StoreClient for FailingStore {
    fn transact_write(&self, _request: &TransactionRequest) -> StoreResult<()> {
        Err(StoreError::Transport("connection reset".to_string()))
    }
}

// ============================================================================
// TestStore - recording store with the standard tables registered
// ============================================================================

pub struct TestStore {
    pub store: Arc<RecordingStore>,
    pub users: Arc<TableSchema>,
    pub events: Arc<TableSchema>,
}

impl TestStore {
    /// Recording store with a hash-only `users` table and a range-keyed
    /// `events` table.
    pub fn new() -> Self {
        init_tracing();
        let store = Arc::new(RecordingStore::new());
        store.create_table("users", "id", None);
        store.create_table("events", "stream", Some("seq"));
        TestStore {
            store,
            users: Arc::new(TableSchema::new("users", "id")),
            events: Arc::new(TableSchema::new("events", "stream").with_range_key("seq")),
        }
    }

    /// Coordinator with deterministic key generation (`key-1`, `key-2`, ...).
    pub fn txn(&self) -> TransactionWrite {
        TransactionWrite::new(self.store.clone())
            .with_key_generator(Arc::new(SequenceKeys::new("key")))
    }

    /// A new (never persisted) user record.
    pub fn new_user(&self, pairs: &[(&str, AttributeValue)]) -> Record {
        let mut record = Record::new(self.users.clone());
        for (name, value) in pairs {
            record.set(name.to_string(), value.clone());
        }
        record
    }

    /// A user record as loaded from the store (clean snapshot).
    pub fn loaded_user(&self, id: &str, pairs: &[(&str, AttributeValue)]) -> Record {
        let mut attributes = BTreeMap::new();
        attributes.insert("id".to_string(), AttributeValue::String(id.into()));
        for (name, value) in pairs {
            attributes.insert(name.to_string(), value.clone());
        }
        Record::from_persisted(self.users.clone(), attributes)
    }

    pub fn stored_user(&self, id: &str) -> Option<dynamap::Item> {
        self.store
            .inner()
            .get_item("users", &AttributeValue::String(id.into()), None)
    }

    pub fn user_count(&self) -> usize {
        self.store.inner().item_count("users")
    }
}
