//! Atomicity: all-or-nothing application, rollback hooks, abort exclusion.

use crate::common::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Store failure rolls everything back
// ============================================================================

/// When the store rejects the submission, every registered action's
/// rollback hooks run exactly once and no record is left marked persisted.
#[test]
fn store_failure_runs_rollback_hooks_exactly_once() {
    init_tracing();

    let rollback_count = Arc::new(AtomicUsize::new(0));
    let still_new_at_rollback = Arc::new(AtomicBool::new(false));

    let counter = rollback_count.clone();
    let new_flag = still_new_at_rollback.clone();
    let lifecycle = Lifecycle::new().on(HookPhase::Rollback, move |record| {
        counter.fetch_add(1, Ordering::SeqCst);
        new_flag.store(record.is_new(), Ordering::SeqCst);
        HookOutcome::Continue
    });

    let schema = Arc::new(TableSchema::new("users", "id"));
    let mut record = Record::new(schema);
    record.set("id", "u-1");

    let mut txn = TransactionWrite::new(Arc::new(FailingStore));
    txn.create_with(record, lifecycle, ActionOptions::new())
        .unwrap();

    let error = txn.commit().unwrap_err();
    assert!(matches!(error, Error::Store { .. }));
    assert_eq!(txn.status(), TransactionStatus::RolledBack);
    assert_eq!(rollback_count.load(Ordering::SeqCst), 1);
    // The record was never marked persisted.
    assert!(still_new_at_rollback.load(Ordering::SeqCst));
}

#[test]
fn store_failure_runs_rollback_for_every_registered_action() {
    init_tracing();

    let rollback_count = Arc::new(AtomicUsize::new(0));
    let schema = Arc::new(TableSchema::new("users", "id"));

    let mut txn = TransactionWrite::new(Arc::new(FailingStore));
    for i in 0..3 {
        let counter = rollback_count.clone();
        let lifecycle = Lifecycle::new().on(HookPhase::Rollback, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            HookOutcome::Continue
        });
        let mut record = Record::new(schema.clone());
        record.set("id", format!("u-{}", i));
        txn.create_with(record, lifecycle, ActionOptions::new())
            .unwrap();
    }

    assert!(txn.commit().is_err());
    assert_eq!(rollback_count.load(Ordering::SeqCst), 3);
}

/// A condition failure on one operation leaves the whole batch unapplied.
#[test]
fn condition_failure_applies_no_operation() {
    let harness = TestStore::new();
    let mut seed = harness.txn();
    seed.create(harness.new_user(&[("id", AttributeValue::String("taken".into()))]))
        .unwrap();
    seed.commit().unwrap();

    let mut txn = harness.txn();
    txn.create(harness.new_user(&[("id", AttributeValue::String("fresh".into()))]))
        .unwrap();
    txn.create(harness.new_user(&[("id", AttributeValue::String("taken".into()))]))
        .unwrap();

    assert!(txn.commit().is_err());
    assert!(harness.stored_user("fresh").is_none());
    assert_eq!(harness.user_count(), 1);
}

// ============================================================================
// Aborted actions are fully excluded
// ============================================================================

/// An aborted action contributes no wire operation and its completion
/// hooks never run.
#[test]
fn aborted_action_never_reaches_wire_or_completion() {
    let harness = TestStore::new();

    let after_count = Arc::new(AtomicUsize::new(0));
    let counter = after_count.clone();
    let lifecycle = Lifecycle::new()
        .on(HookPhase::BeforeCreate, |_| HookOutcome::Abort)
        .on(HookPhase::AfterCreate, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            HookOutcome::Continue
        });

    let mut txn = harness.txn();
    txn.create_with(
        harness.new_user(&[("id", AttributeValue::String("aborted".into()))]),
        lifecycle,
        ActionOptions::new(),
    )
    .unwrap();
    txn.create(harness.new_user(&[("id", AttributeValue::String("committed".into()))]))
        .unwrap();

    let outcomes = txn.commit().unwrap();
    assert!(matches!(outcomes[0], ActionOutcome::NotCreated(_)));
    assert!(matches!(outcomes[1], ActionOutcome::Created(_)));

    let request = harness.store.only_request();
    assert_eq!(request.len(), 1);
    assert_eq!(after_count.load(Ordering::SeqCst), 0);
    assert!(harness.stored_user("aborted").is_none());
    assert!(harness.stored_user("committed").is_some());
}

/// With every action silently aborted, the request is empty: the
/// transaction commits trivially and the store is never contacted.
#[test]
fn all_aborted_actions_commit_trivially_without_store_contact() {
    init_tracing();

    let lifecycle = Lifecycle::new().on(HookPhase::BeforeCreate, |_| HookOutcome::Abort);
    let schema = Arc::new(TableSchema::new("users", "id"));

    // FailingStore proves no submission is attempted.
    let mut txn = TransactionWrite::new(Arc::new(FailingStore));
    for _ in 0..2 {
        txn.create_with(
            Record::new(schema.clone()),
            lifecycle.clone(),
            ActionOptions::new(),
        )
        .unwrap();
    }

    let outcomes = txn.commit().unwrap();
    assert_eq!(txn.status(), TransactionStatus::Committed);
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|outcome| !outcome.succeeded()));
}

// ============================================================================
// Registration failure precedes everything
// ============================================================================

/// A raise-on-failure validation error fails registration atomically: the
/// store never sees a request, and no completion hook runs for any action.
#[test]
fn raising_validation_failure_stops_the_whole_transaction() {
    let harness = TestStore::new();

    let invalid = Lifecycle::new()
        .validator(|_| Err(ValidationError::new("name", "must not be blank")));

    let mut txn = harness.txn();
    txn.create(harness.new_user(&[("id", AttributeValue::String("first".into()))]))
        .unwrap();
    txn.create_with(
        harness.new_user(&[("id", AttributeValue::String("second".into()))]),
        invalid,
        ActionOptions::raising(),
    )
    .unwrap();

    match txn.commit().unwrap_err() {
        Error::DocumentNotValid { record, source } => {
            assert_eq!(
                record.get("id"),
                Some(&AttributeValue::String("second".into()))
            );
            assert_eq!(source.attribute, "name");
        }
        other => panic!("expected DocumentNotValid, got {:?}", other),
    }

    assert_eq!(txn.status(), TransactionStatus::RegistrationFailed);
    assert_eq!(harness.store.request_count(), 0);
    assert!(harness.stored_user("first").is_none());
}

#[test]
fn raising_hook_abort_stops_the_whole_transaction() {
    let harness = TestStore::new();
    let halting = Lifecycle::new().on(HookPhase::BeforeSave, |_| HookOutcome::Abort);

    let mut record = harness.loaded_user("u-1", &[("count", AttributeValue::Int(1))]);
    record.set("count", 2i64);

    let mut txn = harness.txn();
    txn.save_with(record, halting, ActionOptions::raising())
        .unwrap();

    assert!(matches!(txn.commit().unwrap_err(), Error::RecordNotSaved));
    assert_eq!(harness.store.request_count(), 0);
}

// ============================================================================
// Concurrent transactions are independent
// ============================================================================

#[test]
fn concurrent_transactions_do_not_interfere() {
    let harness = TestStore::new();
    let num_threads = 4;
    let creates_per_thread = 10;

    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let store = harness.store.clone();
            let schema = harness.users.clone();
            std::thread::spawn(move || {
                for i in 0..creates_per_thread {
                    let mut record = Record::new(schema.clone());
                    record.set("id", format!("t{}-{}", t, i));
                    let mut txn = TransactionWrite::new(store.clone());
                    txn.create(record).unwrap();
                    txn.commit().unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(harness.user_count(), num_threads * creates_per_thread);
}
