//! Canonical end-to-end flows for each action variant.

use crate::common::*;

// ============================================================================
// Create: generated key, conditioned put
// ============================================================================

/// Register one create with `{name: "x"}` on a hash-only schema.
/// The put must carry `attribute_not_exists(id)` and an item with a
/// generated `id` plus `name: "x"`.
#[test]
fn create_emits_conditioned_put_with_generated_key() {
    let harness = TestStore::new();
    let mut txn = harness.txn();
    txn.create(harness.new_user(&[("name", AttributeValue::String("x".into()))]))
        .unwrap();
    let outcomes = txn.commit().unwrap();

    let request = harness.store.only_request();
    assert_eq!(request.len(), 1);
    match &request.operations()[0] {
        WireOperation::Put(put) => {
            assert_eq!(put.table_name, "users");
            assert_eq!(
                put.condition_expression.as_deref(),
                Some("attribute_not_exists(id)")
            );
            assert_eq!(
                put.item.get("id"),
                Some(&AttributeValue::String("key-1".into()))
            );
            assert_eq!(
                put.item.get("name"),
                Some(&AttributeValue::String("x".into()))
            );
        }
        other => panic!("expected put, got {:?}", other),
    }

    // The outcome carries the record with its generated key.
    match &outcomes[0] {
        ActionOutcome::Created(record) => {
            assert_eq!(
                record.get("id"),
                Some(&AttributeValue::String("key-1".into()))
            );
            assert!(!record.is_new());
        }
        other => panic!("expected created, got {:?}", other),
    }
    assert!(harness.stored_user("key-1").is_some());
}

#[test]
fn create_keeps_caller_assigned_key() {
    let harness = TestStore::new();
    let mut txn = harness.txn();
    txn.create(harness.new_user(&[("id", AttributeValue::String("explicit".into()))]))
        .unwrap();
    txn.commit().unwrap();

    assert!(harness.stored_user("explicit").is_some());
}

#[test]
fn duplicate_create_fails_with_annotated_condition() {
    let harness = TestStore::new();
    let mut seed = harness.txn();
    seed.create(harness.new_user(&[("id", AttributeValue::String("u-1".into()))]))
        .unwrap();
    seed.commit().unwrap();

    let mut txn = harness.txn();
    txn.create(harness.new_user(&[("id", AttributeValue::String("u-1".into()))]))
        .unwrap();

    match txn.commit().unwrap_err() {
        Error::Store {
            failed_condition: Some(condition),
            ..
        } => assert_eq!(condition, "attribute_not_exists(id)"),
        other => panic!("expected annotated store error, got {:?}", other),
    }
    assert_eq!(txn.status(), TransactionStatus::RolledBack);
}

// ============================================================================
// Save: single-attribute update expression
// ============================================================================

/// Register one save for an existing record where only `count` changed
/// from 1 to 2. The update must be exactly
/// `SET #_n0 = :_s0` with `{"#_n0": "count"}` and `{":_s0": 2}`.
#[test]
fn save_emits_minimal_update_expression() {
    let harness = TestStore::new();
    let mut record = harness.loaded_user("u-1", &[("count", AttributeValue::Int(1))]);
    record.set("count", 2i64);

    let mut txn = harness.txn();
    txn.save(record).unwrap();
    let outcomes = txn.commit().unwrap();
    assert_eq!(outcomes, vec![ActionOutcome::Saved(true)]);

    let request = harness.store.only_request();
    match &request.operations()[0] {
        WireOperation::Update(update) => {
            assert_eq!(update.update_expression, "SET #_n0 = :_s0");
            assert_eq!(
                update.expression_attribute_names,
                Some(std::collections::BTreeMap::from([(
                    "#_n0".to_string(),
                    "count".to_string()
                )]))
            );
            assert_eq!(
                update.expression_attribute_values.get(":_s0"),
                Some(&AttributeValue::Int(2))
            );
            assert_eq!(
                update.key.get("id"),
                Some(&AttributeValue::String("u-1".into()))
            );
        }
        other => panic!("expected update, got {:?}", other),
    }
}

#[test]
fn save_of_unchanged_record_contacts_nothing_and_succeeds() {
    let harness = TestStore::new();
    let record = harness.loaded_user("u-1", &[("count", AttributeValue::Int(1))]);

    let mut txn = harness.txn();
    txn.save(record).unwrap();
    let outcomes = txn.commit().unwrap();

    assert_eq!(outcomes, vec![ActionOutcome::Saved(true)]);
    assert_eq!(harness.store.request_count(), 0);
    assert_eq!(txn.status(), TransactionStatus::Committed);
}

#[test]
fn save_of_new_record_is_unconditioned_put() {
    let harness = TestStore::new();
    let mut txn = harness.txn();
    txn.save(harness.new_user(&[
        ("id", AttributeValue::String("u-7".into())),
        ("name", AttributeValue::String("x".into())),
    ]))
    .unwrap();
    txn.commit().unwrap();

    let request = harness.store.only_request();
    match &request.operations()[0] {
        WireOperation::Put(put) => assert!(put.condition_expression.is_none()),
        other => panic!("expected put, got {:?}", other),
    }
    assert!(harness.stored_user("u-7").is_some());
}

// ============================================================================
// Destroy: silent abort amid a committing transaction
// ============================================================================

/// Register a destroy whose before hook halts the chain, raise-on-failure
/// disabled, alongside a create. The destroy reports failure, the create
/// commits, the destroyed record survives in the store.
#[test]
fn aborted_destroy_does_not_block_the_rest_of_the_transaction() {
    let harness = TestStore::new();

    let mut seed = harness.txn();
    seed.create(harness.new_user(&[("id", AttributeValue::String("victim".into()))]))
        .unwrap();
    seed.commit().unwrap();

    let halting = Lifecycle::new().on(HookPhase::BeforeDestroy, |_| HookOutcome::Abort);
    let victim = harness.loaded_user("victim", &[]);

    let mut txn = harness.txn();
    txn.destroy_with(victim, halting, ActionOptions::new())
        .unwrap();
    txn.create(harness.new_user(&[("id", AttributeValue::String("other".into()))]))
        .unwrap();

    let outcomes = txn.commit().unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(!outcomes[0].succeeded());
    assert!(matches!(outcomes[0], ActionOutcome::NotDestroyed(_)));
    assert!(matches!(outcomes[1], ActionOutcome::Created(_)));

    // The aborted destroy contributed nothing to the wire request.
    let requests = harness.store.requests();
    assert_eq!(requests.last().unwrap().len(), 1);

    assert!(harness.stored_user("victim").is_some());
    assert!(harness.stored_user("other").is_some());
}

#[test]
fn destroy_removes_the_item() {
    let harness = TestStore::new();
    let mut seed = harness.txn();
    seed.create(harness.new_user(&[("id", AttributeValue::String("u-1".into()))]))
        .unwrap();
    seed.commit().unwrap();

    let mut txn = harness.txn();
    txn.destroy(harness.loaded_user("u-1", &[])).unwrap();
    let outcomes = txn.commit().unwrap();

    assert!(matches!(outcomes[0], ActionOutcome::Destroyed(_)));
    assert!(harness.stored_user("u-1").is_none());
}

// ============================================================================
// DeleteByKey: structural key errors raise before any network call
// ============================================================================

/// Register a delete-by-key whose key lacks the range value on a
/// range-keyed schema: registration raises `MissingRangeKey` and nothing
/// is ever submitted.
#[test]
fn delete_by_key_missing_range_raises_before_network() {
    let harness = TestStore::new();
    let mut txn = harness.txn();
    txn.delete_key(harness.events.clone(), PrimaryKey::hash_only("stream-1"))
        .unwrap();

    let error = txn.commit().unwrap_err();
    assert!(matches!(error, Error::MissingRangeKey { .. }));
    assert_eq!(txn.status(), TransactionStatus::RegistrationFailed);
    assert_eq!(harness.store.request_count(), 0);
}

#[test]
fn delete_by_key_removes_the_item() {
    let harness = TestStore::new();
    let mut seed = harness.txn();
    seed.create(harness.new_user(&[("id", AttributeValue::String("u-1".into()))]))
        .unwrap();
    seed.commit().unwrap();

    let mut txn = harness.txn();
    txn.delete_key(harness.users.clone(), PrimaryKey::hash_only("u-1"))
        .unwrap();
    let outcomes = txn.commit().unwrap();

    assert_eq!(outcomes, vec![ActionOutcome::Deleted]);
    assert!(harness.stored_user("u-1").is_none());
}

// ============================================================================
// Mixed batches
// ============================================================================

#[test]
fn mixed_batch_preserves_registration_order() {
    let harness = TestStore::new();
    let mut seed = harness.txn();
    seed.create(harness.new_user(&[("id", AttributeValue::String("keep".into()))]))
        .unwrap();
    seed.create(harness.new_user(&[("id", AttributeValue::String("drop".into()))]))
        .unwrap();
    seed.commit().unwrap();

    let mut updated = harness.loaded_user("keep", &[("count", AttributeValue::Int(1))]);
    updated.set("count", 2i64);

    let mut txn = harness.txn();
    txn.create(harness.new_user(&[("name", AttributeValue::String("fresh".into()))]))
        .unwrap();
    txn.save(updated).unwrap();
    txn.delete_key(harness.users.clone(), PrimaryKey::hash_only("drop"))
        .unwrap();

    let outcomes = txn.commit().unwrap();
    assert!(matches!(outcomes[0], ActionOutcome::Created(_)));
    assert_eq!(outcomes[1], ActionOutcome::Saved(true));
    assert_eq!(outcomes[2], ActionOutcome::Deleted);

    let request = harness.store.requests().pop().unwrap();
    let names: Vec<_> = request.operations().iter().map(|op| op.name()).collect();
    assert_eq!(names, vec!["put", "update", "delete"]);

    assert!(harness.stored_user("drop").is_none());
    let kept = harness.stored_user("keep").unwrap();
    assert_eq!(kept.get("count"), Some(&AttributeValue::Int(2)));
}

#[test]
fn composite_key_roundtrip() {
    let harness = TestStore::new();

    let mut record = Record::new(harness.events.clone());
    record.set("stream", "s-1");
    record.set("seq", 7i64);
    record.set("payload", AttributeValue::String("hello".into()));

    let mut txn = harness.txn();
    txn.create(record).unwrap();
    txn.commit().unwrap();

    let stored = harness
        .store
        .inner()
        .get_item(
            "events",
            &AttributeValue::String("s-1".into()),
            Some(&AttributeValue::Int(7)),
        )
        .unwrap();
    assert_eq!(
        stored.get("payload"),
        Some(&AttributeValue::String("hello".into()))
    );

    let mut txn = harness.txn();
    txn.delete_key(
        harness.events.clone(),
        PrimaryKey::with_range("s-1", 7i64),
    )
    .unwrap();
    txn.commit().unwrap();
    assert_eq!(harness.store.inner().item_count("events"), 0);
}

#[test]
fn prepared_actions_can_be_added_directly() {
    let harness = TestStore::new();
    let record = harness.new_user(&[("id", AttributeValue::String("u-1".into()))]);

    let mut txn = harness.txn();
    txn.add(dynamap::WriteAction::create(record)).unwrap();
    assert_eq!(txn.len(), 1);
    txn.commit().unwrap();
    assert!(harness.stored_user("u-1").is_some());
}
