//! UserStore invariants

use std::sync::Arc;

use userdesk::{FixedClock, NewUser, Role, UserPatch, UserStore, store::StoreError};

use crate::helpers::*;

// ===== CREATE =====

#[tokio::test]
async fn create_then_list_contains_new_record() {
    let store = seeded_store();
    let created = store
        .create(new_user("API Test User", "api.test.user@example.com"))
        .await
        .unwrap();

    let users = store.list().await;
    assert_eq!(users.len(), 4);
    let last = users.last().unwrap();
    assert_eq!(last, &created);
    assert_eq!(last.name, "API Test User");
    assert_eq!(last.email, "api.test.user@example.com");
    assert_eq!(last.role, Role::User);
}

#[tokio::test]
async fn create_keeps_supplied_role() {
    let store = seeded_store();
    let created = store
        .create(new_user("Root", "root@example.com").with_role(Role::Admin))
        .await
        .unwrap();
    assert_eq!(created.role, Role::Admin);
}

#[tokio::test]
async fn create_duplicate_email_conflicts() {
    let store = seeded_store();
    let err = store
        .create(new_user("Dup", "alice@example.com"))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(
        expect_store_error(err),
        StoreError::DuplicateEmail {
            email: "alice@example.com".into()
        }
    );
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn create_missing_fields_leaves_store_unchanged() {
    let store = seeded_store();
    let before = store.list().await;

    for payload in [
        NewUser::default(),
        NewUser {
            name: Some("Only Name".into()),
            ..Default::default()
        },
        NewUser {
            email: Some("only@example.com".into()),
            ..Default::default()
        },
        new_user("", ""),
    ] {
        let err = store.create(payload).await.unwrap_err();
        assert_eq!(expect_store_error(err), StoreError::MissingFields);
    }

    assert_eq!(store.list().await, before);
}

#[tokio::test]
async fn ids_follow_the_clock() {
    let clock = Arc::new(FixedClock::new(1_700_000_000_000));
    let store = UserStore::with_clock(clock.clone());
    let a = store.create(new_user("A", "a@example.com")).await.unwrap();
    let b = store.create(new_user("B", "b@example.com")).await.unwrap();
    assert_eq!(a.id, "1700000000000");
    assert_eq!(b.id, "1700000000001");
    assert_eq!(clock.peek(), 1_700_000_000_002);
}

#[tokio::test]
async fn colliding_ids_are_bumped_not_reused() {
    let clock = Arc::new(FixedClock::new(2));
    let store = UserStore::seeded(clock.clone());
    // "2" and "3" are seed ids.
    let _hold = clock.hold();
    let created = store.create(new_user("Dee", "dee@example.com")).await.unwrap();
    assert_eq!(created.id, "4");
}

// ===== UPDATE =====

#[tokio::test]
async fn update_email_only_leaves_other_fields() {
    let store = seeded_store();
    let updated = store
        .update("1", UserPatch::default().email("alice.new@example.com"))
        .await
        .unwrap();
    assert_eq!(updated.id, "1");
    assert_eq!(updated.name, "Alice Smith");
    assert_eq!(updated.role, Role::Admin);
    assert_eq!(updated.email, "alice.new@example.com");
}

#[tokio::test]
async fn update_all_fields() {
    let store = seeded_store();
    let patch = UserPatch::default()
        .name("Alice Updated API")
        .email("alice.updated.api@example.com")
        .role(Role::Admin);
    let updated = store.update("1", patch).await.unwrap();
    assert_eq!(store.get("1").await.unwrap(), updated);
    assert_eq!(updated.name, "Alice Updated API");
}

#[tokio::test]
async fn update_with_empty_name_is_rejected_without_mutation() {
    let store = seeded_store();
    let before = store.get("2").await.unwrap();
    let err = store
        .update("2", UserPatch::default().name(""))
        .await
        .unwrap_err();
    assert_eq!(expect_store_error(err), StoreError::MissingFields);
    assert_eq!(store.get("2").await.unwrap(), before);
}

#[tokio::test]
async fn update_with_empty_email_is_rejected() {
    let store = seeded_store();
    let err = store
        .update("3", UserPatch::default().email(""))
        .await
        .unwrap_err();
    assert!(err.is_validation_error());
}

#[tokio::test]
async fn update_to_another_records_email_conflicts() {
    let store = seeded_store();
    let err = store
        .update("1", UserPatch::default().email("bob@example.com"))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(store.get("1").await.unwrap().email, "alice@example.com");
    assert_unique_emails(&store).await;
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let store = seeded_store();
    let err = store
        .update("nonexistentid", UserPatch::default().name("Non Existent"))
        .await
        .unwrap_err();
    assert_eq!(
        expect_store_error(err),
        StoreError::NotFound {
            id: "nonexistentid".into()
        }
    );
}

#[tokio::test]
async fn empty_patch_is_a_no_op_success() {
    let store = seeded_store();
    let before = store.get("3").await.unwrap();
    let after = store.update("3", UserPatch::default()).await.unwrap();
    assert_eq!(before, after);
}

// ===== DELETE =====

#[tokio::test]
async fn delete_removes_and_second_delete_is_not_found() {
    let store = seeded_store();
    store.delete("1").await.unwrap();
    assert_eq!(store.len().await, 2);
    assert!(store.list().await.iter().all(|u| u.id != "1"));

    let err = store.delete("1").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn deleted_email_can_be_reused() {
    let store = seeded_store();
    store.delete("2").await.unwrap();
    let created = store
        .create(new_user("New Bob", "bob@example.com"))
        .await
        .unwrap();
    assert_eq!(created.email, "bob@example.com");
}

// ===== INVARIANTS =====

#[tokio::test]
async fn failed_operations_leave_list_unchanged() {
    let store = seeded_store();
    let before = store.list().await;

    let _ = store.create(new_user("Dup", "charlie@example.com")).await;
    let _ = store.update("2", UserPatch::default().email("alice@example.com")).await;
    let _ = store.update("missing", UserPatch::default().name("X")).await;
    let _ = store.delete("missing").await;

    assert_eq!(store.list().await, before);
}

#[tokio::test]
async fn emails_stay_unique_across_mixed_operations() {
    let store = seeded_store();
    let ops: Vec<(&str, &str)> = vec![
        ("Eve", "eve@example.com"),
        ("Eve Again", "eve@example.com"),
        ("Frank", "frank@example.com"),
    ];
    for (name, email) in ops {
        let _ = store.create(new_user(name, email)).await;
    }
    let frank = store
        .list()
        .await
        .into_iter()
        .find(|u| u.name == "Frank")
        .unwrap();
    let _ = store
        .update(&frank.id, UserPatch::default().email("eve@example.com"))
        .await;
    let _ = store
        .update("3", UserPatch::default().email("frank@example.com"))
        .await;

    assert_eq!(store.len().await, 5);
    assert_unique_emails(&store).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_with_same_email_admit_one() {
    let store = seeded_store();
    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .create(new_user(&format!("Racer {i}"), "race@example.com"))
                .await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);
    assert_unique_emails(&store).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_unique_ids() {
    let clock = Arc::new(FixedClock::new(9000));
    let store = UserStore::with_clock(clock.clone());
    let _hold = clock.hold();

    let mut handles = Vec::new();
    for i in 0..10 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .create(new_user("Same Ms", &format!("user{i}@example.com")))
                .await
                .unwrap()
        }));
    }
    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().id);
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}
