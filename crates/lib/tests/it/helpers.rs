//! Shared test factories.

use std::sync::Arc;

use userdesk::{
    Error, FixedClock, NewUser, UserService, UserStore, auth::AuthError, store::StoreError,
};

/// Seeded store whose ids start at 1000 and step by one per create.
pub fn seeded_store() -> UserStore {
    UserStore::seeded(Arc::new(FixedClock::new(1000)))
}

/// Seeded service on a [`FixedClock`].
pub fn seeded_service() -> UserService {
    UserService::seeded_with_clock(Arc::new(FixedClock::default()))
}

pub fn new_user(name: &str, email: &str) -> NewUser {
    NewUser::new(name, email)
}

/// Unwrap a store error, panicking on anything else.
pub fn expect_store_error(err: Error) -> StoreError {
    match err {
        Error::Store(e) => e,
        other => panic!("expected a store error, got {other:?}"),
    }
}

/// Unwrap an auth error, panicking on anything else.
pub fn expect_auth_error(err: Error) -> AuthError {
    match err {
        Error::Auth(e) => e,
        other => panic!("expected an auth error, got {other:?}"),
    }
}

/// All emails in the store, asserting they are pairwise distinct.
pub async fn assert_unique_emails(store: &UserStore) {
    let users = store.list().await;
    let mut emails: Vec<_> = users.iter().map(|u| u.email.clone()).collect();
    emails.sort();
    emails.dedup();
    assert_eq!(emails.len(), users.len(), "duplicate email in {users:?}");
}
