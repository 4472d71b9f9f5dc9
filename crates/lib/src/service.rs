//! Gate plus store.
//!
//! [`UserService`] is the one entry point the HTTP layer uses. Each store operation
//! takes the presented token and runs [`AccessGate::authorize`] before touching the
//! collection.

use std::sync::Arc;

use crate::{
    Result,
    auth::{AccessGate, SessionToken},
    clock::{Clock, SystemClock},
    store::UserStore,
    user::{NewUser, User, UserPatch},
};

#[derive(Clone, Debug)]
pub struct UserService {
    gate: AccessGate,
    store: UserStore,
}

impl UserService {
    pub fn new(gate: AccessGate, store: UserStore) -> Self {
        Self { gate, store }
    }

    /// Default gate and a seeded store on the system clock.
    pub fn seeded() -> Self {
        Self::seeded_with_clock(Arc::new(SystemClock))
    }

    pub fn seeded_with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::new(AccessGate::default(), UserStore::seeded(clock))
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Direct store handle, bypassing the gate. For server-internal reads such as
    /// health reporting.
    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn login(&self, username: &str, password: &str) -> Result<SessionToken> {
        self.gate.login(username, password)
    }

    pub async fn list(&self, token: Option<&str>) -> Result<Vec<User>> {
        self.gate.authorize(token)?;
        Ok(self.store.list().await)
    }

    pub async fn get(&self, token: Option<&str>, id: &str) -> Result<User> {
        self.gate.authorize(token)?;
        self.store.get(id).await
    }

    pub async fn create(&self, token: Option<&str>, new_user: NewUser) -> Result<User> {
        self.gate.authorize(token)?;
        self.store.create(new_user).await
    }

    pub async fn update(&self, token: Option<&str>, id: &str, patch: UserPatch) -> Result<User> {
        self.gate.authorize(token)?;
        self.store.update(id, patch).await
    }

    pub async fn delete(&self, token: Option<&str>, id: &str) -> Result<()> {
        self.gate.authorize(token)?;
        self.store.delete(id).await
    }
}
