//! In-memory user store
//!
//! Holds the ordered collection of [`User`] records. Order is creation order; updates
//! replace a record in place. Each mutation runs its whole read-modify-write under one
//! write lock, so the id and email uniqueness invariants hold with concurrent callers.
//!
//! Record ids are the decimal form of the clock's millisecond timestamp. When two
//! creates land on the same millisecond the later one takes the next free value.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    Result,
    clock::{Clock, SystemClock},
    user::{NewUser, Role, User, UserPatch, seed_users},
};

pub mod errors;

pub use errors::StoreError;

/// Shared handle to the user collection.
///
/// Cloning is cheap and every clone sees the same records.
#[derive(Clone, Debug)]
pub struct UserStore {
    users: Arc<RwLock<Vec<User>>>,
    clock: Arc<dyn Clock>,
}

impl UserStore {
    /// Create an empty store backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store that draws ids from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::from_users(Vec::new(), clock)
    }

    /// Create a store holding the three fixed seed records.
    pub fn seeded(clock: Arc<dyn Clock>) -> Self {
        Self::from_users(seed_users(), clock)
    }

    fn from_users(users: Vec<User>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
            clock,
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// All records in creation order.
    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    /// Look up one record by id.
    pub async fn get(&self, id: &str) -> Result<User> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() }.into())
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Validate and append a new record.
    ///
    /// # Errors
    /// - [`StoreError::MissingFields`] if `name` or `email` is absent or empty
    /// - [`StoreError::DuplicateEmail`] if any record already has this email
    pub async fn create(&self, new_user: NewUser) -> Result<User> {
        let (name, email) = match (new_user.name, new_user.email) {
            (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => (name, email),
            _ => return Err(StoreError::MissingFields.into()),
        };

        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == email) {
            tracing::debug!(%email, "Rejected create: email already in use");
            return Err(StoreError::DuplicateEmail { email }.into());
        }

        let id = next_id(&users, self.clock.as_ref());
        let user = User {
            id,
            name,
            email,
            role: new_user.role.unwrap_or(Role::User),
        };
        users.push(user.clone());
        tracing::info!(id = %user.id, email = %user.email, "Created user");
        Ok(user)
    }

    /// Merge the supplied fields onto an existing record.
    ///
    /// The email conflict scan only runs when `patch.email` is supplied, and ignores the
    /// record being updated.
    ///
    /// # Errors
    /// - [`StoreError::NotFound`] if no record has `id`
    /// - [`StoreError::MissingFields`] if the merged `name` or `email` is empty
    /// - [`StoreError::DuplicateEmail`] if another record has the supplied email
    pub async fn update(&self, id: &str, patch: UserPatch) -> Result<User> {
        let mut users = self.users.write().await;
        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        let mut updated = users[index].clone();
        patch.apply_to(&mut updated);

        if updated.name.is_empty() || updated.email.is_empty() {
            return Err(StoreError::MissingFields.into());
        }

        if patch.email.is_some()
            && users
                .iter()
                .any(|u| u.id != id && u.email == updated.email)
        {
            tracing::debug!(%id, email = %updated.email, "Rejected update: email already in use");
            return Err(StoreError::DuplicateEmail {
                email: updated.email,
            }
            .into());
        }

        users[index] = updated.clone();
        tracing::info!(%id, "Updated user");
        Ok(updated)
    }

    /// Remove the record with `id`.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(StoreError::NotFound { id: id.to_string() }.into());
        }
        tracing::info!(%id, "Deleted user");
        Ok(())
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Next millisecond id not already held by a record.
fn next_id(users: &[User], clock: &dyn Clock) -> String {
    let mut millis = clock.now_millis();
    loop {
        let candidate = millis.to_string();
        if !users.iter().any(|u| u.id == candidate) {
            return candidate;
        }
        millis += 1;
    }
}
