//! Error types for the user store

use thiserror::Error;

/// Errors raised by [`UserStore`](super::UserStore) operations.
///
/// A failed operation never leaves a partial mutation behind.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `name` or `email` is missing or empty after applying the request.
    #[error("Name and email are required")]
    MissingFields,

    /// Another record already uses this email.
    #[error("User with email '{email}' already exists")]
    DuplicateEmail { email: String },

    /// No record has this id.
    #[error("User not found: {id}")]
    NotFound { id: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::DuplicateEmail { .. })
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, StoreError::MissingFields)
    }
}

impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
