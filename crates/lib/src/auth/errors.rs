//! Authentication error types
//!
//! Login and token checks fail with one of these. None of them is retried.

use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Username/password did not match the configured pair.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No bearer token was presented.
    #[error("Authentication token required")]
    MissingToken,

    /// A token was presented but it is not the issued one.
    #[error("Invalid token")]
    InvalidToken,

    /// The gate was configured with an empty username, password or token.
    #[error("Invalid access gate configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl AuthError {
    /// Failures caused by what the caller presented, as opposed to setup errors.
    pub fn is_authentication_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken
        )
    }

    /// True for a token that was presented and refused.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, AuthError::InvalidToken)
    }
}

impl From<AuthError> for crate::Error {
    fn from(err: AuthError) -> Self {
        crate::Error::Auth(err)
    }
}
