//! Server lifecycle errors

use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured port is taken by another process.
    #[error("Port is already in use at {address}. Free the port or choose a different one.")]
    AddressInUse { address: String },

    /// Any other failure to bind the listener.
    #[error("Failed to bind server to {address}: {reason}")]
    Bind { address: String, reason: String },

    /// The serving task failed or panicked.
    #[error("Server failed: {reason}")]
    Runtime { reason: String },
}

impl ServerError {
    pub fn is_bind_error(&self) -> bool {
        matches!(
            self,
            ServerError::AddressInUse { .. } | ServerError::Bind { .. }
        )
    }
}

impl From<ServerError> for crate::Error {
    fn from(err: ServerError) -> Self {
        crate::Error::Server(err)
    }
}
