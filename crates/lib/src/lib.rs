//!
//! Userdesk: a small user-management service.
//! This library provides the record store, the access gate that guards it, and the
//! HTTP surface through which front ends drive both.
//!
//! ## Core Concepts
//!
//! * **Records (`user::User`)**: a user with an id, display name, unique email and a role.
//! * **Store (`store::UserStore`)**: the ordered, process-wide collection of records with
//!   validated create/update/delete operations. Ids come from an injected [`Clock`].
//! * **Access Gate (`auth::AccessGate`)**: a single shared credential. A successful login
//!   hands out a static bearer token which every store call must present.
//! * **Service (`service::UserService`)**: gate + store. Every store operation is
//!   authorized here before it touches the collection.
//! * **Server (`server`)**: the axum router mapping the service onto `/login` and `/items`.
//! * **Client (`client::ApiClient`)**: a typed reqwest client for a running server.

pub mod auth;
pub mod client;
pub mod clock;
pub mod constants;
pub mod server;
pub mod service;
pub mod store;
pub mod user;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "testing"))]
pub use clock::{ClockHold, FixedClock};
pub use service::UserService;
pub use store::UserStore;
pub use user::{NewUser, Role, User, UserPatch};

/// Result type used throughout the Userdesk library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Userdesk library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured errors from the access gate
    #[error(transparent)]
    Auth(auth::AuthError),

    /// Structured errors from the user store
    #[error(transparent)]
    Store(store::StoreError),

    /// Errors raised while starting or stopping the HTTP server
    #[error(transparent)]
    Server(server::ServerError),

    /// Errors raised by the HTTP client
    #[error(transparent)]
    Client(client::ClientError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Auth(_) => "auth",
            Error::Store(_) => "store",
            Error::Server(_) => "server",
            Error::Client(_) => "client",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a record was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_not_found(),
            Error::Client(client_err) => client_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a write conflict (duplicate email).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_conflict(),
            Error::Client(client_err) => client_err.is_conflict(),
            _ => false,
        }
    }

    /// Check if this error is a rejected payload.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_validation_error(),
            _ => false,
        }
    }

    /// Check if this error is authentication-related.
    pub fn is_authentication_error(&self) -> bool {
        match self {
            Error::Auth(auth_err) => auth_err.is_authentication_error(),
            Error::Client(client_err) => client_err.is_authentication_error(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Server(server_err) => server_err.is_bind_error(),
            _ => false,
        }
    }
}
