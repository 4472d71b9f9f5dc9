//! Access gate
//!
//! A single shared credential guards the store. Logging in with it returns a static,
//! non-expiring bearer token. There is no per-user session table: every caller that
//! logged in holds the same token.

use crate::{
    Result,
    constants::{BEARER_SCHEME, DEFAULT_PASSWORD, DEFAULT_TOKEN, DEFAULT_USERNAME},
};

pub mod errors;

pub use errors::AuthError;

/// Bearer token returned by a successful login.
pub type SessionToken = String;

/// The username/password pair the gate accepts.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Checks logins against one credential pair and tokens against one issued value.
#[derive(Clone)]
pub struct AccessGate {
    credentials: Credentials,
    token: SessionToken,
}

impl AccessGate {
    /// Build a gate. Empty strings are rejected so that a missing login field can
    /// never match.
    pub fn new(credentials: Credentials, token: impl Into<SessionToken>) -> Result<Self> {
        let token = token.into();
        let empty = if credentials.username.is_empty() {
            Some("username")
        } else if credentials.password.is_empty() {
            Some("password")
        } else if token.is_empty() {
            Some("token")
        } else {
            None
        };
        if let Some(field) = empty {
            return Err(AuthError::InvalidConfiguration {
                reason: format!("{field} must not be empty"),
            }
            .into());
        }
        Ok(Self { credentials, token })
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    /// Exchange the shared credential for the bearer token.
    pub fn login(&self, username: &str, password: &str) -> Result<SessionToken> {
        if username == self.credentials.username && password == self.credentials.password {
            tracing::debug!(%username, "Login accepted");
            Ok(self.token.clone())
        } else {
            tracing::warn!(%username, "Login rejected");
            Err(AuthError::InvalidCredentials.into())
        }
    }

    /// Check a presented token. Must pass before any store operation runs.
    pub fn authorize(&self, token: Option<&str>) -> Result<()> {
        match token {
            None => Err(AuthError::MissingToken.into()),
            Some(t) if t == self.token => Ok(()),
            Some(_) => Err(AuthError::InvalidToken.into()),
        }
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            token: DEFAULT_TOKEN.to_string(),
        }
    }
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate")
            .field("credentials", &self.credentials)
            .field("token", &"***")
            .finish()
    }
}

/// Extract the token from an `Authorization` header value.
///
/// The token is the second space-separated segment, so `"Bearer abc"` yields `abc`.
/// A header without a space counts as no token. The scheme word is
/// not checked: `"Token abc"` still yields `abc` and is then judged by
/// [`AccessGate::authorize`].
pub fn bearer_token(header: &str) -> Option<&str> {
    header.split(' ').nth(1)
}

/// Format a token for the `Authorization` header.
pub fn bearer_header(token: &str) -> String {
    format!("{BEARER_SCHEME} {token}")
}
