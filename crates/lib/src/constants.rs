//! Constants used throughout the Userdesk library.
//!
//! Default credentials, the static bearer token, and the literal messages the HTTP
//! surface returns. Front ends and their test suites match on these strings.

/// Username accepted by the access gate unless configured otherwise.
pub const DEFAULT_USERNAME: &str = "apiuser";

/// Password accepted by the access gate unless configured otherwise.
pub const DEFAULT_PASSWORD: &str = "apipassword123";

/// Bearer token handed out on successful login unless configured otherwise.
pub const DEFAULT_TOKEN: &str = "valid_token";

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port for the HTTP server.
pub const DEFAULT_PORT: u16 = 5000;

/// Authentication scheme expected in the `Authorization` header.
pub const BEARER_SCHEME: &str = "Bearer";

pub const MSG_LOGIN_OK: &str = "Login successful";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MSG_TOKEN_REQUIRED: &str = "Authentication token required";
pub const MSG_INVALID_TOKEN: &str = "Invalid token";
pub const MSG_FIELDS_REQUIRED: &str = "Name and email are required";
pub const MSG_DUPLICATE_EMAIL: &str = "User with this email already exists";
pub const MSG_NOT_FOUND: &str = "User not found";
pub const MSG_CREATED: &str = "User created successfully";
pub const MSG_UPDATED: &str = "User updated successfully";
pub const MSG_DELETED: &str = "User deleted successfully";
pub const MSG_INVALID_BODY: &str = "Invalid request body";
