//! Core types for session management.
//!
//! This module defines the user record mirrored from the server, the
//! authenticated identity pair, and the request payloads for the
//! remote-auth operations.

use serde::{Deserialize, Serialize};

/// A user record as returned by the server.
///
/// The core treats everything beyond `id` as opaque profile data;
/// `avatar` and `role` are optional so partial records from older
/// server versions still deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned user id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Avatar URL, if the server provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Server-defined role name, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// An authenticated identity: the current user together with the bearer
/// token that proves it.
///
/// The pair lives in one struct so the session can only ever hold both
/// or neither; a token without a user is unrepresentable.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    /// The authenticated user.
    pub user: User,
    /// Opaque bearer token.
    pub token: String,
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Login credentials.
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Login name (the server's login form field).
    pub username: String,
    /// Plaintext password, sent only over the login call.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Creates credentials from a username/password pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Registration request payload.
#[derive(Clone, Serialize)]
pub struct RegisterProfile {
    /// Desired login name.
    pub username: String,
    /// Email address to verify.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

impl std::fmt::Debug for RegisterProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterProfile")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl RegisterProfile {
    /// Creates a registration profile.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Families of session operations, used for per-family error clearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpFamily {
    /// Account registration.
    Register,
    /// The composed login (token fetch + identity lookup).
    Login,
    /// Email verification.
    Verify,
}

impl OpFamily {
    /// Converts to string representation for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Login => "login",
            Self::Verify => "verify",
        }
    }
}
