//! Error types for session and remote-auth operations.
//!
//! Every remote call failure is normalized to a [`RemoteError`] carrying
//! an [`ErrorKind`] and a human-readable message. Session-level failures
//! additionally record which operation family produced them so that
//! error clearing stays per-family.

use thiserror::Error;

use super::types::OpFamily;

/// Classification of a failed remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, timeout, or a structurally invalid response.
    Network,
    /// The server rejected the request payload (400/409/422).
    Validation,
    /// The server rejected the caller's credentials or token (401/403).
    Auth,
}

impl ErrorKind {
    /// Converts to string representation for display and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Validation => "validation",
            Self::Auth => "auth",
        }
    }
}

/// Normalized failure shape for remote-auth calls.
///
/// The message is the server-reported reason when one was present in the
/// response body, otherwise the fixed per-operation fallback string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RemoteError {
    /// Failure classification.
    pub kind: ErrorKind,
    /// Human-readable reason.
    pub message: String,
}

impl RemoteError {
    /// Creates a network-kind error.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Network,
            message: message.into(),
        }
    }

    /// Creates a validation-kind error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
        }
    }

    /// Creates an auth-kind error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Auth,
            message: message.into(),
        }
    }
}

/// A remote failure attributed to the session operation that raised it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{error}")]
pub struct SessionError {
    /// Which operation family failed.
    pub family: OpFamily,
    /// The underlying normalized failure.
    pub error: RemoteError,
}

impl SessionError {
    /// Wraps a remote error with its originating operation family.
    #[must_use]
    pub const fn new(family: OpFamily, error: RemoteError) -> Self {
        Self { family, error }
    }

    /// The failure classification of the underlying error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.error.kind
    }
}

/// Result type alias for remote-auth operations.
pub type Result<T> = std::result::Result<T, RemoteError>;
