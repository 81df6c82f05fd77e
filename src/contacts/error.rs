//! Error types for contact form validation.

use thiserror::Error;

/// Rejection reasons from the contact form gate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactError {
    /// Name is shorter or longer than the allowed range.
    #[error("Name must be between {min} and {max} characters")]
    NameLength {
        /// Minimum allowed length.
        min: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// Number does not look like a phone number.
    #[error("Invalid phone number format")]
    InvalidNumber,
}

/// Result type alias for contact form validation.
pub type Result<T> = std::result::Result<T, ContactError>;
