//! Contact form validation gate.
//!
//! The form collaborator runs this gate before a draft reaches the
//! repository; the repository itself does not re-validate. A draft that
//! passes is well-formed by definition.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::{ContactError, Result};

/// Minimum contact name length.
pub const NAME_MIN: usize = 3;
/// Maximum contact name length.
pub const NAME_MAX: usize = 50;

// Optional leading +, a first digit 1-9, then 6 to 14 further digits,
// dashes, or spaces.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9][0-9-\s]{6,14}$").expect("valid phone regex"));

/// Validates a contact draft.
///
/// # Errors
///
/// Returns [`ContactError::NameLength`] when the name falls outside
/// [`NAME_MIN`]..=[`NAME_MAX`] characters, or
/// [`ContactError::InvalidNumber`] when the number does not match the
/// phone pattern.
pub fn validate(name: &str, number: &str) -> Result<()> {
    let len = name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        return Err(ContactError::NameLength {
            min: NAME_MIN,
            max: NAME_MAX,
        });
    }
    if !PHONE_RE.is_match(number) {
        return Err(ContactError::InvalidNumber);
    }
    Ok(())
}
