//! The whitelisted subset of state written to durable storage.
//!
//! Two slots, mirroring the in-memory owners: `contacts` holds the
//! collection, `auth` holds token/currentUser/isVerified. The filter
//! string is deliberately absent: it is session-scoped. Documents are
//! versionless; a format change has no migration path and malformed
//! documents are dropped at restore.

use serde::{Deserialize, Serialize};

use crate::auth::{Identity, User};
use crate::contacts::Contact;

/// Durable form of the contact collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactsSnapshot {
    /// Contacts in insertion order.
    #[serde(default)]
    pub items: Vec<Contact>,
}

/// Durable form of the session's whitelisted fields.
///
/// Token and user are stored as separate optional fields on the wire,
/// but only a complete pair re-hydrates an identity; a token without a
/// user (or vice versa) is treated as absent so the atomicity invariant
/// holds across restarts too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    /// Bearer token, if a session was active.
    #[serde(default)]
    pub token: Option<String>,
    /// The authenticated user, if a session was active.
    #[serde(default)]
    pub current_user: Option<User>,
    /// Whether the email was verified.
    #[serde(default)]
    pub is_verified: bool,
}

impl AuthSnapshot {
    /// Builds the durable form from the live session fields.
    #[must_use]
    pub fn capture(identity: Option<&Identity>, is_verified: bool) -> Self {
        Self {
            token: identity.map(|i| i.token.clone()),
            current_user: identity.map(|i| i.user.clone()),
            is_verified,
        }
    }

    /// Re-pairs token and user into an identity.
    ///
    /// Returns `None` unless both halves are present.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        match (&self.token, &self.current_user) {
            (Some(token), Some(user)) => Some(Identity {
                user: user.clone(),
                token: token.clone(),
            }),
            _ => None,
        }
    }
}

/// Everything the store persists, one field per durable slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// The `contacts` slot.
    pub contacts: ContactsSnapshot,
    /// The `auth` slot.
    pub auth: AuthSnapshot,
}
