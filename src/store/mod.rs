//! Durable snapshot storage.
//!
//! # Architecture
//!
//! ```text
//! PersistenceAdapter (SQLite, one JSON document per slot)
//!     ├── "contacts" slot → ContactsSnapshot {items}
//!     └── "auth" slot     → AuthSnapshot {token, currentUser, isVerified}
//! ```
//!
//! The adapter is a side-effecting subscriber: after every committed
//! transition the container hands it a fresh [`Snapshot`] and it writes
//! whichever slots changed. It runs first at startup to seed initial
//! state, and it never originates state of its own.

mod error;
mod persistence;
mod snapshot;

pub use error::{Result, StoreError};
pub use persistence::{PersistenceAdapter, AUTH_SLOT, CONTACTS_SLOT};
pub use snapshot::{AuthSnapshot, ContactsSnapshot, Snapshot};
