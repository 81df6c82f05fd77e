//! `SQLite` snapshot store.
//!
//! One row per whitelisted domain, each holding a whole JSON document.
//! Writes are last-write-wins document overwrites, never merges, and
//! unchanged documents are skipped so a persist call with nothing new
//! is a no-op. Restore treats an absent slot as default state and a
//! malformed one as absent (logged, then dropped).

// SQLite operations need to hold the lock for the duration of the operation.
#![allow(clippy::significant_drop_tightening)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

use super::error::{Result, StoreError};
use super::snapshot::{AuthSnapshot, ContactsSnapshot, Snapshot};

/// Slot name for the contact collection.
pub const CONTACTS_SLOT: &str = "contacts";
/// Slot name for the session fields.
pub const AUTH_SLOT: &str = "auth";

/// `SQLite`-backed store for durable state snapshots.
///
/// Holds no independent truth: it mirrors whichever fields are
/// whitelisted, and the in-memory store wins on conflict. The persisted
/// copy only seeds cold start.
pub struct PersistenceAdapter {
    conn: Mutex<Connection>,
    // Last serialization written per slot, to skip unchanged writes.
    written: Mutex<HashMap<&'static str, String>>,
}

impl PersistenceAdapter {
    /// Opens (or creates) the snapshot store at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or
    /// initialized.
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let adapter = Self {
            conn: Mutex::new(conn),
            written: Mutex::new(HashMap::new()),
        };
        adapter.initialize_schema()?;
        Ok(adapter)
    }

    /// Creates an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let adapter = Self {
            conn: Mutex::new(conn),
            written: Mutex::new(HashMap::new()),
        };
        adapter.initialize_schema()?;
        Ok(adapter)
    }

    /// Initializes the database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute_batch(
            r"
            -- One JSON document per whitelisted domain.
            CREATE TABLE IF NOT EXISTS snapshots (
                slot TEXT PRIMARY KEY,
                document TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Reads the durable snapshot at startup.
    ///
    /// Absence is not an error: a missing slot yields that domain's
    /// default. A document that no longer parses is logged and dropped,
    /// which is the versionless format's only migration story.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database itself cannot be read.
    pub fn restore(&self) -> Result<Snapshot> {
        let contacts = self
            .read_slot(CONTACTS_SLOT)?
            .map_or_else(ContactsSnapshot::default, |doc| {
                Self::parse_slot(CONTACTS_SLOT, &doc)
            });
        let auth = self
            .read_slot(AUTH_SLOT)?
            .map_or_else(AuthSnapshot::default, |doc| {
                Self::parse_slot(AUTH_SLOT, &doc)
            });

        debug!(
            contacts = contacts.items.len(),
            authenticated = auth.identity().is_some(),
            "restored snapshot"
        );
        Ok(Snapshot { contacts, auth })
    }

    /// Writes the whole snapshot, overwriting previous documents.
    ///
    /// Called after every committed transition of the whitelisted
    /// fields. Slots whose serialization is unchanged since the last
    /// write are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails.
    pub fn persist(&self, snapshot: &Snapshot) -> Result<()> {
        let contacts_doc = serde_json::to_string(&snapshot.contacts)?;
        let auth_doc = serde_json::to_string(&snapshot.auth)?;
        self.write_if_changed(CONTACTS_SLOT, contacts_doc)?;
        self.write_if_changed(AUTH_SLOT, auth_doc)?;
        Ok(())
    }

    fn parse_slot<T: serde::de::DeserializeOwned + Default>(slot: &str, document: &str) -> T {
        match serde_json::from_str(document) {
            Ok(value) => value,
            Err(err) => {
                warn!(%slot, "dropping malformed snapshot document: {err}");
                T::default()
            }
        }
    }

    fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        let conn = self.lock_conn()?;
        let document = conn
            .query_row(
                "SELECT document FROM snapshots WHERE slot = ?1",
                params![slot],
                |row| row.get(0),
            )
            .optional()?;
        Ok(document)
    }

    fn write_if_changed(&self, slot: &'static str, document: String) -> Result<()> {
        let mut written = self
            .written
            .lock()
            .map_err(|e| StoreError::Storage(format!("Failed to acquire cache lock: {e}")))?;
        if written.get(slot) == Some(&document) {
            return Ok(());
        }

        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO snapshots (slot, document, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(slot) DO UPDATE SET
                 document = excluded.document,
                 updated_at = excluded.updated_at",
            params![slot, document, chrono::Utc::now().timestamp()],
        )?;
        debug!(%slot, "snapshot slot written");
        written.insert(slot, document);
        Ok(())
    }

    fn lock_conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Storage(format!("Failed to acquire database lock: {e}")))
    }
}

impl std::fmt::Debug for PersistenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceAdapter").finish_non_exhaustive()
    }
}
