//! The per-process state container.
//!
//! [`PhonebookCore`] wires the session manager, contact repository,
//! filter state, and persistence adapter together. Rendering
//! collaborators dispatch intents through it and read derived state
//! back; they never touch the owners directly. Constructed once per
//! process; there is no ambient singleton.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::auth::{
    AuthApi, Credentials, RegisterProfile, RemoteAuthClient, RemoteError, SessionError,
    SessionManager, User,
};
use crate::contacts::{form, Contact, ContactError, ContactRepository, FilterState};
use crate::store::{AuthSnapshot, ContactsSnapshot, PersistenceAdapter, Snapshot, StoreError};

/// Error type for container intents.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The contact form gate rejected the draft.
    #[error(transparent)]
    Contact(#[from] ContactError),

    /// A session operation failed remotely.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The snapshot store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The remote client could not be constructed.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Core interface for phonebook functionality.
///
/// Owns all application state and re-persists the whitelisted snapshot
/// after every committed transition. At startup the persisted snapshot
/// is restored before any intent is accepted, optionally re-hydrating
/// an authenticated session.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use phonebook_core::PhonebookCore;
///
/// let mut core = PhonebookCore::new("http://localhost:8000", Path::new("/data/phonebook"))?;
/// core.add_contact("Alice", "+1 234-567-8901")?;
/// ```
pub struct PhonebookCore {
    session: SessionManager,
    contacts: ContactRepository,
    filter: FilterState,
    persistence: PersistenceAdapter,
}

impl PhonebookCore {
    /// Creates the container against a remote base URL and data
    /// directory, restoring any persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory or database cannot be
    /// created, or the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, data_dir: &Path) -> Result<Self, CoreError> {
        std::fs::create_dir_all(data_dir)
            .map_err(|e| StoreError::Storage(format!("Failed to create data directory: {e}")))?;

        let client = RemoteAuthClient::new(base_url)?;
        let persistence = PersistenceAdapter::new(&data_dir.join("phonebook.db"))?;
        Self::with_parts(Arc::new(client), persistence)
    }

    /// Creates the container from explicit collaborators.
    ///
    /// Used by tests to substitute an in-memory [`AuthApi`] and store;
    /// runs the same restore path as [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted snapshot cannot be read.
    pub fn with_parts(
        client: Arc<dyn AuthApi>,
        persistence: PersistenceAdapter,
    ) -> Result<Self, CoreError> {
        let snapshot = persistence.restore()?;
        let mut session = SessionManager::new(client);
        session.rehydrate(snapshot.auth.identity(), snapshot.auth.is_verified);

        Ok(Self {
            session,
            contacts: ContactRepository::from_items(snapshot.contacts.items),
            filter: FilterState::new(),
            persistence,
        })
    }

    // ==================== Contact intents ====================

    /// Adds a contact after running the form gate.
    ///
    /// # Errors
    ///
    /// Returns the gate's rejection without touching the repository, or
    /// a store error if the snapshot write fails.
    pub fn add_contact(&mut self, name: &str, number: &str) -> Result<Contact, CoreError> {
        form::validate(name, number)?;
        let contact = self.contacts.add(name, number);
        self.persist()?;
        Ok(contact)
    }

    /// Removes the contact with the given id.
    ///
    /// A missing id is a benign no-op and is not persisted.
    ///
    /// # Errors
    ///
    /// Returns a store error if the snapshot write fails.
    pub fn remove_contact(&mut self, id: &str) -> Result<bool, CoreError> {
        let removed = self.contacts.remove(id);
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Replaces the name filter. Transient; never persisted.
    pub fn change_filter(&mut self, name: impl Into<String>) {
        self.filter.set(name);
    }

    // ==================== Session intents ====================

    /// Registers a new account; does not authenticate.
    ///
    /// # Errors
    ///
    /// Returns the remote failure (also visible via
    /// [`last_error`](Self::last_error)) or a store error.
    pub async fn register(&mut self, profile: &RegisterProfile) -> Result<User, CoreError> {
        let result = self.session.register(profile).await;
        self.persist()?;
        Ok(result?)
    }

    /// Logs in; on success the session holds user and token together.
    ///
    /// # Errors
    ///
    /// Returns the remote failure (also visible via
    /// [`last_error`](Self::last_error)) or a store error.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<(), CoreError> {
        let result = self.session.login(credentials).await;
        self.persist()?;
        Ok(result?)
    }

    /// Confirms the user's email address.
    ///
    /// # Errors
    ///
    /// Returns the remote failure (also visible via
    /// [`last_error`](Self::last_error)) or a store error.
    pub async fn verify_email(&mut self, token: &str) -> Result<String, CoreError> {
        let result = self.session.verify_email(token).await;
        self.persist()?;
        Ok(result?)
    }

    /// Ends the session locally; never fails remotely.
    ///
    /// # Errors
    ///
    /// Returns a store error if the snapshot write fails.
    pub fn logout(&mut self) -> Result<(), CoreError> {
        self.session.logout();
        self.persist()?;
        Ok(())
    }

    // ==================== Collaborator reads ====================

    /// Whether a bearer token is currently held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Whether a remote call is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    /// Whether the email was verified.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.session.is_verified()
    }

    /// The most recent un-cleared remote failure.
    #[must_use]
    pub const fn last_error(&self) -> Option<&SessionError> {
        self.session.last_error()
    }

    /// The session owner, for reads beyond the derived flags.
    #[must_use]
    pub const fn session(&self) -> &SessionManager {
        &self.session
    }

    /// The full contact collection in insertion order.
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        self.contacts.items()
    }

    /// The contacts passing the current filter, lazily.
    pub fn filtered_contacts(&self) -> impl Iterator<Item = &Contact> + '_ {
        self.contacts.filtered(&self.filter)
    }

    /// The current filter string.
    #[must_use]
    pub fn filter(&self) -> &str {
        self.filter.name()
    }

    /// Derives and writes the whitelisted snapshot.
    fn persist(&self) -> Result<(), StoreError> {
        let snapshot = Snapshot {
            contacts: ContactsSnapshot {
                items: self.contacts.items().to_vec(),
            },
            auth: AuthSnapshot::capture(self.session.identity(), self.session.is_verified()),
        };
        self.persistence.persist(&snapshot)
    }
}

impl std::fmt::Debug for PhonebookCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhonebookCore")
            .field("session", &self.session)
            .field("contacts", &self.contacts.len())
            .field("filter", &self.filter.name())
            .finish_non_exhaustive()
    }
}
