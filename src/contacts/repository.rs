//! Contact collection repository.

use tracing::debug;

use super::filter::FilterState;
use super::types::Contact;

/// Owner of the contact collection.
///
/// The collection is insertion-ordered; new contacts append. The
/// repository accepts any well-formed contact; the form gate
/// ([`crate::contacts::form::validate`]) runs before a draft gets here
/// and is not re-enforced.
#[derive(Debug, Clone, Default)]
pub struct ContactRepository {
    items: Vec<Contact>,
}

impl ContactRepository {
    /// Creates an empty repository.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates a repository seeded from restored contacts.
    #[must_use]
    pub const fn from_items(items: Vec<Contact>) -> Self {
        Self { items }
    }

    /// Appends a contact with a freshly generated id and returns it.
    pub fn add(&mut self, name: impl Into<String>, number: impl Into<String>) -> Contact {
        let contact = Contact::new(name, number);
        debug!(id = %contact.id, "contact added");
        self.items.push(contact.clone());
        contact
    }

    /// Removes the contact with the given id.
    ///
    /// Returns whether a contact was removed; a missing id is a benign
    /// no-op, not an error.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|contact| contact.id != id);
        let removed = self.items.len() < before;
        if removed {
            debug!(%id, "contact removed");
        }
        removed
    }

    /// The full collection in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Contact] {
        &self.items
    }

    /// Number of contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lazy view of contacts whose name passes the filter.
    ///
    /// Restartable: each call walks the collection afresh, preserving
    /// insertion order.
    pub fn filtered<'a>(
        &'a self,
        filter: &'a FilterState,
    ) -> impl Iterator<Item = &'a Contact> + 'a {
        self.items
            .iter()
            .filter(move |contact| filter.matches(&contact.name))
    }
}
